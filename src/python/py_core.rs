//! Card bindings for Python.

use pyo3::prelude::*;

use crate::cards::Card;

/// Read-only copy of a card.
#[pyclass(name = "Card")]
#[derive(Clone, Debug)]
pub struct PyCard(pub Card);

#[pymethods]
impl PyCard {
    #[getter]
    fn id(&self) -> u32 {
        self.0.id.raw()
    }

    #[getter]
    fn pair_id(&self) -> u32 {
        self.0.pair_id.raw()
    }

    #[getter]
    fn symbol(&self) -> String {
        self.0.symbol.clone()
    }

    /// Gradient colour stops as a `(start, end)` tuple.
    #[getter]
    fn gradient(&self) -> (String, String) {
        (self.0.gradient_start.clone(), self.0.gradient_end.clone())
    }

    #[getter]
    fn is_flipped(&self) -> bool {
        self.0.is_flipped
    }

    #[getter]
    fn is_matched(&self) -> bool {
        self.0.is_matched
    }

    fn __repr__(&self) -> String {
        format!(
            "Card(id={}, pair={}, flipped={}, matched={})",
            self.0.id.raw(),
            self.0.pair_id.raw(),
            self.0.is_flipped,
            self.0.is_matched
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        u64::from(self.0.id.raw())
    }
}
