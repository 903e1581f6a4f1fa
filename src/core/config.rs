//! Game configuration types.
//!
//! Games configure the engine at startup by providing:
//! - `CardTheme`: symbol and colour stops for one pair
//! - `GameConfig`: the themes plus turn pacing and scoring
//!
//! The default configuration is the classic 8-pair emoji deck.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};

/// Upper bound on pairs per deck.
pub const MAX_PAIRS: usize = 1024;

/// Presentation data shared by both cards of a pair.
///
/// The engine never interprets these fields; they are carried through to
/// observers so a presentation layer can draw the card face.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTheme {
    /// Display token (usually an emoji).
    pub symbol: String,
    /// First colour stop of the card-face gradient.
    pub gradient_start: String,
    /// Second colour stop of the card-face gradient.
    pub gradient_end: String,
}

impl CardTheme {
    /// Create a new theme.
    pub fn new(
        symbol: impl Into<String>,
        gradient_start: impl Into<String>,
        gradient_end: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            gradient_start: gradient_start.into(),
            gradient_end: gradient_end.into(),
        }
    }

    /// Create a theme with the default purple gradient.
    pub fn plain(symbol: impl Into<String>) -> Self {
        Self::new(symbol, "#667eea", "#764ba2")
    }
}

/// The classic 8-pair deck.
#[must_use]
pub fn default_themes() -> Vec<CardTheme> {
    vec![
        CardTheme::new("🚀", "#667eea", "#764ba2"), // Purple
        CardTheme::new("🎮", "#f093fb", "#f5576c"), // Pink
        CardTheme::new("🌟", "#4facfe", "#00f2fe"), // Cyan
        CardTheme::new("🔥", "#43e97b", "#38f9d7"), // Green
        CardTheme::new("💎", "#fa709a", "#fee140"), // Sunset
        CardTheme::new("🎯", "#a8edea", "#fed6e3"), // Soft
        CardTheme::new("🌈", "#ff0844", "#ffb199"), // Coral
        CardTheme::new("⚡", "#5ee7df", "#b490ca"), // Cool
    ]
}

/// Complete game configuration.
///
/// Loaded once and treated as immutable by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// One theme per pair. The deck has `2 * themes.len()` cards.
    pub themes: Vec<CardTheme>,

    /// Pause after the second flip before the turn resolves.
    pub reveal_delay_ms: u32,

    /// Pause after a miss before both cards turn face-down.
    pub flip_back_delay_ms: u32,

    /// Base points for a match, multiplied by the combo.
    pub points_per_match: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            reveal_delay_ms: 600,
            flip_back_delay_ms: 200,
            points_per_match: 100,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default deck with both delays compressed to zero.
    #[must_use]
    pub fn instant() -> Self {
        Self::default().with_delays(0, 0)
    }

    /// Replace the pair themes.
    #[must_use]
    pub fn with_themes(mut self, themes: Vec<CardTheme>) -> Self {
        self.themes = themes;
        self
    }

    /// Use plain-gradient themes for the given symbols.
    #[must_use]
    pub fn with_symbols<S: Into<String>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.themes = symbols.into_iter().map(CardTheme::plain).collect();
        self
    }

    /// Set both turn delays.
    #[must_use]
    pub fn with_delays(mut self, reveal_ms: u32, flip_back_ms: u32) -> Self {
        self.reveal_delay_ms = reveal_ms;
        self.flip_back_delay_ms = flip_back_ms;
        self
    }

    /// Set the base points per match.
    #[must_use]
    pub fn with_points_per_match(mut self, points: u32) -> Self {
        self.points_per_match = points;
        self
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.themes.len()
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.themes.len() * 2
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the themes can form a valid deck.
    pub fn validate(&self) -> Result<()> {
        let count = self.themes.len();
        if count == 0 {
            return Err(ConfigError::NoPairs);
        }
        if count > MAX_PAIRS {
            return Err(ConfigError::TooManyPairs {
                count,
                max: MAX_PAIRS,
            });
        }

        for (pair, theme) in self.themes.iter().enumerate() {
            if theme.symbol.is_empty() {
                return Err(ConfigError::EmptySymbol { pair });
            }
            if let Some(first) = self.themes[..pair]
                .iter()
                .position(|t| t.symbol == theme.symbol)
            {
                return Err(ConfigError::DuplicateSymbol {
                    symbol: theme.symbol.clone(),
                    first,
                    second: pair,
                });
            }
        }

        Ok(())
    }
}
