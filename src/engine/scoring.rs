//! Scoring and status messages.
//!
//! A match is worth `base * combo`, where `combo` already counts the match
//! being scored. A run of eight matches with base 100 pays
//! 100 + 200 + ... + 800 = 3600.

/// Points for a match at the given (post-increment) combo.
#[must_use]
pub fn match_points(base: u32, combo: u32) -> u32 {
    base.saturating_mul(combo)
}

/// Total for `n` consecutive matches from a zero combo.
#[must_use]
pub fn streak_total(base: u32, n: u32) -> u32 {
    (1..=n).fold(0u32, |acc, combo| acc.saturating_add(match_points(base, combo)))
}

pub mod messages {
    //! Status lines shown to the player.

    pub const START: &str = "🎮 Match the pairs!";
    pub const PICK_ANOTHER: &str = "🤔 Pick another card...";
    pub const MISS: &str = "❌ No match! Try again...";

    /// Message after a successful match.
    #[must_use]
    pub fn matched(combo: u32, points: u32) -> String {
        if combo > 1 {
            format!("🔥 {}x COMBO! +{} points!", combo, points)
        } else {
            format!("✨ Perfect match! +{} points!", points)
        }
    }

    /// Final summary once every pair is found.
    #[must_use]
    pub fn victory(score: u32, moves: u32) -> String {
        format!("🎉 YOU WIN! Score: {} | Moves: {}", score, moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_points() {
        assert_eq!(match_points(100, 1), 100);
        assert_eq!(match_points(100, 8), 800);
        assert_eq!(match_points(u32::MAX, 2), u32::MAX);
    }

    #[test]
    fn test_streak_total() {
        assert_eq!(streak_total(100, 0), 0);
        assert_eq!(streak_total(100, 1), 100);
        assert_eq!(streak_total(100, 8), 3600);
    }

    #[test]
    fn test_messages() {
        assert_eq!(messages::matched(1, 100), "✨ Perfect match! +100 points!");
        assert_eq!(messages::matched(3, 300), "🔥 3x COMBO! +300 points!");
        assert_eq!(
            messages::victory(3600, 8),
            "🎉 YOU WIN! Score: 3600 | Moves: 8"
        );
    }
}
