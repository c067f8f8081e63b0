use crate::engine::STANDARD_LAYOUT;

/// Session configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Piece-placement layout of the starting board.
    pub layout: String,
    /// Text shown before the side to move when asking for input.
    pub prompt: String,
}

pub const DEFAULT_PROMPT: &str = "What's your move?";

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// The layout is not validated here; building the game does that.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        AppConfig {
            layout: lookup("CHESS_LAYOUT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| STANDARD_LAYOUT.to_string()),
            prompt: lookup("CHESS_PROMPT").unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            layout: STANDARD_LAYOUT.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}
