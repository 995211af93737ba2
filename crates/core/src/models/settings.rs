use serde::{Deserialize, Serialize};

/// User-configurable settings, session-scoped and owned by the facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency all monetary figures are converted into for display
    /// (e.g., "UZS", "USD", "EUR").
    pub display_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: "UZS".to_string(),
        }
    }
}
