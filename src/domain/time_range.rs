// Per-dashboard time range override
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub lower: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl TimeRange {
    pub fn relative(lower: impl Into<String>) -> Self {
        Self {
            lower: lower.into(),
            upper: None,
            format: None,
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::relative("now() - 1h")
    }
}
