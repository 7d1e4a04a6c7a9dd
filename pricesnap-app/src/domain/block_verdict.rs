use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    Heuristic,
    Semantic,
}

impl fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heuristic => write!(f, "heuristic"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockVerdict {
    pub is_blocked: bool,
    pub reason: Option<String>,
    pub source: VerdictSource,
}

impl BlockVerdict {
    pub fn blocked(source: VerdictSource, reason: impl Into<String>) -> Self {
        Self {
            is_blocked: true,
            reason: Some(reason.into()),
            source,
        }
    }

    pub fn clear(source: VerdictSource) -> Self {
        Self {
            is_blocked: false,
            reason: None,
            source,
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}
