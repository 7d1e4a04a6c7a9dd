use serde::{Deserialize, Serialize};

/// Status reported when the transport failed before any response arrived.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub body: Option<String>,
    pub status_code: u16,
}

impl FetchResult {
    pub fn new(body: String, status_code: u16) -> Self {
        Self {
            body: Some(body),
            status_code,
        }
    }

    /// A failed exchange. Distinct from a real server 500, which carries a body.
    pub fn transport_failure() -> Self {
        Self {
            body: None,
            status_code: TRANSPORT_FAILURE_STATUS,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        self.body.is_none()
    }
}
