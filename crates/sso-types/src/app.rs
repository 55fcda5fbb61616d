//! Application types

use serde::{Deserialize, Serialize};

/// Identifier of a consuming application.
///
/// Zero is the wire default for an unset field and never names a real app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub i32);

impl AppId {
    /// Whether the caller left the id unset
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Raw numeric value
    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
