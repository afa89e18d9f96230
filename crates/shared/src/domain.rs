use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned image identity.
///
/// The store is free to hand out numeric or textual ids; whichever form arrives is kept
/// so that it is echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ImageId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ImageId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ImageId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
