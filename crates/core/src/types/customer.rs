//! Customer classes used for commission selection.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown customer type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid customer type: {0} (expected b2b or b2c)")]
pub struct CustomerTypeError(pub String);

/// Class of customer a price is computed for.
///
/// Business customers (`b2b`) and consumers (`b2c`) pay different commission
/// rates on the same supplier price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    /// Registered business customer.
    B2b,
    /// Consumer.
    B2c,
}

impl CustomerType {
    /// Lowercase wire name (`b2b` / `b2c`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B2b => "b2b",
            Self::B2c => "b2c",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CustomerType {
    type Err = CustomerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b2b" => Ok(Self::B2b),
            "b2c" => Ok(Self::B2c),
            _ => Err(CustomerTypeError(s.to_owned())),
        }
    }
}
