//! Codec configuration.

use serde::{Deserialize, Serialize};

use crate::error::GhostError;
use crate::rounding::{FloatRounder, MidpointRounding, MAX_DIGITS};

/// Options shared by the encoding and decoding side of a delta stream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Round every float to this many decimals when writing and reading records.
    /// `None` keeps full precision.
    #[serde(default)]
    pub rounding: Option<FloatRounder>,
}

impl CodecConfig {
    /// Config used by recorders: six decimals, ties to even.
    pub fn recording() -> Self {
        Self {
            rounding: Some(FloatRounder::default()),
        }
    }

    pub fn with_rounding(digits: u32, midpoint: MidpointRounding) -> Self {
        Self {
            rounding: Some(FloatRounder { digits, midpoint }),
        }
    }

    pub fn validate(&self) -> Result<(), GhostError> {
        match self.rounding {
            Some(r) if r.digits > MAX_DIGITS => Err(GhostError::InvalidConfig {
                reason: format!("rounding digits {} exceeds {MAX_DIGITS}", r.digits),
            }),
            _ => Ok(()),
        }
    }
}
