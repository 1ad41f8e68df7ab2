//! Per-group aggregation settings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Default minimum length, in hours, of a common window worth reporting.
pub const DEFAULT_MINIMUM_HOURS: u8 = 2;

/// Settings a group carries into the detailed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupSettings {
    /// Common free windows shorter than this are dropped. 1..=24.
    pub minimum_availability_hours: u8,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            minimum_availability_hours: DEFAULT_MINIMUM_HOURS,
        }
    }
}

impl GroupSettings {
    pub fn new(minimum_availability_hours: u8) -> Result<Self> {
        let settings = Self {
            minimum_availability_hours,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=24).contains(&self.minimum_availability_hours) {
            return Err(ValidationError::InvalidSetting(format!(
                "minimumAvailabilityHours must be 1..=24, got {}",
                self.minimum_availability_hours
            )));
        }
        Ok(())
    }

    pub fn minimum_minutes(&self) -> u32 {
        u32::from(self.minimum_availability_hours) * 60
    }
}
