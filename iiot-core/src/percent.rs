use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Percentage value in the range 0–100 (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent(NotNan<f64>);

impl Percent {
    pub fn new(value: f64) -> Result<Self, CoreError> {
        let value = NotNan::new(value).map_err(|_| CoreError::NotANumber)?;
        if !(0.0..=100.0).contains(&value.into_inner()) {
            return Err(CoreError::PercentOutOfRange(value.into_inner()));
        }
        Ok(Self(value))
    }

    /// Like [`Percent::new`] but pulls out-of-range values onto the nearest
    /// bound. NaN becomes zero.
    pub fn clamped(value: f64) -> Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
        Self(NotNan::new(value).unwrap_or_default())
    }

    pub fn value(self) -> f64 {
        self.0.into_inner()
    }

    /// The percentage as a fraction in 0.0..=1.0.
    pub fn fraction(self) -> f64 {
        self.value() / 100.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::clamped(0.0)
    }
}

impl TryFrom<f64> for Percent {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(percent: Percent) -> Self {
        percent.value()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Percent::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Percent::new(100.0).unwrap().value(), 100.0);
        assert_eq!(
            Percent::new(100.5),
            Err(CoreError::PercentOutOfRange(100.5))
        );
        assert_eq!(Percent::new(-1.0), Err(CoreError::PercentOutOfRange(-1.0)));
        assert_eq!(Percent::new(f64::NAN), Err(CoreError::NotANumber));
    }

    #[test]
    fn clamped_never_fails() {
        assert_eq!(Percent::clamped(140.0).value(), 100.0);
        assert_eq!(Percent::clamped(-3.0).value(), 0.0);
        assert_eq!(Percent::clamped(f64::NAN).value(), 0.0);
    }

    #[test]
    fn deserialization_rejects_out_of_range() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            value: Percent,
        }

        let ok: Wrapper = serde_json::from_str(r#"{"value": 85}"#).unwrap();
        assert_eq!(ok.value.to_string(), "85%");

        let err = serde_json::from_str::<Wrapper>(r#"{"value": 120}"#).unwrap_err();
        assert!(err.to_string().contains("outside 0..=100"));
    }
}
