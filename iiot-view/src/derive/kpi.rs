use iiot_core::{CoreError, Percent};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discrete health band of a KPI percentage.
///
/// Variants are declared worst first so that `Ord` ranks `Good` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiBand {
    Critical,
    Warning,
    Good,
}

impl KpiBand {
    /// Gauge fill for this band.
    pub fn color(self) -> &'static str {
        match self {
            KpiBand::Good => "#10b981",
            KpiBand::Warning => "#f59e0b",
            KpiBand::Critical => "#ef4444",
        }
    }
}

#[derive(Debug, Error)]
pub enum ThresholdError {
    #[error("invalid threshold: {0}")]
    Invalid(#[from] CoreError),

    #[error("warning threshold {warning} is above good threshold {good}")]
    Inverted { good: f64, warning: f64 },
}

/// Lower bounds of the `good` and `warning` bands. Both are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct BandThresholds {
    good: Percent,
    warning: Percent,
}

#[derive(Deserialize)]
struct RawThresholds {
    #[serde(default = "default_good")]
    good: f64,
    #[serde(default = "default_warning")]
    warning: f64,
}

fn default_good() -> f64 {
    85.0
}

fn default_warning() -> f64 {
    75.0
}

impl TryFrom<RawThresholds> for BandThresholds {
    type Error = ThresholdError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.good, raw.warning)
    }
}

impl BandThresholds {
    pub fn new(good: f64, warning: f64) -> Result<Self, ThresholdError> {
        let good = Percent::new(good)?;
        let warning = Percent::new(warning)?;
        if warning > good {
            return Err(ThresholdError::Inverted {
                good: good.value(),
                warning: warning.value(),
            });
        }
        Ok(Self { good, warning })
    }

    pub fn good(&self) -> Percent {
        self.good
    }

    pub fn warning(&self) -> Percent {
        self.warning
    }

    pub fn band(&self, value: f64) -> KpiBand {
        // NaN fails both comparisons and lands in `Critical`.
        if value >= self.good.value() {
            KpiBand::Good
        } else if value >= self.warning.value() {
            KpiBand::Warning
        } else {
            KpiBand::Critical
        }
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            good: Percent::clamped(default_good()),
            warning: Percent::clamped(default_warning()),
        }
    }
}

/// Band `value` with the default thresholds (good ≥ 85, warning ≥ 75).
pub fn band(value: f64) -> KpiBand {
    BandThresholds::default().band(value)
}
