use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("percentage is not a number")]
    NotANumber,

    #[error("percentage {0} is outside 0..=100")]
    PercentOutOfRange(f64),
}
