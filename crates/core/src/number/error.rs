use thiserror::Error;

/// Errors that can occur when parsing an exact-precision number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("Number is empty")]
    Empty,
    #[error("Invalid number: {0}")]
    Invalid(String),
    #[error("Number has {digits} significant digits (max {max})")]
    TooPrecise { digits: usize, max: usize },
    #[error("Number out of range: {0}")]
    OutOfRange(String),
}
