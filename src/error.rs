use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    InvalidTarget(String),
    CollectionFailure(String),
    TotalUndetermined(String),
    ZeroTotal(String),
    InvalidPercent(f64),
    Configuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTarget(target) => write!(f, "{} is not a valid directory.", target),
            Error::CollectionFailure(message) => write!(f, "error executing du: {}", message),
            Error::TotalUndetermined(target) => write!(
                f,
                "could not determine total size for the target directory '{}'.",
                target
            ),
            Error::ZeroTotal(target) => write!(
                f,
                "total size of '{}' is 0, percentages are undefined.",
                target
            ),
            Error::InvalidPercent(percent) => {
                write!(f, "percentage must be between 0 and 100, got {}", percent)
            }
            Error::Configuration(message) => write!(f, "configuration error: {}", message),
        }
    }
}

impl std::error::Error for Error {}
