use crate::config::MAX_LEVEL_LIMIT;

/// Represents errors that can occur while setting up a skip list
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Maximum level is zero or above [`MAX_LEVEL_LIMIT`]
    InvalidMaxLevel(usize),

    /// Level probability is not inside the open interval (0, 1)
    InvalidProbability(f64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMaxLevel(level) => write!(
                f,
                "SkipListError: max level must be in 1..={MAX_LEVEL_LIMIT}, got {level}"
            ),
            Self::InvalidProbability(p) => write!(
                f,
                "SkipListError: probability must be in the open interval (0, 1), got {p}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Skip list result
pub type Result<T> = std::result::Result<T, Error>;
