use thiserror::Error;

/// The error type of `RangeDict` and `Interval` operations
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The interval bounds do not describe a valid range
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// The interval overlaps with an interval already stored in the map
    #[error("interval {key} overlaps with existing interval {existing}")]
    Overlap {
        /// The interval being inserted
        key: String,
        /// The stored interval it collides with
        existing: String,
    },
    /// No stored interval matches the given interval or point
    #[error("key not found: {0}")]
    KeyNotFound(String),
    /// A point operation was given NaN
    #[error("point is not a number")]
    NotANumber,
    /// A bulk operation failed on one of its entries
    #[error("invalid mapping: {0}")]
    InvalidMapping(#[source] Box<Error>),
}

impl Error {
    /// Wrap an error raised while inserting from a mapping
    pub(crate) fn mapping(self) -> Self {
        match self {
            Error::InvalidMapping(_) => self,
            other => Error::InvalidMapping(Box::new(other)),
        }
    }
}
