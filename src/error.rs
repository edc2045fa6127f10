//! Errors for caller contract violations.
//!
//! Insertion and the unsigned search API cannot fail. The only rejected
//! input is a negative radius handed to [`BkTree::try_search`](crate::BkTree::try_search).

use std::fmt;

/// Result type alias for fallible bk-index operations.
pub type Result<T> = std::result::Result<T, BkIndexError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BkIndexError {
    /// A search radius below zero. No distance is negative, so such a
    /// query has no meaning.
    NegativeRadius {
        /// The radius that was provided.
        radius: i64,
    },
}

impl fmt::Display for BkIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeRadius { radius } => {
                write!(
                    f,
                    "Search radius {} is negative. Radius must be at least 0.",
                    radius
                )
            }
        }
    }
}

impl std::error::Error for BkIndexError {}

impl BkIndexError {
    pub fn negative_radius(radius: i64) -> Self {
        Self::NegativeRadius { radius }
    }
}
