pub mod category;
pub mod clock;
pub mod error;
pub mod splurge;

pub use category::OrderCategory;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ErrorKind, ValidationError};
pub use splurge::{FixedSplurge, SplurgeSource, ThreadRngSplurge, SPLURGE_RANGE};

/// Largest quantity a single order may carry.
pub const MAX_MELONS: i32 = 100;

/// Smallest quantity a single order may carry.
pub const MIN_MELONS: i32 = 1;

pub type CoreResult<T> = Result<T, ValidationError>;

/// Check an order quantity against the allowed bounds.
pub fn validate_quantity(quantity: i32) -> CoreResult<i32> {
    if quantity > MAX_MELONS {
        return Err(ValidationError::TooManyMelons { quantity });
    }
    if quantity < MIN_MELONS {
        return Err(ValidationError::TooFewMelons { quantity });
    }
    Ok(quantity)
}

/// Check a drawn splurge factor against `SPLURGE_RANGE`.
pub fn validate_splurge_factor(factor: i32) -> CoreResult<i32> {
    if !SPLURGE_RANGE.contains(&factor) {
        return Err(ValidationError::InvalidSplurgeFactor { factor });
    }
    Ok(factor)
}
