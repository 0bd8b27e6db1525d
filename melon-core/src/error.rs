/// Coarse error classes, for callers that do not care about the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Unsupported,
}

/// Rejected order inputs. Every variant is an invalid-argument failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No more than 100 melons!")]
    TooManyMelons { quantity: i32 },

    #[error("At least one melon is required, got {quantity}")]
    TooFewMelons { quantity: i32 },

    #[error("International orders require a country code")]
    MissingCountryCode,

    #[error("Splurge factor {factor} is outside 5..=9")]
    InvalidSplurgeFactor { factor: i32 },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_melons_message() {
        let err = ValidationError::TooManyMelons { quantity: 150 };
        assert_eq!(err.to_string(), "No more than 100 melons!");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_all_variants_are_invalid_argument() {
        let errors = vec![
            ValidationError::TooManyMelons { quantity: 101 },
            ValidationError::TooFewMelons { quantity: 0 },
            ValidationError::MissingCountryCode,
            ValidationError::InvalidSplurgeFactor { factor: 0 },
        ];

        for err in errors {
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }
}
