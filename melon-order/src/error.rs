use melon_core::{ErrorKind, OrderCategory, ValidationError};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("{operation} is not supported for {category} orders")]
    UnsupportedOperation {
        operation: &'static str,
        category: OrderCategory,
    },
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(err) => err.kind(),
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::UnsupportedOperation { .. } => ErrorKind::Unsupported,
        }
    }
}
