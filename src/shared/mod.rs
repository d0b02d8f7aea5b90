pub mod errors;
pub mod validations;

pub use errors::{ApiError, AppError, DomainError};
pub use validations::describe_validation_errors;
