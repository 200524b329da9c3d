pub mod error;
pub mod saga;

pub use error::AppError;
pub use saga::SagaLog;
