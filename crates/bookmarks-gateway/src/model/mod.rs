mod error;
mod health;

pub use error::{ErrorMessage, ErrorResponse, UnauthorizedResponse};
pub use health::HealthResponse;
