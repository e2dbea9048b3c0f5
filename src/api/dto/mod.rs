//! Data Transfer Objects (DTOs)

mod request;
mod response;

pub use request::{SctFeedbackRequest, SthPollinationRequest};
pub use response::{HealthResponse, SthPollinationResponse};
