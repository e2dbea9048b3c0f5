//! HTTP request handlers

mod feedback;
mod health;
mod helpers;
mod pollination;

pub use feedback::submit_feedback;
pub use health::health_check;
pub use pollination::submit_pollination;
