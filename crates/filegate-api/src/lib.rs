//! filegate API library
//!
//! HTTP handlers, extractors and application setup for the upload
//! validation and generative AI gateway.

mod api_doc;
pub mod constants;
pub mod error;
pub mod extractors;
mod handlers;
pub mod response;
pub mod setup;
pub mod state;
mod utils;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
