//! filegate infrastructure
//!
//! Shared HTTP middleware and tracing setup for the API binary.

pub mod middleware;
pub mod telemetry;

pub use middleware::{get_request_id, request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use telemetry::{init_telemetry, shutdown_telemetry, LogFormat};
