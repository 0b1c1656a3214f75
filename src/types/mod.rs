//! Shared response types.

mod response;

pub use response::{error_response, respond, ApiResponse, ErrorBody, Failure, Success};
