//! REST handlers, one file per resource.

pub mod checkin_apis;
pub mod presence_apis;
pub mod roster_apis;
pub mod session_apis;

pub use checkin_apis::*;
pub use presence_apis::*;
pub use roster_apis::*;
pub use session_apis::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::ServiceError;

/// Map a domain error to the HTTP response reported to the user.
///
/// All failures are recoverable and surfaced at the boundary of the
/// operation that produced them; none are process-fatal.
pub(crate) fn error_response(error: ServiceError) -> Response {
    match error {
        ServiceError::ValidationFailed(message) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        ServiceError::StoreUnavailable(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
        }
    }
}
