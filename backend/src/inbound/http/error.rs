//! Rendering of domain errors as HTTP responses.
//!
//! Every failure leaves as the JSON [`Error`] envelope with the status implied
//! by its [`ErrorCode`], the `trace-id` header when one was captured, and a
//! private no-cache policy so a shared cache never replays a 404 for a listing
//! that has since been published. Internal messages are logged and replaced
//! before they reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::cache_control::private_no_cache_header;

pub use crate::domain::ApiResult;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The payload a client may see for `error`.
fn client_view(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            error!(trace_id = error.trace_id(), message = error.message(), "internal error");
            let redacted = Error::internal(REDACTED_MESSAGE);
            match error.trace_id() {
                Some(id) => redacted.with_trace_id(id.to_owned()),
                None => redacted,
            }
        }
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id = error.trace_id(), message = error.message(), "store unavailable");
            error.clone()
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(private_no_cache_header());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}
