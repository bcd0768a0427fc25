// sishc admin panel - Handler error mapping
// Every handler failure is the same generic server error; there are no
// error pages and no recovery.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Wrapper so handlers can use `?` on store and parse failures.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal Server Error: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
