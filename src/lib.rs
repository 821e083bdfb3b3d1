mod client;
mod config;
mod method;
mod observable;
mod response;

pub use client::Client;
pub use config::{Config, RequestOptions, ValidateStatus};
pub use method::{validate_method, Method, UnsupportedMethodError};
pub use observable::future::ResponseFuture;
pub use observable::{Observable, Subscription};
pub use response::Response;

use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error<S, B> {
    #[error(transparent)]
    Http(http::Error),
    #[error(transparent)]
    Json(serde_json::Error),
    #[error(transparent)]
    Service(S),
    #[error(transparent)]
    Body(B),
    #[error("request failed with status code {}", .0.status.as_u16())]
    Status(Response),
}

impl<S, B> Error<S, B> {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(response) => Some(response.status),
            _ => None,
        }
    }
}
