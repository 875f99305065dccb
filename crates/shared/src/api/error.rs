use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "backend")]
use {
    axum::{
        response::{IntoResponse, Response},
        Json,
    },
    tracing::error,
};

/// Message sent to clients for failures that have no public context attached
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error type for routes that have no typed failures of their own
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("validation failed: {}", .error_messages.join(", "))]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error_messages: vec![message.into()],
        }
    }

    /// Ok if no messages were collected
    pub fn check(error_messages: Vec<String>) -> Result<(), Self> {
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(Self { error_messages })
        }
    }
}

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug)]
pub enum ServerError<T> {
    /// A typed failure the client is told about
    Inner { code: StatusCode, inner: T },
    Validation { inner: ValidationError },
    /// Anything unexpected. The message is only logged
    Other { message: String },
    /// Wraps another error with the message shown to the client when the
    /// inner error is a server error
    WithContext { context: String, inner: Box<Self> },
}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

impl<T> ServerError<T> {
    pub fn code(&self) -> StatusCode {
        match self {
            Self::Inner { code, .. } => *code,
            Self::Validation { .. } | Self::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::WithContext { inner, .. } => inner.code(),
        }
    }

    pub fn context<S: Into<String>>(self, context: S) -> Self {
        Self::WithContext {
            context: context.into(),
            inner: Box::new(self),
        }
    }
}

impl<T: fmt::Display> ServerError<T> {
    /// The message that is safe to send back in an [ErrorBody]
    pub fn public_message(&self) -> String {
        match self {
            Self::Inner { inner, .. } => inner.to_string(),
            Self::Validation { .. } | Self::Other { .. } => INTERNAL_ERROR_MESSAGE.to_owned(),
            Self::WithContext { context, inner } => {
                if inner.code().is_server_error() {
                    context.clone()
                } else {
                    inner.public_message()
                }
            },
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { code, inner } => write!(f, "{code}: {inner}"),
            Self::Validation { inner } => write!(f, "{inner}"),
            Self::Other { message } => write!(f, "{message}"),
            Self::WithContext { context, inner } => write!(f, "{context}: {inner}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for ServerError<T> {}

pub trait ServerErrorContext<R, T> {
    /// Attach the message clients see if this turns out to be a server error
    fn context<S: Into<String>>(self, context: S) -> Result<R, ServerError<T>>;

    /// Lazy version of [ServerErrorContext::context]
    fn with_context<S: Into<String>, F: FnOnce() -> S>(
        self,
        context: F,
    ) -> Result<R, ServerError<T>>;
}

impl<R, T> ServerErrorContext<R, T> for Result<R, ServerError<T>> {
    fn context<S: Into<String>>(self, context: S) -> Result<R, ServerError<T>> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(
        self,
        context: F,
    ) -> Result<R, ServerError<T>> {
        self.map_err(|e| e.context(context()))
    }
}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

#[cfg(feature = "backend")]
impl<T> From<rusqlite::Error> for ServerError<T> {
    fn from(err: rusqlite::Error) -> Self {
        other_error!("rusqlite: {err}")
    }
}

#[cfg(feature = "backend")]
impl<T> From<deadpool_sqlite::PoolError> for ServerError<T> {
    fn from(err: deadpool_sqlite::PoolError) -> Self {
        other_error!("deadpool pool: {err}")
    }
}

#[cfg(feature = "backend")]
impl<T> From<deadpool_sqlite::InteractError> for ServerError<T> {
    fn from(err: deadpool_sqlite::InteractError) -> Self {
        other_error!("deadpool interact: {err}")
    }
}

#[cfg(feature = "backend")]
impl<T: fmt::Display> From<ServerError<T>> for deadpool_sqlite::HookError {
    fn from(err: ServerError<T>) -> Self {
        Self::Message(err.to_string())
    }
}

// Render ServerError into a json response
#[cfg(feature = "backend")]
impl<T: fmt::Display> IntoResponse for ServerError<T> {
    fn into_response(self) -> Response {
        let code = self.code();
        if code.is_server_error() {
            error!(%code, error = %self, "Request failed");
        }

        (code, Json(ErrorBody { error: self.public_message() })).into_response()
    }
}

// Extractor rejections that reach the client without passing through a route
#[cfg(feature = "backend")]
impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        ServerError::<Nothing>::from(self).into_response()
    }
}
