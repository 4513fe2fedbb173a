/// Error types for the `pipedag` binary and its HTTP routes.
///
/// [`ServerError`] is the top-level error type for the binary. Every variant
/// maps to a stable exit code via [`ServerError::exit_code`]:
///
/// - Exit code **2**: input failure: bad configuration or an unreadable
///   `check` input. These errors terminate before any graph is checked.
/// - Exit code **1**: runtime failure: the service could not bind, serve,
///   or write its output.
///
/// [`ApiError`] is the per-request error returned by route handlers. It never
/// terminates the process.
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

// ---------------------------------------------------------------------------
// ServerError
// ---------------------------------------------------------------------------

/// All error conditions that the `pipedag` binary can produce.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    // --- Exit code 2: input failures ---
    /// The `--host` value is not an IP address.
    #[error("invalid bind address {host:?}: {detail}")]
    InvalidBindAddress {
        /// The rejected host string.
        host: String,
        /// Parser message.
        detail: String,
    },

    /// An `--allowed-origin` value cannot be used as a CORS origin.
    #[error("invalid allowed origin {origin:?}: {detail}")]
    InvalidOrigin {
        /// The rejected origin string.
        origin: String,
        /// Why the origin was rejected.
        detail: String,
    },

    /// A file argument could not be found on the filesystem.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    #[error("file too large: {input} exceeded limit of {limit} bytes")]
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        input: String,
        /// The configured size limit in bytes.
        limit: u64,
    },

    /// The input bytes are not valid UTF-8.
    #[error("invalid UTF-8 in {input}: first invalid byte at offset {byte_offset}")]
    InvalidUtf8 {
        /// `"-"` for stdin, or the filesystem path.
        input: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// Any other I/O error while reading input.
    #[error("I/O error reading {input}: {detail}")]
    ReadFailed {
        /// `"-"` for stdin, or the filesystem path.
        input: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input is not a pipeline JSON document.
    #[error("failed to parse {input}: {detail}")]
    ParseFailed {
        /// `"-"` for stdin, or the filesystem path.
        input: String,
        /// Parser message with line and column.
        detail: String,
    },

    // --- Exit code 1: runtime failures ---
    /// The subscriber for log output could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The listener could not bind to the configured address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Writing the report to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl ServerError {
    /// Returns the process exit code for this error.
    ///
    /// - `2`: input failure (bad configuration, unreadable or unparseable
    ///   input).
    /// - `1`: runtime failure (bind, serve, logging, output).
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidBindAddress { .. }
            | Self::InvalidOrigin { .. }
            | Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::ReadFailed { .. }
            | Self::ParseFailed { .. } => 2,

            Self::Logging(_)
            | Self::Runtime(_)
            | Self::Bind { .. }
            | Self::Serve(_)
            | Self::Output(_) => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors a route handler reports to the HTTP caller.
///
/// Serialized as `{"detail": "<message>"}` with the status of the underlying
/// rejection: 400 for malformed JSON, 415 for a missing JSON content type,
/// 413 for an oversized body, and 422 for JSON that does not have the
/// pipeline shape.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be extracted as a pipeline.
    #[error(transparent)]
    Rejected(#[from] JsonRejection),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Rejected(rejection) => rejection.body_text(),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
