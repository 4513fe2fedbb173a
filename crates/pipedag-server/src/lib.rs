//! HTTP service and CLI plumbing around `pipedag-core`.
//!
//! The binary lives in `main.rs`; everything it wires together is exposed
//! here so that integration tests can drive the router directly.
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod routes;

pub use cli::{Cli, Command, LogFormat, PathOrStdin, ServeArgs};
pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use routes::router;
