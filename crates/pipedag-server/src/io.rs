/// File and stdin reading with size enforcement and UTF-8 validation.
///
/// Used by `pipedag check`. `pipedag-core` never touches the filesystem; all
/// reading happens here.
///
/// Key behaviours:
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - UTF-8 validation via `std::str::from_utf8` with byte-offset reporting.
/// - All I/O errors are converted to [`ServerError`] variants with exit code 2.
use std::io::Read as _;
use std::path::Path;

use crate::cli::PathOrStdin;
use crate::error::ServerError;

/// Label used for stdin in error messages.
const STDIN_LABEL: &str = "-";

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns [`ServerError`] (exit code 2) for a missing file, permission
/// denied, input larger than `max_size`, any other I/O error, or invalid
/// UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, ServerError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Returns the label used for `source` in log lines and error messages.
pub fn source_label(source: &PathOrStdin) -> String {
    match source {
        PathOrStdin::Path(path) => path.display().to_string(),
        PathOrStdin::Stdin => STDIN_LABEL.to_owned(),
    }
}

fn read_file(path: &Path, max_size: u64) -> Result<String, ServerError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error(&e, path))?
        .len();

    if file_size > max_size {
        return Err(ServerError::FileTooLarge {
            input: path.display().to_string(),
            limit: max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error(&e, path))?;
    bytes_to_string(bytes, &path.display().to_string())
}

/// Maps a `std::io::Error` from a disk-file operation to a [`ServerError`].
fn io_error(e: &std::io::Error, path: &Path) -> ServerError {
    let kind = e.kind();
    if kind == std::io::ErrorKind::NotFound {
        ServerError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == std::io::ErrorKind::PermissionDenied {
        ServerError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        ServerError::ReadFailed {
            input: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// Reads one byte past the limit so that "exactly at the limit" and "over
/// the limit" can be told apart.
fn read_stdin(max_size: u64) -> Result<String, ServerError> {
    let stdin = std::io::stdin();
    let mut limited = stdin.lock().take(max_size.saturating_add(1));
    let mut buf: Vec<u8> = Vec::new();

    limited
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::ReadFailed {
            input: STDIN_LABEL.to_owned(),
            detail: e.to_string(),
        })?;

    if buf.len() as u64 > max_size {
        return Err(ServerError::FileTooLarge {
            input: STDIN_LABEL.to_owned(),
            limit: max_size,
        });
    }

    bytes_to_string(buf, STDIN_LABEL)
}

fn bytes_to_string(bytes: Vec<u8>, label: &str) -> Result<String, ServerError> {
    String::from_utf8(bytes).map_err(|e| ServerError::InvalidUtf8 {
        input: label.to_owned(),
        byte_offset: e.utf8_error().valid_up_to(),
    })
}
