/// Command module for the `pipedag` binary.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or a
/// [`crate::error::ServerError`] on failure.
pub mod check;
pub mod serve;
