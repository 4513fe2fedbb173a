use std::process::ExitCode;

use clap::Parser;
use pipedag_server::logging::{self, LogConfig};
use pipedag_server::{Cli, Command, ServerConfig, ServerError, cmd};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_flags(cli.log_format, cli.quiet, cli.verbose);
    if let Err(e) = logging::init(log_config) {
        eprintln!("error: {e}");
        return ExitCode::from(e.exit_code());
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(command: Command) -> Result<(), ServerError> {
    match command {
        Command::Serve(args) => {
            let config = ServerConfig::from_args(&args)?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(ServerError::Runtime)?;
            runtime.block_on(cmd::serve::run(config))
        }
        Command::Check {
            file,
            pretty,
            max_file_size,
        } => cmd::check::run(&file, max_file_size, pretty),
        Command::Version => {
            println!("{}", pipedag_core::version());
            Ok(())
        }
    }
}
