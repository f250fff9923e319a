//! audiodedupe - Exact Duplicate Audio Finder
//!
//! Entry point for the audiodedupe CLI application.

use audiodedupe::{
    cli::Cli,
    error::{ExitCode, StructuredError},
};
use clap::Parser;
use yansi::Paint;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    match audiodedupe::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                }
            } else {
                let message = format!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                eprintln!("{}", message.red());
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
