use clap::Parser;
use stac_validator::StacValidator;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = StacValidator::parse();
    match args.run(true) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}
