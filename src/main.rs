use std::process::ExitCode;

use clap::Parser;

use flatlinker::cli::Cli;
use flatlinker::errors::FlatlinkerError;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match flatlinker::runtime::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<FlatlinkerError>() {
                Some(err) => eprintln!("{}", err.format_colored()),
                None => eprintln!("[ERROR] {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
