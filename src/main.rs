// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, collect credentials, build the
//   client and downloader, hand off to the driver loop.
// - Returns `anyhow::Result` so download failures end the run with an
//   error message instead of a panic.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use dialoguer::{Input, Password};

use neveo_dl::api::EndpointClient;
use neveo_dl::cli::Cli;
use neveo_dl::download::Downloader;
use neveo_dl::driver::run_list;
use neveo_dl::logging::init_logging;

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Cli::parse();
    init_logging();

    // Anything not passed as a flag is prompted for. `Password` keeps
    // the input hidden in the terminal.
    let login: String = match args.login {
        Some(login) => login,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password: String = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };
    tracing::debug!("login : {}", login);

    if args.action != "list" {
        tracing::warn!("unknown action {:?}, only \"list\" is implemented", args.action);
        return Ok(());
    }

    let mut client = EndpointClient::new(&args.url, &login, &password)?;
    let downloader = Downloader::new("downloads")?;
    let stats = run_list(&mut client, &downloader)?;

    tracing::info!(
        "extract media done in {} sec ({} pages, {} downloads)",
        start.elapsed().as_secs(),
        stats.pages_fetched,
        stats.downloaded
    );
    Ok(())
}
