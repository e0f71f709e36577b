use colored::*;
use std::process;

use org_cli::cli::build_cli;
use org_cli::commands::dispatch;
use org_cli::formatting::Renderer;
use org_cli::logging::{init_logging, install_panic_hook};
use org_cli::CliContext;

#[tokio::main]
async fn main() {
    // Logging is best effort; a read-only cache dir must not stop the CLI
    let log_file = init_logging().ok();
    install_panic_hook();

    let matches = build_cli().get_matches();

    if matches.get_flag("verbose") {
        match &log_file {
            Some(path) => eprintln!("Logging to {}", path.display()),
            None => eprintln!("Logging is disabled"),
        }
    }

    let result = match CliContext::load() {
        Ok(context) => {
            let mut context = context.with_no_color(matches.get_flag("no-color"));
            let mut out = Renderer::stdout(context.render_config());
            dispatch(&matches, &mut context, &mut out).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        for message in e.messages() {
            eprintln!("{} {}", "Error:".red().bold(), message);
        }
        process::exit(1);
    }
}
