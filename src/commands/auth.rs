use clap::ArgMatches;
use std::io::Write;

use crate::cli_context::CliContext;
use crate::error::OrgResult;
use crate::formatting::Renderer;

pub async fn handle_auth<W: Write>(
    matches: &ArgMatches,
    context: &mut CliContext,
    out: &mut Renderer<W>,
) -> OrgResult<()> {
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        context.set_api_key(api_key.clone())?;
        out.line("API token saved successfully!")?;

        // Check the token right away
        let client = context.verified_client()?;
        match client.who_am_i().await {
            Ok(session) => out.line(&format!("Connected as: {}", session.username))?,
            Err(e) => out.line(&format!("Failed to authenticate: {}", e))?,
        }
    } else if matches.get_flag("show") {
        match context.api_key() {
            Ok(key) => {
                let masked = mask(key);
                out.line(&format!("API token: {}", masked))?
            }
            Err(_) => out.line("No API token configured")?,
        }
    } else {
        out.line("Usage: org auth --api-key <KEY> or org auth --show")?;
    }
    Ok(())
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
