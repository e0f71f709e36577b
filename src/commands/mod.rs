pub mod auth;
pub mod orgs;
pub mod teams;
pub mod whoami;

use clap::ArgMatches;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::cli_context::CliContext;
use crate::error::{OrgError, OrgResult};
use crate::formatting::Renderer;
use crate::org_error;
use crate::views::lookup::MISSING_ORG;

pub use auth::handle_auth;
pub use orgs::handle_orgs;
pub use teams::handle_teams;
pub use whoami::handle_whoami;

/// Route a parsed command line to its handler.
pub async fn dispatch<W: Write>(
    matches: &ArgMatches,
    context: &mut CliContext,
    out: &mut Renderer<W>,
) -> OrgResult<()> {
    match matches.subcommand() {
        Some(("auth", sub_matches)) => handle_auth(sub_matches, context, out).await,
        Some(("whoami", _)) => handle_whoami(context, out).await,
        Some(("orgs", sub_matches)) => handle_orgs(sub_matches, context, out).await,
        Some(("teams", sub_matches)) => handle_teams(sub_matches, context, out).await,
        _ => Err(org_error!(
            InvalidInput,
            "Unknown command. Use 'org --help' for available commands."
        )),
    }
}

/// Org name from `--org` or the configured default.
pub(crate) fn org_name(matches: &ArgMatches, context: &CliContext) -> Option<String> {
    matches
        .get_one::<String>("org")
        .cloned()
        .or_else(|| context.org_name())
}

pub(crate) fn need_org(org: Option<String>) -> OrgResult<String> {
    org.ok_or_else(|| org_error!(InvalidInput, MISSING_ORG))
}

pub(crate) fn required<'a>(matches: &'a ArgMatches, name: &str) -> OrgResult<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| org_error!(InvalidInput, "{} is required", name))
}

/// Ask before a destructive change. Without a terminal to ask on, only
/// `--yes` lets the change through.
pub(crate) fn confirm<W: Write>(
    out: &mut Renderer<W>,
    preamble: &str,
    assume_yes: bool,
) -> OrgResult<()> {
    if assume_yes {
        return Ok(());
    }
    if !io::stdin().is_terminal() {
        return Err(OrgError::Aborted);
    }

    out.line(preamble)?;
    print!("Continue? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => Err(OrgError::Aborted),
    }
}
