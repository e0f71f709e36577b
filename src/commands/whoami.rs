use std::io::Write;

use crate::cli_context::CliContext;
use crate::error::OrgResult;
use crate::formatting::Renderer;
use crate::models::SessionKind;

pub async fn handle_whoami<W: Write>(context: &mut CliContext, out: &mut Renderer<W>) -> OrgResult<()> {
    let client = context.verified_client()?;

    let session = client.who_am_i().await?;
    let kind = match session.kind {
        SessionKind::User => "user",
        SessionKind::Machine => "machine",
    };
    out.line(&format!("Logged in as: {} ({})", session.username, kind))?;
    out.line(&format!("ID: {}", out.faint(session.id.as_str())))?;

    Ok(())
}
