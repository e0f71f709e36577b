use clap::ArgMatches;
use std::io::Write;

use super::{confirm, need_org, org_name, required};
use crate::cli_context::CliContext;
use crate::error::OrgResult;
use crate::formatting::Renderer;
use crate::mutations::{self, OrgMemberRemoval};
use crate::org_error;
use crate::presentation::ByTeamType;
use crate::views::{list_org_members, list_orgs, resolve_org, resolve_org_member};

pub async fn handle_orgs<W: Write>(
    matches: &ArgMatches,
    context: &mut CliContext,
    out: &mut Renderer<W>,
) -> OrgResult<()> {
    match matches.subcommand() {
        Some(("list", _)) => handle_list(context, out).await,
        Some(("create", sub_matches)) => {
            let name = required(sub_matches, "name")?;
            handle_create(context, out, name).await
        }
        Some(("members", sub_matches)) => {
            let org = org_name(sub_matches, context);
            handle_members(context, out, org.as_deref()).await
        }
        Some(("remove", sub_matches)) => {
            let username = required(sub_matches, "username")?;
            let org = need_org(org_name(sub_matches, context))?;
            let yes = sub_matches.get_flag("yes");
            handle_remove(context, out, &org, username, yes).await
        }
        _ => Err(org_error!(InvalidInput, "Unknown orgs command. Use 'org orgs --help'.")),
    }
}

async fn handle_list<W: Write>(context: &mut CliContext, out: &mut Renderer<W>) -> OrgResult<()> {
    let client = context.verified_client()?;
    let listing = list_orgs(client.as_ref()).await?;
    out.render_orgs(&listing)?;
    Ok(())
}

async fn handle_create<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    name: &str,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let org = mutations::create_org(client.as_ref(), name).await?;
    out.line(&format!("Org {} created.", out.bold(&org.name)))?;
    Ok(())
}

async fn handle_members<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    org: Option<&str>,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let org = resolve_org(client.as_ref(), org).await?;
    let listing = list_org_members(client.as_ref(), &org, &ByTeamType).await?;
    out.render_org_members(&listing)?;
    Ok(())
}

async fn handle_remove<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    org_name: &str,
    username: &str,
    yes: bool,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let (org, user) = resolve_org_member(client.as_ref(), org_name, username).await?;

    let preamble = format!(
        "You are about to remove {} from the {} org. This cannot be undone.",
        user.username, org.name
    );
    confirm(out, &preamble, yes)?;

    match mutations::remove_org_member(client.as_ref(), &org.id, &user.id).await? {
        OrgMemberRemoval::Removed => out.line(&format!(
            "{} has been removed from the {} org.",
            user.username, org.name
        ))?,
        OrgMemberRemoval::NotAMember => out.line("User is not a member of the org.")?,
    }
    Ok(())
}
