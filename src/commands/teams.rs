use clap::ArgMatches;
use std::io::Write;

use super::{confirm, need_org, org_name, required};
use crate::cli_context::CliContext;
use crate::error::OrgResult;
use crate::formatting::Renderer;
use crate::mutations;
use crate::org_error;
use crate::presentation::ByTeamType;
use crate::views::{find_team, list_team_members, list_teams, resolve_membership_target, resolve_org};

const UNKNOWN_COMMAND: &str = "Unknown teams command. Use 'org teams --help'.";

pub async fn handle_teams<W: Write>(
    matches: &ArgMatches,
    context: &mut CliContext,
    out: &mut Renderer<W>,
) -> OrgResult<()> {
    let (command, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| org_error!(InvalidInput, UNKNOWN_COMMAND))?;
    let org = org_name(sub_matches, context);

    match command {
        "list" => handle_list(context, out, org.as_deref()).await,
        "members" => {
            let team = required(sub_matches, "team")?;
            handle_members(context, out, org.as_deref(), team).await
        }
        "create" => {
            let name = required(sub_matches, "name")?;
            handle_create(context, out, org.as_deref(), name).await
        }
        "add" => {
            let username = required(sub_matches, "username")?;
            let team = required(sub_matches, "team")?;
            let org = need_org(org)?;
            handle_add(context, out, &org, username, team).await
        }
        "remove" => {
            let username = required(sub_matches, "username")?;
            let team = required(sub_matches, "team")?;
            let yes = sub_matches.get_flag("yes");
            let org = need_org(org)?;
            handle_remove(context, out, &org, username, team, yes).await
        }
        _ => Err(org_error!(InvalidInput, UNKNOWN_COMMAND)),
    }
}

async fn handle_list<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    org: Option<&str>,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let org = resolve_org(client.as_ref(), org).await?;
    let listing = list_teams(client.as_ref(), &org, &ByTeamType).await?;
    out.render_teams(&listing)?;
    Ok(())
}

async fn handle_members<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    org: Option<&str>,
    team_name: &str,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let org = resolve_org(client.as_ref(), org).await?;
    let team = find_team(client.as_ref(), &org.id, team_name).await?;
    let listing = list_team_members(client.as_ref(), &org, &team).await?;
    out.render_team_members(&listing)?;
    Ok(())
}

async fn handle_create<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    org: Option<&str>,
    name: &str,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let org = resolve_org(client.as_ref(), org).await?;
    let team = mutations::create_team(client.as_ref(), &org, name).await?;
    out.line(&format!("Team {} created.", out.bold(&team.name)))?;
    Ok(())
}

async fn handle_add<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    org: &str,
    username: &str,
    team_name: &str,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let target = resolve_membership_target(client.as_ref(), org, username, team_name).await?;
    mutations::add_member(client.as_ref(), &target).await?;
    out.line(&format!(
        "{} has been added to the {} team.",
        target.user.username, target.team.name
    ))?;
    Ok(())
}

async fn handle_remove<W: Write>(
    context: &mut CliContext,
    out: &mut Renderer<W>,
    org: &str,
    username: &str,
    team_name: &str,
    yes: bool,
) -> OrgResult<()> {
    let client = context.verified_client()?;
    let target = resolve_membership_target(client.as_ref(), org, username, team_name).await?;

    let preamble = format!(
        "You are about to remove {} from the {} team.",
        target.user.username, target.team.name
    );
    confirm(out, &preamble, yes)?;

    mutations::remove_member(client.as_ref(), &target).await?;
    out.line(&format!(
        "{} has been removed from the {} team.",
        target.user.username, target.team.name
    ))?;
    Ok(())
}
