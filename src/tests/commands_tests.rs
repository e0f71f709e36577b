use std::sync::Arc;

use crate::cli::build_cli;
use crate::cli_context::CliContextBuilder;
use crate::client::memory::Op;
use crate::client::MemoryClient;
use crate::commands::dispatch;
use crate::config::Config;
use crate::error::{OrgError, OrgResult};
use crate::formatting::{RenderConfig, Renderer};
use crate::models::{Id, SessionKind, TeamType};

fn fixture() -> MemoryClient {
    MemoryClient::new()
        .with_session("u1", "alice", SessionKind::User)
        .with_org("o1", "acme")
        .with_team("t-admin", "o1", "admin", TeamType::System)
        .with_team("t-member", "o1", "member", TeamType::System)
        .with_team("t-machine", "o1", "machine-team", TeamType::System)
        .with_team("t-devs", "o1", "devs", TeamType::User)
        .with_team("t-bots", "o1", "bots", TeamType::Machine)
        .with_profile("u1", "alice", "Alice Liddell")
        .with_profile("u2", "bob", "Bob Builder")
        .with_membership("m1", "u1", "o1", "t-admin")
        .with_membership("m2", "u1", "o1", "t-devs")
        .with_membership("m3", "u2", "o1", "t-devs")
}

async fn run(client: &MemoryClient, args: &[&str]) -> (OrgResult<()>, String) {
    let mut argv = vec!["org"];
    argv.extend_from_slice(args);
    let matches = build_cli().try_get_matches_from(argv).unwrap();

    let mut context = CliContextBuilder::new()
        .with_config(Config::default())
        .with_client(Arc::new(client.clone()))
        .build()
        .unwrap();
    let mut out = Renderer::new(
        Vec::new(),
        RenderConfig {
            enable_colors: false,
            cols: 78,
        },
    );

    let result = dispatch(&matches, &mut context, &mut out).await;
    (result, String::from_utf8(out.into_inner()).unwrap())
}

#[tokio::test]
async fn test_whoami() {
    let client = fixture();
    let (result, out) = run(&client, &["whoami"]).await;
    result.unwrap();
    assert!(out.contains("Logged in as: alice (user)"));
}

#[tokio::test]
async fn test_teams_list_hides_machine_teams_and_marks_mine() {
    let client = fixture();
    let (result, out) = run(&client, &["teams", "list", "--org", "acme"]).await;
    result.unwrap();

    assert!(!out.contains("machine"));
    assert!(!out.contains("bots"));

    let admin = out.lines().find(|l| l.contains("admin")).unwrap();
    let member = out.lines().find(|l| l.contains("member")).unwrap();
    assert!(admin.starts_with('*'));
    assert!(!member.starts_with('*'));

    let admin_at = out.find("admin").unwrap();
    let devs_at = out.find("devs").unwrap();
    assert!(admin_at < devs_at, "system teams come before user teams");

    assert!(out.contains("Org acme has (3) teams"));
}

#[tokio::test]
async fn test_teams_list_without_org_is_rejected() {
    std::env::remove_var(crate::constants::DEFAULT_ORG_ENV);
    let client = fixture();
    let (result, _) = run(&client, &["teams", "list"]).await;
    assert!(matches!(result, Err(OrgError::InvalidInput(_))));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_teams_members() {
    let client = fixture();
    let (result, out) = run(&client, &["teams", "members", "devs", "--org", "acme"]).await;
    result.unwrap();

    assert!(out.contains("Alice Liddell"));
    assert!(out.contains("bob"));
    assert!(out.contains("Team devs has (2) members"));
}

#[tokio::test]
async fn test_teams_members_of_empty_team() {
    let client = fixture();
    let (result, out) = run(&client, &["teams", "members", "member", "--org", "acme"]).await;
    result.unwrap();

    assert!(out.contains("member has no members"));
    assert!(client.calls_to(Op::ListProfilesById).is_empty());
}

#[tokio::test]
async fn test_teams_create_and_duplicate() {
    let client = fixture();
    let (result, out) = run(&client, &["teams", "create", "qa", "--org", "acme"]).await;
    result.unwrap();
    assert!(out.contains("Team qa created."));
    assert!(client.teams().iter().any(|t| t.name == "qa" && t.team_type == TeamType::User));

    let (result, _) = run(&client, &["teams", "create", "devs", "--org", "acme"]).await;
    match result {
        Err(OrgError::Conflict(msg)) => assert_eq!(msg, "Team already exists"),
        other => panic!("Expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_teams_add_member() {
    let client = fixture();
    let (result, out) = run(&client, &["teams", "add", "bob", "admin", "--org", "acme"]).await;
    result.unwrap();

    assert!(out.contains("bob has been added to the admin team."));
    assert!(client
        .memberships()
        .iter()
        .any(|m| m.owner_id == Id::new("u2") && m.team_id == Id::new("t-admin")));
}

#[tokio::test]
async fn test_teams_add_existing_member() {
    let client = fixture();
    let (result, _) = run(&client, &["teams", "add", "alice", "devs", "--org", "acme"]).await;
    match result {
        Err(OrgError::Conflict(msg)) => {
            assert_eq!(msg, "alice is already a member of the devs team.")
        }
        other => panic!("Expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_teams_add_without_permission() {
    let client = fixture().fail_permission(Op::CreateMembership, "forbidden");
    let (result, _) = run(&client, &["teams", "add", "bob", "admin", "--org", "acme"]).await;
    match result {
        Err(OrgError::PermissionDenied(msg)) => {
            assert_eq!(msg, "Must be a member of the admin team to add members.")
        }
        other => panic!("Expected permission error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_teams_add_to_members_team_is_refused() {
    let client = fixture().fail(
        Op::CreateMembership,
        "users cannot be added to the members team",
    );
    let (result, _) = run(&client, &["teams", "add", "bob", "member", "--org", "acme"]).await;
    match result {
        Err(OrgError::PermissionDenied(msg)) => {
            assert_eq!(msg, "bob cannot be added to the member team.")
        }
        other => panic!("Expected permission error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_teams_add_reports_every_failed_lookup() {
    let client = fixture();
    let (result, _) = run(&client, &["teams", "add", "carol", "devs", "--org", "nowhere"]).await;
    let err = result.unwrap_err();

    assert_eq!(err.messages(), vec!["Org not found.", "User not found."]);
    // The team lookup needs the org and never ran
    assert!(client.calls_to(Op::GetTeamsByName).is_empty());
    assert!(client.calls_to(Op::CreateMembership).is_empty());
}

#[tokio::test]
async fn test_teams_remove_member() {
    let client = fixture();
    let (result, out) = run(
        &client,
        &["teams", "remove", "bob", "devs", "--org", "acme", "--yes"],
    )
    .await;
    result.unwrap();

    assert!(out.contains("bob has been removed from the devs team."));
    assert!(!client.memberships().iter().any(|m| m.id == Id::new("m3")));
}

#[tokio::test]
async fn test_teams_remove_non_member() {
    let client = fixture();
    let (result, _) = run(
        &client,
        &["teams", "remove", "bob", "admin", "--org", "acme", "--yes"],
    )
    .await;
    match result {
        Err(OrgError::NotFound(msg)) => assert_eq!(msg, "Memberships not found."),
        other => panic!("Expected not found, got {:?}", other),
    }
    assert!(client.calls_to(Op::DeleteMembership).is_empty());
}

#[tokio::test]
async fn test_orgs_list_puts_personal_org_first() {
    let client = fixture().with_org("o2", "alice");
    let (result, out) = run(&client, &["orgs", "list"]).await;
    result.unwrap();

    let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines[0], "Orgs");
    assert_eq!(lines[1], "alice (personal)");
    assert_eq!(lines[2], "acme");
    assert!(out.contains("You are a member of (2) orgs"));
}

#[tokio::test]
async fn test_orgs_create() {
    let client = fixture();
    let (result, out) = run(&client, &["orgs", "create", "globex"]).await;
    result.unwrap();
    assert!(out.contains("Org globex created."));

    let (result, _) = run(&client, &["orgs", "create", "acme"]).await;
    match result {
        Err(OrgError::Conflict(msg)) => assert_eq!(msg, "Org already exists"),
        other => panic!("Expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_orgs_members() {
    let client = fixture();
    let (result, out) = run(&client, &["orgs", "members", "--org", "acme"]).await;
    result.unwrap();

    let alice = out.lines().find(|l| l.contains("alice")).unwrap();
    assert!(alice.starts_with('*'));
    assert!(alice.ends_with("admin, devs"));
    assert!(out.contains("Org acme has (2) members"));
}

#[tokio::test]
async fn test_orgs_remove_member() {
    let client = fixture();
    let (result, out) = run(&client, &["orgs", "remove", "bob", "--org", "acme", "--yes"]).await;
    result.unwrap();
    assert!(out.contains("bob has been removed from the acme org."));

    let (result, out) = run(&client, &["orgs", "remove", "bob", "--org", "acme", "--yes"]).await;
    result.unwrap();
    assert!(out.contains("User is not a member of the org."));
}
