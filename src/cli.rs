use clap::{Arg, ArgAction, Command};

fn org_arg(help: &'static str, required: bool) -> Arg {
    Arg::new("org")
        .long("org")
        .short('o')
        .value_name("ORG")
        .help(help)
        .required(required)
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .help("Skip the confirmation prompt")
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("org")
        .about("Manage organizations, teams and their members from the command line")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Print the log file location")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("auth")
                .about("Store the API token used to talk to the service")
                .arg(
                    Arg::new("api-key")
                        .long("api-key")
                        .value_name("KEY")
                        .help("Set your API token"),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show current API token")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("whoami").about("Show the current session"))
        .subcommand(
            Command::new("orgs")
                .about("View and create organizations")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List organizations associated with your account"))
                .subcommand(
                    Command::new("create")
                        .about("Create a new organization")
                        .arg(Arg::new("name").value_name("NAME").required(true).index(1)),
                )
                .subcommand(
                    Command::new("members")
                        .about("List all members in an org")
                        .arg(org_arg("Use this organization", false)),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a user from an org")
                        .arg(Arg::new("username").value_name("USERNAME").required(true).index(1))
                        .arg(org_arg("Org to remove the user from", false))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("teams")
                .about("Manage teams and their members")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("List teams in an organization")
                        .arg(org_arg("Use this organization", false)),
                )
                .subcommand(
                    Command::new("members")
                        .about("List members of a particular team in an organization")
                        .arg(Arg::new("team").value_name("TEAM").required(true).index(1))
                        .arg(org_arg("Use this organization", false)),
                )
                .subcommand(
                    Command::new("create")
                        .about("Create a team in an organization")
                        .arg(Arg::new("name").value_name("NAME").required(true).index(1))
                        .arg(org_arg("Create the team in this org", false)),
                )
                .subcommand(
                    Command::new("add")
                        .about("Add user to a specified team in an organization you administer")
                        .arg(Arg::new("username").value_name("USERNAME").required(true).index(1))
                        .arg(Arg::new("team").value_name("TEAM").required(true).index(2))
                        .arg(org_arg("Use this organization", false)),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove user from a specified team in an organization you administer")
                        .arg(Arg::new("username").value_name("USERNAME").required(true).index(1))
                        .arg(Arg::new("team").value_name("TEAM").required(true).index(2))
                        .arg(org_arg("Use this organization", false))
                        .arg(yes_arg()),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_parses_team_add() {
        let matches = build_cli()
            .try_get_matches_from(["org", "teams", "add", "alice", "devs", "--org", "acme"])
            .unwrap();
        let (name, teams) = matches.subcommand().unwrap();
        assert_eq!(name, "teams");
        let (name, add) = teams.subcommand().unwrap();
        assert_eq!(name, "add");
        assert_eq!(add.get_one::<String>("username").unwrap(), "alice");
        assert_eq!(add.get_one::<String>("team").unwrap(), "devs");
        assert_eq!(add.get_one::<String>("org").unwrap(), "acme");
    }

    #[test]
    fn test_team_remove_requires_both_arguments() {
        assert!(build_cli()
            .try_get_matches_from(["org", "teams", "remove", "alice"])
            .is_err());
    }
}
