use std::io::{self, Write};

use super::table::{Cell, Renderer, Table};
use crate::presentation::Summary;
use crate::views::{OrgListing, OrgMemberListing, TeamListing, TeamMemberListing};

fn marker(flag: bool) -> Cell {
    if flag {
        Cell::faint("*")
    } else {
        Cell::empty()
    }
}

impl<W: Write> Renderer<W> {
    fn summary_line(&mut self, subject: &str, summary: &Summary) -> io::Result<()> {
        let count = self.faint(&summary.count.to_string());
        let line = format!("{} has ({}) {}", subject, count, summary.noun_phrase());
        self.blank()?;
        self.line(&line)
    }

    pub fn render_teams(&mut self, listing: &TeamListing) -> io::Result<()> {
        let mut table = Table::new(&["", "Team", "Type"]);
        for row in &listing.rows {
            table.row(vec![
                marker(row.is_member),
                Cell::plain(row.team.name.as_str()),
                Cell::plain(row.team.team_type.as_str()),
            ]);
        }

        self.blank()?;
        self.table(&table)?;
        self.summary_line(&format!("Org {}", listing.org.name), &listing.summary)
    }

    pub fn render_team_members(&mut self, listing: &TeamMemberListing) -> io::Result<()> {
        if listing.rows.is_empty() {
            return self.line(&format!("{} has no members", listing.team.name));
        }

        let mut table = Table::new(&["", "Name", "Username"]);
        for row in &listing.rows {
            table.row(vec![
                marker(row.is_me),
                Cell::plain(row.profile.name.as_str()),
                Cell::faint(row.profile.username.as_str()),
            ]);
        }

        self.blank()?;
        self.table(&table)?;
        self.summary_line(&format!("Team {}", listing.team.name), &listing.summary)
    }

    pub fn render_org_members(&mut self, listing: &OrgMemberListing) -> io::Result<()> {
        let mut table = Table::new(&["", "Name", "Username", "Team"]).gap(3);
        for row in &listing.rows {
            let teams = row
                .teams
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            table.row(vec![
                marker(row.is_me),
                Cell::plain(row.profile.name.as_str()),
                Cell::faint(row.profile.username.as_str()),
                Cell::plain(teams),
            ]);
        }

        self.blank()?;
        self.table(&table)?;
        self.summary_line(&format!("Org {}", listing.org.name), &listing.summary)
    }

    pub fn render_orgs(&mut self, listing: &OrgListing) -> io::Result<()> {
        self.blank()?;
        let header = self.bold("Orgs");
        self.line(&header)?;
        for row in &listing.rows {
            let line = if row.personal {
                format!("{} ({})", row.org.name, self.faint("personal"))
            } else {
                row.org.name.clone()
            };
            self.line(&line)?;
        }

        let count = self.faint(&listing.summary.count.to_string());
        self.blank()?;
        self.line(&format!(
            "You are a member of ({}) {}",
            count,
            listing.summary.noun_phrase()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::RenderConfig;
    use crate::models::{Id, Org, Profile, Team, TeamType};
    use crate::views::{MemberRow, OrgRow, TeamRow};

    fn renderer() -> Renderer<Vec<u8>> {
        Renderer::new(Vec::new(), RenderConfig { enable_colors: false, cols: 78 })
    }

    fn output(renderer: Renderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    fn org() -> Org {
        Org { id: Id::new("o1"), name: "acme".to_string() }
    }

    fn team(name: &str, team_type: TeamType) -> Team {
        Team {
            id: Id::new(name),
            org_id: Id::new("o1"),
            name: name.to_string(),
            team_type,
        }
    }

    fn profile(id: &str, name: &str) -> Profile {
        Profile { id: Id::new(id), username: id.to_string(), name: name.to_string() }
    }

    #[test]
    fn test_render_single_team_summary() {
        let listing = TeamListing {
            org: org(),
            rows: vec![TeamRow { team: team("admin", TeamType::User), is_member: true }],
            summary: Summary::new(1, "team"),
        };

        let mut r = renderer();
        r.render_teams(&listing).unwrap();
        let out = output(r);

        assert!(out.contains("*  admin  user"));
        assert!(out.trim_end().ends_with("Org acme has (1) team"));
    }

    #[test]
    fn test_render_empty_team() {
        let listing = TeamMemberListing {
            org: org(),
            team: team("ops", TeamType::User),
            rows: Vec::new(),
            summary: Summary::new(0, "member"),
        };

        let mut r = renderer();
        r.render_team_members(&listing).unwrap();
        assert_eq!(output(r), "ops has no members\n");
    }

    #[test]
    fn test_render_org_members_joins_teams() {
        let listing = OrgMemberListing {
            org: org(),
            rows: vec![MemberRow {
                profile: profile("u1", "Alice"),
                teams: vec![team("owner", TeamType::System), team("devs", TeamType::User)],
                is_me: false,
            }],
            summary: Summary::new(1, "member"),
        };

        let mut r = renderer();
        r.render_org_members(&listing).unwrap();
        let out = output(r);

        assert!(out.contains("owner, devs"));
        assert!(out.trim_end().ends_with("Org acme has (1) member"));
    }

    #[test]
    fn test_render_orgs_marks_personal() {
        let listing = OrgListing {
            rows: vec![
                OrgRow { org: Org { id: Id::new("o0"), name: "alice".to_string() }, personal: true },
                OrgRow { org: org(), personal: false },
            ],
            summary: Summary::new(2, "org"),
        };

        let mut r = renderer();
        r.render_orgs(&listing).unwrap();
        let out = output(r);

        assert!(out.contains("alice (personal)\nacme\n"));
        assert!(out.contains("You are a member of (2) orgs"));
    }
}
