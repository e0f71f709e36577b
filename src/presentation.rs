//! Filtering, ordering and annotation applied to rows before rendering.

use std::borrow::Borrow;

use crate::models::{Team, TeamType};

/// Ranking used to order teams. Lower ranks sort first.
pub trait TeamPrecedence {
    fn rank(&self, team: &Team) -> u32;
}

impl<F> TeamPrecedence for F
where
    F: Fn(&Team) -> u32,
{
    fn rank(&self, team: &Team) -> u32 {
        self(team)
    }
}

/// Default ranking: system teams, then user teams, then machine teams.
/// Teams of the same type keep the order the server returned them in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByTeamType;

impl TeamPrecedence for ByTeamType {
    fn rank(&self, team: &Team) -> u32 {
        match team.team_type {
            TeamType::System => 0,
            TeamType::User => 1,
            TeamType::Machine => 2,
        }
    }
}

/// Drop machine-owned teams. Running it twice changes nothing.
pub fn exclude_machine_teams<T: Borrow<Team>>(teams: Vec<T>) -> Vec<T> {
    teams
        .into_iter()
        .filter(|team| !team.borrow().is_machine_owned())
        .collect()
}

/// Stable sort: teams of equal rank keep their relative order.
pub fn sort_by_precedence<T: Borrow<Team>>(teams: &mut [T], precedence: &dyn TeamPrecedence) {
    teams.sort_by_key(|team| precedence.rank(team.borrow()));
}

/// Exclusion first, then ordering.
pub fn present_teams<T: Borrow<Team>>(teams: Vec<T>, precedence: &dyn TeamPrecedence) -> Vec<T> {
    let mut visible = exclude_machine_teams(teams);
    sort_by_precedence(&mut visible, precedence);
    visible
}

/// Return the position of the single row that stands for the current actor.
/// When several rows match, only the first one counts.
pub fn current_actor_row<T, F>(rows: &[T], is_current: F) -> Option<usize>
where
    F: Fn(&T) -> bool,
{
    rows.iter().position(is_current)
}

pub fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Post-filter row count with its noun, e.g. `2 teams`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub noun: &'static str,
}

impl Summary {
    pub fn new(count: usize, noun: &'static str) -> Self {
        Self { count, noun }
    }

    pub fn suffix(&self) -> &'static str {
        plural(self.count)
    }

    /// `team` or `teams`, depending on the count.
    pub fn noun_phrase(&self) -> String {
        format!("{}{}", self.noun, self.suffix())
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.count, self.noun_phrase())
    }
}
