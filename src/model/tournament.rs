use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::EnumString;

/// Everything the tournament pages show besides the registration form.
#[derive(Debug, Clone, Serialize)]
pub struct Tournament {
    pub title: String,
    pub tagline: String,
    pub game: String,
    pub main_event: DateRange,
    pub qualification: DateRange,
    pub registration_deadline: NaiveDate,
    /// Total prize pool in rubles.
    pub prize_pool: u32,
    pub team_slots: u8,
    pub format: TournamentFormat,
    pub map_pool: Vec<String>,
    pub rules: Vec<RuleSection>,
    pub prizes: Vec<Prize>,
    pub bracket: Bracket,
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Series length of a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
pub enum MatchFormat {
    Bo1,
    Bo3,
    Bo5,
}

impl MatchFormat {
    /// Maps a team has to win to take the series.
    pub fn wins_needed(self) -> u8 {
        match self {
            MatchFormat::Bo1 => 1,
            MatchFormat::Bo3 => 2,
            MatchFormat::Bo5 => 3,
        }
    }
}

/// Playoff structure of the main event.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentFormat {
    pub playoff: String,
    pub playoff_matches: MatchFormat,
    pub grand_final: MatchFormat,
}

/// A titled list of rules (general, technical, disciplinary).
#[derive(Debug, Clone, Serialize)]
pub struct RuleSection {
    pub title: String,
    pub items: Vec<String>,
}

/// Prize money for a block of final placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prize {
    pub first_place: u8,
    pub last_place: u8,
    /// Amount in rubles, per team.
    pub amount: u32,
}

impl Prize {
    pub fn places(&self) -> u8 {
        self.last_place - self.first_place + 1
    }
}

/// The playoff bracket as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct Bracket {
    pub team_count: u8,
    pub elimination: String,
    pub dates: DateRange,
    pub rounds: Vec<BracketRound>,
}

impl Bracket {
    /// All matches, in round order.
    pub fn matches(&self) -> impl Iterator<Item = &BracketMatch> + '_ {
        self.rounds.iter().flat_map(|round| round.matches.iter())
    }
}

/// A round of the bracket (quarter-finals, semi-finals, final).
#[derive(Debug, Clone, Serialize)]
pub struct BracketRound {
    pub number: u8,
    pub title: String,
    pub matches: Vec<BracketMatch>,
}

/// A single bracket match between two slots.
#[derive(Debug, Clone, Serialize)]
pub struct BracketMatch {
    pub number: u8,
    pub completed: bool,
    pub teams: [BracketTeam; 2],
}

impl BracketMatch {
    pub fn winner(&self) -> Option<&BracketTeam> {
        self.teams.iter().find(|team| team.won)
    }
}

/// A team slot in a bracket match.
#[derive(Debug, Clone, Serialize)]
pub struct BracketTeam {
    pub name: String,
    /// `None` for a slot not decided yet.
    pub seed: Option<u8>,
    pub score: Option<u8>,
    pub won: bool,
}
