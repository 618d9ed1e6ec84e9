use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString, VariantNames};

/// Whether a submission represents one player or a full team.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationType {
    #[default]
    Individual,
    Team,
}

impl RegistrationType {
    /// The `teamSize` value a form holds right after switching to this type.
    pub fn default_team_size(self) -> &'static str {
        match self {
            RegistrationType::Individual => "1",
            RegistrationType::Team => "",
        }
    }
}

/// Self-assessed skill level of the registrant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    VariantNames,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Experience {
    Beginner,
    Amateur,
    Advanced,
    SemiPro,
    Pro,
}

/// A registration form field. Ordered the way the form lays them out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    strum_macros::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    RegistrationType,
    TeamName,
    PlayerName,
    Email,
    Phone,
    SteamId,
    TeamSize,
    PlayersInfo,
    Experience,
}

impl Field {
    /// Display label of the field. The player name doubles as the captain's
    /// name for team registrations.
    pub fn label(self, registration_type: RegistrationType) -> &'static str {
        match self {
            Field::RegistrationType => "Тип регистрации",
            Field::TeamName => "Название команды",
            Field::PlayerName => match registration_type {
                RegistrationType::Individual => "Имя игрока",
                RegistrationType::Team => "Имя капитана",
            },
            Field::Email => "Email",
            Field::Phone => "Телефон",
            Field::SteamId => "Steam ID",
            Field::TeamSize => "Размер команды",
            Field::PlayersInfo => "Информация о игроках",
            Field::Experience => match registration_type {
                RegistrationType::Individual => "Опыт игры",
                RegistrationType::Team => "Опыт команды",
            },
        }
    }
}

/// Raw values of a registration form.
///
/// Select fields keep the raw option value so that an out-of-range choice can
/// be reported by validation instead of being rejected on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    pub registration_type: RegistrationType,
    pub team_name: String,
    pub player_name: String,
    pub email: String,
    pub phone: String,
    pub steam_id: String,
    pub team_size: String,
    pub players_info: String,
    pub experience: String,
}

impl RegistrationSubmission {
    /// An empty submission for the given registration type.
    pub fn new(registration_type: RegistrationType) -> Self {
        Self {
            registration_type,
            team_name: String::new(),
            player_name: String::new(),
            email: String::new(),
            phone: String::new(),
            steam_id: String::new(),
            team_size: registration_type.default_team_size().to_owned(),
            players_info: String::new(),
            experience: String::new(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::RegistrationType => self.registration_type.as_ref(),
            Field::TeamName => &self.team_name,
            Field::PlayerName => &self.player_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::SteamId => &self.steam_id,
            Field::TeamSize => &self.team_size,
            Field::PlayersInfo => &self.players_info,
            Field::Experience => &self.experience,
        }
    }

    /// Mutable access to a text-backed field. `None` for the registration
    /// type, which is typed.
    pub(crate) fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::RegistrationType => None,
            Field::TeamName => Some(&mut self.team_name),
            Field::PlayerName => Some(&mut self.player_name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::SteamId => Some(&mut self.steam_id),
            Field::TeamSize => Some(&mut self.team_size),
            Field::PlayersInfo => Some(&mut self.players_info),
            Field::Experience => Some(&mut self.experience),
        }
    }

    pub fn experience(&self) -> Option<Experience> {
        self.experience.parse().ok()
    }
}

impl Default for RegistrationSubmission {
    fn default() -> Self {
        Self::new(RegistrationType::default())
    }
}

/// Validation messages keyed by field, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Records `message` unless the field already has an error.
    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub(crate) fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.0.retain(|field, _| keep(*field));
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .join("; ");
        f.write_str(&joined)
    }
}

/// One choice of a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}
