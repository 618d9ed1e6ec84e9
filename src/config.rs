use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use crate::error::Result;
use crate::model::{Field, RegistrationType, SelectOption};
use crate::registration::rules;

/// Default length of the simulated submission round-trip.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

/// Which registration form layout is in use.
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
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FormVariant {
    /// Team registrations only, with a free-form roster description.
    TeamOnly,
    /// Individual players or teams, with a Steam ID for the registrant.
    #[default]
    Dual,
}

impl FormVariant {
    /// Registration types the variant accepts. The first one is the default.
    pub fn registration_types(self) -> &'static [RegistrationType] {
        match self {
            FormVariant::TeamOnly => &[RegistrationType::Team],
            FormVariant::Dual => &[RegistrationType::Individual, RegistrationType::Team],
        }
    }

    pub fn default_registration_type(self) -> RegistrationType {
        self.registration_types()[0]
    }

    pub fn accepts(self, registration_type: RegistrationType) -> bool {
        self.registration_types().contains(&registration_type)
    }

    pub fn team_size_options(self, registration_type: RegistrationType) -> &'static [SelectOption] {
        rules::team_size_options(self, registration_type)
    }

    pub fn experience_options(self) -> &'static [SelectOption] {
        rules::EXPERIENCE_OPTIONS
    }

    /// Whether `field` is shown for `registration_type`. Hidden fields are
    /// never validated.
    pub fn is_visible(self, field: Field, registration_type: RegistrationType) -> bool {
        rules::is_visible(self, field, registration_type)
    }
}

/// Settings for a [`RegistrationForm`](crate::RegistrationForm).
///
/// # Examples
///
/// ```
/// use cs2_cup::{FormConfig, FormVariant};
///
/// let config = FormConfig::from_json(r#"{ "variant": "team-only" }"#).unwrap();
/// assert_eq!(config.variant, FormVariant::TeamOnly);
/// assert_eq!(config.submit_delay_ms, 1500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    pub variant: FormVariant,
    pub submit_delay_ms: u64,
}

impl FormConfig {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            variant: FormVariant::default(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
        }
    }
}
