use lazy_regex::regex_is_match;
use tracing::debug;
use validator::ValidateEmail;

use crate::config::FormVariant;
use crate::model::{Field, FieldErrors, RegistrationSubmission, RegistrationType, SelectOption};

const TEAM_ONLY_SIZES: &[SelectOption] = &[
    SelectOption {
        value: "5",
        label: "5 игроков",
    },
    SelectOption {
        value: "5+1",
        label: "5 игроков + запасной",
    },
    SelectOption {
        value: "5+2",
        label: "5 игроков + 2 запасных",
    },
];

const TEAM_SIZES: &[SelectOption] = &[
    SelectOption {
        value: "2",
        label: "2 игрока",
    },
    SelectOption {
        value: "3",
        label: "3 игрока",
    },
    SelectOption {
        value: "4",
        label: "4 игрока",
    },
    SelectOption {
        value: "5",
        label: "5 игроков",
    },
];

const INDIVIDUAL_SIZES: &[SelectOption] = &[SelectOption {
    value: "1",
    label: "1 игрок",
}];

pub(crate) const EXPERIENCE_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "beginner",
        label: "Начинающие",
    },
    SelectOption {
        value: "amateur",
        label: "Любители",
    },
    SelectOption {
        value: "advanced",
        label: "Продвинутые",
    },
    SelectOption {
        value: "semi-pro",
        label: "Полу-профессионалы",
    },
    SelectOption {
        value: "pro",
        label: "Профессионалы",
    },
];

/// How a field's value is checked once the field is required.
pub(crate) enum Check {
    /// At least this many characters.
    MinLength(usize),
    Email,
    /// One of the options offered for the registration type.
    OneOf(fn(RegistrationType) -> &'static [SelectOption]),
}

impl Check {
    fn accepts(&self, value: &str, registration_type: RegistrationType) -> bool {
        match self {
            Check::MinLength(min) => value.chars().count() >= *min,
            Check::Email => value.validate_email() && is_plain_address(value),
            Check::OneOf(options) => options(registration_type)
                .iter()
                .any(|option| option.value == value),
        }
    }
}

/// Narrows RFC addresses to the plain `local@host.tld` shape browsers accept:
/// no quoted or bracketed parts, a dotted domain and a TLD of 2+ letters.
fn is_plain_address(value: &str) -> bool {
    !value.starts_with('.')
        && !value.contains("..")
        && regex_is_match!(
            r"^[a-z0-9_'+\-.]*[a-z0-9_+\-]@(?:[a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$"i,
            value
        )
}

pub(crate) struct Rule {
    pub required_when: fn(RegistrationType) -> bool,
    pub check: Check,
    pub message: &'static str,
}

/// A field of a form layout. Fields without a rule are always accepted.
pub(crate) struct FieldSpec {
    pub field: Field,
    pub visible_when: fn(RegistrationType) -> bool,
    pub rule: Option<Rule>,
}

fn always(_: RegistrationType) -> bool {
    true
}

fn never(_: RegistrationType) -> bool {
    false
}

fn team(registration_type: RegistrationType) -> bool {
    registration_type == RegistrationType::Team
}

fn team_only_sizes(_: RegistrationType) -> &'static [SelectOption] {
    TEAM_ONLY_SIZES
}

fn dual_sizes(registration_type: RegistrationType) -> &'static [SelectOption] {
    match registration_type {
        RegistrationType::Individual => INDIVIDUAL_SIZES,
        RegistrationType::Team => TEAM_SIZES,
    }
}

fn experience(_: RegistrationType) -> &'static [SelectOption] {
    EXPERIENCE_OPTIONS
}

const EMAIL_RULE: Rule = Rule {
    required_when: always,
    check: Check::Email,
    message: "Укажите корректный email",
};

const PHONE_RULE: Rule = Rule {
    required_when: always,
    check: Check::MinLength(10),
    message: "Укажите корректный номер телефона",
};

const EXPERIENCE_RULE: Rule = Rule {
    required_when: always,
    check: Check::OneOf(experience),
    message: "Выберите уровень опыта",
};

static TEAM_ONLY_LAYOUT: &[FieldSpec] = &[
    FieldSpec {
        field: Field::TeamName,
        visible_when: always,
        rule: Some(Rule {
            required_when: always,
            check: Check::MinLength(3),
            message: "Имя команды должно содержать минимум 3 символа",
        }),
    },
    FieldSpec {
        field: Field::PlayerName,
        visible_when: always,
        rule: Some(Rule {
            required_when: always,
            check: Check::MinLength(2),
            message: "Укажите имя капитана",
        }),
    },
    FieldSpec {
        field: Field::Email,
        visible_when: always,
        rule: Some(EMAIL_RULE),
    },
    FieldSpec {
        field: Field::Phone,
        visible_when: always,
        rule: Some(PHONE_RULE),
    },
    FieldSpec {
        field: Field::TeamSize,
        visible_when: always,
        rule: Some(Rule {
            required_when: always,
            check: Check::OneOf(team_only_sizes),
            message: "Выберите размер команды",
        }),
    },
    FieldSpec {
        field: Field::PlayersInfo,
        visible_when: always,
        rule: Some(Rule {
            required_when: always,
            check: Check::MinLength(10),
            message: "Укажите информацию о всех игроках (минимум 10 символов)",
        }),
    },
    FieldSpec {
        field: Field::Experience,
        visible_when: always,
        rule: Some(EXPERIENCE_RULE),
    },
];

static DUAL_LAYOUT: &[FieldSpec] = &[
    FieldSpec {
        field: Field::RegistrationType,
        visible_when: always,
        rule: None,
    },
    FieldSpec {
        field: Field::TeamName,
        visible_when: team,
        rule: Some(Rule {
            required_when: team,
            check: Check::MinLength(2),
            message: "Название команды должно содержать минимум 2 символа",
        }),
    },
    FieldSpec {
        field: Field::PlayerName,
        visible_when: always,
        rule: Some(Rule {
            required_when: always,
            check: Check::MinLength(2),
            message: "Имя должно содержать минимум 2 символа",
        }),
    },
    FieldSpec {
        field: Field::Email,
        visible_when: always,
        rule: Some(EMAIL_RULE),
    },
    FieldSpec {
        field: Field::Phone,
        visible_when: always,
        rule: Some(PHONE_RULE),
    },
    FieldSpec {
        field: Field::SteamId,
        visible_when: always,
        rule: Some(Rule {
            required_when: always,
            check: Check::MinLength(5),
            message: "Укажите корректный Steam ID",
        }),
    },
    FieldSpec {
        field: Field::TeamSize,
        visible_when: always,
        rule: Some(Rule {
            required_when: always,
            check: Check::OneOf(dual_sizes),
            message: "Выберите размер команды",
        }),
    },
    FieldSpec {
        field: Field::PlayersInfo,
        visible_when: team,
        rule: Some(Rule {
            required_when: never,
            check: Check::MinLength(10),
            message: "Укажите информацию о всех игроках (минимум 10 символов)",
        }),
    },
    FieldSpec {
        field: Field::Experience,
        visible_when: always,
        rule: Some(EXPERIENCE_RULE),
    },
];

pub(crate) fn layout(variant: FormVariant) -> &'static [FieldSpec] {
    match variant {
        FormVariant::TeamOnly => TEAM_ONLY_LAYOUT,
        FormVariant::Dual => DUAL_LAYOUT,
    }
}

pub(crate) fn team_size_options(
    variant: FormVariant,
    registration_type: RegistrationType,
) -> &'static [SelectOption] {
    match variant {
        FormVariant::TeamOnly => team_only_sizes(registration_type),
        FormVariant::Dual => dual_sizes(registration_type),
    }
}

pub(crate) fn is_visible(
    variant: FormVariant,
    field: Field,
    registration_type: RegistrationType,
) -> bool {
    layout(variant)
        .iter()
        .any(|spec| spec.field == field && (spec.visible_when)(registration_type))
}

/// Checks every visible, currently required field of `submission`.
pub(crate) fn validate(variant: FormVariant, submission: &RegistrationSubmission) -> FieldErrors {
    let registration_type = submission.registration_type;
    let mut errors = FieldErrors::default();
    for spec in layout(variant) {
        if !(spec.visible_when)(registration_type) {
            continue;
        }
        let Some(rule) = &spec.rule else {
            continue;
        };
        if !(rule.required_when)(registration_type) {
            continue;
        }
        if !rule
            .check
            .accepts(submission.value(spec.field), registration_type)
        {
            errors.insert(spec.field, rule.message);
        }
    }
    debug!(%variant, %registration_type, errors = errors.len(), "validated registration");
    errors
}
