use crate::config::FormVariant;
use crate::model::{Notification, RegistrationSubmission, RegistrationType};
use crate::registration::rules;

pub(crate) const SUCCESS_TITLE: &str = "Заявка успешно отправлена!";
const FOLLOW_UP: &str = "Мы свяжемся с вами для подтверждения участия.";

/// Builds the toast shown after a registration went through.
pub(crate) fn confirmation(variant: FormVariant, submission: &RegistrationSubmission) -> Notification {
    let description = match submission.registration_type {
        RegistrationType::Individual => format!(
            "Игрок {} зарегистрирован. {FOLLOW_UP}",
            submission.player_name
        ),
        RegistrationType::Team => {
            let roster = team_size_label(variant, submission);
            if submission.team_name.is_empty() {
                format!("Ваша команда ({roster}) зарегистрирована. {FOLLOW_UP}")
            } else {
                format!(
                    "Команда \"{}\" ({roster}) зарегистрирована. {FOLLOW_UP}",
                    submission.team_name
                )
            }
        }
    };

    Notification {
        title: SUCCESS_TITLE.to_owned(),
        description,
    }
}

fn team_size_label<'a>(variant: FormVariant, submission: &'a RegistrationSubmission) -> &'a str {
    rules::team_size_options(variant, submission.registration_type)
        .iter()
        .find(|option| option.value == submission.team_size)
        .map(|option| option.label)
        .unwrap_or(submission.team_size.as_str())
}
