use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{FormConfig, FormVariant};
use crate::error::{RegistrationError, Result};
use crate::model::{
    Field, FieldErrors, Notification, RegistrationSubmission, RegistrationType, SelectOption,
};
use crate::notify::NotificationSink;
use crate::registration::{message, rules};
use crate::submit::{SimulatedSubmitter, Submitter};

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FormPhase {
    Idle,
    Submitting,
}

#[derive(Debug)]
struct FormState {
    values: RegistrationSubmission,
    errors: FieldErrors,
    form_error: Option<String>,
    phase: FormPhase,
}

impl FormState {
    fn new(variant: FormVariant) -> Self {
        Self {
            values: RegistrationSubmission::new(variant.default_registration_type()),
            errors: FieldErrors::default(),
            form_error: None,
            phase: FormPhase::Idle,
        }
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Puts the form back to idle when a submission ends, including when the
/// submitting future is dropped.
struct SubmittingGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).phase = FormPhase::Idle;
    }
}

/// A registration form: field values, validation, the individual/team toggle
/// and the submit cycle.
///
/// All methods take `&self`; state lives behind a mutex that is never held
/// across an await.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> cs2_cup::Result<()> {
/// use cs2_cup::{Field, FormConfig, RegistrationForm, TracingSink};
///
/// let form = RegistrationForm::new(FormConfig::default(), TracingSink);
/// form.set_field(Field::PlayerName, "Ivan")?;
/// form.set_field(Field::Email, "ivan@example.com")?;
/// form.set_field(Field::Phone, "+79001234567")?;
/// form.set_field(Field::SteamId, "STEAM_0:1:123")?;
/// form.set_field(Field::Experience, "pro")?;
/// let notification = form.submit().await?;
/// println!("{}", notification.description);
/// # Ok(())
/// # }
/// ```
pub struct RegistrationForm<N, S = SimulatedSubmitter> {
    variant: FormVariant,
    sink: N,
    submitter: S,
    state: Mutex<FormState>,
}

impl<N: NotificationSink> RegistrationForm<N> {
    /// Create a form that simulates submission with the configured delay.
    pub fn new(config: FormConfig, sink: N) -> Self {
        let submitter = SimulatedSubmitter::new(config.submit_delay());
        Self::with_submitter(config.variant, sink, submitter)
    }
}

impl<N: NotificationSink, S: Submitter> RegistrationForm<N, S> {
    /// Create a form that hands validated registrations to `submitter`.
    pub fn with_submitter(variant: FormVariant, sink: N, submitter: S) -> Self {
        Self {
            variant,
            sink,
            submitter,
            state: Mutex::new(FormState::new(variant)),
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    /// A snapshot of the current field values.
    pub fn values(&self) -> RegistrationSubmission {
        lock(&self.state).values.clone()
    }

    pub fn value(&self, field: Field) -> String {
        lock(&self.state).values.value(field).to_owned()
    }

    pub fn registration_type(&self) -> RegistrationType {
        lock(&self.state).values.registration_type
    }

    pub fn phase(&self) -> FormPhase {
        lock(&self.state).phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == FormPhase::Submitting
    }

    /// Errors from the last validation, minus fields edited since.
    pub fn errors(&self) -> FieldErrors {
        lock(&self.state).errors.clone()
    }

    pub fn error(&self, field: Field) -> Option<String> {
        lock(&self.state).errors.get(field).map(str::to_owned)
    }

    /// Failure of the last submission attempt, if it failed after validation.
    pub fn form_error(&self) -> Option<String> {
        lock(&self.state).form_error.clone()
    }

    pub fn is_visible(&self, field: Field) -> bool {
        self.variant.is_visible(field, self.registration_type())
    }

    pub fn label(&self, field: Field) -> &'static str {
        field.label(self.registration_type())
    }

    /// Team sizes selectable for the current registration type.
    pub fn team_size_options(&self) -> &'static [SelectOption] {
        self.variant.team_size_options(self.registration_type())
    }

    pub fn experience_options(&self) -> &'static [SelectOption] {
        self.variant.experience_options()
    }

    /// Store a single field value. Setting [`Field::RegistrationType`] goes
    /// through [`set_registration_type`](Self::set_registration_type).
    pub fn set_field(&self, field: Field, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if field == Field::RegistrationType {
            let registration_type = value
                .parse::<RegistrationType>()
                .map_err(|_| RegistrationError::InvalidValue { field, value })?;
            return self.set_registration_type(registration_type);
        }

        let mut state = lock(&self.state);
        if let Some(slot) = state.values.value_mut(field) {
            *slot = value;
        }
        state.errors.remove(field);
        debug!(%field, "field updated");
        Ok(())
    }

    /// Like [`set_field`](Self::set_field), addressing the field by its
    /// camelCase name (`"teamName"`, `"steamId"`, ...).
    pub fn set_field_by_name(&self, name: &str, value: impl Into<String>) -> Result<()> {
        let field = name
            .parse::<Field>()
            .map_err(|_| RegistrationError::UnknownField(name.to_owned()))?;
        self.set_field(field, value)
    }

    /// Switch between individual and team registration. The team size is
    /// reset to the new type's default and errors of fields that are no
    /// longer shown are dropped.
    pub fn set_registration_type(&self, registration_type: RegistrationType) -> Result<()> {
        if !self.variant.accepts(registration_type) {
            return Err(RegistrationError::UnsupportedRegistrationType {
                variant: self.variant,
                registration_type,
            });
        }

        let mut state = lock(&self.state);
        state.values.registration_type = registration_type;
        state.values.team_size = registration_type.default_team_size().to_owned();
        let variant = self.variant;
        state.errors.retain(|field| {
            field != Field::TeamSize && variant.is_visible(field, registration_type)
        });
        debug!(%registration_type, "registration type changed");
        Ok(())
    }

    /// Check every field and surface the result on the form. An empty map
    /// means the form can be submitted.
    pub fn validate(&self) -> FieldErrors {
        let mut state = lock(&self.state);
        let errors = rules::validate(self.variant, &state.values);
        state.errors = errors.clone();
        errors
    }

    /// Clear all fields back to their defaults.
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        let phase = state.phase;
        *state = FormState::new(self.variant);
        state.phase = phase;
    }

    /// Validate and submit the form.
    ///
    /// On success the confirmation is sent to the notification sink, the
    /// form is reset and the confirmation is returned. Invalid forms keep
    /// their values and surface the field errors. A failing submitter keeps
    /// the values and records a form-level error.
    #[instrument(skip(self), fields(variant = %self.variant))]
    pub async fn submit(&self) -> Result<Notification> {
        let submission = {
            let mut state = lock(&self.state);
            if state.phase == FormPhase::Submitting {
                warn!("submission already in progress");
                return Err(RegistrationError::AlreadySubmitting);
            }

            let errors = rules::validate(self.variant, &state.values);
            state.errors = errors.clone();
            if !errors.is_empty() {
                warn!(errors = errors.len(), "registration rejected");
                return Err(RegistrationError::Invalid(errors));
            }

            state.phase = FormPhase::Submitting;
            state.form_error = None;
            state.values.clone()
        };
        let _submitting = SubmittingGuard { state: &self.state };

        if let Err(failure) = self.submitter.submit(&submission).await {
            warn!(%failure, "submission failed");
            lock(&self.state).form_error = Some(failure.to_string());
            return Err(failure.into());
        }

        let notification = message::confirmation(self.variant, &submission);
        info!(
            registration_type = %submission.registration_type,
            experience = ?submission.experience(),
            "registration submitted"
        );
        self.sink.notify(notification.clone());

        let mut state = lock(&self.state);
        state.values = RegistrationSubmission::new(self.variant.default_registration_type());
        state.errors = FieldErrors::default();
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::Instant;

    use super::*;
    use crate::error::SubmitFailure;

    type TestForm = RegistrationForm<mpsc::UnboundedSender<Notification>>;

    fn new_form(variant: FormVariant) -> (TestForm, UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel::<Notification>();
        (RegistrationForm::new(FormConfig::new(variant), tx), rx)
    }

    fn fill_individual<N: NotificationSink, S: Submitter>(form: &RegistrationForm<N, S>) {
        form.set_field(Field::PlayerName, "Ivan").unwrap();
        form.set_field(Field::Email, "a@b.com").unwrap();
        form.set_field(Field::Phone, "1234567890").unwrap();
        form.set_field(Field::Experience, "pro").unwrap();
        form.set_field(Field::SteamId, "STEAM_0:1:123").unwrap();
    }

    struct FailingSubmitter;

    impl Submitter for FailingSubmitter {
        async fn submit(
            &self,
            _submission: &RegistrationSubmission,
        ) -> std::result::Result<(), SubmitFailure> {
            Err(SubmitFailure::new("connection refused"))
        }
    }

    #[test]
    fn test_defaults_per_variant() {
        let (dual, _rx) = new_form(FormVariant::Dual);
        assert_eq!(dual.registration_type(), RegistrationType::Individual);
        assert_eq!(dual.value(Field::TeamSize), "1");
        assert_eq!(dual.phase(), FormPhase::Idle);

        let (team_only, _rx) = new_form(FormVariant::TeamOnly);
        assert_eq!(team_only.registration_type(), RegistrationType::Team);
        assert_eq!(team_only.value(Field::TeamSize), "");
    }

    #[test]
    fn test_switching_type_resets_team_size() {
        let (form, _rx) = new_form(FormVariant::Dual);
        form.set_registration_type(RegistrationType::Team).unwrap();
        assert_eq!(form.value(Field::TeamSize), "");
        form.set_field(Field::TeamSize, "4").unwrap();
        form.set_registration_type(RegistrationType::Individual).unwrap();
        assert_eq!(form.value(Field::TeamSize), "1");
        form.set_registration_type(RegistrationType::Team).unwrap();
        assert_eq!(form.value(Field::TeamSize), "");
    }

    #[test]
    fn test_switching_type_drops_hidden_field_errors() {
        let (form, _rx) = new_form(FormVariant::Dual);
        form.set_registration_type(RegistrationType::Team).unwrap();
        let errors = form.validate();
        assert!(errors.contains(Field::TeamName));
        assert!(errors.contains(Field::TeamSize));

        form.set_registration_type(RegistrationType::Individual).unwrap();
        let errors = form.errors();
        assert!(!errors.contains(Field::TeamName));
        assert!(!errors.contains(Field::TeamSize));
        assert!(errors.contains(Field::PlayerName));
    }

    #[test]
    fn test_team_only_form_rejects_individual() {
        let (form, _rx) = new_form(FormVariant::TeamOnly);
        let err = form
            .set_registration_type(RegistrationType::Individual)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::UnsupportedRegistrationType {
                variant: FormVariant::TeamOnly,
                registration_type: RegistrationType::Individual,
            }
        ));
        assert_eq!(form.registration_type(), RegistrationType::Team);
    }

    #[test]
    fn test_set_field_by_name() {
        let (form, _rx) = new_form(FormVariant::Dual);
        form.set_field_by_name("teamName", "Cloud9").unwrap();
        assert_eq!(form.value(Field::TeamName), "Cloud9");

        form.set_field_by_name("registrationType", "team").unwrap();
        assert_eq!(form.registration_type(), RegistrationType::Team);

        assert!(matches!(
            form.set_field_by_name("nickname", "x"),
            Err(RegistrationError::UnknownField(name)) if name == "nickname"
        ));
        assert!(matches!(
            form.set_field_by_name("registrationType", "squad"),
            Err(RegistrationError::InvalidValue { field: Field::RegistrationType, .. })
        ));
    }

    #[test]
    fn test_editing_field_clears_its_error() {
        let (form, _rx) = new_form(FormVariant::Dual);
        assert!(form.validate().contains(Field::Email));
        form.set_field(Field::Email, "still wrong").unwrap();
        assert_eq!(form.error(Field::Email), None);
        assert!(form.error(Field::Phone).is_some());
    }

    #[test]
    fn test_labels_and_visibility_follow_type() {
        let (form, _rx) = new_form(FormVariant::Dual);
        assert_eq!(form.label(Field::PlayerName), "Имя игрока");
        assert!(!form.is_visible(Field::TeamName));
        assert_eq!(form.team_size_options().len(), 1);

        form.set_registration_type(RegistrationType::Team).unwrap();
        assert_eq!(form.label(Field::PlayerName), "Имя капитана");
        assert!(form.is_visible(Field::TeamName));
        assert!(form.is_visible(Field::PlayersInfo));
        assert_eq!(form.team_size_options().len(), 4);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let (form, _rx) = new_form(FormVariant::TeamOnly);
        form.set_field(Field::PlayerName, "Cap").unwrap();
        assert_eq!(form.validate(), form.validate());
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_individual_submission() {
        let (form, mut rx) = new_form(FormVariant::Dual);
        fill_individual(&form);
        assert!(form.validate().is_empty());

        let start = Instant::now();
        let notification = form.submit().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert!(notification.description.contains("Ivan"));

        assert_eq!(rx.try_recv().unwrap(), notification);
        assert!(rx.try_recv().is_err());
        assert_eq!(form.values(), RegistrationSubmission::new(RegistrationType::Individual));
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_team_submission_names_team() {
        let (form, mut rx) = new_form(FormVariant::Dual);
        form.set_registration_type(RegistrationType::Team).unwrap();
        fill_individual(&form);
        form.set_field(Field::TeamName, "FaZe").unwrap();
        form.set_field(Field::TeamSize, "5").unwrap();

        form.submit().await.unwrap();
        let notification = rx.try_recv().unwrap();
        assert!(notification.description.contains("\"FaZe\""));
        assert!(notification.description.contains("5 игроков"));
        assert_eq!(form.registration_type(), RegistrationType::Individual);
    }

    #[tokio::test(start_paused = true)]
    async fn test_team_only_submission_cycle() {
        let (form, mut rx) = new_form(FormVariant::TeamOnly);
        form.set_field(Field::TeamName, "Astralis").unwrap();
        form.set_field(Field::PlayerName, "device").unwrap();
        form.set_field(Field::Email, "captain@astralis.gg").unwrap();
        form.set_field(Field::Phone, "+45 12 34 56 78").unwrap();
        form.set_field(Field::TeamSize, "5+2").unwrap();
        form.set_field(Field::PlayersInfo, "device, dupreeh, Xyp9x, gla1ve, Magisk").unwrap();
        form.set_field(Field::Experience, "pro").unwrap();

        form.submit().await.unwrap();
        let notification = rx.try_recv().unwrap();
        assert!(notification.description.contains("\"Astralis\""));
        assert!(notification.description.contains("5 игроков + 2 запасных"));

        assert_eq!(form.registration_type(), RegistrationType::Team);
        assert_eq!(form.value(Field::TeamSize), "");
        assert_eq!(form.values(), RegistrationSubmission::new(RegistrationType::Team));
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_submission_returns_to_idle() {
        let (form, mut rx) = new_form(FormVariant::Dual);
        fill_individual(&form);
        let before = form.values();

        let result = tokio::time::timeout(Duration::from_millis(100), form.submit()).await;
        assert!(result.is_err());

        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.values(), before);
        assert!(rx.try_recv().is_err());

        form.submit().await.unwrap();
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_submission_is_rejected() {
        let (form, mut rx) = new_form(FormVariant::Dual);
        form.set_registration_type(RegistrationType::Team).unwrap();
        form.set_field(Field::PlayerName, "Cap").unwrap();

        let err = form.submit().await.unwrap_err();
        let errors = match err {
            RegistrationError::Invalid(errors) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        };
        assert!(errors.contains(Field::TeamSize));
        assert!(errors.contains(Field::Experience));
        assert_eq!(form.errors(), errors);
        assert_eq!(form.value(Field::PlayerName), "Cap");
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_submit_is_rejected() {
        let (form, mut rx) = new_form(FormVariant::Dual);
        fill_individual(&form);

        let (first, second) = tokio::join!(form.submit(), async {
            while form.phase() == FormPhase::Idle {
                tokio::task::yield_now().await;
            }
            assert!(form.is_submitting());
            form.submit().await
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(RegistrationError::AlreadySubmitting)));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_values() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
        let form = RegistrationForm::with_submitter(FormVariant::Dual, tx, FailingSubmitter);
        fill_individual(&form);

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, RegistrationError::Submit(_)));
        assert_eq!(
            form.form_error().as_deref(),
            Some("submission failed: connection refused")
        );
        assert_eq!(form.value(Field::PlayerName), "Ivan");
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_form_is_reusable_across_cycles() {
        let (form, mut rx) = new_form(FormVariant::Dual);
        for _ in 0..2 {
            fill_individual(&form);
            form.submit().await.unwrap();
        }
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
    }
}
