use crate::config::FormVariant;
use crate::model::{Field, FieldErrors, RegistrationType};

/// All errors that can occur while editing or submitting a registration form.
#[derive(thiserror::Error, Debug)]
pub enum RegistrationError {
    /// One or more fields failed validation. The same errors are surfaced
    /// on the form for inline display.
    #[error("registration is invalid: {0}")]
    Invalid(FieldErrors),

    /// A submission is already in flight for this form.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// The submitter reported a failure.
    #[error(transparent)]
    Submit(#[from] SubmitFailure),

    /// A field name did not match any known form field.
    #[error("unknown form field: {0}")]
    UnknownField(String),

    /// A value could not be stored in a typed field.
    #[error("invalid value {value:?} for field {field}")]
    InvalidValue { field: Field, value: String },

    /// The form variant does not offer the requested registration type.
    #[error("{variant} form does not accept {registration_type} registrations")]
    UnsupportedRegistrationType {
        variant: FormVariant,
        registration_type: RegistrationType,
    },

    /// Form configuration could not be parsed.
    #[error("invalid form configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Failure reported by a [`Submitter`](crate::Submitter) when delivering a
/// registration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("submission failed: {reason}")]
pub struct SubmitFailure {
    pub reason: String,
}

impl SubmitFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
