//! Registration form engine for a CS2 cup.
//!
//! [`RegistrationForm`] owns the field values of a registration, validates
//! them against the rule table of its [`FormVariant`], and drives the submit
//! cycle that ends in a [`Notification`]. [`Tournament::cs2_2025`] holds the
//! static schedule, prize and bracket data shown alongside the form.

mod config;
mod error;
mod form;
mod model;
mod notify;
pub(crate) mod registration;
mod submit;
mod tournament;

pub use config::{FormConfig, FormVariant, DEFAULT_SUBMIT_DELAY_MS};
pub use error::{RegistrationError, Result, SubmitFailure};
pub use form::{FormPhase, RegistrationForm};
pub use model::*;
pub use notify::{NotificationSink, TracingSink};
pub use submit::{SimulatedSubmitter, Submitter};
