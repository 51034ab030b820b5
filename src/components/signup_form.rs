//! Signup form - three inputs, a status line and the Notify Me button.
//!
//! Inputs and the button are disabled while a submission is in flight,
//! so a second submit cannot be raised from the UI.

use dioxus::prelude::*;
use notifyme_core::{FormField, SignupError};
use notifyme_ui::{Button, Input, LoadingNotice, StatusBanner};

use crate::context::{use_bootstrap, use_form, SharedSession};

fn field_handler(session: &SharedSession, field: FormField) -> impl FnMut(String) + 'static {
    let session = session.clone();
    move |value: String| session.set_field(field, value)
}

#[component]
pub fn SignupForm() -> Element {
    let bootstrap = use_bootstrap();
    let form = use_form();

    let Some(session) = bootstrap().session().cloned() else {
        return rsx! { LoadingNotice {} };
    };

    let state = form();
    let locked = state.is_locked();

    let submit_session = session.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = submit_session.clone();
        spawn(async move {
            match session.submit().await {
                Ok(outcome) => {
                    tracing::info!(status = %outcome.status_message(), "Submission settled");
                }
                Err(SignupError::SubmissionInFlight) => {
                    tracing::debug!("Ignoring submit while another is in flight");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Submission rejected");
                }
            }
        });
    };

    rsx! {
        StatusBanner { message: state.status.clone(), state: state.state }

        form { class: "signup-form", onsubmit: onsubmit,
            Input {
                name: "name".to_string(),
                value: state.fields.name.clone(),
                oninput: field_handler(&session, FormField::Name),
                placeholder: "Enter your name".to_string(),
                disabled: locked,
            }
            Input {
                name: "surname".to_string(),
                value: state.fields.surname.clone(),
                oninput: field_handler(&session, FormField::Surname),
                placeholder: "Enter your surname".to_string(),
                disabled: locked,
            }
            Input {
                name: "email".to_string(),
                input_type: "email".to_string(),
                value: state.fields.email.clone(),
                oninput: field_handler(&session, FormField::Email),
                placeholder: "Enter your email".to_string(),
                disabled: locked,
            }
            Button {
                button_type: "submit".to_string(),
                disabled: locked,
                if locked { "Sending..." } else { "Notify Me" }
            }
        }
    }
}
