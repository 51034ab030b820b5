//! Status line and bootstrap indicator
//!
//! Shows the current [`StatusMessage`] under the heading, and a
//! "getting ready" line while credentials are being fetched.

use dioxus::prelude::*;
use notifyme_core::{StatusMessage, SubmissionState};

/// Text shown while a submission is outstanding.
pub fn progress_label(state: SubmissionState) -> Option<&'static str> {
    match state {
        SubmissionState::Checking | SubmissionState::Duplicate => Some("checking your email..."),
        SubmissionState::Creating => Some("signing you up..."),
        SubmissionState::Idle | SubmissionState::Settled => None,
    }
}

/// Properties for the StatusBanner component
#[derive(Clone, PartialEq, Props)]
pub struct StatusBannerProps {
    pub message: Option<StatusMessage>,
    #[props(default)]
    pub state: SubmissionState,
}

/// Renders the status message, or a progress hint while in flight.
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     StatusBanner { message: form().status, state: form().state }
/// }
/// ```
#[component]
pub fn StatusBanner(props: StatusBannerProps) -> Element {
    if let Some(message) = props.message {
        let text = message.text();
        let class = if message.is_error() {
            "status-message error"
        } else {
            "status-message"
        };
        return rsx! {
            p { class: "{class}", role: "status", "{text}" }
        };
    }

    match progress_label(props.state) {
        Some(label) => rsx! {
            p { class: "status-message pending", role: "status", "{label}" }
        },
        None => rsx! {},
    }
}

/// Placeholder shown until the credential bootstrap finishes.
#[component]
pub fn LoadingNotice() -> Element {
    rsx! {
        div { class: "loading-notice",
            span { class: "status-dot", role: "img", "aria-label": "Loading" }
            span { class: "status-label", "getting ready..." }
        }
    }
}
