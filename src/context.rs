//! Signup session context for the coming-soon app.
//!
//! ## Usage
//!
//! ```ignore
//! // In child components
//! let bootstrap = use_bootstrap();
//! let form = use_form();
//!
//! if let Bootstrap::Ready(session) = bootstrap() {
//!     session.set_field(FormField::Email, "ada@example.com");
//! }
//! ```

use std::sync::Arc;

use dioxus::prelude::*;
use notifyme_core::{AppSyncBackend, FormState, SignupSession};

/// Shared session type for context.
pub type SharedSession = Arc<SignupSession<AppSyncBackend>>;

/// Credential bootstrap progress.
///
/// Submission is unreachable until this is `Ready`. A failed bootstrap is
/// still `Ready`, with an unconfigured workflow behind the session.
#[derive(Clone)]
pub enum Bootstrap {
    Loading,
    Ready(SharedSession),
}

impl Bootstrap {
    pub fn session(&self) -> Option<&SharedSession> {
        match self {
            Bootstrap::Loading => None,
            Bootstrap::Ready(session) => Some(session),
        }
    }
}

/// Hook to access the bootstrap state from context.
pub fn use_bootstrap() -> Signal<Bootstrap> {
    use_context::<Signal<Bootstrap>>()
}

/// Hook to access the mirrored form state.
///
/// Updated on every keystroke and state-machine transition.
pub fn use_form() -> Signal<FormState> {
    use_context::<Signal<FormState>>()
}
