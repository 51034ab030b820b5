use std::sync::Arc;

use dioxus::prelude::*;
use notifyme_core::{FormState, NotifyConfig, SignupSession, SignupWorkflow};

use crate::context::Bootstrap;
use crate::pages::{ComingSoon, LaunchInfo};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Coming-soon page with the signup form
/// - `/about` - Static launch information, no backend wiring
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    ComingSoon {},
    #[route("/about")]
    LaunchInfo {},
}

/// Root application component.
///
/// Resolves credentials once on mount, then mirrors the session's form
/// state into a signal for the pages to render.
#[component]
pub fn App() -> Element {
    let config = use_context::<NotifyConfig>();
    let mut bootstrap: Signal<Bootstrap> = use_signal(|| Bootstrap::Loading);
    let mut form: Signal<FormState> = use_signal(FormState::new);

    use_context_provider(|| bootstrap);
    use_context_provider(|| form);

    use_effect(move || {
        let config = config.clone();
        spawn(async move {
            let workflow = SignupWorkflow::connect(&config).await;
            if workflow.is_configured() {
                tracing::info!("Signup workflow ready");
            } else {
                tracing::warn!("Signup workflow running without API configuration");
            }

            let session = Arc::new(SignupSession::new(workflow));
            let mut updates = session.subscribe();
            bootstrap.set(Bootstrap::Ready(session));

            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                form.set(next);
            }
        });
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}
