//! Coming-soon page - brand, tagline and the signup form.

use dioxus::prelude::*;
use notifyme_ui::{Button, ButtonVariant, LoadingNotice};

use crate::app::Route;
use crate::components::SignupForm;
use crate::context::{use_bootstrap, Bootstrap};

/// Coming-soon page component.
///
/// The form only mounts once the credential bootstrap has finished.
#[component]
pub fn ComingSoon() -> Element {
    let navigator = use_navigator();
    let bootstrap = use_bootstrap();

    rsx! {
        main { class: "coming-soon",
            header { class: "site-header",
                div { class: "brand",
                    span { class: "brand-mark", "EH" }
                    span { class: "brand-name", "EventHero" }
                }
                Button {
                    variant: ButtonVariant::Link,
                    onclick: move |_| {
                        navigator.push(Route::LaunchInfo {});
                    },
                    "What's launching?"
                }
            }

            h1 { class: "headline", "Coming Soon" }
            p { class: "tagline", "Your gateway to unforgettable events is almost here." }

            match bootstrap() {
                Bootstrap::Loading => rsx! { LoadingNotice {} },
                Bootstrap::Ready(_) => rsx! { SignupForm {} },
            }
        }
    }
}
