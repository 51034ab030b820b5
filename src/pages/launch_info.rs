//! Static launch information page.

use dioxus::prelude::*;

use crate::app::Route;

#[component]
pub fn LaunchInfo() -> Element {
    rsx! {
        main { class: "launch-info",
            h1 { class: "headline", "About the launch" }
            p { class: "tagline",
                "EventHero brings ticketing, guest lists and event discovery into one place."
            }
            ul { class: "launch-points",
                li { "Browse upcoming events near you" }
                li { "Book tickets in a couple of taps" }
                li { "Get reminders before doors open" }
            }
            p { class: "launch-note",
                "Leave your email on the signup page and we will let you know before we go live."
            }
            Link { class: "btn-link", to: Route::ComingSoon {}, "Back to signup" }
        }
    }
}
