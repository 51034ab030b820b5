//! NotifyMe UI Components
//!
//! Dioxus components for the "Coming Soon" signup page.
//!
//! ## Look
//!
//! - **Black (#000000)**: page background
//! - **White (#ffffff)**: headings, body copy, input text
//! - **Red (#ef4444)**: submit button and status line
//!
//! Status lines always come from [`notifyme_core::StatusMessage`] so the
//! wording stays identical across front-ends.

pub mod components;

pub use components::*;
