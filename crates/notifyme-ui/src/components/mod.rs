//! Reusable UI components for the signup page

mod button;
mod input;
mod status_banner;

pub use button::*;
pub use input::*;
pub use status_banner::*;
