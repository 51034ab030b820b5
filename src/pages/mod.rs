//! Page components for the coming-soon app.

mod coming_soon;
mod launch_info;

pub use coming_soon::ComingSoon;
pub use launch_info::LaunchInfo;
