//! Theme for the coming-soon app.

mod styles;

pub use styles::GLOBAL_STYLES;
