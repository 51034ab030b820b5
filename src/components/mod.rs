//! App-level components wired to the signup session.

mod signup_form;

pub use signup_form::SignupForm;
