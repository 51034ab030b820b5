//! Input Field Component
//!
//! Rounded, bordered inputs with white text on black.
//! `required` and `type="email"` let the webview block malformed
//! submissions before the submit handler runs.

use dioxus::prelude::*;

/// Properties for the Input component
#[derive(Clone, PartialEq, Props)]
pub struct InputProps {
    /// Form control name (`name`, `surname`, `email`)
    pub name: String,
    pub value: String,
    pub oninput: EventHandler<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    /// Input type (text, email, ...)
    #[props(default = "text".to_string())]
    pub input_type: String,
    #[props(default = true)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default)]
    pub class: Option<String>,
}

/// Text input
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     Input {
///         name: "email".to_string(),
///         input_type: "email".to_string(),
///         value: form().fields.email,
///         oninput: move |v| session.set_field(FormField::Email, v),
///         placeholder: "Enter your email".to_string(),
///     }
/// }
/// ```
#[component]
pub fn Input(props: InputProps) -> Element {
    let input_class = input_class(props.class.as_deref());

    rsx! {
        div { class: "form-field",
            input {
                id: "input-{props.name}",
                name: "{props.name}",
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                required: props.required,
                disabled: props.disabled,
                oninput: move |e| props.oninput.call(e.value()),
            }
        }
    }
}

fn input_class(extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.is_empty() => format!("input-field {}", extra),
        _ => "input-field".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_class_appends_extra() {
        assert_eq!(input_class(None), "input-field");
        assert_eq!(input_class(Some("")), "input-field");
        assert_eq!(input_class(Some("wide")), "input-field wide");
    }
}
