use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a validated input field.
#[derive(Clone, PartialEq)]
pub struct ValidatedInput {
    /// The current text content of the input field, valid or not.
    pub text: String,
    /// An optional error message if the current text failed validation.
    pub error: Option<String>,
    /// Callback for the input's `oninput` event. Stores the text and, when it
    /// validates, forwards the parsed value to `on_valid`.
    pub on_text_input: Callback<InputEvent>,
}

/// Custom hook to manage a text field whose parsed value is owned elsewhere.
///
/// Invalid text stays in the field with an error attached; only values that
/// pass `parse_and_validate` reach `on_valid`.
#[hook]
pub fn use_validated_input<T>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
    on_valid: Callback<T>,
) -> ValidatedInput
where
    T: std::fmt::Display + 'static,
{
    let text_state_handle: UseStateHandle<String> = use_state(move || initial_value.to_string());
    let error_state_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            match parse_and_validate(&raw) {
                Ok(parsed_val) => {
                    error_setter.set(None);
                    on_valid.emit(parsed_val);
                }
                Err(err_msg) => {
                    log::warn!("Rejected input {:?}: {}", raw, err_msg);
                    error_setter.set(Some(err_msg));
                }
            }
            text_setter.set(raw);
        })
    };

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
    }
}
