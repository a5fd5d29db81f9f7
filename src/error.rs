use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the game to the page. The game rules themselves have
/// no error cases.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("element #{0} has an unexpected type")]
    WrongElement(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
