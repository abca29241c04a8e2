//! Error type for the browser glue.
//!
//! The simulation itself never fails; everything here comes from talking to the
//! DOM, parsing configuration or installing the logger.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum UzyError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("canvas 2d context unavailable")]
    NoContext,
    #[error("element `{0}` has an unexpected type")]
    ElementType(&'static str),
    #[error("no session running")]
    NoSession,
    #[error("browser call failed: {0}")]
    Js(String),
    #[cfg(feature = "serde_json")]
    #[error("invalid particle config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("logger already installed: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl From<JsValue> for UzyError {
    fn from(value: JsValue) -> Self {
        UzyError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<UzyError> for JsValue {
    fn from(err: UzyError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UzyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(UzyError::NoWindow.to_string(), "no window");
        assert_eq!(
            UzyError::ElementType("uzy-canvas").to_string(),
            "element `uzy-canvas` has an unexpected type"
        );
        assert_eq!(UzyError::Js("boom".into()).to_string(), "browser call failed: boom");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_errors_convert() {
        let err: UzyError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, UzyError::Config(_)));
    }
}
