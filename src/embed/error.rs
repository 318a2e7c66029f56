use thiserror::Error;

use crate::parser::JsParseError;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;

/// Errors reported to the embedding host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// The handle, or the VM it depends on, has been destroyed.
    #[error("native handle has been destroyed")]
    DestroyedHandleError,

    #[error("syntax error at {line}:{column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// An exception escaped the script. Carries the exception's string form.
    #[error("uncaught {0}")]
    ScriptRuntimeError(String),

    /// A value could not be converted to a string (Symbol values never can be implicitly).
    #[error("cannot convert value to string: {0}")]
    StringCoercionError(String),

    #[error("expected a {expected} value but found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("globals are already initialized")]
    GlobalsAlreadyInitialized,

    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),

    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EmbedError>;

impl From<JsParseError> for EmbedError {
    fn from(e: JsParseError) -> Self {
        EmbedError::ParseError {
            line: e.line,
            column: e.column,
            message: e.message,
        }
    }
}

impl From<JErrorType> for EmbedError {
    fn from(e: JErrorType) -> Self {
        match e {
            JErrorType::CoercionError(m) => EmbedError::StringCoercionError(m),
            JErrorType::Thrown(v) => EmbedError::ScriptRuntimeError(describe_thrown(&v)),
            JErrorType::ReferenceError(ref m)
            | JErrorType::TypeError(ref m)
            | JErrorType::RangeError(ref m)
            | JErrorType::SyntaxError(ref m) => {
                EmbedError::ScriptRuntimeError(format!("{}: {}", e.error_name(), m))
            }
        }
    }
}

fn describe_thrown(value: &JsValue) -> String {
    match value {
        JsValue::Symbol(s) => s.descriptive_string(),
        v => to_string(v).unwrap_or_else(|_| "exception".to_string()),
    }
}
