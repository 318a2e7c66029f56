use crate::runner::ds::value::JsValue;

pub enum JErrorType {
    ReferenceError(String),
    TypeError(String),
    RangeError(String),
    SyntaxError(String),
    /// A value could not be converted to a string (a Symbol reached ToString).
    CoercionError(String),
    /// A value raised by a script `throw`.
    Thrown(JsValue),
}
impl JErrorType {
    pub fn new_copy(other: &Self) -> Self {
        match other {
            JErrorType::ReferenceError(m) => JErrorType::ReferenceError(m.to_string()),
            JErrorType::TypeError(m) => JErrorType::TypeError(m.to_string()),
            JErrorType::RangeError(m) => JErrorType::RangeError(m.to_string()),
            JErrorType::SyntaxError(m) => JErrorType::SyntaxError(m.to_string()),
            JErrorType::CoercionError(m) => JErrorType::CoercionError(m.to_string()),
            JErrorType::Thrown(v) => JErrorType::Thrown(v.clone()),
        }
    }

    /// Constructor name of the script-visible error object for this error.
    pub fn error_name(&self) -> &'static str {
        match self {
            JErrorType::ReferenceError(_) => "ReferenceError",
            JErrorType::TypeError(_) | JErrorType::CoercionError(_) => "TypeError",
            JErrorType::RangeError(_) => "RangeError",
            JErrorType::SyntaxError(_) => "SyntaxError",
            JErrorType::Thrown(_) => "Error",
        }
    }

    pub fn to_string(&self) -> String {
        match self {
            JErrorType::ReferenceError(m) => format!("Uncaught reference error: {}.", m),
            JErrorType::TypeError(m) => format!("Uncaught type error: {}.", m),
            JErrorType::RangeError(m) => format!("Uncaught range error: {}.", m),
            JErrorType::SyntaxError(m) => format!("Uncaught syntax error: {}.", m),
            JErrorType::CoercionError(m) => format!("Uncaught type error: {}.", m),
            JErrorType::Thrown(v) => format!("Uncaught {}", v),
        }
    }
}
impl std::fmt::Debug for JErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string())
    }
}
