use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::object::{JsObjectType, ObjectClass};
use crate::runner::ds::operations::type_conversion::{TYPE_STR_NULL, TYPE_STR_UNDEFINED};
use crate::runner::ds::symbol::SymbolData;

/// Integral numbers up to this magnitude are kept in the integer representation.
const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    String(String),
    Symbol(SymbolData),
    Number(JsNumberType),
    Object(JsObjectType),
}
impl JsValue {
    pub fn is_object(&self) -> bool {
        matches!(self, JsValue::Object(_))
    }

    pub fn is_callable(&self) -> bool {
        match self {
            JsValue::Object(o) => o.borrow().is_callable(),
            _ => false,
        }
    }

    pub fn from_f64(n: f64) -> Self {
        JsValue::Number(JsNumberType::from_f64(n))
    }
}
impl Clone for JsValue {
    fn clone(&self) -> Self {
        match self {
            JsValue::Undefined => JsValue::Undefined,
            JsValue::String(d) => JsValue::String(d.to_string()),
            JsValue::Boolean(d) => JsValue::Boolean(*d),
            JsValue::Null => JsValue::Null,
            JsValue::Number(d) => JsValue::Number(d.clone()),
            JsValue::Object(o) => JsValue::Object(o.clone()),
            JsValue::Symbol(d) => JsValue::Symbol(d.clone()),
        }
    }
}
/// Inspection form used by the REPL; script-level conversion lives in `type_conversion`.
impl Display for JsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "{}", TYPE_STR_UNDEFINED),
            JsValue::Null => write!(f, "{}", TYPE_STR_NULL),
            JsValue::Boolean(b) => write!(f, "{}", b),
            JsValue::String(s) => write!(f, "{:?}", s),
            JsValue::Symbol(s) => write!(f, "{}", s),
            JsValue::Number(n) => write!(f, "{}", n),
            JsValue::Object(o) => match &o.borrow().class {
                ObjectClass::Array(items) => write!(f, "[Array({})]", items.len()),
                ObjectClass::Function(_) => write!(f, "[Function]"),
                ObjectClass::Error => write!(f, "[Error]"),
                ObjectClass::Ordinary => write!(f, "[object Object]"),
            },
        }
    }
}

impl fmt::Debug for JsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "JsValue::Undefined"),
            JsValue::Null => write!(f, "JsValue::Null"),
            JsValue::Boolean(b) => write!(f, "JsValue::Boolean({})", b),
            JsValue::String(s) => write!(f, "JsValue::String({:?})", s),
            JsValue::Symbol(s) => write!(f, "JsValue::Symbol({})", s),
            JsValue::Number(n) => write!(f, "JsValue::Number({:?})", n),
            JsValue::Object(_) => write!(f, "JsValue::Object(...)"),
        }
    }
}

/// Same-value identity: objects by reference, symbols by id, NaN unequal to itself.
impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            (JsValue::Object(a), JsValue::Object(b)) => Rc::ptr_eq(a, b),
            (JsValue::Symbol(a), JsValue::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug)]
pub enum JsNumberType {
    Integer(i64),
    Float(f64),
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}
impl JsNumberType {
    /// Normalizes an `f64` so that integral values use the integer representation.
    pub fn from_f64(n: f64) -> Self {
        if n.is_nan() {
            JsNumberType::NaN
        } else if n == f64::INFINITY {
            JsNumberType::PositiveInfinity
        } else if n == f64::NEG_INFINITY {
            JsNumberType::NegativeInfinity
        } else if n.fract() == 0.0
            && n.abs() <= MAX_SAFE_INTEGER
            && !(n == 0.0 && n.is_sign_negative())
        {
            JsNumberType::Integer(n as i64)
        } else {
            JsNumberType::Float(n)
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            JsNumberType::Integer(i) => *i as f64,
            JsNumberType::Float(f) => *f,
            JsNumberType::NaN => f64::NAN,
            JsNumberType::PositiveInfinity => f64::INFINITY,
            JsNumberType::NegativeInfinity => f64::NEG_INFINITY,
        }
    }

    /// The value as an `i32`, when it is integral and in range.
    pub fn as_exact_i32(&self) -> Option<i32> {
        match self {
            JsNumberType::Integer(i) if *i >= i32::MIN as i64 && *i <= i32::MAX as i64 => {
                Some(*i as i32)
            }
            _ => None,
        }
    }
}
/// Number-to-string conversion as scripts observe it.
impl Display for JsNumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JsNumberType::Integer(i) => write!(f, "{}", i),
            JsNumberType::Float(nf) => {
                if *nf == 0.0 {
                    write!(f, "0")
                } else if nf.abs() >= 1e21 || nf.abs() < 1e-6 {
                    let s = format!("{:e}", nf);
                    match s.find("e") {
                        Some(pos) if !s[pos + 1..].starts_with('-') => {
                            write!(f, "{}e+{}", &s[..pos], &s[pos + 1..])
                        }
                        _ => write!(f, "{}", s),
                    }
                } else {
                    write!(f, "{}", nf)
                }
            }
            JsNumberType::NaN => write!(f, "NaN"),
            JsNumberType::PositiveInfinity => write!(f, "Infinity"),
            JsNumberType::NegativeInfinity => write!(f, "-Infinity"),
        }
    }
}
impl Clone for JsNumberType {
    fn clone(&self) -> Self {
        match self {
            JsNumberType::Integer(i) => JsNumberType::Integer(*i),
            JsNumberType::Float(nf) => JsNumberType::Float(*nf),
            JsNumberType::NaN => JsNumberType::NaN,
            JsNumberType::PositiveInfinity => JsNumberType::PositiveInfinity,
            JsNumberType::NegativeInfinity => JsNumberType::NegativeInfinity,
        }
    }
}
impl PartialEq for JsNumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsNumberType::Integer(a), JsNumberType::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}
