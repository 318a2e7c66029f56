use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{get, FunctionKind, JsObjectType, ObjectClass};
use crate::runner::ds::object_property::{PropertyKey, MESSAGE_KEY, NAME_KEY, PROTOTYPE_KEY};
use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

/// Result of the `typeof` operator.
pub fn type_of(value: &JsValue) -> &'static str {
    match value {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_OBJECT,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Symbol(_) => TYPE_STR_SYMBOL,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => {
            if o.borrow().is_callable() {
                TYPE_STR_FUNCTION
            } else {
                TYPE_STR_OBJECT
            }
        }
    }
}

pub fn to_boolean(value: &JsValue) -> bool {
    match value {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Symbol(_) | JsValue::Object(_) => true,
        JsValue::Number(n) => match n {
            JsNumberType::Integer(i) => *i != 0,
            JsNumberType::Float(f) => *f != 0.0,
            JsNumberType::NaN => false,
            JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => true,
        },
    }
}

/// The ToString conversion. Symbols cannot be converted implicitly.
pub fn to_string(value: &JsValue) -> Result<String, JErrorType> {
    Ok(match value {
        JsValue::Undefined => TYPE_STR_UNDEFINED.to_string(),
        JsValue::Null => TYPE_STR_NULL.to_string(),
        JsValue::Boolean(b) => b.to_string(),
        JsValue::String(s) => s.to_string(),
        JsValue::Number(n) => n.to_string(),
        JsValue::Symbol(_) => {
            return Err(JErrorType::CoercionError(
                "Cannot convert a Symbol value to a string".to_string(),
            ))
        }
        JsValue::Object(o) => object_to_string(o)?,
    })
}

fn object_to_string(o: &JsObjectType) -> Result<String, JErrorType> {
    let items = {
        let b = o.borrow();
        match &b.class {
            ObjectClass::Array(items) => items.clone(),
            ObjectClass::Function(FunctionKind::Script { data, .. }) => {
                return Ok(data.source_text.to_string())
            }
            ObjectClass::Function(FunctionKind::Native(n)) => {
                return Ok(format!("function {}() {{ [native code] }}", n.name))
            }
            ObjectClass::Function(FunctionKind::Host { property, .. }) => {
                return Ok(format!("function {}() {{ [native code] }}", property))
            }
            ObjectClass::Ordinary => return Ok("[object Object]".to_string()),
            ObjectClass::Error => return error_to_string(o),
        }
    };
    let mut parts = Vec::with_capacity(items.len());
    for item in &items {
        parts.push(match item {
            JsValue::Undefined | JsValue::Null => String::new(),
            v => to_string(v)?,
        });
    }
    Ok(parts.join(","))
}

fn error_to_string(o: &JsObjectType) -> Result<String, JErrorType> {
    let name = match get(o, &NAME_KEY) {
        JsValue::Undefined => "Error".to_string(),
        v => to_string(&v)?,
    };
    let message = match get(o, &MESSAGE_KEY) {
        JsValue::Undefined => String::new(),
        v => to_string(&v)?,
    };
    Ok(if message.is_empty() {
        name
    } else if name.is_empty() {
        message
    } else {
        format!("{}: {}", name, message)
    })
}

pub fn to_number(value: &JsValue) -> Result<JsNumberType, JErrorType> {
    Ok(match value {
        JsValue::Undefined => JsNumberType::NaN,
        JsValue::Null => JsNumberType::Integer(0),
        JsValue::Boolean(b) => JsNumberType::Integer(if *b { 1 } else { 0 }),
        JsValue::Number(n) => n.clone(),
        JsValue::String(s) => string_to_number(s),
        JsValue::Symbol(_) => {
            return Err(JErrorType::TypeError(
                "Cannot convert a Symbol value to a number".to_string(),
            ))
        }
        JsValue::Object(_) => string_to_number(&to_string(value)?),
    })
}

pub fn string_to_number(s: &str) -> JsNumberType {
    let s = s.trim();
    if s.is_empty() {
        return JsNumberType::Integer(0);
    }
    match s {
        "Infinity" | "+Infinity" => return JsNumberType::PositiveInfinity,
        "-Infinity" => return JsNumberType::NegativeInfinity,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return match i64::from_str_radix(hex, 16) {
            Ok(i) => JsNumberType::Integer(i),
            Err(_) => JsNumberType::NaN,
        };
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return JsNumberType::NaN;
    }
    match s.parse::<f64>() {
        Ok(f) => JsNumberType::from_f64(f),
        Err(_) => JsNumberType::NaN,
    }
}

pub fn to_property_key(value: &JsValue) -> Result<PropertyKey, JErrorType> {
    Ok(match value {
        JsValue::Symbol(s) => PropertyKey::Sym(s.clone()),
        v => PropertyKey::Str(to_string(v)?),
    })
}

/// Converts objects to their string form; primitives pass through.
pub fn to_primitive(value: &JsValue) -> Result<JsValue, JErrorType> {
    Ok(match value {
        JsValue::Object(_) => JsValue::String(to_string(value)?),
        v => v.clone(),
    })
}

/// The `===` comparison.
pub fn strict_equality(left: &JsValue, right: &JsValue) -> bool {
    left == right
}

/// The `==` comparison.
pub fn abstract_equality(left: &JsValue, right: &JsValue) -> Result<bool, JErrorType> {
    Ok(match (left, right) {
        (JsValue::Undefined, JsValue::Null) | (JsValue::Null, JsValue::Undefined) => true,
        (JsValue::Number(a), JsValue::String(b)) => *a == string_to_number(b),
        (JsValue::String(a), JsValue::Number(b)) => string_to_number(a) == *b,
        (JsValue::Boolean(_), _) => {
            abstract_equality(&JsValue::Number(to_number(left)?), right)?
        }
        (_, JsValue::Boolean(_)) => {
            abstract_equality(left, &JsValue::Number(to_number(right)?))?
        }
        (JsValue::Object(_), JsValue::String(_) | JsValue::Number(_) | JsValue::Symbol(_)) => {
            abstract_equality(&to_primitive(left)?, right)?
        }
        (JsValue::String(_) | JsValue::Number(_) | JsValue::Symbol(_), JsValue::Object(_)) => {
            abstract_equality(left, &to_primitive(right)?)?
        }
        _ => {
            std::mem::discriminant(left) == std::mem::discriminant(right)
                && strict_equality(left, right)
        }
    })
}

/// The `instanceof` operator: is `target.prototype` on `value`'s prototype
/// chain? Functions whose `prototype` is not an object (the native
/// built-ins and host trampolines) match nothing.
pub fn instance_of(value: &JsValue, target: &JsValue) -> Result<bool, JErrorType> {
    let target = match target {
        JsValue::Object(o) if o.borrow().is_callable() => o,
        _ => {
            return Err(JErrorType::TypeError(
                "Right-hand side of 'instanceof' is not callable".to_string(),
            ))
        }
    };
    let prototype = match get(target, &PROTOTYPE_KEY) {
        JsValue::Object(p) => p,
        _ => return Ok(false),
    };
    let mut current = match value {
        JsValue::Object(o) => o.borrow().prototype.clone(),
        _ => return Ok(false),
    };
    while let Some(o) = current {
        if Rc::ptr_eq(&o, &prototype) {
            return Ok(true);
        }
        current = o.borrow().prototype.clone();
    }
    Ok(false)
}
