use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::runner::ds::env_record::EnvironmentRecordType;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object_property::{PropertyKey, LENGTH_KEY, MESSAGE_KEY, NAME_KEY};
use crate::runner::ds::operations::type_conversion::to_number;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::types::NativeFn;

pub type JsObjectType = Rc<RefCell<JsObject>>;

/// Arrays are stored densely; growing one past this many elements is a
/// `RangeError` rather than an allocation the host cannot survive.
pub const DENSE_ARRAY_LIMIT: usize = 1 << 22;

const INVALID_ARRAY_LENGTH: &str = "Invalid array length";

pub enum ObjectClass {
    Ordinary,
    Array(Vec<JsValue>),
    Error,
    Function(FunctionKind),
}

pub enum FunctionKind {
    /// A script function closing over the environment it was created in.
    Script {
        data: Rc<FunctionData>,
        scope: EnvironmentRecordType,
    },
    Native(NativeFunctionData),
    /// Trampoline into a host callback, looked up by key at call time.
    Host { namespace: String, property: String },
}

pub struct NativeFunctionData {
    pub name: String,
    pub call: NativeFn,
    pub construct: Option<NativeFn>,
}

pub struct JsObject {
    pub class: ObjectClass,
    pub prototype: Option<JsObjectType>,
    properties: HashMap<PropertyKey, JsValue>,
}

impl JsObject {
    pub fn new(class: ObjectClass) -> Self {
        JsObject {
            class,
            prototype: None,
            properties: HashMap::new(),
        }
    }

    pub fn into_ref(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }

    pub fn new_ordinary() -> JsObjectType {
        JsObject::new(ObjectClass::Ordinary).into_ref()
    }

    pub fn new_array(items: Vec<JsValue>) -> JsObjectType {
        JsObject::new(ObjectClass::Array(items)).into_ref()
    }

    pub fn new_error(name: &str, message: Option<String>) -> JsObjectType {
        let mut o = JsObject::new(ObjectClass::Error);
        o.define(NAME_KEY.clone(), JsValue::String(name.to_string()));
        if let Some(message) = message {
            o.define(MESSAGE_KEY.clone(), JsValue::String(message));
        }
        o.into_ref()
    }

    pub fn new_function(kind: FunctionKind) -> JsObjectType {
        JsObject::new(ObjectClass::Function(kind)).into_ref()
    }

    pub fn new_native_function(name: &str, call: NativeFn) -> JsObjectType {
        JsObject::new_function(FunctionKind::Native(NativeFunctionData {
            name: name.to_string(),
            call,
            construct: None,
        }))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.class, ObjectClass::Function(_))
    }

    pub fn is_constructor(&self) -> bool {
        match &self.class {
            ObjectClass::Function(FunctionKind::Script { .. }) => true,
            ObjectClass::Function(FunctionKind::Native(n)) => n.construct.is_some(),
            _ => false,
        }
    }

    pub fn get_own_property(&self, key: &PropertyKey) -> Option<JsValue> {
        if let Some(v) = self.properties.get(key) {
            return Some(v.clone());
        }
        match &self.class {
            ObjectClass::Array(items) => {
                if key == &*LENGTH_KEY {
                    Some(JsValue::Number(JsNumberType::Integer(items.len() as i64)))
                } else {
                    key.as_array_index().and_then(|i| items.get(i).cloned())
                }
            }
            ObjectClass::Function(kind) => {
                if key == &*NAME_KEY {
                    Some(JsValue::String(match kind {
                        FunctionKind::Script { data, .. } => data.id.clone().unwrap_or_default(),
                        FunctionKind::Native(n) => n.name.to_string(),
                        FunctionKind::Host { property, .. } => property.to_string(),
                    }))
                } else if key == &*LENGTH_KEY {
                    let len = match kind {
                        FunctionKind::Script { data, .. } => data.params.len() as i64,
                        FunctionKind::Native(_) => 0,
                        FunctionKind::Host { .. } => 1,
                    };
                    Some(JsValue::Number(JsNumberType::Integer(len)))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.get_own_property(key).is_some()
    }

    /// Property assignment. Array elements and `length` go to the dense
    /// storage and fail with a `RangeError` when they would grow it past
    /// [`DENSE_ARRAY_LIMIT`].
    pub fn set(&mut self, key: PropertyKey, value: JsValue) -> Result<(), JErrorType> {
        if let ObjectClass::Array(items) = &mut self.class {
            if let Some(i) = key.as_array_index() {
                if i >= items.len() {
                    grow_check(i + 1)?;
                    items.resize(i + 1, JsValue::Undefined);
                }
                items[i] = value;
                return Ok(());
            }
            if key == *LENGTH_KEY {
                let len = array_length(&value)?;
                grow_check(len)?;
                items.resize(len, JsValue::Undefined);
                return Ok(());
            }
        }
        self.properties.insert(key, value);
        Ok(())
    }

    /// Creates an own data property directly, bypassing array element
    /// storage. Used when building fresh non-array objects.
    pub fn define(&mut self, key: PropertyKey, value: JsValue) {
        self.properties.insert(key, value);
    }
}

fn grow_check(len: usize) -> Result<(), JErrorType> {
    if len > DENSE_ARRAY_LIMIT {
        Err(JErrorType::RangeError(INVALID_ARRAY_LENGTH.to_string()))
    } else {
        Ok(())
    }
}

/// A value assigned to `length` must be an integer in `0..=2^32-1`.
fn array_length(value: &JsValue) -> Result<usize, JErrorType> {
    let invalid = || JErrorType::RangeError(INVALID_ARRAY_LENGTH.to_string());
    match to_number(value)? {
        JsNumberType::Integer(n) if n >= 0 && n <= u32::MAX as i64 => Ok(n as usize),
        JsNumberType::Float(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => {
            Ok(f as usize)
        }
        _ => Err(invalid()),
    }
}

/// Property lookup through the prototype chain.
pub fn get(obj: &JsObjectType, key: &PropertyKey) -> JsValue {
    let mut current = Some(obj.clone());
    while let Some(o) = current {
        let next = {
            let b = o.borrow();
            if let Some(v) = b.get_own_property(key) {
                return v;
            }
            b.prototype.clone()
        };
        current = next;
    }
    JsValue::Undefined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_grows_on_index_assignment() {
        let arr = JsObject::new_array(vec![]);
        arr.borrow_mut()
            .set(PropertyKey::from("2"), JsValue::Boolean(true))
            .unwrap();
        assert_eq!(
            get(&arr, &LENGTH_KEY),
            JsValue::Number(JsNumberType::Integer(3))
        );
        assert_eq!(get(&arr, &PropertyKey::from("0")), JsValue::Undefined);
    }

    #[test]
    fn array_growth_past_the_dense_limit_is_a_range_error() {
        let arr = JsObject::new_array(vec![]);
        let far = PropertyKey::Str(DENSE_ARRAY_LIMIT.to_string());
        match arr.borrow_mut().set(far, JsValue::Null) {
            Err(JErrorType::RangeError(m)) => assert_eq!(m, INVALID_ARRAY_LENGTH),
            other => panic!("expected a RangeError, got {:?}", other),
        }
        assert_eq!(
            get(&arr, &LENGTH_KEY),
            JsValue::Number(JsNumberType::Integer(0))
        );
    }

    #[test]
    fn array_length_must_be_a_uint32() {
        let arr = JsObject::new_array(vec![JsValue::Null; 4]);
        for bad in [
            JsNumberType::Integer(-1),
            JsNumberType::Float(1.5),
            JsNumberType::Integer(1 << 40),
            JsNumberType::NaN,
        ]
        .iter()
        {
            assert!(arr
                .borrow_mut()
                .set(LENGTH_KEY.clone(), JsValue::Number(bad.clone()))
                .is_err());
        }
        arr.borrow_mut()
            .set(LENGTH_KEY.clone(), JsValue::Number(JsNumberType::Integer(1)))
            .unwrap();
        assert_eq!(
            get(&arr, &LENGTH_KEY),
            JsValue::Number(JsNumberType::Integer(1))
        );
    }

    #[test]
    fn lookup_walks_prototype_chain() {
        let proto = JsObject::new_ordinary();
        proto
            .borrow_mut()
            .define(PropertyKey::from("shared"), JsValue::Null);
        let mut child = JsObject::new(ObjectClass::Ordinary);
        child.prototype = Some(proto);
        let child = child.into_ref();
        assert_eq!(get(&child, &PropertyKey::from("shared")), JsValue::Null);
        assert_eq!(get(&child, &PropertyKey::from("missing")), JsValue::Undefined);
    }

    #[test]
    fn error_objects_carry_name_and_message() {
        let e = JsObject::new_error("TypeError", Some("bad".to_string()));
        assert_eq!(get(&e, &NAME_KEY), JsValue::String("TypeError".to_string()));
        assert_eq!(get(&e, &MESSAGE_KEY), JsValue::String("bad".to_string()));
    }
}
