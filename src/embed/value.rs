//! Host-side handles to script values.
//!
//! A value handle holds its own copy of the value: destroying it never
//! touches the script state the value came from. Checked accessors fail with
//! `TypeMismatch` on the wrong tag; the `*_unchecked` variants skip the check
//! and return a placeholder instead.

use std::ops::Deref;

use crate::embed::context::Context;
use crate::embed::error::{EmbedError, Result};
use crate::embed::globals::Globals;
use crate::embed::handle::{NativeHandle, RawHandle};
use crate::embed::registry::{RegistryRef, Resource};
use crate::embed::vm::VmInstance;
use crate::runner::ds::operations::type_conversion::{
    abstract_equality, instance_of, strict_equality, to_string,
};
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::{JsNumberType, JsValue};

const KIND_BOOLEAN: &str = "boolean";
const KIND_INT32: &str = "int32";
const KIND_NUMBER: &str = "number";
const KIND_STRING: &str = "string";
const KIND_SYMBOL: &str = "symbol";

fn kind_of(value: &JsValue) -> &'static str {
    match value {
        JsValue::Undefined => "undefined",
        JsValue::Null => "null",
        JsValue::Boolean(_) => KIND_BOOLEAN,
        JsValue::Number(_) => KIND_NUMBER,
        JsValue::String(_) => KIND_STRING,
        JsValue::Symbol(_) => KIND_SYMBOL,
        JsValue::Object(_) => "object",
    }
}

fn mismatch(expected: &'static str, value: &JsValue) -> EmbedError {
    EmbedError::TypeMismatch {
        expected,
        actual: kind_of(value),
    }
}

#[derive(Debug, Clone)]
pub struct ValueHandle {
    raw: RawHandle,
}

impl ValueHandle {
    pub(crate) fn from_js_value(registry: &RegistryRef, value: JsValue) -> ValueHandle {
        let id = registry.borrow_mut().insert(Resource::Value(value));
        ValueHandle {
            raw: RawHandle::new(id, registry.clone()),
        }
    }

    fn create(globals: &Globals, value: JsValue) -> ValueHandle {
        ValueHandle::from_js_value(globals.registry(), value)
    }

    pub fn create_undefined(globals: &Globals) -> ValueHandle {
        ValueHandle::create(globals, JsValue::Undefined)
    }

    pub fn create_null(globals: &Globals) -> ValueHandle {
        ValueHandle::create(globals, JsValue::Null)
    }

    pub fn create_boolean(globals: &Globals, value: bool) -> ValueHandle {
        ValueHandle::create(globals, JsValue::Boolean(value))
    }

    pub fn create_int32(globals: &Globals, value: i32) -> ValueHandle {
        ValueHandle::create(globals, JsValue::Number(JsNumberType::Integer(value as i64)))
    }

    pub fn create_number(globals: &Globals, value: f64) -> ValueHandle {
        ValueHandle::create(globals, JsValue::from_f64(value))
    }

    /// A copy of the underlying value.
    pub(crate) fn js_value(&self) -> Result<JsValue> {
        Ok(self.raw.registry().borrow().value(self.raw.id())?.clone())
    }

    /// A new handle in its own slot holding a copy of this value.
    fn fresh_copy(&self) -> Result<ValueHandle> {
        Ok(ValueHandle::from_js_value(self.raw.registry(), self.js_value()?))
    }

    fn check<R>(&self, f: impl FnOnce(&JsValue) -> R) -> Result<R> {
        let registry = self.raw.registry().borrow();
        Ok(f(registry.value(self.raw.id())?))
    }

    // ── Predicates ──

    pub fn is_undefined(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Undefined))
    }

    pub fn is_null(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Null))
    }

    pub fn is_undefined_or_null(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Undefined | JsValue::Null))
    }

    pub fn is_boolean(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Boolean(_)))
    }

    pub fn is_true(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Boolean(true)))
    }

    pub fn is_false(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Boolean(false)))
    }

    pub fn is_number(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Number(_)))
    }

    /// A number whose value is exactly representable as an `i32`. `-0` is not.
    pub fn is_int32(&self) -> Result<bool> {
        self.check(|v| match v {
            JsValue::Number(n) => n.as_exact_i32().is_some(),
            _ => false,
        })
    }

    pub fn is_string(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::String(_)))
    }

    pub fn is_symbol(&self) -> Result<bool> {
        self.check(|v| matches!(v, JsValue::Symbol(_)))
    }

    pub fn is_object(&self) -> Result<bool> {
        self.check(|v| v.is_object())
    }

    // ── Checked accessors ──

    pub fn as_boolean(&self) -> Result<bool> {
        self.check(|v| match v {
            JsValue::Boolean(b) => Ok(*b),
            other => Err(mismatch(KIND_BOOLEAN, other)),
        })?
    }

    pub fn as_int32(&self) -> Result<i32> {
        self.check(|v| match v {
            JsValue::Number(n) => n
                .as_exact_i32()
                .ok_or_else(|| mismatch(KIND_INT32, v)),
            other => Err(mismatch(KIND_INT32, other)),
        })?
    }

    pub fn as_number(&self) -> Result<f64> {
        self.check(|v| match v {
            JsValue::Number(n) => Ok(n.as_f64()),
            other => Err(mismatch(KIND_NUMBER, other)),
        })?
    }

    /// The string as an independent handle: destroying either one leaves the
    /// other valid.
    pub fn as_script_string(&self) -> Result<StringValue> {
        self.check(|v| match v {
            JsValue::String(_) => Ok(()),
            other => Err(mismatch(KIND_STRING, other)),
        })??;
        Ok(StringValue {
            value: self.fresh_copy()?,
        })
    }

    /// The symbol as an independent handle.
    pub fn as_script_symbol(&self) -> Result<SymbolValue> {
        self.check(|v| match v {
            JsValue::Symbol(_) => Ok(()),
            other => Err(mismatch(KIND_SYMBOL, other)),
        })??;
        Ok(SymbolValue {
            value: self.fresh_copy()?,
        })
    }

    // ── Unchecked accessors ──

    /// `false` when the value is not a boolean or the handle is destroyed.
    pub fn as_boolean_unchecked(&self) -> bool {
        let result = self.as_boolean();
        debug_assert!(result.is_ok(), "as_boolean_unchecked on {:?}", result);
        result.unwrap_or(false)
    }

    /// `0` when the value is not an int32 or the handle is destroyed.
    pub fn as_int32_unchecked(&self) -> i32 {
        let result = self.as_int32();
        debug_assert!(result.is_ok(), "as_int32_unchecked on {:?}", result);
        result.unwrap_or(0)
    }

    /// NaN when the value is not a number or the handle is destroyed.
    pub fn as_number_unchecked(&self) -> f64 {
        let result = self.as_number();
        debug_assert!(result.is_ok(), "as_number_unchecked on {:?}", result);
        result.unwrap_or(f64::NAN)
    }

    /// Reinterpret as a string handle without checking the tag. A destroyed
    /// handle yields a destroyed `StringValue`.
    pub fn as_script_string_unchecked(&self) -> StringValue {
        debug_assert!(matches!(self.is_string(), Ok(true)));
        StringValue {
            value: self.fresh_copy().unwrap_or_else(|_| self.clone()),
        }
    }

    /// Reinterpret as a symbol handle without checking the tag.
    pub fn as_script_symbol_unchecked(&self) -> SymbolValue {
        debug_assert!(matches!(self.is_symbol(), Ok(true)));
        SymbolValue {
            value: self.fresh_copy().unwrap_or_else(|_| self.clone()),
        }
    }

    // ── Conversions and comparisons ──

    /// The engine's ToString. Symbols fail with `StringCoercionError`.
    pub fn to_string(&self, context: &Context) -> Result<String> {
        context.raw_handle().ensure_valid()?;
        let value = self.js_value()?;
        Ok(to_string(&value)?)
    }

    /// `===`
    pub fn equals_to(&self, context: &Context, other: &ValueHandle) -> Result<bool> {
        context.raw_handle().ensure_valid()?;
        Ok(strict_equality(&self.js_value()?, &other.js_value()?))
    }

    /// `==`
    pub fn abstract_equals_to(&self, context: &Context, other: &ValueHandle) -> Result<bool> {
        context.raw_handle().ensure_valid()?;
        Ok(abstract_equality(&self.js_value()?, &other.js_value()?)?)
    }

    /// `self instanceof constructor`. A `constructor` that is not callable
    /// fails with `ScriptRuntimeError` carrying the `TypeError`.
    pub fn instance_of(&self, context: &Context, constructor: &ValueHandle) -> Result<bool> {
        context.raw_handle().ensure_valid()?;
        Ok(instance_of(&self.js_value()?, &constructor.js_value()?)?)
    }
}

impl NativeHandle for ValueHandle {
    fn raw_handle(&self) -> &RawHandle {
        &self.raw
    }
}

/// A value handle known to hold a string.
#[derive(Debug, Clone)]
pub struct StringValue {
    value: ValueHandle,
}

impl StringValue {
    pub fn create(globals: &Globals, value: &str) -> StringValue {
        StringValue {
            value: ValueHandle::create(globals, JsValue::String(value.to_string())),
        }
    }

    pub fn value(&self) -> Result<String> {
        match self.value.js_value()? {
            JsValue::String(s) => Ok(s),
            other => Err(mismatch(KIND_STRING, &other)),
        }
    }

    pub fn into_value(self) -> ValueHandle {
        self.value
    }
}

impl Deref for StringValue {
    type Target = ValueHandle;

    fn deref(&self) -> &ValueHandle {
        &self.value
    }
}

impl NativeHandle for StringValue {
    fn raw_handle(&self) -> &RawHandle {
        &self.value.raw
    }
}

/// A value handle known to hold a symbol.
#[derive(Debug, Clone)]
pub struct SymbolValue {
    value: ValueHandle,
}

impl SymbolValue {
    /// A new unique symbol.
    pub fn create(globals: &Globals, description: Option<&str>) -> SymbolValue {
        let symbol = SymbolData::new(description.map(str::to_string));
        SymbolValue {
            value: ValueHandle::create(globals, JsValue::Symbol(symbol)),
        }
    }

    /// `Symbol.for(key)` against the VM's registry, the same one its scripts use.
    pub fn from_global_symbol_registry(vm: &VmInstance, key: &StringValue) -> Result<SymbolValue> {
        let key = key.value()?;
        let registry = vm.raw_handle().registry();
        let symbol = {
            let r = registry.borrow();
            let symbols = r.vm(vm.handle_id())?.symbols.clone();
            let symbol = symbols.borrow_mut().for_key(&key);
            symbol
        };
        Ok(SymbolValue {
            value: ValueHandle::from_js_value(registry, JsValue::Symbol(symbol)),
        })
    }

    fn symbol(&self) -> Result<SymbolData> {
        match self.value.js_value()? {
            JsValue::Symbol(s) => Ok(s),
            other => Err(mismatch(KIND_SYMBOL, &other)),
        }
    }

    pub fn description(&self) -> Result<Option<String>> {
        Ok(self.symbol()?.description().map(str::to_string))
    }

    /// `Symbol(desc)`
    pub fn symbol_descriptive_string(&self) -> Result<String> {
        Ok(self.symbol()?.descriptive_string())
    }

    pub fn into_value(self) -> ValueHandle {
        self.value
    }
}

impl Deref for SymbolValue {
    type Target = ValueHandle;

    fn deref(&self) -> &ValueHandle {
        &self.value
    }
}

impl NativeHandle for SymbolValue {
    fn raw_handle(&self) -> &RawHandle {
        &self.value.raw
    }
}
