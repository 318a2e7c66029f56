//! Function objects: creation, calls and construction.

use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::runner::ds::env_record::{EnvironmentRecord, EnvironmentRecordType};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{get, FunctionKind, JsObject, ObjectClass};
use crate::runner::ds::object_property::{CONSTRUCTOR_KEY, PROTOTYPE_KEY};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::host::call_host_function;
use crate::runner::plugin::types::{EvalContext, NativeFn};

use super::statement::execute_function_body;
use super::types::{CompletionType, ValueResult};

const ARGUMENTS: &str = "arguments";

/// Create a script function closing over `scope`, with a fresh `prototype` object.
pub fn create_function_object(data: &Rc<FunctionData>, scope: EnvironmentRecordType) -> JsValue {
    let f = JsObject::new_function(FunctionKind::Script {
        data: data.clone(),
        scope,
    });
    let proto = JsObject::new_ordinary();
    proto
        .borrow_mut()
        .define(CONSTRUCTOR_KEY.clone(), JsValue::Object(f.clone()));
    f.borrow_mut()
        .define(PROTOTYPE_KEY.clone(), JsValue::Object(proto));
    JsValue::Object(f)
}

enum CallTarget {
    Script(Rc<FunctionData>, EnvironmentRecordType),
    Native(NativeFn),
    Host(String, String),
}

/// Call `callee` with the given receiver and arguments.
///
/// Every call counts against the realm's call-depth limit; exceeding it is a
/// `RangeError` the script can catch.
pub fn call_function(
    ctx: &mut EvalContext,
    callee: &JsValue,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    let target = match callee {
        JsValue::Object(o) => match &o.borrow().class {
            ObjectClass::Function(FunctionKind::Script { data, scope }) => {
                CallTarget::Script(data.clone(), scope.clone())
            }
            ObjectClass::Function(FunctionKind::Native(n)) => CallTarget::Native(n.call),
            ObjectClass::Function(FunctionKind::Host {
                namespace,
                property,
            }) => CallTarget::Host(namespace.clone(), property.clone()),
            _ => return Err(not_a_function(callee)),
        },
        _ => return Err(not_a_function(callee)),
    };
    let _guard = ctx.realm.enter_call()?;
    ctx.record_step();
    match target {
        CallTarget::Script(data, scope) => call_script_function(ctx, &data, scope, this, args),
        CallTarget::Native(f) => f(ctx, this, args),
        CallTarget::Host(namespace, property) => {
            call_host_function(ctx, &namespace, &property, args)
        }
    }
}

fn not_a_function(value: &JsValue) -> JErrorType {
    JErrorType::TypeError(format!("{} is not a function", value))
}

fn call_script_function(
    ctx: &mut EvalContext,
    data: &FunctionData,
    scope: EnvironmentRecordType,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    let env = EnvironmentRecord::new(Some(scope));
    {
        let mut record = env.borrow_mut();
        record.create_mutable_binding(ARGUMENTS, true);
        record.initialize_binding(
            ARGUMENTS,
            JsValue::Object(JsObject::new_array(args.clone())),
        )?;
        for (i, param) in data.params.iter().enumerate() {
            record.create_mutable_binding(param, true);
            record.initialize_binding(param, args.get(i).cloned().unwrap_or(JsValue::Undefined))?;
        }
    }
    let mut fctx = EvalContext {
        realm: ctx.realm.clone(),
        lex_env: env.clone(),
        var_env: env,
        this_value: this,
    };
    let completion = execute_function_body(&data.body, &mut fctx)?;
    Ok(match completion.completion_type {
        CompletionType::Return => completion.get_value(),
        _ => JsValue::Undefined,
    })
}

/// The `new` operator. `name` is the callee as written, for error messages.
pub fn construct(
    ctx: &mut EvalContext,
    callee: &JsValue,
    args: Vec<JsValue>,
    name: &str,
) -> ValueResult {
    let (obj, native_constructor) = match callee {
        JsValue::Object(o) if o.borrow().is_constructor() => {
            let native = match &o.borrow().class {
                ObjectClass::Function(FunctionKind::Native(n)) => n.construct,
                _ => None,
            };
            (o.clone(), native)
        }
        _ => {
            return Err(JErrorType::TypeError(format!(
                "{} is not a constructor",
                name
            )))
        }
    };
    if let Some(constructor) = native_constructor {
        let _guard = ctx.realm.enter_call()?;
        ctx.record_step();
        return constructor(ctx, JsValue::Undefined, args);
    }
    let mut instance = JsObject::new(ObjectClass::Ordinary);
    if let JsValue::Object(proto) = get(&obj, &PROTOTYPE_KEY) {
        instance.prototype = Some(proto);
    }
    let this = JsValue::Object(instance.into_ref());
    let result = call_function(ctx, callee, this.clone(), args)?;
    Ok(if result.is_object() { result } else { this })
}
