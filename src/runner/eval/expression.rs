//! Expression evaluation.
//!
//! Handles every expression type the parser produces. Property access on
//! primitives is resolved here: strings expose `length` and indexed
//! characters, symbols expose `description` and `toString`.

use std::cmp::Ordering;

use crate::parser::ast::{
    AssignmentOperator, BinaryOperator, ExpressionType, LiteralType, LogicalOperator,
    MemberPropertyType, NumberLiteralType, PropertyNameType, UnaryOperator, UpdateOperator,
};
use crate::runner::ds::env_record::EnvironmentRecord;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{get, JsObject};
use crate::runner::ds::object_property::{PropertyKey, LENGTH_KEY};
use crate::runner::ds::operations::type_conversion::{
    abstract_equality, instance_of, strict_equality, to_boolean, to_number, to_primitive, to_property_key,
    to_string, type_of, TYPE_STR_UNDEFINED,
};
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::types::{EvalContext, NativeFn};
use crate::runner::std_lib::conversion::value_to_string;
use crate::runner::std_lib::symbol::symbol_to_string;

use super::function::{call_function, construct, create_function_object};
use super::types::ValueResult;

const TO_STRING: &str = "toString";
const DESCRIPTION: &str = "description";

/// Evaluate an expression and return its value.
pub fn evaluate_expression(expr: &ExpressionType, ctx: &mut EvalContext) -> ValueResult {
    match expr {
        ExpressionType::Literal(lit) => Ok(evaluate_literal(lit)),

        ExpressionType::Identifier(name) => ctx.get_binding(name),

        ExpressionType::ThisExpression => Ok(ctx.this_value.clone()),

        ExpressionType::ArrayExpression(elements) => {
            let items = evaluate_arguments(elements, ctx)?;
            Ok(JsValue::Object(JsObject::new_array(items)))
        }

        ExpressionType::ObjectExpression(properties) => {
            let obj = JsObject::new_ordinary();
            for (name, value_expr) in properties {
                let value = evaluate_expression(value_expr, ctx)?;
                obj.borrow_mut().define(property_name_key(name), value);
            }
            Ok(JsValue::Object(obj))
        }

        ExpressionType::FunctionExpression(data) => match &data.id {
            // A named function expression sees its own name in a private scope.
            Some(name) => {
                let env = EnvironmentRecord::new(Some(ctx.lex_env.clone()));
                env.borrow_mut().create_immutable_binding(name);
                let f = create_function_object(data, env.clone());
                env.borrow_mut().initialize_binding(name, f.clone())?;
                Ok(f)
            }
            None => Ok(create_function_object(data, ctx.lex_env.clone())),
        },

        ExpressionType::UnaryExpression { operator, argument } => {
            evaluate_unary_expression(*operator, argument, ctx)
        }

        ExpressionType::UpdateExpression {
            operator,
            prefix,
            argument,
        } => evaluate_update_expression(*operator, *prefix, argument, ctx),

        ExpressionType::BinaryExpression {
            operator,
            left,
            right,
        } => {
            let l = evaluate_expression(left, ctx)?;
            let r = evaluate_expression(right, ctx)?;
            apply_binary_operator(*operator, &l, &r)
        }

        ExpressionType::LogicalExpression {
            operator,
            left,
            right,
        } => {
            let l = evaluate_expression(left, ctx)?;
            let short_circuit = match operator {
                LogicalOperator::Or => to_boolean(&l),
                LogicalOperator::And => !to_boolean(&l),
            };
            if short_circuit {
                Ok(l)
            } else {
                evaluate_expression(right, ctx)
            }
        }

        ExpressionType::AssignmentExpression {
            operator,
            left,
            right,
        } => evaluate_assignment_expression(*operator, left, right, ctx),

        ExpressionType::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => {
            let t = evaluate_expression(test, ctx)?;
            if to_boolean(&t) {
                evaluate_expression(consequent, ctx)
            } else {
                evaluate_expression(alternate, ctx)
            }
        }

        ExpressionType::CallExpression { callee, arguments } => {
            evaluate_call_expression(callee, arguments, ctx)
        }

        ExpressionType::NewExpression { callee, arguments } => {
            let f = evaluate_expression(callee, ctx)?;
            let args = evaluate_arguments(arguments, ctx)?;
            construct(ctx, &f, args, &describe_callee(callee))
        }

        ExpressionType::MemberExpression { object, property } => {
            let base = evaluate_expression(object, ctx)?;
            let key = member_key(property, ctx)?;
            get_property(&base, &key)
        }

        ExpressionType::SequenceExpression(expressions) => {
            let mut value = JsValue::Undefined;
            for e in expressions {
                value = evaluate_expression(e, ctx)?;
            }
            Ok(value)
        }
    }
}

fn evaluate_literal(lit: &LiteralType) -> JsValue {
    match lit {
        LiteralType::NullLiteral => JsValue::Null,
        LiteralType::BooleanLiteral(b) => JsValue::Boolean(*b),
        LiteralType::StringLiteral(s) => JsValue::String(s.clone()),
        LiteralType::NumberLiteral(n) => JsValue::Number(number_literal(n)),
    }
}

fn number_literal(n: &NumberLiteralType) -> JsNumberType {
    match n {
        NumberLiteralType::IntegerLiteral(i) => JsNumberType::from_f64(*i as f64),
        NumberLiteralType::FloatLiteral(f) => JsNumberType::from_f64(*f),
    }
}

fn property_name_key(name: &PropertyNameType) -> PropertyKey {
    match name {
        PropertyNameType::Name(s) => PropertyKey::Str(s.clone()),
        PropertyNameType::Number(n) => PropertyKey::Str(number_literal(n).to_string()),
    }
}

fn member_key(property: &MemberPropertyType, ctx: &mut EvalContext) -> Result<PropertyKey, JErrorType> {
    match property {
        MemberPropertyType::Static(name) => Ok(PropertyKey::Str(name.clone())),
        MemberPropertyType::Computed(e) => {
            let v = evaluate_expression(e, ctx)?;
            to_property_key(&v)
        }
    }
}

pub(crate) fn evaluate_arguments(
    arguments: &[ExpressionType],
    ctx: &mut EvalContext,
) -> Result<Vec<JsValue>, JErrorType> {
    let mut values = Vec::with_capacity(arguments.len());
    for a in arguments {
        values.push(evaluate_expression(a, ctx)?);
    }
    Ok(values)
}

/// Source-like name of a callee, for "is not a function" messages.
fn describe_callee(expr: &ExpressionType) -> String {
    match expr {
        ExpressionType::Identifier(name) => name.clone(),
        ExpressionType::ThisExpression => "this".to_string(),
        ExpressionType::MemberExpression { object, property } => match property {
            MemberPropertyType::Static(p) => format!("{}.{}", describe_callee(object), p),
            MemberPropertyType::Computed(_) => format!("{}[...]", describe_callee(object)),
        },
        _ => "expression".to_string(),
    }
}

/// Property read with primitive wrappers resolved in place.
pub fn get_property(base: &JsValue, key: &PropertyKey) -> ValueResult {
    let is_to_string = key.as_str() == Some(TO_STRING);
    match base {
        JsValue::Undefined | JsValue::Null => Err(JErrorType::TypeError(format!(
            "Cannot read properties of {} (reading '{}')",
            base, key
        ))),
        JsValue::Object(o) => {
            let value = get(o, key);
            if is_to_string && value == JsValue::Undefined {
                Ok(native_method(TO_STRING, value_to_string))
            } else {
                Ok(value)
            }
        }
        JsValue::String(s) => {
            if key == &*LENGTH_KEY {
                Ok(JsValue::Number(JsNumberType::Integer(
                    s.encode_utf16().count() as i64,
                )))
            } else if let Some(i) = key.as_array_index() {
                Ok(match s.encode_utf16().nth(i) {
                    Some(unit) => JsValue::String(String::from_utf16_lossy(&[unit])),
                    None => JsValue::Undefined,
                })
            } else if is_to_string {
                Ok(native_method(TO_STRING, value_to_string))
            } else {
                Ok(JsValue::Undefined)
            }
        }
        JsValue::Symbol(sym) => Ok(match key.as_str() {
            Some(DESCRIPTION) => match sym.description() {
                Some(d) => JsValue::String(d.to_string()),
                None => JsValue::Undefined,
            },
            Some(TO_STRING) => native_method(TO_STRING, symbol_to_string),
            _ => JsValue::Undefined,
        }),
        JsValue::Number(_) | JsValue::Boolean(_) => Ok(if is_to_string {
            native_method(TO_STRING, value_to_string)
        } else {
            JsValue::Undefined
        }),
    }
}

/// Property write. Writes to primitives are dropped, as in sloppy mode.
pub fn put_property(base: &JsValue, key: PropertyKey, value: JsValue) -> Result<(), JErrorType> {
    match base {
        JsValue::Undefined | JsValue::Null => Err(JErrorType::TypeError(format!(
            "Cannot set properties of {} (setting '{}')",
            base, key
        ))),
        JsValue::Object(o) => {
            o.borrow_mut().set(key, value)
        }
        _ => Ok(()),
    }
}

fn native_method(name: &str, f: NativeFn) -> JsValue {
    JsValue::Object(JsObject::new_native_function(name, f))
}

fn evaluate_call_expression(
    callee: &ExpressionType,
    arguments: &[ExpressionType],
    ctx: &mut EvalContext,
) -> ValueResult {
    let (this, f) = match callee {
        ExpressionType::MemberExpression { object, property } => {
            let base = evaluate_expression(object, ctx)?;
            let key = member_key(property, ctx)?;
            let f = get_property(&base, &key)?;
            (base, f)
        }
        other => (JsValue::Undefined, evaluate_expression(other, ctx)?),
    };
    let args = evaluate_arguments(arguments, ctx)?;
    if !f.is_callable() {
        return Err(JErrorType::TypeError(format!(
            "{} is not a function",
            describe_callee(callee)
        )));
    }
    call_function(ctx, &f, this, args)
}

fn evaluate_unary_expression(
    operator: UnaryOperator,
    argument: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    if operator == UnaryOperator::TypeOf {
        // typeof tolerates undeclared names.
        if let ExpressionType::Identifier(name) = argument {
            if !ctx.has_binding(name) {
                return Ok(JsValue::String(TYPE_STR_UNDEFINED.to_string()));
            }
        }
    }
    let value = evaluate_expression(argument, ctx)?;
    Ok(match operator {
        UnaryOperator::Minus => JsValue::from_f64(-to_number(&value)?.as_f64()),
        UnaryOperator::Plus => JsValue::Number(to_number(&value)?),
        UnaryOperator::LogicalNot => JsValue::Boolean(!to_boolean(&value)),
        UnaryOperator::TypeOf => JsValue::String(type_of(&value).to_string()),
        UnaryOperator::Void => JsValue::Undefined,
    })
}

/// Where an assignment or update stores its result.
enum AssignmentTarget {
    Binding(String),
    Property(JsValue, PropertyKey),
}

fn resolve_target(expr: &ExpressionType, ctx: &mut EvalContext) -> Result<AssignmentTarget, JErrorType> {
    match expr {
        ExpressionType::Identifier(name) => Ok(AssignmentTarget::Binding(name.clone())),
        ExpressionType::MemberExpression { object, property } => {
            let base = evaluate_expression(object, ctx)?;
            let key = member_key(property, ctx)?;
            Ok(AssignmentTarget::Property(base, key))
        }
        _ => Err(JErrorType::SyntaxError(
            "Invalid left-hand side in assignment".to_string(),
        )),
    }
}

fn read_target(target: &AssignmentTarget, ctx: &mut EvalContext) -> ValueResult {
    match target {
        AssignmentTarget::Binding(name) => ctx.get_binding(name),
        AssignmentTarget::Property(base, key) => get_property(base, key),
    }
}

fn write_target(target: AssignmentTarget, value: JsValue, ctx: &mut EvalContext) -> Result<(), JErrorType> {
    match target {
        AssignmentTarget::Binding(name) => ctx.set_binding(&name, value),
        AssignmentTarget::Property(base, key) => put_property(&base, key, value),
    }
}

fn evaluate_assignment_expression(
    operator: AssignmentOperator,
    left: &ExpressionType,
    right: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    let target = resolve_target(left, ctx)?;
    let value = match operator.binary_operator() {
        None => evaluate_expression(right, ctx)?,
        Some(op) => {
            let current = read_target(&target, ctx)?;
            let r = evaluate_expression(right, ctx)?;
            apply_binary_operator(op, &current, &r)?
        }
    };
    write_target(target, value.clone(), ctx)?;
    Ok(value)
}

fn evaluate_update_expression(
    operator: UpdateOperator,
    prefix: bool,
    argument: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    let target = resolve_target(argument, ctx)?;
    let old = to_number(&read_target(&target, ctx)?)?.as_f64();
    let new = match operator {
        UpdateOperator::PlusPlus => old + 1.0,
        UpdateOperator::MinusMinus => old - 1.0,
    };
    write_target(target, JsValue::from_f64(new), ctx)?;
    Ok(JsValue::from_f64(if prefix { new } else { old }))
}

/// Apply a binary operator to two evaluated operands.
pub fn apply_binary_operator(op: BinaryOperator, left: &JsValue, right: &JsValue) -> ValueResult {
    Ok(match op {
        BinaryOperator::EqualEqual => JsValue::Boolean(abstract_equality(left, right)?),
        BinaryOperator::NotEqual => JsValue::Boolean(!abstract_equality(left, right)?),
        BinaryOperator::StrictlyEqual => JsValue::Boolean(strict_equality(left, right)),
        BinaryOperator::StrictlyUnequal => JsValue::Boolean(!strict_equality(left, right)),
        BinaryOperator::LessThan => {
            JsValue::Boolean(compare(left, right)? == Some(Ordering::Less))
        }
        BinaryOperator::LessThanEqual => JsValue::Boolean(matches!(
            compare(left, right)?,
            Some(Ordering::Less) | Some(Ordering::Equal)
        )),
        BinaryOperator::GreaterThan => {
            JsValue::Boolean(compare(left, right)? == Some(Ordering::Greater))
        }
        BinaryOperator::GreaterThanEqual => JsValue::Boolean(matches!(
            compare(left, right)?,
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )),
        BinaryOperator::InstanceOf => JsValue::Boolean(instance_of(left, right)?),
        BinaryOperator::Add => {
            let l = to_primitive(left)?;
            let r = to_primitive(right)?;
            if matches!(l, JsValue::String(_)) || matches!(r, JsValue::String(_)) {
                JsValue::String(format!("{}{}", to_string(&l)?, to_string(&r)?))
            } else {
                JsValue::from_f64(to_number(&l)?.as_f64() + to_number(&r)?.as_f64())
            }
        }
        BinaryOperator::Subtract => arithmetic(left, right, |a, b| a - b)?,
        BinaryOperator::Multiply => arithmetic(left, right, |a, b| a * b)?,
        BinaryOperator::Divide => arithmetic(left, right, |a, b| a / b)?,
        BinaryOperator::Modulo => arithmetic(left, right, |a, b| a % b)?,
    })
}

fn arithmetic(left: &JsValue, right: &JsValue, f: fn(f64, f64) -> f64) -> ValueResult {
    let a = to_number(left)?.as_f64();
    let b = to_number(right)?.as_f64();
    Ok(JsValue::from_f64(f(a, b)))
}

/// `None` when either side is NaN.
fn compare(left: &JsValue, right: &JsValue) -> Result<Option<Ordering>, JErrorType> {
    let l = to_primitive(left)?;
    let r = to_primitive(right)?;
    if let (JsValue::String(a), JsValue::String(b)) = (&l, &r) {
        return Ok(Some(a.encode_utf16().cmp(b.encode_utf16())));
    }
    let a = to_number(&l)?.as_f64();
    let b = to_number(&r)?.as_f64();
    Ok(a.partial_cmp(&b))
}
