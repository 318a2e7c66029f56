extern crate jsbridge;

mod common;

use jsbridge::embed::{
    EmbedError, Evaluator, NativeHandle, StringValue, SymbolValue, ValueHandle,
};

// ── Factories and predicates ──

#[test]
fn test_value_undefined_and_null() {
    let f = common::setup();
    let undefined = ValueHandle::create_undefined(&f.globals);
    let null = ValueHandle::create_null(&f.globals);
    assert!(undefined.is_undefined().unwrap());
    assert!(!undefined.is_null().unwrap());
    assert!(undefined.is_undefined_or_null().unwrap());
    assert!(null.is_null().unwrap());
    assert!(null.is_undefined_or_null().unwrap());
    assert!(!null.is_object().unwrap());
}

#[test]
fn test_value_booleans() {
    let f = common::setup();
    let t = ValueHandle::create_boolean(&f.globals, true);
    let fl = ValueHandle::create_boolean(&f.globals, false);
    assert!(t.is_boolean().unwrap());
    assert!(t.is_true().unwrap());
    assert!(!t.is_false().unwrap());
    assert!(fl.is_false().unwrap());
    assert_eq!(fl.as_boolean().unwrap(), false);
    assert_eq!(t.as_boolean_unchecked(), true);
}

#[test]
fn test_value_numbers() {
    let f = common::setup();
    let i = ValueHandle::create_int32(&f.globals, -12);
    let n = ValueHandle::create_number(&f.globals, 1.5);
    let whole = ValueHandle::create_number(&f.globals, 3.0);
    assert!(i.is_number().unwrap());
    assert!(i.is_int32().unwrap());
    assert_eq!(i.as_int32().unwrap(), -12);
    assert_eq!(i.as_number().unwrap(), -12.0);
    assert!(n.is_number().unwrap());
    assert!(!n.is_int32().unwrap());
    assert_eq!(n.as_number_unchecked(), 1.5);
    assert!(whole.is_int32().unwrap());
    assert_eq!(whole.as_int32_unchecked(), 3);
}

#[test]
fn test_value_strings() {
    let f = common::setup();
    let s = StringValue::create(&f.globals, "h\u{e9}llo");
    assert!(s.is_string().unwrap());
    assert_eq!(s.value().unwrap(), "h\u{e9}llo");
    let plain = s.clone().into_value();
    assert_eq!(plain.as_script_string().unwrap().value().unwrap(), "h\u{e9}llo");
    assert_eq!(plain.to_string(&f.ctx).unwrap(), "h\u{e9}llo");
}

#[test]
fn test_script_string_view_is_an_independent_handle() {
    let f = common::setup();
    let plain = StringValue::create(&f.globals, "kept").into_value();
    let view = plain.as_script_string().unwrap();
    view.destroy();
    assert!(!view.has_valid_native_pointer());
    assert!(plain.has_valid_native_pointer());
    assert_eq!(plain.to_string(&f.ctx).unwrap(), "kept");

    let symbol = SymbolValue::create(&f.globals, Some("s")).into_value();
    let symbol_view = symbol.as_script_symbol().unwrap();
    symbol.destroy();
    assert_eq!(symbol_view.description().unwrap().as_deref(), Some("s"));
}

// ── Checked accessors ──

#[test]
fn test_accessor_on_wrong_tag_is_a_mismatch() {
    let f = common::setup();
    let s = StringValue::create(&f.globals, "1").into_value();
    assert_eq!(
        s.as_int32(),
        Err(EmbedError::TypeMismatch {
            expected: "int32",
            actual: "string"
        })
    );
    assert!(matches!(s.as_boolean(), Err(EmbedError::TypeMismatch { .. })));
    assert!(matches!(s.as_number(), Err(EmbedError::TypeMismatch { .. })));
    assert!(matches!(
        s.as_script_symbol(),
        Err(EmbedError::TypeMismatch { .. })
    ));
    let fraction = ValueHandle::create_number(&f.globals, 0.5);
    assert!(matches!(
        fraction.as_int32(),
        Err(EmbedError::TypeMismatch { .. })
    ));
    assert!(matches!(
        fraction.as_script_string(),
        Err(EmbedError::TypeMismatch { .. })
    ));
}

// ── Conversions and comparisons ──

#[test]
fn test_value_to_string() {
    let f = common::setup();
    assert_eq!(
        ValueHandle::create_int32(&f.globals, 42).to_string(&f.ctx).unwrap(),
        "42"
    );
    assert_eq!(
        ValueHandle::create_null(&f.globals).to_string(&f.ctx).unwrap(),
        "null"
    );
    assert_eq!(
        ValueHandle::create_boolean(&f.globals, false)
            .to_string(&f.ctx)
            .unwrap(),
        "false"
    );
    let symbol = SymbolValue::create(&f.globals, Some("s"));
    assert!(matches!(
        symbol.to_string(&f.ctx),
        Err(EmbedError::StringCoercionError(_))
    ));
}

#[test]
fn test_value_equality() {
    let f = common::setup();
    let one = ValueHandle::create_int32(&f.globals, 1);
    let one_again = ValueHandle::create_number(&f.globals, 1.0);
    let text = StringValue::create(&f.globals, "1");
    assert!(one.equals_to(&f.ctx, &one_again).unwrap());
    assert!(!one.equals_to(&f.ctx, &text).unwrap());
    assert!(one.abstract_equals_to(&f.ctx, &text).unwrap());
    let null = ValueHandle::create_null(&f.globals);
    let undefined = ValueHandle::create_undefined(&f.globals);
    assert!(null.abstract_equals_to(&f.ctx, &undefined).unwrap());
    assert!(!null.equals_to(&f.ctx, &undefined).unwrap());
}

#[test]
fn test_value_instance_of() {
    let f = common::setup();
    let constructor = Evaluator::eval_script_value(
        &f.ctx,
        "function Point(x) { this.x = x; } Point",
        "point.js",
        false,
    )
    .unwrap();
    let point = Evaluator::eval_script_value(&f.ctx, "new Point(1)", "p.js", false).unwrap();
    let plain = Evaluator::eval_script_value(&f.ctx, "({ x: 1 })", "o.js", false).unwrap();
    assert!(point.instance_of(&f.ctx, &constructor).unwrap());
    assert!(!plain.instance_of(&f.ctx, &constructor).unwrap());
    let number = ValueHandle::create_int32(&f.globals, 1);
    assert!(!number.instance_of(&f.ctx, &constructor).unwrap());
}

#[test]
fn test_value_instance_of_non_callable_is_a_type_error() {
    let f = common::setup();
    let obj = Evaluator::eval_script_value(&f.ctx, "({})", "o.js", false).unwrap();
    match obj.instance_of(&f.ctx, &obj) {
        Err(EmbedError::ScriptRuntimeError(m)) => assert!(m.starts_with("TypeError")),
        other => panic!("expected a TypeError, got {:?}", other),
    }
    f.ctx.destroy();
    assert_eq!(
        obj.instance_of(&f.ctx, &obj),
        Err(EmbedError::DestroyedHandleError)
    );
}

#[test]
fn test_values_from_scripts() {
    let f = common::setup();
    let obj = Evaluator::eval_script_value(&f.ctx, "({ a: 1 })", "o.js", false).unwrap();
    assert!(obj.is_object().unwrap());
    assert_eq!(obj.to_string(&f.ctx).unwrap(), "[object Object]");
    let n = Evaluator::eval_script_value(&f.ctx, "6 * 7", "n.js", false).unwrap();
    assert_eq!(n.as_int32().unwrap(), 42);
    let s = Evaluator::eval_script_value(&f.ctx, "'a' + 'b'", "s.js", false).unwrap();
    assert_eq!(s.as_script_string().unwrap().value().unwrap(), "ab");
}

// ── Symbols ──

#[test]
fn test_symbols_are_unique() {
    let f = common::setup();
    let a = SymbolValue::create(&f.globals, Some("same"));
    let b = SymbolValue::create(&f.globals, Some("same"));
    assert!(a.is_symbol().unwrap());
    assert!(!a.equals_to(&f.ctx, &b).unwrap());
    assert!(a.equals_to(&f.ctx, &a).unwrap());
    assert_eq!(a.description().unwrap().as_deref(), Some("same"));
    assert_eq!(a.symbol_descriptive_string().unwrap(), "Symbol(same)");
}

#[test]
fn test_symbol_without_description() {
    let f = common::setup();
    let s = SymbolValue::create(&f.globals, None);
    assert_eq!(s.description().unwrap(), None);
    assert_eq!(s.symbol_descriptive_string().unwrap(), "Symbol()");
}

#[test]
fn test_global_symbol_registry_is_shared_with_scripts() {
    let f = common::setup();
    let key = StringValue::create(&f.globals, "app");
    let from_host = SymbolValue::from_global_symbol_registry(&f.vm, &key).unwrap();
    let again = SymbolValue::from_global_symbol_registry(&f.vm, &key).unwrap();
    assert!(from_host.equals_to(&f.ctx, &again).unwrap());

    let from_script =
        Evaluator::eval_script_value(&f.ctx, "Symbol.for('app')", "sym.js", false).unwrap();
    assert!(from_script.is_symbol().unwrap());
    assert!(from_host.equals_to(&f.ctx, &from_script).unwrap());
    let symbol = from_script.as_script_symbol().unwrap();
    assert_eq!(symbol.description().unwrap().as_deref(), Some("app"));
    assert_eq!(
        Evaluator::eval_script(&f.ctx, "Symbol.keyFor(Symbol.for('app'))", "k.js", false)
            .unwrap(),
        Some("app".to_string())
    );
}
