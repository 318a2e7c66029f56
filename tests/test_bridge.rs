extern crate jsbridge;

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use jsbridge::embed::{Bridge, Context, EmbedError, EngineConfig, Evaluator, NativeHandle};

fn eval(ctx: &Context, code: &str) -> Option<String> {
    Evaluator::eval_script(ctx, code, "bridge.js", false).unwrap()
}

// ── Argument and return passing ──

#[test]
fn test_bridge_add_string() {
    let f = common::setup();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    Bridge::register(&f.ctx, "Native", "addString", move |s: Option<String>| {
        counter.set(counter.get() + 1);
        s.map(|s| s + "ASdfasdfasdf")
    })
    .unwrap();
    assert_eq!(
        eval(&f.ctx, "Native.addString('dddd')"),
        Some("ddddASdfasdfasdf".to_string())
    );
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_bridge_return_string_without_argument() {
    let f = common::setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    Bridge::register(&f.ctx, "Native", "returnString", move |s: Option<String>| {
        sink.borrow_mut().push(s);
        Some("string from java".to_string())
    })
    .unwrap();
    assert_eq!(
        eval(&f.ctx, "Native.returnString()"),
        Some("string from java".to_string())
    );
    assert_eq!(*seen.borrow(), vec![None]);
}

#[test]
fn test_bridge_return_nothing_is_undefined() {
    let f = common::setup();
    Bridge::register(&f.ctx, "Native", "returnNothing", |_: Option<String>| None).unwrap();
    assert_eq!(
        eval(&f.ctx, "Native.returnNothing() === undefined"),
        Some("true".to_string())
    );
}

#[test]
fn test_bridge_argument_is_converted_to_string() {
    let f = common::setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    Bridge::register(&f.ctx, "Native", "echo", move |s: Option<String>| {
        sink.borrow_mut().push(s.clone());
        s
    })
    .unwrap();
    assert_eq!(eval(&f.ctx, "Native.echo(40 + 2)"), Some("42".to_string()));
    assert_eq!(eval(&f.ctx, "Native.echo(true, 'ignored')"), Some("true".to_string()));
    assert_eq!(eval(&f.ctx, "typeof Native.echo(1)"), Some("string".to_string()));
    assert_eq!(
        *seen.borrow(),
        vec![
            Some("42".to_string()),
            Some("true".to_string()),
            Some("1".to_string())
        ]
    );
}

#[test]
fn test_bridge_symbol_argument_fails_before_the_callback() {
    let f = common::setup();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    Bridge::register(&f.ctx, "Native", "take", move |s: Option<String>| {
        counter.set(counter.get() + 1);
        s
    })
    .unwrap();
    assert_eq!(eval(&f.ctx, "Native.take(Symbol('x'))"), None);
    assert!(matches!(
        Evaluator::eval_script_value(&f.ctx, "Native.take(Symbol())", "sym.js", false),
        Err(EmbedError::StringCoercionError(_))
    ));
    assert_eq!(
        eval(&f.ctx, "try { Native.take(Symbol()) } catch (e) { e.name }"),
        Some("TypeError".to_string())
    );
    assert_eq!(calls.get(), 0);
}

// ── Registration ──

#[test]
fn test_bridge_reregistration_replaces_callback() {
    let f = common::setup();
    Bridge::register(&f.ctx, "Native", "version", |_: Option<String>| {
        Some("one".to_string())
    })
    .unwrap();
    assert_eq!(eval(&f.ctx, "Native.version()"), Some("one".to_string()));
    Bridge::register(&f.ctx, "Native", "version", |_: Option<String>| {
        Some("two".to_string())
    })
    .unwrap();
    assert_eq!(eval(&f.ctx, "Native.version()"), Some("two".to_string()));
}

#[test]
fn test_bridge_reregistration_during_a_call_affects_later_calls() {
    let f = common::setup();
    let ctx = f.ctx.clone();
    Bridge::register(&f.ctx, "Native", "swap", move |_: Option<String>| {
        Bridge::register(&ctx, "Native", "swap", |_: Option<String>| {
            Some("second".to_string())
        })
        .unwrap();
        Some("first".to_string())
    })
    .unwrap();
    assert_eq!(eval(&f.ctx, "Native.swap()"), Some("first".to_string()));
    assert_eq!(eval(&f.ctx, "Native.swap()"), Some("second".to_string()));
}

#[test]
fn test_bridge_namespace_holds_several_functions() {
    let f = common::setup();
    Bridge::register(&f.ctx, "Native", "a", |_: Option<String>| Some("A".to_string())).unwrap();
    Bridge::register(&f.ctx, "Native", "b", |_: Option<String>| Some("B".to_string())).unwrap();
    Bridge::register(&f.ctx, "Other", "a", |_: Option<String>| Some("O".to_string())).unwrap();
    assert_eq!(
        eval(&f.ctx, "Native.a() + Native.b() + Other.a()"),
        Some("ABO".to_string())
    );
    assert_eq!(eval(&f.ctx, "typeof Native.a"), Some("function".to_string()));
}

#[test]
fn test_bridge_reuses_script_object_as_namespace() {
    let f = common::setup();
    eval(&f.ctx, "var App = { name: 'app' }");
    Bridge::register(&f.ctx, "App", "hello", |_: Option<String>| Some("hi".to_string())).unwrap();
    assert_eq!(
        eval(&f.ctx, "App.name + ':' + App.hello()"),
        Some("app:hi".to_string())
    );
}

#[test]
fn test_bridge_replaces_non_object_global() {
    let f = common::setup();
    eval(&f.ctx, "Native = 5");
    Bridge::register(&f.ctx, "Native", "f", |_: Option<String>| Some("ok".to_string())).unwrap();
    assert_eq!(eval(&f.ctx, "typeof Native"), Some("object".to_string()));
    assert_eq!(eval(&f.ctx, "Native.f()"), Some("ok".to_string()));
}

#[test]
fn test_bridge_is_per_context() {
    let f = common::setup();
    let other = Context::create(&f.vm).unwrap();
    Bridge::register(&f.ctx, "Native", "f", |_: Option<String>| Some("ok".to_string())).unwrap();
    assert_eq!(eval(&other, "typeof Native"), Some("undefined".to_string()));
}

#[test]
fn test_bridge_on_destroyed_context_fails() {
    let f = common::setup();
    f.ctx.destroy();
    assert_eq!(
        Bridge::register(&f.ctx, "Native", "f", |_: Option<String>| None),
        Err(EmbedError::DestroyedHandleError)
    );
}

// ── Reentrancy ──

#[test]
fn test_bridge_callback_can_evaluate_in_the_same_context() {
    let f = common::setup();
    let ctx = f.ctx.clone();
    Bridge::register(&f.ctx, "Native", "inner", move |s: Option<String>| {
        let code = format!("counter = {}; counter * 2", s.unwrap_or_default());
        Evaluator::eval_script(&ctx, &code, "inner.js", false).unwrap()
    })
    .unwrap();
    assert_eq!(
        eval(&f.ctx, "var r = Native.inner('21'); r + '/' + counter"),
        Some("42/21".to_string())
    );
}

fn register_counter(ctx: &Context, property: &str) -> Rc<Cell<usize>> {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    Bridge::register(ctx, "Host", property, move |_: Option<String>| {
        counter.set(counter.get() + 1);
        None
    })
    .unwrap();
    calls
}

#[test]
fn test_bridge_callback_destroying_its_context() {
    for &store in &[false, true] {
        let f = common::setup();
        let ctx = f.ctx.clone();
        Bridge::register(&f.ctx, "Host", "close", move |_: Option<String>| {
            ctx.destroy();
            None
        })
        .unwrap();
        let after = register_counter(&f.ctx, "after");
        assert_eq!(
            Evaluator::eval_script(&f.ctx, "Host.close(); Host.after(); 1", "close.js", store),
            Err(EmbedError::DestroyedHandleError)
        );
        assert_eq!(after.get(), 1);
        assert!(!f.ctx.has_valid_native_pointer());
        assert!(f.vm.has_valid_native_pointer());
        assert_eq!(
            Evaluator::eval_script(&f.ctx, "1", "again.js", store),
            Err(EmbedError::DestroyedHandleError)
        );
    }
}

#[test]
fn test_bridge_callback_destroying_the_vm() {
    for &store in &[false, true] {
        let f = common::setup();
        let vm = f.vm.clone();
        Bridge::register(&f.ctx, "Host", "shutdown", move |_: Option<String>| {
            vm.destroy();
            None
        })
        .unwrap();
        let after = register_counter(&f.ctx, "after");
        assert!(matches!(
            Evaluator::eval_script_value(&f.ctx, "Host.shutdown(); Host.after(); 'x'", "vm.js", store),
            Err(EmbedError::DestroyedHandleError)
        ));
        assert_eq!(after.get(), 1);
        assert!(!f.vm.has_valid_native_pointer());
        assert!(!f.ctx.has_valid_native_pointer());
    }
}

#[test]
fn test_bridge_recursion_is_bounded_by_call_depth() {
    let f = common::setup_with(EngineConfig {
        max_call_depth: 8,
        ..EngineConfig::default()
    });
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let ctx = f.ctx.clone();
    Bridge::register(&f.ctx, "Native", "recurse", move |_: Option<String>| {
        counter.set(counter.get() + 1);
        Evaluator::eval_script(&ctx, "Native.recurse()", "r.js", false).unwrap()
    })
    .unwrap();
    assert_eq!(eval(&f.ctx, "Native.recurse()"), Some("undefined".to_string()));
    assert_eq!(calls.get(), 8);
}

#[test]
fn test_script_recursion_hits_range_error() {
    let f = common::setup_with(EngineConfig {
        max_call_depth: 16,
        ..EngineConfig::default()
    });
    assert_eq!(
        eval(
            &f.ctx,
            "function down(n) { return down(n + 1); } try { down(0); 'no' } catch (e) { e.name }"
        ),
        Some("RangeError".to_string())
    );
}
