extern crate jsbridge;

mod common;

use jsbridge::embed::{
    Context, EmbedError, EngineConfig, Evaluator, Globals, HandleState, Memory, NativeHandle,
    StringValue, SymbolValue, ValueHandle, VmInstance,
};
use jsbridge::runner::ds::heap::DEFAULT_GC_FREQUENCY;

// ── Globals ──

#[test]
fn test_globals_second_initialize_fails() {
    let _lock = common::lock();
    let globals = Globals::initialize().unwrap();
    assert!(Globals::is_initialized());
    assert!(matches!(
        Globals::initialize(),
        Err(EmbedError::GlobalsAlreadyInitialized)
    ));
    globals.finalize();
    assert!(!Globals::is_initialized());
}

#[test]
fn test_globals_reinitialize_after_finalize() {
    let _lock = common::lock();
    Globals::initialize().unwrap().finalize();
    let globals = Globals::initialize().unwrap();
    let vm = VmInstance::create(&globals, None, None).unwrap();
    assert!(vm.has_valid_native_pointer());
    globals.finalize();
}

#[test]
fn test_globals_config_is_kept() {
    let f = common::setup_with(EngineConfig {
        max_call_depth: 12,
        ..EngineConfig::default()
    });
    assert_eq!(f.globals.config().max_call_depth, 12);
}

#[test]
fn test_finalize_invalidates_every_handle() {
    let f = common::setup();
    let value = ValueHandle::create_int32(&f.globals, 7);
    let vm = f.vm.clone();
    let ctx = f.ctx.clone();
    let common::Fixture { globals, .. } = f;
    globals.finalize();
    assert!(!vm.has_valid_native_pointer());
    assert!(!ctx.has_valid_native_pointer());
    assert!(!value.has_valid_native_pointer());
    assert_eq!(
        Evaluator::eval_script(&ctx, "1", "late.js", false),
        Err(EmbedError::DestroyedHandleError)
    );
    assert_eq!(value.is_number(), Err(EmbedError::DestroyedHandleError));
    // Destroying after finalize is still allowed.
    value.destroy();
    ctx.destroy();
    vm.destroy();
}

// ── Destroy ──

#[test]
fn test_destroy_is_idempotent_for_every_kind() {
    let f = common::setup();
    let value = ValueHandle::create_boolean(&f.globals, true);
    let string = StringValue::create(&f.globals, "s");
    let symbol = SymbolValue::create(&f.globals, Some("y"));
    for _ in 0..2 {
        value.destroy();
        string.destroy();
        symbol.destroy();
        f.ctx.destroy();
        f.vm.destroy();
    }
    assert!(!value.has_valid_native_pointer());
    assert!(!string.has_valid_native_pointer());
    assert!(!symbol.has_valid_native_pointer());
    assert_eq!(f.ctx.raw_handle().state(), HandleState::Destroyed);
    assert_eq!(f.vm.raw_handle().state(), HandleState::Destroyed);
}

#[test]
fn test_destroy_invalidates_clones() {
    let f = common::setup();
    let value = ValueHandle::create_int32(&f.globals, 1);
    let copy = value.clone();
    value.destroy();
    assert!(!copy.has_valid_native_pointer());
    assert_eq!(copy.as_int32(), Err(EmbedError::DestroyedHandleError));
}

#[test]
fn test_destroying_a_value_leaves_the_context_alone() {
    let f = common::setup();
    let result = Evaluator::eval_script_value(&f.ctx, "kept = 'x'; kept", "v.js", false).unwrap();
    result.destroy();
    assert_eq!(
        Evaluator::eval_script(&f.ctx, "kept", "v.js", false).unwrap(),
        Some("x".to_string())
    );
}

#[test]
fn test_destroying_vm_destroys_its_contexts() {
    let f = common::setup();
    let second = Context::create(&f.vm).unwrap();
    let other_vm = VmInstance::create(&f.globals, None, None).unwrap();
    let unrelated = Context::create(&other_vm).unwrap();

    f.vm.destroy();

    assert!(!f.ctx.has_valid_native_pointer());
    assert!(!second.has_valid_native_pointer());
    assert!(unrelated.has_valid_native_pointer());
    assert!(matches!(
        Context::create(&f.vm),
        Err(EmbedError::DestroyedHandleError)
    ));
    assert_eq!(
        Evaluator::eval_script(&unrelated, "1 + 1", "ok.js", false).unwrap(),
        Some("2".to_string())
    );
}

#[test]
fn test_context_remembers_its_vm() {
    let f = common::setup();
    assert_eq!(f.ctx.vm_handle_id().unwrap(), f.vm.handle_id());
}

// ── Locale and timezone ──

#[test]
fn test_vm_locale_timezone_combinations() {
    let f = common::setup();
    let cases = [
        (None, None, "en-US", "UTC"),
        (Some("en-US"), None, "en-US", "UTC"),
        (None, Some("UTC"), "en-US", "UTC"),
        (Some("ko-KR"), Some("Asia/Seoul"), "ko-KR", "Asia/Seoul"),
    ];
    for (locale, timezone, expected_locale, expected_timezone) in cases.iter() {
        let vm = VmInstance::create(&f.globals, *locale, *timezone).unwrap();
        let ctx = Context::create(&vm).unwrap();
        assert_eq!(vm.locale().unwrap(), *expected_locale);
        assert_eq!(vm.timezone().unwrap(), *expected_timezone);
        assert_eq!(
            Evaluator::eval_script(&ctx, "1 + 2", "combo.js", false).unwrap(),
            Some("3".to_string())
        );
        vm.destroy();
        ctx.destroy();
    }
}

#[test]
fn test_malformed_tags_fall_back_by_default() {
    let f = common::setup();
    let vm = VmInstance::create(&f.globals, Some("not a locale"), Some("nowhere//")).unwrap();
    assert_eq!(vm.locale().unwrap(), "en-US");
    assert_eq!(vm.timezone().unwrap(), "UTC");
}

#[test]
fn test_malformed_tags_rejected_in_strict_mode() {
    let f = common::setup_with(EngineConfig {
        strict_tags: true,
        default_locale: "fr-FR".to_string(),
        ..EngineConfig::default()
    });
    assert!(matches!(
        VmInstance::create(&f.globals, Some("x"), None),
        Err(EmbedError::InvalidLocale(_))
    ));
    assert!(matches!(
        VmInstance::create(&f.globals, None, Some("bad zone")),
        Err(EmbedError::InvalidTimezone(_))
    ));
    let vm = VmInstance::create(&f.globals, None, None).unwrap();
    assert_eq!(vm.locale().unwrap(), "fr-FR");
}

// ── Collection ──

#[test]
fn test_forced_gc_reclaims_destroyed_handles() {
    let f = common::setup_with(EngineConfig {
        gc_frequency: 0,
        ..EngineConfig::default()
    });
    let before = Memory::stats(&f.globals);
    let a = ValueHandle::create_null(&f.globals);
    let b = StringValue::create(&f.globals, "b");
    assert_eq!(Memory::stats(&f.globals).live_handles, before.live_handles + 2);

    a.destroy();
    b.destroy();
    assert_eq!(Memory::stats(&f.globals).pending_release, 2);

    assert_eq!(Memory::gc(&f.globals), 2);
    let after = Memory::stats(&f.globals);
    assert_eq!(after.pending_release, 0);
    assert_eq!(after.live_handles, before.live_handles);
    assert_eq!(after.collections, before.collections + 1);
    Memory::set_gc_frequency(DEFAULT_GC_FREQUENCY);
}

#[test]
fn test_automatic_gc_runs_during_evaluation() {
    let f = common::setup_with(EngineConfig {
        gc_frequency: 1,
        ..EngineConfig::default()
    });
    assert_eq!(Memory::gc_frequency(), 1);
    ValueHandle::create_undefined(&f.globals).destroy();
    Evaluator::eval_script(&f.ctx, "var i = 0; i++; i++; i", "loop.js", false).unwrap();
    let stats = Memory::stats(&f.globals);
    assert_eq!(stats.pending_release, 0);
    assert!(stats.collections > 0);
    Memory::set_gc_frequency(DEFAULT_GC_FREQUENCY);
}

#[test]
fn test_gc_frequency_zero_disables_automatic_collection() {
    let f = common::setup();
    Memory::set_gc_frequency(0);
    ValueHandle::create_undefined(&f.globals).destroy();
    Evaluator::eval_script(&f.ctx, "for (var i = 0; i < 50; i++) {}", "l.js", false).unwrap();
    let stats = Memory::stats(&f.globals);
    assert_eq!(stats.pending_release, 1);
    assert_eq!(stats.collections, 0);
    Memory::set_gc_frequency(DEFAULT_GC_FREQUENCY);
}
