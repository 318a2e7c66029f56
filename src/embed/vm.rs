use std::cell::RefCell;
use std::rc::Rc;

use crate::embed::config::EngineConfig;
use crate::embed::error::{EmbedError, Result};
use crate::embed::globals::Globals;
use crate::embed::handle::{HandleId, NativeHandle, RawHandle};
use crate::embed::registry::{Resource, VmData};
use crate::runner::ds::symbol::SymbolRegistry;

/// One engine runtime. Contexts created from it share its `Symbol.for` registry.
///
/// Destroying the VM also destroys every context created from it.
#[derive(Debug, Clone)]
pub struct VmInstance {
    raw: RawHandle,
}

impl VmInstance {
    /// Create a runtime. Absent tags take the configured defaults.
    ///
    /// A malformed tag is replaced by the default with a warning, or rejected
    /// with `InvalidLocale` / `InvalidTimezone` when `strict_tags` is set.
    pub fn create(
        globals: &Globals,
        locale: Option<&str>,
        timezone: Option<&str>,
    ) -> Result<VmInstance> {
        let registry = globals.registry().clone();
        let (locale, timezone) = {
            let r = registry.borrow();
            (
                resolve_locale(locale, &r.config)?,
                resolve_timezone(timezone, &r.config)?,
            )
        };
        let id = registry.borrow_mut().insert(Resource::Vm(VmData {
            locale: locale.clone(),
            timezone: timezone.clone(),
            symbols: Rc::new(RefCell::new(SymbolRegistry::new())),
            contexts: vec![],
        }));
        log::debug!("vm {} created (locale {}, timezone {})", id, locale, timezone);
        Ok(VmInstance {
            raw: RawHandle::new(id, registry),
        })
    }

    pub fn locale(&self) -> Result<String> {
        Ok(self.raw.registry().borrow().vm(self.raw.id())?.locale.clone())
    }

    pub fn timezone(&self) -> Result<String> {
        Ok(self.raw.registry().borrow().vm(self.raw.id())?.timezone.clone())
    }

    pub fn handle_id(&self) -> HandleId {
        self.raw.id()
    }
}

impl NativeHandle for VmInstance {
    fn raw_handle(&self) -> &RawHandle {
        &self.raw
    }
}

fn resolve_locale(locale: Option<&str>, config: &EngineConfig) -> Result<String> {
    match locale {
        None => Ok(config.default_locale.clone()),
        Some(tag) if is_valid_locale(tag) => Ok(tag.to_string()),
        Some(tag) if config.strict_tags => Err(EmbedError::InvalidLocale(tag.to_string())),
        Some(tag) => {
            log::warn!(
                "malformed locale '{}', using '{}'",
                tag,
                config.default_locale
            );
            Ok(config.default_locale.clone())
        }
    }
}

fn resolve_timezone(timezone: Option<&str>, config: &EngineConfig) -> Result<String> {
    match timezone {
        None => Ok(config.default_timezone.clone()),
        Some(tz) if is_valid_timezone(tz) => Ok(tz.to_string()),
        Some(tz) if config.strict_tags => Err(EmbedError::InvalidTimezone(tz.to_string())),
        Some(tz) => {
            log::warn!(
                "malformed timezone '{}', using '{}'",
                tz,
                config.default_timezone
            );
            Ok(config.default_timezone.clone())
        }
    }
}

/// BCP 47 shape: a 2-8 letter language subtag, then 1-8 character alphanumeric subtags.
fn is_valid_locale(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let language = match subtags.next() {
        Some(l) => l,
        None => return false,
    };
    (2..=8).contains(&language.len())
        && language.chars().all(|c| c.is_ascii_alphabetic())
        && subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// IANA names (`Europe/Paris`, `UTC`) and numeric offsets (`+09:00`).
fn is_valid_timezone(tz: &str) -> bool {
    let first = match tz.chars().next() {
        Some(c) => c,
        None => return false,
    };
    (first.is_ascii_alphabetic() || first == '+' || first == '-')
        && tz.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | ':'))
        })
}
