use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

/// A unique symbol. Identity is the generated id, never the description.
pub struct SymbolData {
    id: Arc<str>,
    description: Option<Arc<str>>,
}

impl SymbolData {
    pub fn new(description: Option<String>) -> Self {
        SymbolData {
            id: Arc::from(Uuid::new_v4().hyphenated().to_string()),
            description: description.map(Arc::from),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// `Symbol(desc)`, or `Symbol()` without a description.
    pub fn descriptive_string(&self) -> String {
        format!("Symbol({})", self.description().unwrap_or(""))
    }
}
impl Clone for SymbolData {
    fn clone(&self) -> Self {
        SymbolData {
            id: self.id.clone(),
            description: self.description.clone(),
        }
    }
}
impl PartialEq for SymbolData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for SymbolData {}
impl Hash for SymbolData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptive_string())
    }
}

/// Registry backing `Symbol.for` and `Symbol.keyFor`. One per runtime.
#[derive(Default)]
pub struct SymbolRegistry {
    by_key: HashMap<String, SymbolData>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol registered under `key`, creating it on first use.
    pub fn for_key(&mut self, key: &str) -> SymbolData {
        self.by_key
            .entry(key.to_string())
            .or_insert_with(|| SymbolData::new(Some(key.to_string())))
            .clone()
    }

    pub fn key_for(&self, symbol: &SymbolData) -> Option<String> {
        self.by_key
            .iter()
            .find(|(_, s)| *s == symbol)
            .map(|(k, _)| k.to_string())
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
