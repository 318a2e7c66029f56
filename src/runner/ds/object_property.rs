use std::fmt;

use crate::runner::ds::symbol::SymbolData;

/// Key of an own property: a string name or a symbol.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Sym(SymbolData),
}
impl PropertyKey {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::Str(s) => Some(s),
            PropertyKey::Sym(_) => None,
        }
    }

    /// Array index form of the key: a canonical integer in `0..=2^32-2`.
    /// Larger integers are ordinary property names.
    pub fn as_array_index(&self) -> Option<usize> {
        let s = self.as_str()?;
        if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
            return None;
        }
        match s.parse::<u32>() {
            Ok(i) if i < u32::MAX => Some(i as usize),
            _ => None,
        }
    }
}
impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::Str(s.to_string())
    }
}
impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => f.write_str(s),
            PropertyKey::Sym(s) => write!(f, "[{}]", s),
        }
    }
}

lazy_static! {
    pub static ref LENGTH_KEY: PropertyKey = PropertyKey::Str("length".to_string());
    pub static ref NAME_KEY: PropertyKey = PropertyKey::Str("name".to_string());
    pub static ref MESSAGE_KEY: PropertyKey = PropertyKey::Str("message".to_string());
    pub static ref PROTOTYPE_KEY: PropertyKey = PropertyKey::Str("prototype".to_string());
    pub static ref CONSTRUCTOR_KEY: PropertyKey = PropertyKey::Str("constructor".to_string());
}
