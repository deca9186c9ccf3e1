//! Global bone-name interner.
//!
//! Bone names are compared and hashed on every clip bind, so they are turned
//! into compact [`Symbol`]s once at load time. A symbol prints as the name it
//! stands for, which keeps log lines and error messages readable.

use std::fmt;
use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

static BONE_NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Interned bone name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(Spur);

impl Symbol {
    /// Interns `name`, returning the existing symbol if the bone was seen before.
    #[inline]
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(BONE_NAMES.get_or_intern(name))
    }

    /// Finds the symbol for `name` without interning it.
    ///
    /// A name no track or skeleton ever registered answers `None`, so lookups
    /// with stray names do not grow the table.
    #[inline]
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        BONE_NAMES.get(name).map(Self)
    }

    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        BONE_NAMES.resolve(&self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Symbol").field(&self.as_str()).finish()
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bone_name_shares_a_symbol() {
        let spine = Symbol::new("spine");
        let head = Symbol::from("head");

        assert_eq!(spine, Symbol::new("spine"));
        assert_ne!(spine, head);
        assert_eq!(spine.as_str(), "spine");
    }

    #[test]
    fn lookup_does_not_intern() {
        let _ = Symbol::new("pelvis");

        assert_eq!(Symbol::lookup("pelvis").map(Symbol::as_str), Some("pelvis"));
        assert!(Symbol::lookup("never_registered_bone").is_none());
    }

    #[test]
    fn symbol_prints_bone_name() {
        let thigh = Symbol::new("thigh_l");
        assert_eq!(thigh.to_string(), "thigh_l");
        assert_eq!(format!("{thigh:?}"), r#"Symbol("thigh_l")"#);
    }
}
