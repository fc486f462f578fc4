//! Module names for the import graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error raised when a module name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    /// Name was empty.
    #[error("Module name is empty")]
    Empty,
    /// Name had an empty dotted segment (leading, trailing or doubled dot).
    #[error("Invalid module name: {0}")]
    InvalidName(String),
}

/// A dotted, hierarchical module name such as `mypackage.foo.bar`.
///
/// Equality and ordering are plain string equality and ordering, so sorting
/// a set of modules gives the same order as sorting their names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Module(String);

impl Module {
    /// Create a module from a name without validation.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Parse a module name, rejecting empty names and empty segments.
    pub fn parse(name: &str) -> Result<Self, ModuleError> {
        if name.is_empty() {
            return Err(ModuleError::Empty);
        }
        if name.split('.').any(str::is_empty) {
            return Err(ModuleError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// The full dotted name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The parent module, or `None` for a root module.
    pub fn parent(&self) -> Option<Module> {
        self.0.rsplit_once('.').map(|(parent, _)| Module::new(parent))
    }

    /// The first segment of the name.
    pub fn root(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Whether this module sits anywhere below `other` in the hierarchy.
    ///
    /// `a.b.c` is a descendant of `a.b` and `a`, but not of `a.b.c` itself
    /// and not of `a.bc`.
    pub fn is_descendant_of(&self, other: &Module) -> bool {
        self.0
            .strip_prefix(other.0.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .map_or(false, |suffix| !suffix.is_empty())
    }

    /// Whether this module is a direct child of `other`.
    pub fn is_child_of(&self, other: &Module) -> bool {
        self.parent().as_ref() == Some(other)
    }

    /// Whether this module is `other` or one of its descendants.
    pub fn is_in_package(&self, other: &Module) -> bool {
        self == other || self.is_descendant_of(other)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Module {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Module {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Module {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Module {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendant_of() {
        let a = Module::new("a");
        let ab = Module::new("a.b");
        let abc = Module::new("a.b.c");

        assert!(ab.is_descendant_of(&a));
        assert!(abc.is_descendant_of(&a));
        assert!(abc.is_descendant_of(&ab));
        assert!(!a.is_descendant_of(&a));
        assert!(!a.is_descendant_of(&ab));
    }

    #[test]
    fn test_descendant_requires_dot_boundary() {
        let a = Module::new("a.b");
        assert!(!Module::new("a.bc").is_descendant_of(&a));
        assert!(!Module::new("a.b.").is_descendant_of(&a));
    }

    #[test]
    fn test_parent_and_child() {
        let abc = Module::new("a.b.c");
        assert_eq!(abc.parent(), Some(Module::new("a.b")));
        assert_eq!(Module::new("a").parent(), None);
        assert!(abc.is_child_of(&Module::new("a.b")));
        assert!(!abc.is_child_of(&Module::new("a")));
        assert_eq!(abc.root(), "a");
    }

    #[test]
    fn test_in_package() {
        let pkg = Module::new("a");
        assert!(Module::new("a").is_in_package(&pkg));
        assert!(Module::new("a.x").is_in_package(&pkg));
        assert!(!Module::new("ab").is_in_package(&pkg));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Module::parse(""), Err(ModuleError::Empty));
        assert!(matches!(Module::parse("a..b"), Err(ModuleError::InvalidName(_))));
        assert!(matches!(Module::parse(".a"), Err(ModuleError::InvalidName(_))));
        assert_eq!(Module::parse("a.b").unwrap().name(), "a.b");
    }

    #[test]
    fn test_ordering_matches_names() {
        let mut modules = vec![Module::new("b"), Module::new("a.z"), Module::new("a.b")];
        modules.sort();
        let names: Vec<_> = modules.iter().map(Module::name).collect();
        assert_eq!(names, vec!["a.b", "a.z", "b"]);
    }
}
