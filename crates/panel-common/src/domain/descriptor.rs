//! Static identity of a carrier type.
//!
//! Both the configuration store and the logger derive file paths from the
//! "assembly" (declaring crate) and "namespace" (module path) of the type they
//! are parameterised on.  Rust has no runtime reflection for this, so the
//! caller supplies a [`TypeDescriptor`] through the [`Component`] trait.
//!
//! # Example
//!
//! ```rust
//! use panel_common::{Component, TypeDescriptor};
//!
//! struct Probe;
//!
//! impl Component for Probe {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::new("GameHost", "GameHost.Sub", "Probe")
//!     }
//! }
//!
//! assert_eq!(Probe::descriptor().trimmed_namespace(), "Sub");
//! ```

use std::fmt;

/// The `{assembly, namespace, short_name}` triple identifying a carrier type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    assembly: String,
    namespace: String,
    short_name: String,
}

impl TypeDescriptor {
    /// Creates a descriptor from explicit parts.
    ///
    /// Rust module separators (`::`) in `namespace` are normalised to `.` so
    /// that `module_path!()` output and dotted names behave the same.
    pub fn new(
        assembly: impl Into<String>,
        namespace: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            assembly: assembly.into(),
            namespace: namespace.into().replace("::", "."),
            short_name: short_name.into(),
        }
    }

    /// Builds a descriptor from a `module_path!()` string.
    ///
    /// The first path segment is the crate name and becomes the assembly.
    pub fn from_module_path(module_path: &str, short_name: impl Into<String>) -> Self {
        let assembly = module_path.split("::").next().unwrap_or_default();
        Self::new(assembly, module_path, short_name)
    }

    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Namespace with the leading `{assembly}.` removed and outer dots trimmed.
    ///
    /// `GameHost.Sub.Inner` in assembly `GameHost` yields `Sub.Inner`; a
    /// namespace equal to the assembly yields the empty string.
    pub fn trimmed_namespace(&self) -> &str {
        let rest = match self.namespace.strip_prefix(self.assembly.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('.') => rest,
            _ => self.namespace.as_str(),
        };
        rest.trim_matches('.')
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}, {}", self.namespace, self.short_name, self.assembly)
    }
}

/// A type that can describe its own crate, module and name.
///
/// Implement it by hand or with the [`component!`](crate::component) macro.
pub trait Component {
    fn descriptor() -> TypeDescriptor;
}

/// Implements [`Component`] for a type using the caller's `module_path!()`.
///
/// ```rust
/// use panel_common::{component, Component};
///
/// struct Probe;
/// component!(Probe);
///
/// assert_eq!(Probe::descriptor().short_name(), "Probe");
/// ```
#[macro_export]
macro_rules! component {
    ($ty:ident) => {
        impl $crate::Component for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::from_module_path(module_path!(), stringify!($ty))
            }
        }
    };
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;
    crate::component!(Marker);

    #[test]
    fn test_trimmed_namespace_strips_assembly_prefix() {
        // Arrange
        let descriptor = TypeDescriptor::new("A", "A.Sub", "Probe");

        // Act / Assert
        assert_eq!(descriptor.trimmed_namespace(), "Sub");
    }

    #[test]
    fn test_trimmed_namespace_keeps_nested_segments_dotted() {
        let descriptor = TypeDescriptor::new("GameHost", "GameHost.Sub.Inner", "Probe");
        assert_eq!(descriptor.trimmed_namespace(), "Sub.Inner");
    }

    #[test]
    fn test_trimmed_namespace_equal_to_assembly_is_empty() {
        let descriptor = TypeDescriptor::new("A", "A", "Probe");
        assert_eq!(descriptor.trimmed_namespace(), "");
    }

    #[test]
    fn test_trimmed_namespace_ignores_partial_word_prefix() {
        // "Ab.Sub" does not start with the assembly segment "A."
        let descriptor = TypeDescriptor::new("A", "Ab.Sub", "Probe");
        assert_eq!(descriptor.trimmed_namespace(), "Ab.Sub");
    }

    #[test]
    fn test_trimmed_namespace_foreign_namespace_is_only_trimmed() {
        let descriptor = TypeDescriptor::new("A", ".Other.", "Probe");
        assert_eq!(descriptor.trimmed_namespace(), "Other");
    }

    #[test]
    fn test_new_normalises_rust_module_separators() {
        let descriptor = TypeDescriptor::new("game_host", "game_host::plugins::motd", "Motd");
        assert_eq!(descriptor.namespace(), "game_host.plugins.motd");
        assert_eq!(descriptor.trimmed_namespace(), "plugins.motd");
    }

    #[test]
    fn test_from_module_path_uses_first_segment_as_assembly() {
        let descriptor = TypeDescriptor::from_module_path("game_host::plugins", "Motd");
        assert_eq!(descriptor.assembly(), "game_host");
        assert_eq!(descriptor.trimmed_namespace(), "plugins");
    }

    #[test]
    fn test_component_macro_describes_declaring_module() {
        // Act
        let descriptor = Marker::descriptor();

        // Assert
        assert_eq!(descriptor.assembly(), "panel_common");
        assert_eq!(descriptor.trimmed_namespace(), "domain.descriptor.tests");
        assert_eq!(descriptor.short_name(), "Marker");
    }

    #[test]
    fn test_display_includes_full_name_and_assembly() {
        let descriptor = TypeDescriptor::new("A", "A.Sub", "Probe");
        assert_eq!(descriptor.to_string(), "A.Sub.Probe, A");
    }
}
