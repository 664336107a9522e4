use log::trace;

use crate::core::value::Scalar;

use super::{ConstantRegistry, Constants};

/// Outcome of [`ConstantLookup::check`]: a plain yes/no, or the matching
/// constant's name (empty when nothing matched).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    Found(bool),
    Name(String),
}

impl Membership {
    pub fn is_member(&self) -> bool {
        match self {
            Membership::Found(found) => *found,
            Membership::Name(name) => !name.is_empty(),
        }
    }

    /// The matching name, or an empty string.
    pub fn into_name(self) -> String {
        match self {
            Membership::Name(name) => name,
            Membership::Found(_) => String::new(),
        }
    }
}

/// Searches constant tables for a value.
///
/// The first constant in declaration order whose name starts with the
/// prefix and whose value matches wins.
#[derive(Debug, Clone)]
pub struct ConstantLookup {
    prefix: String,
    strict: bool,
}

impl Default for ConstantLookup {
    fn default() -> Self {
        ConstantLookupBuilder::new().build()
    }
}

impl ConstantLookup {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Membership of `value` in the constants of `T`. With `return_name`
    /// the answer is the matching name instead of a boolean.
    pub fn check<T: Constants, V: Into<Scalar>>(&self, value: V, return_name: bool) -> Membership {
        let constants = T::constants();
        let found = self.find(&constants, &value.into());
        into_membership(found, return_name)
    }

    pub fn contains<T: Constants, V: Into<Scalar>>(&self, value: V) -> bool {
        self.check::<T, V>(value, false).is_member()
    }

    /// Name of the constant of `T` equal to `value`, or an empty string.
    pub fn name_of<T: Constants, V: Into<Scalar>>(&self, value: V) -> String {
        self.check::<T, V>(value, true).into_name()
    }

    /// Like [`check`](Self::check), against the table registered under
    /// `class`. An unknown class is not an error: nothing is found.
    pub fn check_registered<V: Into<Scalar>>(
        &self,
        registry: &ConstantRegistry,
        class: &str,
        value: V,
        return_name: bool,
    ) -> Membership {
        let found = match registry.constants(class) {
            Some(constants) => self.find(constants, &value.into()),
            None => {
                trace!("No constants registered for {}", class);
                None
            }
        };
        into_membership(found, return_name)
    }

    pub fn contains_registered<V: Into<Scalar>>(
        &self,
        registry: &ConstantRegistry,
        class: &str,
        value: V,
    ) -> bool {
        self.check_registered(registry, class, value, false)
            .is_member()
    }

    pub fn name_registered<V: Into<Scalar>>(
        &self,
        registry: &ConstantRegistry,
        class: &str,
        value: V,
    ) -> String {
        self.check_registered(registry, class, value, true)
            .into_name()
    }

    fn find(&self, constants: &[(&'static str, Scalar)], value: &Scalar) -> Option<&'static str> {
        constants
            .iter()
            .find(|(name, constant)| {
                name.starts_with(self.prefix.as_str())
                    && (value.strict_eq(constant) || (!self.strict && value.loose_eq(constant)))
            })
            .map(|(name, _)| *name)
    }
}

fn into_membership(found: Option<&'static str>, return_name: bool) -> Membership {
    if return_name {
        Membership::Name(found.unwrap_or_default().to_string())
    } else {
        Membership::Found(found.is_some())
    }
}

/// Builder for [`ConstantLookup`].
///
/// Defaults: empty prefix, strict comparison. The prefix is trimmed.
///
/// ```
/// use support_rs::constants::ConstantLookupBuilder;
///
/// let lookup = ConstantLookupBuilder::new().prefix("  MODE_ ").strict(false).build();
///
/// assert_eq!(lookup.prefix(), "MODE_");
/// assert!(!lookup.is_strict());
/// ```
pub struct ConstantLookupBuilder {
    prefix: String,
    strict: bool,
}

impl Default for ConstantLookupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantLookupBuilder {
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            strict: true,
        }
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim().to_string();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> ConstantLookup {
        ConstantLookup {
            prefix: self.prefix,
            strict: self.strict,
        }
    }
}

/// Whether `value` is one of the constants of `T` (no prefix, strict).
pub fn in_constants<T: Constants, V: Into<Scalar>>(value: V) -> bool {
    ConstantLookup::default().contains::<T, V>(value)
}

/// Name of the constant of `T` equal to `value` (no prefix, strict), or an
/// empty string.
pub fn constant_name<T: Constants, V: Into<Scalar>>(value: V) -> String {
    ConstantLookup::default().name_of::<T, V>(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Letters;

    crate::constants! {
        Letters {
            A: i64 = 1,
            B: i64 = 2,
        }
    }

    struct Codes;

    crate::constants! {
        Codes {
            HTTP_OK: i64 = 200,
            HTTP_NOT_FOUND: i64 = 404,
            FTP_OK: i64 = 200,
            LABEL: &'static str = "10",
            DEBUG: bool = true,
        }
    }

    #[test]
    fn name_lookup_strict_no_prefix() {
        let lookup = ConstantLookup::default();

        assert_eq!(lookup.check::<Letters, _>(2, true), Membership::Name("B".to_string()));
        assert_eq!(lookup.check::<Letters, _>(99, true), Membership::Name(String::new()));
        assert_eq!(lookup.check::<Letters, _>(1, false), Membership::Found(true));
        assert_eq!(lookup.check::<Letters, _>(99, false), Membership::Found(false));
    }

    #[test]
    fn first_declared_match_wins() {
        assert_eq!(constant_name::<Codes, _>(200), "HTTP_OK");
    }

    #[test]
    fn prefix_restricts_candidates() {
        let ftp = ConstantLookupBuilder::new().prefix("FTP_").build();

        assert_eq!(ftp.name_of::<Codes, _>(200), "FTP_OK");
        assert!(!ftp.contains::<Codes, _>(404));
    }

    #[test]
    fn strict_mode_compares_kinds() {
        assert!(!in_constants::<Codes, _>("200"));
        assert!(!in_constants::<Codes, _>(10));
        assert!(in_constants::<Codes, _>("10"));
        assert!(!in_constants::<Codes, _>(1));
        assert!(in_constants::<Codes, _>(true));
    }

    #[test]
    fn loose_mode_juggles_types() {
        let loose = ConstantLookupBuilder::new().strict(false).build();

        assert_eq!(loose.name_of::<Codes, _>("404"), "HTTP_NOT_FOUND");
        assert_eq!(loose.name_of::<Codes, _>(10), "LABEL");
        assert_eq!(loose.name_of::<Codes, _>(200.0), "HTTP_OK");
        // Any non-zero integer is loosely equal to `true`.
        assert_eq!(loose.name_of::<Letters, _>(true), "A");
    }

    #[test]
    fn unknown_class_finds_nothing() {
        let registry = ConstantRegistry::new();
        let lookup = ConstantLookup::default();

        assert_eq!(
            lookup.check_registered(&registry, "Missing", 1, false),
            Membership::Found(false)
        );
        assert_eq!(lookup.name_registered(&registry, "Missing", 1), "");
    }

    #[test]
    fn registered_class_is_searched() {
        let mut registry = ConstantRegistry::new();
        registry.register::<Letters>("Letters");
        let lookup = ConstantLookup::default();

        assert!(lookup.contains_registered(&registry, "Letters", 1));
        assert_eq!(lookup.name_registered(&registry, "Letters", 2), "B");
        assert!(!lookup.contains_registered(&registry, "Letters", 3));
    }

    #[test]
    fn membership_helpers() {
        assert!(Membership::Found(true).is_member());
        assert!(!Membership::Name(String::new()).is_member());
        assert_eq!(Membership::Name("A".to_string()).into_name(), "A");
        assert_eq!(Membership::Found(true).into_name(), "");
    }
}
