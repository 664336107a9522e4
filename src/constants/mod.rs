//! Constant tables and lookups.
//!
//! Types declare their constants as an ordered table through the
//! [`Constants`] trait, usually with the [`constants!`](crate::constants!)
//! macro which also defines the associated consts. A [`ConstantLookup`]
//! then answers "is this value one of the constants?" and "which constant
//! is it?", optionally restricted to names with a given prefix and with
//! strict or loose value comparison.
//!
//! Tables can also be registered under a class name in a
//! [`ConstantRegistry`]; lookups against a name that was never registered
//! simply find nothing.
//!
//! ```
//! use support_rs::constants;
//! use support_rs::constants::{constant_name, in_constants, ConstantLookupBuilder};
//!
//! pub struct Status;
//!
//! constants! {
//!     Status {
//!         STATUS_ACTIVE: i64 = 1,
//!         STATUS_DISABLED: i64 = 2,
//!         LEGACY_ACTIVE: i64 = 1,
//!     }
//! }
//!
//! assert_eq!(Status::STATUS_DISABLED, 2);
//! assert!(in_constants::<Status, _>(2));
//! assert_eq!(constant_name::<Status, _>(1), "STATUS_ACTIVE");
//! assert_eq!(constant_name::<Status, _>(99), "");
//!
//! let legacy = ConstantLookupBuilder::new().prefix("LEGACY_").build();
//! assert_eq!(legacy.name_of::<Status, _>(1), "LEGACY_ACTIVE");
//!
//! let loose = ConstantLookupBuilder::new().strict(false).build();
//! assert!(loose.contains::<Status, _>("2"));
//! ```

use crate::core::value::Scalar;

pub mod lookup;
pub mod registry;

pub use lookup::{constant_name, in_constants, ConstantLookup, ConstantLookupBuilder, Membership};
pub use registry::ConstantRegistry;

/// An ordered table of named constants.
pub trait Constants {
    /// Declared constants, in declaration order.
    fn constants() -> Vec<(&'static str, Scalar)>;
}

/// Defines associated consts on a type and implements [`Constants`] for it
/// with the same names and values, in the same order.
#[macro_export]
macro_rules! constants {
    ($ty:ty { $($name:ident : $const_ty:ty = $value:expr),* $(,)? }) => {
        impl $ty {
            $(pub const $name: $const_ty = $value;)*
        }

        impl $crate::constants::Constants for $ty {
            fn constants() -> ::std::vec::Vec<(&'static str, $crate::core::value::Scalar)> {
                ::std::vec![
                    $((stringify!($name), $crate::core::value::Scalar::from(<$ty>::$name)),)*
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mixed;

    crate::constants! {
        Mixed {
            NAME: &'static str = "mixed",
            ENABLED: bool = true,
            RATIO: f64 = 0.5,
            LIMIT: u32 = 10,
        }
    }

    #[test]
    fn macro_keeps_declaration_order_and_values() {
        assert_eq!(Mixed::LIMIT, 10);
        assert_eq!(
            Mixed::constants(),
            vec![
                ("NAME", Scalar::Str("mixed".to_string())),
                ("ENABLED", Scalar::Bool(true)),
                ("RATIO", Scalar::Float(0.5)),
                ("LIMIT", Scalar::Int(10)),
            ]
        );
    }
}
