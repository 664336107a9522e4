#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # Support for Rust

 A handful of small, independent helpers that keep turning up around data
 exchange code:

- **Array to XML:** turn a nested, ordered map into an XML document where
  scalars become attributes, nested maps become child elements and lists of
  maps become repeated sibling elements.
- **Constant lookup:** check whether a value is one of a type's declared
  constants, and get the constant's name back.
- **32-bit normalization:** fold a 64-bit integer to the signed 32-bit
  value it represents.

 ## Features

| **Feature** | **Description**                                                  |
|-------------|------------------------------------------------------------------|
| xml         | Enables the array-to-XML serializer (default)                    |
| json        | Enables conversions from `serde_json::Value` and `Serialize` types |
| full        | Enables all available features                                   |

 ## Getting Started

```rust
# use support_rs::{constants, map, error::SupportError};
# use support_rs::constants::constant_name;
# use support_rs::int::to_32_bit_signed;
# use support_rs::xml::array_to_xml;
pub struct Level;

constants! {
    Level {
        LOW: i64 = 1,
        HIGH: i64 = 2,
    }
}

fn main() -> Result<(), SupportError> {
    let data = map! {
        "child" => vec![
            map! { "name" => "chopin", "age" => 11 },
            map! { "name" => "ngo", "age" => 10 },
        ],
    };

    let xml = array_to_xml(&data, "xml")?.to_xml()?;
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <xml><child name=\"chopin\" age=\"11\"/><child name=\"ngo\" age=\"10\"/></xml>\n"
    );

    assert_eq!(constant_name::<Level, _>(2), "HIGH");
    assert_eq!(to_32_bit_signed(0xFFFF_FFFF), -1);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Input data model
pub mod core;

/// Error types
pub mod error;

#[doc(inline)]
pub use error::*;

/// Constant tables and name lookup
pub mod constants;

/// 32-bit integer normalization
pub mod int;

#[cfg(feature = "xml")]
/// Array-to-XML serialization
pub mod xml;
