#![allow(dead_code)]

pub mod mocks;

pub use mocks::MockSink;

use support_rs::core::value::Map;
use support_rs::map;

/// Installs a test logger once; later calls are no-ops.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two people as a list of maps under `child`.
pub fn people() -> Map {
    map! {
        "child" => vec![
            map! { "name" => "chopin", "age" => 11 },
            map! { "name" => "ngo", "age" => 10 },
        ],
    }
}

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
