#![deny(unused_must_use)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use attribute::{ANY, AttributeValue, NA, Part};
pub use binding::Binding;
pub use cpe::{Cpe, CpeBuilder};
pub use err::{ParsingError, Result};

pub mod attribute;
pub mod binding;
pub mod cpe;
pub mod err;

#[cfg(test)]
use std::sync::Once;

#[cfg(test)]
static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
#[cfg(test)]
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}

