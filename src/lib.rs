//! Reads sectioned key/value spec files into a queryable store.
//!
//! A spec file looks like this:
//!
//! ```text
//! # comments start with '#' or '//'
//! tmp = /tmp
//!
//! [network]
//! address = "10.11.12.3", 24, on
//!
//! setup = {
//!     connect_hw_server
//!     open_hw_target
//! }
//! ```
//!
//! [`ConfigStore`] parses such a file and answers lookups by key, decoding
//! values leniently into integers, floats, booleans or strings. Script
//! blocks are kept as raw lines and walked with a [`ScriptCursor`].

pub mod builders;
pub mod core;
pub mod utils;


pub use crate::builders::decoder::{FromValues, SpecValue};
pub use crate::builders::script::ScriptCursor;
pub use crate::builders::tokenizer::tokenize;
pub use crate::core::config::ConfigStore;
pub use crate::core::error::{ConfigError, Result};
