// This file is the module declaration file for the `core` module.
// It declares the submodules of `src/core/` and exposes them to the rest of
// the crate.

// `config` module:
// Defines `ConfigStore`, the queryable result of reading a spec file. It
// resolves unscoped keys against the current section and then the global
// section, and offers typed, vector and script getters.
pub mod config;

// `engine` module:
// The line-oriented state machine that fills the store's map while a file
// is read: section headers, key/value lines and script blocks.
pub mod engine;

// `error` module:
// The `ConfigError` type for missing keys and unreadable files.
pub mod error;
