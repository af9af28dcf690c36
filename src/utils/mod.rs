use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

use crate::builders::reporter::{ConsoleReporter, SpecReporter};
use crate::core::config::ConfigStore;

/// The scalar type `get` decodes values into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    String,
}

/// Where and how to look a key up.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Section unscoped keys resolve against; the global section when `None`.
    pub section: Option<String>,
    /// Report a missing key instead of failing.
    pub lenient: bool,
}

/// Prints every entry of the spec file at `path`.
pub fn dump_file(path: &Path, summary: bool, out: &mut impl Write) -> Result<()> {
    let store = open_store(path, &QueryOptions::default())?;
    ConsoleReporter::new(summary)
        .write_report(&store, out)
        .context("Failed to write report")?;
    Ok(())
}

/// Prints the values of `key`, one per line, decoded as `kind`.
pub fn print_values(
    path: &Path,
    key: &str,
    kind: ValueKind,
    options: &QueryOptions,
    out: &mut impl Write,
) -> Result<()> {
    let store = open_store(path, options)?;

    let values: Option<Vec<String>> = match kind {
        ValueKind::Int => store.get_vec::<i64>(key)?.map(to_strings),
        ValueKind::Float => store.get_vec::<f64>(key)?.map(to_strings),
        ValueKind::Bool => store.get_vec::<bool>(key)?.map(to_strings),
        ValueKind::String => store.get_vec::<String>(key)?,
    };

    match values {
        Some(values) => {
            for value in values {
                writeln!(out, "{value}")?;
            }
        }
        None => writeln!(out, "Key '{key}' not found")?,
    }
    Ok(())
}

/// Prints the lines of the script stored under `key`. With `tokens` set,
/// each line is shown as its token count followed by the bracketed tokens.
pub fn print_script(
    path: &Path,
    key: &str,
    tokens: bool,
    options: &QueryOptions,
    out: &mut impl Write,
) -> Result<()> {
    let store = open_store(path, options)?;

    let Some(mut script) = store.get_script(key)? else {
        writeln!(out, "Script '{key}' not found")?;
        return Ok(());
    };

    while let Some((count, text)) = script.next_line() {
        if !tokens {
            writeln!(out, "{text}")?;
            continue;
        }
        let fields: Vec<String> = (0..count)
            .map(|_| format!("[{}]", script.next_token(false)))
            .collect();
        writeln!(out, "{count}: {}", fields.join(" "))?;
    }
    Ok(())
}

fn open_store(path: &Path, options: &QueryOptions) -> Result<ConfigStore> {
    let mut store = ConfigStore::new();
    if !store.read(path, true) {
        anyhow::bail!("Can't open {}", path.display());
    }
    store.set_strict(!options.lenient);
    if let Some(section) = &options.section {
        store.set_current_section(section);
    }
    Ok(store)
}

fn to_strings<T: ToString>(values: Vec<T>) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
