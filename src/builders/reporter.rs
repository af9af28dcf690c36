use std::io::{self, Write};

use crate::core::config::ConfigStore;

/// Renders the contents of a [`ConfigStore`] for a human to read.
pub trait SpecReporter {
    /// Writes the report for `store` to `out`.
    fn write_report(&self, store: &ConfigStore, out: &mut dyn Write) -> io::Result<()>;
}

/// A reporter that lists every entry in key order.
///
/// Each entry is printed as its quoted scoped key followed by one indented,
/// quoted line per value:
///
/// ```text
/// Key "network::gateway"
///    "10.11.12.1"
///    "24"
/// ```
pub struct ConsoleReporter {
    /// Append a one-line count of entries and sections.
    summary: bool,
}

impl ConsoleReporter {
    /// Constructs a new `ConsoleReporter` instance.
    pub fn new(summary: bool) -> Self {
        Self { summary }
    }

    fn format_entry(&self, key: &str, values: &[String]) -> String {
        let mut text = format!("Key \"{key}\"\n");
        for value in values {
            text.push_str(&format!("   \"{value}\"\n"));
        }
        text
    }
}

impl SpecReporter for ConsoleReporter {
    fn write_report(&self, store: &ConfigStore, out: &mut dyn Write) -> io::Result<()> {
        for (key, values) in store.entries() {
            out.write_all(self.format_entry(key, values).as_bytes())?;
        }

        if self.summary {
            writeln!(
                out,
                "{} entries in {} section(s)",
                store.len(),
                store.sections().len()
            )?;
        }

        Ok(())
    }
}
