use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::builders::decoder::{FromValues, SpecValue};
use crate::builders::script::ScriptCursor;
use crate::core::engine::{SpecMap, parse_specs};
use crate::core::error::{ConfigError, Result};

/// A parsed spec file: scoped keys mapped to value lists and script bodies.
///
/// Keys are stored as `section::basekey`, ASCII-lowercased, with the global
/// section being the empty string. A lookup for an unscoped key tries the
/// current section first and then the global section. A key that already
/// contains `::` is looked up exactly as given.
///
/// Every query hands back an owned copy of the stored strings.
///
/// # Examples
/// ```
/// use specfile::ConfigStore;
///
/// let mut store = ConfigStore::new();
/// store.read_str("timeout = 3_000\n[eth]\naddress = \"10.11.12.3\", 24\n");
///
/// assert_eq!(store.get::<i32>("timeout").unwrap(), Some(3000));
/// store.set_current_section("ETH");
/// let (ip, prefix): (String, i32) = store.get("address").unwrap().unwrap();
/// assert_eq!((ip.as_str(), prefix), ("10.11.12.3", 24));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    specs: SpecMap,
    current_section: String,
    strict: bool,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            specs: SpecMap::new(),
            current_section: String::new(),
            strict: true,
        }
    }
}

impl ConfigStore {
    /// Creates an empty store in strict mode, scoped to the global section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from the file at `path`.
    ///
    /// # Returns
    /// The populated store, or `ConfigError::FileOpen` if the file could not
    /// be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.read_file(path.as_ref())?;
        Ok(store)
    }

    /// Reads the file at `path` into the store.
    ///
    /// Entries from the file overwrite existing entries with the same scoped
    /// key; other entries are kept.
    ///
    /// # Arguments
    /// * `path`: The spec file to read.
    /// * `report_failure`: Emit a warning through the logger when the file
    ///   can't be opened.
    ///
    /// # Returns
    /// `true` if the file was read, `false` if it couldn't be opened.
    pub fn read(&mut self, path: impl AsRef<Path>, report_failure: bool) -> bool {
        let path = path.as_ref();
        match self.read_file(path) {
            Ok(()) => true,
            Err(e) => {
                if report_failure {
                    warn!("Failed to open file \"{}\": {e}", path.display());
                }
                false
            }
        }
    }

    /// Parses spec-file text held in memory into the store.
    pub fn read_str(&mut self, text: &str) {
        let before = self.specs.len();
        parse_specs(text, &mut self.specs);
        debug!("parsed spec text: {} entries ({} before)", self.specs.len(), before);
    }

    fn read_file(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| ConfigError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("reading {} ({} bytes)", path.display(), bytes.len());
        self.read_str(&String::from_utf8_lossy(&bytes));
        Ok(())
    }

    /// Sets the section that unscoped keys are resolved against. Case is
    /// ignored; an empty name selects the global section.
    pub fn set_current_section(&mut self, section: &str) {
        self.current_section = section.to_ascii_lowercase();
    }

    pub fn current_section(&self) -> &str {
        &self.current_section
    }

    /// Chooses whether a missing key is an error (`true`, the default) or a
    /// `None` result (`false`).
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Tells whether `key` resolves to an entry. Never fails, whatever the
    /// strict setting.
    pub fn exists(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Returns a copy of the raw strings stored for `key`, ignoring the strict
    /// setting.
    pub fn values(&self, key: &str) -> Option<Vec<String>> {
        self.find(key).cloned()
    }

    /// Like [`ConfigStore::values`], but honours the strict setting.
    ///
    /// # Returns
    /// * `Ok(Some(values))` when the key exists.
    /// * `Ok(None)` when it doesn't and the store is lenient.
    /// * `Err(ConfigError::KeyNotFound)` when it doesn't and the store is strict.
    pub fn lookup(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.values(key) {
            Some(values) => Ok(Some(values)),
            None if self.strict => Err(ConfigError::KeyNotFound {
                key: key.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Decodes the value list of `key` into `T`.
    ///
    /// `T` is either a scalar (`i32`, `i64`, `f64`, `bool`, `String`), which
    /// reads the first value, or a tuple of up to nine scalars, which reads
    /// the values positionally. Missing positions decode from an empty string.
    pub fn get<T: FromValues>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.lookup(key)?.map(|values| T::from_values(&values)))
    }

    /// Decodes every value of `key` into a `Vec<T>`.
    pub fn get_vec<T: SpecValue>(&self, key: &str) -> Result<Option<Vec<T>>> {
        Ok(self
            .lookup(key)?
            .map(|values| values.iter().map(|v| T::decode(v)).collect()))
    }

    /// Hands the lines stored for `key` to a fresh [`ScriptCursor`].
    pub fn get_script(&self, key: &str) -> Result<Option<ScriptCursor>> {
        Ok(self.lookup(key)?.map(ScriptCursor::new))
    }

    /// Returns the lines stored for `key` without wrapping them in a cursor.
    pub fn get_script_lines(&self, key: &str) -> Result<Option<Vec<String>>> {
        self.lookup(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Scoped keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// `(scoped key, values)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Distinct section names that own at least one entry, in sorted order.
    /// The global section appears as `""`.
    pub fn sections(&self) -> Vec<String> {
        let mut sections: Vec<String> = self
            .keys()
            .filter_map(|key| key.split_once("::").map(|(section, _)| section.to_string()))
            .collect();
        sections.dedup();
        sections
    }

    /// Resolves `key` to its stored entry.
    fn find(&self, key: &str) -> Option<&Vec<String>> {
        let key = key.to_ascii_lowercase();

        // A fully scoped name is looked up exactly as given.
        if key.contains("::") {
            return self.specs.get(&key);
        }

        self.specs
            .get(&format!("{}::{}", self.current_section, key))
            .or_else(|| self.specs.get(&format!("::{key}")))
    }
}
