use log::{debug, trace};
use std::collections::BTreeMap;
use std::mem;

use crate::builders::tokenizer::tokenize;

/// Parsed spec entries: scoped key (`section::basekey`) to its value list,
/// or to the raw lines of a script block.
pub type SpecMap = BTreeMap<String, Vec<String>>;

/// The two states of the line parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Reading comments, section headers and `key = value` lines.
    Default,
    /// Capturing the raw lines of a `{ ... }` script block.
    InScript,
}

/// Line-oriented state machine that turns spec-file text into [`SpecMap`]
/// entries.
///
/// Lines are fed one at a time with [`SpecParser::feed_line`]; entries are
/// written into the borrowed map as soon as they are complete, overwriting
/// any entry with the same scoped key. [`SpecParser::finish`] must be called
/// at end of input so that an unterminated script block is accounted for.
pub struct SpecParser<'a> {
    specs: &'a mut SpecMap,
    state: ParseState,
    /// The `[section]` that key lines are currently scoped to.
    section: String,
    /// Scoped key of the most recent key line. A `{` line opens a script for it.
    last_key: Option<String>,
    /// Key the open script block will be stored under, if it has one.
    script_key: Option<String>,
    /// Lines captured so far for the open script block.
    buffer: Vec<String>,
    line_number: usize,
}

impl<'a> SpecParser<'a> {
    /// Creates a parser that writes into `specs`, starting in the global
    /// section.
    pub fn new(specs: &'a mut SpecMap) -> Self {
        Self {
            specs,
            state: ParseState::Default,
            section: String::new(),
            last_key: None,
            script_key: None,
            buffer: Vec::new(),
            line_number: 0,
        }
    }

    /// Processes one physical line of input.
    ///
    /// Anything from the first carriage return or line feed onwards is
    /// dropped. Blank lines and comments (`#` or `//` after leading
    /// whitespace) are skipped in every state.
    pub fn feed_line(&mut self, raw: &str) {
        self.line_number += 1;

        let line = match raw.find(['\r', '\n']) {
            Some(end) => &raw[..end],
            None => raw,
        };
        let body = line.trim_start_matches(is_blank);

        if body.is_empty() || body.starts_with('#') || body.starts_with("//") {
            return;
        }

        match self.state {
            ParseState::InScript => {
                if body.trim_end_matches(is_blank) == "}" {
                    self.close_script();
                } else {
                    self.buffer.push(line.to_string());
                }
            }
            ParseState::Default => {
                if let Some(rest) = body.strip_prefix('[') {
                    self.section = parse_to_delimiter(rest, ']');
                    debug!("line {}: entering section [{}]", self.line_number, self.section);
                } else if body.starts_with('{') {
                    let key = self.last_key.clone();
                    self.open_script(key);
                } else if body.starts_with('}') {
                    trace!("line {}: '}}' outside of a script block ignored", self.line_number);
                } else {
                    self.parse_key_line(body);
                }
            }
        }
    }

    /// Ends parsing. An unterminated script block is discarded.
    pub fn finish(self) {
        if self.state == ParseState::InScript {
            debug!(
                "end of input inside script block for {:?}; {} line(s) discarded",
                self.script_key,
                self.buffer.len()
            );
        }
    }

    /// Handles a `basekey [= values]` line.
    fn parse_key_line(&mut self, body: &str) {
        let base_key = parse_to_delimiter(body, '=');
        let scoped_key = format!("{}::{}", self.section, base_key);
        self.last_key = Some(scoped_key.clone());

        let values = match body.find('=') {
            Some(eq) => {
                let rhs = &body[eq + 1..];
                // `key = {` opens a script block for this key directly.
                if rhs.trim_matches(is_blank) == "{" {
                    self.open_script(Some(scoped_key));
                    return;
                }
                tokenize(rhs)
            }
            None => Vec::new(),
        };

        trace!("line {}: {} = {:?}", self.line_number, scoped_key, values);
        self.specs.insert(scoped_key, values);
    }

    fn open_script(&mut self, key: Option<String>) {
        match &key {
            Some(key) => {
                // Nothing is visible under this key until the block closes.
                self.specs.remove(key);
                debug!("line {}: script block for {} opened", self.line_number, key);
            }
            None => debug!(
                "line {}: script block has no key; its lines will be discarded",
                self.line_number
            ),
        }
        self.script_key = key;
        self.buffer.clear();
        self.state = ParseState::InScript;
    }

    fn close_script(&mut self) {
        let lines = mem::take(&mut self.buffer);
        match self.script_key.take() {
            Some(key) => {
                debug!("line {}: script block for {} closed with {} line(s)", self.line_number, key, lines.len());
                self.specs.insert(key, lines);
            }
            None => debug!("line {}: keyless script block discarded", self.line_number),
        }
        self.state = ParseState::Default;
    }
}

/// Parses a whole text into `specs`.
pub fn parse_specs(text: &str, specs: &mut SpecMap) {
    let mut parser = SpecParser::new(specs);
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish();
}

/// Reads the run of characters after any leading blanks, up to a blank or
/// `delimiter`, ASCII-lowercased.
fn parse_to_delimiter(s: &str, delimiter: char) -> String {
    s.trim_start_matches(is_blank)
        .split(|c: char| is_blank(c) || c == delimiter)
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
