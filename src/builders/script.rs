use crate::builders::decoder::SpecValue;
use crate::builders::tokenizer::tokenize;

/// Sequential, replayable access to the lines of one script block.
///
/// A script block is stored as raw, untokenized lines. The cursor walks those
/// lines one at a time; each call to [`ScriptCursor::next_line`] splits the
/// fetched line into tokens, which are then consumed with
/// [`ScriptCursor::next_token`], [`ScriptCursor::next_int`] and
/// [`ScriptCursor::next_float`].
///
/// The cursor owns its copy of the lines and has no link back to the
/// `ConfigStore` it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptCursor {
    /// The raw lines of the script.
    lines: Vec<String>,
    /// Index of the line the next `next_line()` call will fetch.
    line_index: usize,
    /// Tokens of the most recently fetched line.
    tokens: Vec<String>,
    /// Index of the next token to hand out from `tokens`.
    token_index: usize,
}

impl ScriptCursor {
    /// Creates a cursor positioned before the first of `lines`.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Replaces the script with `lines` and resets both positions to zero.
    pub fn assign(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.tokens.clear();
        self.line_index = 0;
        self.token_index = 0;
    }

    /// Empties the script of all lines and tokens.
    pub fn clear(&mut self) {
        self.assign(Vec::new());
    }

    /// Moves back to the first line. The current line's tokens stay available
    /// until the next call to `next_line()`.
    pub fn rewind(&mut self) {
        self.line_index = 0;
    }

    /// Fetches the next line and tokenizes it.
    ///
    /// # Returns
    /// `Some((token_count, text))` with the number of tokens on the line and
    /// its raw text, or `None` once every line has been fetched.
    pub fn next_line(&mut self) -> Option<(usize, String)> {
        let text = self.lines.get(self.line_index)?.clone();
        self.line_index += 1;
        self.tokens = tokenize(&text);
        self.token_index = 0;
        Some((self.tokens.len(), text))
    }

    /// Returns the next token of the current line, ASCII-lowercased when
    /// `lowercase` is set. Returns an empty string once the line's tokens
    /// are used up.
    pub fn next_token(&mut self, lowercase: bool) -> String {
        let Some(token) = self.take_token() else {
            return String::new();
        };
        if lowercase {
            token.to_ascii_lowercase()
        } else {
            token
        }
    }

    /// Decodes the next token as an integer; `0` past the end of the line.
    pub fn next_int(&mut self) -> i32 {
        self.take_token().map_or(0, |t| i32::decode(&t))
    }

    /// Decodes the next token as a float; `0.0` past the end of the line.
    pub fn next_float(&mut self) -> f64 {
        self.take_token().map_or(0.0, |t| f64::decode(&t))
    }

    /// Number of tokens of the current line not yet handed out.
    pub fn remaining_tokens(&self) -> usize {
        self.tokens.len().saturating_sub(self.token_index)
    }

    /// The raw lines of the script.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn take_token(&mut self) -> Option<String> {
        let token = self.tokens.get(self.token_index)?.clone();
        self.token_index += 1;
        Some(token)
    }
}

impl From<Vec<String>> for ScriptCursor {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}
