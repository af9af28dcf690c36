/// Splits a single line of spec-file text into tokens.
///
/// Tokens are separated by whitespace (space or tab) and/or a single comma.
/// A token that starts with a single or double quote runs until the matching
/// quote, so it may contain whitespace and commas; the quote marks themselves
/// are not part of the token. A NUL, carriage return or line feed ends the
/// line. Tokens are returned verbatim, with no case folding.
///
/// Empty fields between commas are kept: `a,,b` yields `["a", "", "b"]`.
/// Whitespace around a comma never produces an empty token.
///
/// # Examples
/// ```
/// use specfile::builders::tokenizer::tokenize;
///
/// let tokens = tokenize(r#""10.11.12.3", eth0"#);
/// assert_eq!(tokens, vec!["10.11.12.3", "eth0"]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    Tokens::new(line).collect()
}

/// A borrowing iterator over the tokens of one line.
///
/// This is the lazy form of [`tokenize`]. It keeps no state beyond its
/// position in the borrowed line, so a fresh `Tokens` can be built for every
/// line that needs to be split.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Creates a token iterator positioned at the start of `line`.
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn at_eol(&self) -> bool {
        matches!(self.peek(), None | Some('\0' | '\r' | '\n'))
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) {
                break;
            }
            self.bump(c);
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.at_eol() {
            return None;
        }

        self.skip_whitespace();
        if self.at_eol() {
            return None;
        }

        // Remember an opening quote so that we know which character closes it.
        let quote = match self.peek() {
            Some(c @ ('"' | '\'')) => {
                self.bump(c);
                Some(c)
            }
            _ => None,
        };

        let mut token = String::new();
        while !self.at_eol() {
            let Some(c) = self.peek() else { break };
            match quote {
                Some(q) if c == q => {
                    self.bump(c);
                    break;
                }
                Some(_) => {}
                None if is_whitespace(c) || c == ',' => break,
                None => {}
            }
            token.push(c);
            self.bump(c);
        }

        // A single comma after the token (and any whitespace) is a separator.
        self.skip_whitespace();
        if self.peek() == Some(',') {
            self.bump(',');
        }

        Some(token)
    }
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}
