// This file is the module declaration file for the `builders` module.
// It declares and makes public all the sub-modules within the `src/builders`
// directory. These modules turn raw spec text into values a caller can use.

// `tokenizer` module:
// Splits one line of text into tokens. Whitespace and commas separate
// tokens, and single or double quotes group text that contains them.
pub mod tokenizer;

// `decoder` module:
// Converts raw tokens into integers, floats, booleans and strings. Decoding
// never fails: unreadable input becomes the type's zero value. It also holds
// the `FromValues` trait used to request several typed fields at once.
pub mod decoder;

// `script` module:
// Provides `ScriptCursor`, which walks the lines of a `{ ... }` script block
// and tokenizes each line only when it is fetched.
pub mod script;

// `reporter` module:
// Renders the parsed entries of a store for people to read. It defines the
// `SpecReporter` trait and its `ConsoleReporter` implementation, which is
// used by the `dump` command.
pub mod reporter;
