/// Module for managing the original source code.  This is the lexer, it hands the scanner one
/// character at a time and keeps track of where in the source it is.
pub mod source_buffer;

/// Module for turning the characters of the source code into tokens, and for recognizing numeric
/// literals.
pub mod tokenizing;

/// Module for turning the tokens into a sequence of values ready to execute.  Parsing words run
/// while the parse is in progress, so parsing requires an active interpreter.
///
/// That is, the code being parsed may help in the parsing of the code.
pub mod parsing;
