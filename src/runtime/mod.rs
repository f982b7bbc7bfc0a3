/// All of the core data structures used by the Prie interpreter.
pub mod data_structures;

/// Module for defining the built-in native words that are available to Prie scripts.
pub mod built_ins;

/// Module for defining the error reporting of the Prie interpreter.
pub mod error;

/// Module for defining the core functionality of the Prie interpreter.  This includes tools for
/// managing and examining the interpreter's state.
pub mod interpreter;
