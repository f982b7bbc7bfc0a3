/// Module contains the Value enumeration and it's implementation.  The value is one of the core
/// data structures of the interpreter.  It is used to represent all data types that scripts can
/// understand and manage, code included.
pub mod value;

/// Represent a vector of values useable by scripts in the runtime.  Quotations are these too.
pub mod value_vec;

/// Scopes, the named mutable records scripts keep their state in, and the registry of them.
pub mod scope;

/// The declared input and output types of a word.
pub mod stack_effect;

/// The dictionary module provides the core interpreter word dictionary.
pub mod dictionary;
