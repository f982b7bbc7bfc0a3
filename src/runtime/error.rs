use std::fmt::{ self, Debug, Display, Formatter };
use thiserror::Error;
use crate::{ runtime::interpreter::CallStack,
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The broad category of a failure.  Embedders match on this rather than on message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind
{
    /// A word needed more values than the stack holds.
    #[error("stack underflow")]
    StackUnderflow,

    /// A value on the stack does not have the type a word declared.
    #[error("type mismatch")]
    TypeMismatch,

    /// Nothing knows how to execute the word.
    #[error("unknown word")]
    UnknownWord,

    /// Input ran out while looking for a closing delimiter.
    #[error("unterminated delimiter")]
    UnterminatedDelimiter,

    /// A scope name or scope field lookup found nothing.
    #[error("undefined scope")]
    UndefinedScope,

    /// A word declaration could not be read, or a word broke its own declaration.
    #[error("invalid signature")]
    InvalidSignature,

    /// Any other failure while running a word.
    #[error("runtime error")]
    Runtime,

    /// Reading or writing outside of the interpreter failed.
    #[error("I/O error")]
    Io
}



/// Any error that occurs during the parsing or execution of a script.
#[derive(Clone)]
pub struct ScriptError
{
    /// What kind of failure this is.
    kind: ErrorKind,

    /// The location in the source text the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// The words being executed at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl std::error::Error for ScriptError
{
}


/// Pretty print the ScriptError for the user.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.error)?,
            None => write!(f, "{}", self.error)?
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


/// Pretty print the ScriptError for debugging.
impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{} ({})", self, self.kind)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind,
               location: Option<SourceLocation>,
               error: String,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                error,
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind,
                            location: Option<SourceLocation>,
                            error: String,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(kind, location, error, call_stack))
    }

    /// What kind of failure this is.
    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// If available, the location in the source text the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    /// If available, the word call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, format!("I/O error: {}", error), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let location = interpreter.current_location();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(kind, location, message, Some(call_stack))
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
