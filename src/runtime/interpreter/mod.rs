use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            scope::ScopeRegistry,
            stack_effect::StackEffect,
            value::Value,
        },
        error,
        interpreter::marshaling::{Arguments, Returned},
    },
};
use std::{fs::read_to_string, rc::Rc};

/// Moving values between the stack and native word handlers.
pub mod marshaling;

/// The interpreter implementation itself.
pub mod prie_interpreter;

/// The names of the words currently executing, innermost last.  Attached to errors so the user can
/// see how execution got where it failed.
pub type CallStack = Vec<String>;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<Value>;

/// A parsed sequence of values, ready to execute.
pub type ValueList = Vec<Value>;

/// Trait for managing the interpreter's data stack.  Word handlers mostly see the stack through
/// their marshaled arguments, but control words and embedders reach for it directly.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required.  The REPL prints it after every line.
    fn stack(&self) -> &ValueStack;

    /// Mutable access for embedders that want to seed or inspect the stack in place.
    fn stack_mut(&mut self) -> &mut ValueStack;

    /// Push a value onto the stack.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Pop the top value and require it to be a string.  A value of any other type is a type
    /// mismatch.
    fn pop_as_string(&mut self) -> error::Result<String>;
}

/// Trait for reaching the registry of named scopes.
pub trait ScopeManagement {
    fn scopes(&self) -> &ScopeRegistry;

    fn scopes_mut(&mut self) -> &mut ScopeRegistry;
}

/// Trait for the parser's state.  The parser keeps a stack of lexers and a stack of accumulators.
/// Parsing words push fresh ones while they run and can reach back to the outer lexer.
///
/// These are only meaningful while a parse is in progress, which is when parsing words execute.
pub trait ParseManagement {
    /// Make the buffer the active lexer.
    fn lexer_push(&mut self, buffer: SourceBuffer);

    /// Drop the active lexer.
    fn lexer_pop(&mut self) -> error::Result<SourceBuffer>;

    /// The active lexer, if a parse is in progress.
    fn lexer_mut(&mut self) -> Option<&mut SourceBuffer>;

    /// Start collecting into a fresh accumulator.
    fn accumulator_push(&mut self);

    /// Finish the active accumulator and hand back what it collected.
    fn accumulator_pop(&mut self) -> error::Result<ValueList>;

    /// The active accumulator, if any.
    fn accumulator(&self) -> Option<&ValueList>;

    /// Append a value to the active accumulator.
    fn accumulate(&mut self, value: Value) -> error::Result<()>;

    /// The definition text of a parsing word, if the name is one.
    fn parsing_word(&self, name: &str) -> Option<String>;

    /// Register a parsing word.  When the parser meets the name it parses and runs the definition
    /// instead of collecting the name.
    fn add_parsing_word(&mut self, name: &str, definition: &str);
}

/// Definition of a word handler function.  The dispatcher pops and checks the inputs the word
/// declared, hands them over as arguments, and pushes whatever the handler returns.
pub type WordHandler = dyn Fn(&mut dyn Interpreter, Arguments) -> error::Result<Returned>;

/// A last chance for the host to execute a word the dictionary does not know.  Returns Ok(false)
/// when the host does not know it either.
pub type ExtensionHook = dyn Fn(&mut dyn Interpreter, &str) -> error::Result<bool>;

/// Information about a word handler.  Once created it's fields are read-only and accessed by member
/// methods.
#[derive(Clone)]
pub struct WordHandlerInfo {
    name: String,
    location: SourceLocation,
    handler: Rc<WordHandler>,
}

/// Core implementation of WordHandlerInfo's methods.
impl WordHandlerInfo {
    /// Create a new WordHandlerInfo instance.
    pub fn new(
        name: String,
        location: SourceLocation,
        handler: Rc<WordHandler>,
    ) -> WordHandlerInfo {
        WordHandlerInfo {
            name,
            location,
            handler,
        }
    }

    /// The name of the word itself.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// Where in the Rust code this word was registered.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The handler function for the word.
    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }
}

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are the interpreter to register with, the word's declaration in the form
/// `name ( inputs -- outputs )`, the handler and a simple description.  A declaration that can
/// not be read is returned as an error from the enclosing function.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $declaration:expr ,
        $function:expr ,
        $description:expr
    ) => {{
        $crate::runtime::interpreter::WordManagement::add_word(
            &mut *$interpreter,
            $crate::location_here!(), // Where the word was registered from.
            $declaration,
            std::rc::Rc::new($function),
            $description,
        )?;
    }};
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// The location of the active lexer, if a parse is in progress.
    fn current_location(&self) -> Option<SourceLocation>;

    /// Add a word from an explicit stack effect.  A word of the same name is replaced.
    fn add_word_with_effect(
        &mut self,
        location: SourceLocation,
        name: &str,
        signature: StackEffect,
        handler: Rc<WordHandler>,
        description: &str,
    );

    /// Add a word from a declaration such as `count ( array -- integer )`.  The declaration is read
    /// once, here.
    fn add_word(
        &mut self,
        location: SourceLocation,
        declaration: &str,
        handler: Rc<WordHandler>,
        description: &str,
    ) -> error::Result<()> {
        let (name, signature) = StackEffect::parse_declaration(declaration)?;

        self.add_word_with_effect(location, &name, signature, handler, description);
        Ok(())
    }

    //// Find a word in the interpreter's dictionary by name.
    fn find_word(&self, word: &str) -> Option<&WordInfo>;

    /// Get a word's execution information from it's handler index.
    fn word_handler_info(&self, index: usize) -> Option<&WordHandlerInfo>;

    /// The current word dictionary of words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;

    /// Install the hook consulted for words the dictionary does not know.
    fn set_extension_hook(&mut self, hook: Rc<ExtensionHook>);

    /// Execute one value.  Words are run, everything else is pushed.
    fn execute(&mut self, value: &Value) -> error::Result<()>;

    /// Execute each value of the sequence in order.  This is how all code runs, quotations
    /// included.
    fn execute_loop(&mut self, code: &[Value]) -> error::Result<()> {
        for value in code {
            self.execute(value)?;
        }

        Ok(())
    }

    /// Execute a dictionary word, checking and marshaling its inputs and outputs.
    fn execute_word(&mut self, word: &WordInfo) -> error::Result<()>;

    /// Run a word by name, the same way the execution of a word value would.
    fn execute_word_named(&mut self, word: &str) -> error::Result<()>;

    /// The current word call stack.
    fn call_stack(&self) -> &CallStack;
}

/// Core interpreter trait.
///
/// Brings together the stack, the scopes, the parser state and the words, and adds the entry
/// points an embedder uses.
pub trait Interpreter: InterpreterStack + ScopeManagement + ParseManagement + WordManagement {
    /// Parse source text into a sequence of values without executing it.  Parsing words found
    /// along the way do run.  The path tags locations in error messages.
    fn parse_source(&mut self, path: &str, source: &str) -> error::Result<ValueList>;

    /// Parse source text that has no better name than `<input>`.
    fn parse(&mut self, source: &str) -> error::Result<ValueList> {
        self.parse_source("<input>", source)
    }

    /// Parse and then execute the source text.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()> {
        let code = self.parse_source(path, source)?;

        self.execute_loop(&code)
    }

    /// Read, parse and execute a script file.
    fn process_source_file(&mut self, path: &str) -> error::Result<()> {
        let source = read_to_string(path)?;

        self.process_source(path, &source)
    }

    /// Parse and execute the source text.
    fn run(&mut self, source: &str) -> error::Result<()> {
        self.process_source("<input>", source)
    }

    /// Run the source text and pop its result off of the stack.
    fn return_value(&mut self, source: &str) -> error::Result<Value> {
        self.run(source)?;
        self.pop()
    }
}
