/// Words that manipulate the data stack.
mod stack_words;

/// Words that work with math, logic and Value equality.
mod math_logic_words;

/// Words that work with arrays.
mod array_words;

/// Words that work with strings.
mod string_words;

/// Words that run quotations.
mod control_words;

/// Words that work with scopes.
mod scope_words;

use crate::runtime::{
    built_ins::base_words::{
        array_words::register_array_words, control_words::register_control_words,
        math_logic_words::register_math_logic_words, scope_words::register_scope_words,
        stack_words::register_stack_words, string_words::register_string_words,
    },
    error,
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_stack_words(interpreter)?;
    register_math_logic_words(interpreter)?;
    register_array_words(interpreter)?;
    register_string_words(interpreter)?;
    register_control_words(interpreter)?;
    register_scope_words(interpreter)?;

    Ok(())
}
