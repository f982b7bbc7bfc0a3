use crate::{
    add_native_word,
    runtime::{
        error,
        interpreter::{
            Interpreter,
            marshaling::{Arguments, Payload, Returned},
        },
    },
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let value = arguments.value()?;

    Ok(Returned::many(vec![Payload::from(value.clone()), Payload::from(value)]))
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let _ = arguments.value()?;

    Ok(Returned::nothing())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let a = arguments.value()?;
    let b = arguments.value()?;

    Ok(Returned::many(vec![b.into(), a.into()]))
}

/// Empty the data stack.
///
/// Signature: ` -- `
fn word_clear(interpreter: &mut dyn Interpreter, _arguments: Arguments) -> error::Result<Returned> {
    interpreter.stack_mut().clear();

    Ok(Returned::nothing())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "dup ( `any -- `any `any )", word_dup,
        "Duplicate the top value on the data stack.");

    add_native_word!(interpreter, "drop ( `any -- )", word_drop,
        "Discard the top value on the data stack.");

    add_native_word!(interpreter, "swap ( `any `any -- `any `any )", word_swap,
        "Swap the top 2 values on the data stack.");

    add_native_word!(interpreter, "clear ( -- )", word_clear,
        "Remove every value from the data stack.");

    Ok(())
}
