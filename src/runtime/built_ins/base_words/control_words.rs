use crate::runtime::{
    data_structures::value_vec::ValueVecPtr,
    error,
    interpreter::{
        Interpreter,
        marshaling::{Arguments, Returned},
    },
};
use crate::add_native_word;

/// Run a quotation.  The code is copied out first so the quotation is free to change the array it
/// lives in while it runs.
fn run_quotation(interpreter: &mut dyn Interpreter, quotation: &ValueVecPtr) -> error::Result<()> {
    let code = quotation.borrow().to_vec();

    interpreter.execute_loop(&code)
}

/// Execute a quotation.
///
/// Signature: `quotation -- `
fn word_call(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let quotation = arguments.array()?;

    run_quotation(interpreter, &quotation)?;
    Ok(Returned::nothing())
}

/// Run one of two quotations depending on the flag.
///
/// Signature: `flag then-quotation else-quotation -- `
fn word_if(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let flag = arguments.bool()?;
    let then_code = arguments.array()?;
    let else_code = arguments.array()?;

    run_quotation(interpreter, if flag { &then_code } else { &else_code })?;
    Ok(Returned::nothing())
}

/// Run a quotation a number of times.  A count of zero or less runs it not at all.
///
/// Signature: `count quotation -- `
fn word_times(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let count = arguments.int()?;
    let quotation = arguments.array()?;

    for _ in 0..count.max(0) {
        run_quotation(interpreter, &quotation)?;
    }

    Ok(Returned::nothing())
}

/// Push each element of the array in turn and run the quotation after each push.
///
/// Signature: `array quotation -- `
fn word_each(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let quotation = arguments.array()?;

    let elements = array.borrow().to_vec();

    for element in elements {
        interpreter.push(element);
        run_quotation(interpreter, &quotation)?;
    }

    Ok(Returned::nothing())
}

/// Like each, but the value each run leaves on top of the stack is collected into a new array.
///
/// Signature: `array quotation -- new-array`
fn word_map(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let quotation = arguments.array()?;

    let elements = array.borrow().to_vec();
    let mut results = Vec::with_capacity(elements.len());

    for element in elements {
        interpreter.push(element);
        run_quotation(interpreter, &quotation)?;
        results.push(interpreter.pop()?);
    }

    Ok(Returned::one(results))
}

/// Register the words that run quotations.
pub fn register_control_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "call ( array -- )", word_call,
        "Execute a quotation.");

    add_native_word!(interpreter, "if ( boolean array array -- )", word_if,
        "Execute the first quotation if the flag is true, otherwise the second.");

    add_native_word!(interpreter, "times ( integer array -- )", word_times,
        "Execute a quotation a number of times.");

    add_native_word!(interpreter, "each ( array array -- )", word_each,
        "Push each element of an array and execute a quotation on it.");

    add_native_word!(interpreter, "map ( array array -- array )", word_map,
        "Collect the result of executing a quotation on each element of an array.");

    Ok(())
}
