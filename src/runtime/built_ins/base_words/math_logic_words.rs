use crate::{
    add_native_word,
    lang::tokenizing::NumberType,
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::{
            Interpreter,
            marshaling::{Arguments, Returned},
        },
    },
};
use std::cmp::Ordering;

/// Helper function to handle math operations.  Handlers for int or floating point operations are
/// passed in as arguments.  Two integers use the integer operation, any float makes it a float
/// operation.  The result's type is worked out again from its value.
fn math_op(
    interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
    fop: fn(f64, f64) -> f64,
    iop: fn(i64, i64) -> Result<i64, &'static str>,
) -> error::Result<Returned> {
    let a = arguments.number()?;
    let b = arguments.number()?;

    let result = match (a, b) {
        (NumberType::Int(a), NumberType::Int(b)) => match iop(a, b) {
            Ok(result) => NumberType::Int(result),
            Err(message) => return script_error_str(interpreter, ErrorKind::Runtime, message),
        },

        _ => NumberType::Float(fop(a.as_float(), b.as_float())),
    };

    Ok(Returned::one(Value::from_number(result)))
}

const OVERFLOW: &str = "Integer overflow.";

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;

    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Helper function to handle ordering comparisons.
fn compare_op(
    interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
    test: fn(Ordering) -> bool,
) -> error::Result<Returned> {
    let a = arguments.value()?;
    let b = arguments.value()?;

    match a.compare(&b) {
        Some(ordering) => Ok(Returned::one(test(ordering))),
        None => script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!(
                "Can not order {} {} against {} {}.",
                a.value_type(),
                a,
                b.value_type(),
                b
            ),
        ),
    }
}

/// Helper function to handle logic operations.
fn logic_op(mut arguments: Arguments, bop: fn(bool, bool) -> bool) -> error::Result<Returned> {
    let a = arguments.bool()?;
    let b = arguments.bool()?;

    Ok(Returned::one(bop(a, b)))
}

/// Add two numbers.
///
/// Signature: `a b -- sum`
fn word_add(interpreter: &mut dyn Interpreter, arguments: Arguments) -> error::Result<Returned> {
    math_op(interpreter, arguments, |a, b| a + b, |a, b| a.checked_add(b).ok_or(OVERFLOW))
}

/// Subtract the top number from the one below it.
///
/// Signature: `a b -- difference`
fn word_subtract(
    interpreter: &mut dyn Interpreter,
    arguments: Arguments,
) -> error::Result<Returned> {
    math_op(interpreter, arguments, |a, b| a - b, |a, b| a.checked_sub(b).ok_or(OVERFLOW))
}

/// Multiply two numbers.
///
/// Signature: `a b -- product`
fn word_multiply(
    interpreter: &mut dyn Interpreter,
    arguments: Arguments,
) -> error::Result<Returned> {
    math_op(interpreter, arguments, |a, b| a * b, |a, b| a.checked_mul(b).ok_or(OVERFLOW))
}

/// Divide the second number by the top one.  Integer division floors, integer division by zero is
/// an error, float division follows IEEE rules.
///
/// Signature: `a b -- quotient`
fn word_divide(interpreter: &mut dyn Interpreter, arguments: Arguments) -> error::Result<Returned> {
    math_op(interpreter, arguments, |a, b| a / b, |a, b| {
        if b == 0 {
            Err("Division by zero.")
        } else {
            floor_div(a, b).ok_or(OVERFLOW)
        }
    })
}

/// Are the two values the same type holding the same value?
///
/// Signature: `a b -- flag`
fn word_equal(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let a = arguments.value()?;
    let b = arguments.value()?;

    Ok(Returned::one(a == b))
}

/// The opposite of `=`.
///
/// Signature: `a b -- flag`
fn word_not_equal(
    _interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let a = arguments.value()?;
    let b = arguments.value()?;

    Ok(Returned::one(a != b))
}

fn word_less(interpreter: &mut dyn Interpreter, arguments: Arguments) -> error::Result<Returned> {
    compare_op(interpreter, arguments, Ordering::is_lt)
}

fn word_greater(interpreter: &mut dyn Interpreter, arguments: Arguments) -> error::Result<Returned> {
    compare_op(interpreter, arguments, Ordering::is_gt)
}

fn word_less_equal(
    interpreter: &mut dyn Interpreter,
    arguments: Arguments,
) -> error::Result<Returned> {
    compare_op(interpreter, arguments, Ordering::is_le)
}

fn word_greater_equal(
    interpreter: &mut dyn Interpreter,
    arguments: Arguments,
) -> error::Result<Returned> {
    compare_op(interpreter, arguments, Ordering::is_ge)
}

/// Logical and of two booleans.
///
/// Signature: `a b -- flag`
fn word_and(_interpreter: &mut dyn Interpreter, arguments: Arguments) -> error::Result<Returned> {
    logic_op(arguments, |a, b| a && b)
}

/// Logical or of two booleans.
///
/// Signature: `a b -- flag`
fn word_or(_interpreter: &mut dyn Interpreter, arguments: Arguments) -> error::Result<Returned> {
    logic_op(arguments, |a, b| a || b)
}

/// Flip a boolean.
///
/// Signature: `flag -- !flag`
fn word_not(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    Ok(Returned::one(!arguments.bool()?))
}

/// Register the arithmetic, comparison and boolean words.
pub fn register_math_logic_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "+ ( numeric numeric -- `numeric )", word_add,
        "Add two numbers.");

    add_native_word!(interpreter, "- ( numeric numeric -- `numeric )", word_subtract,
        "Subtract the top number from the one below it.");

    add_native_word!(interpreter, "* ( numeric numeric -- `numeric )", word_multiply,
        "Multiply two numbers.");

    add_native_word!(interpreter, "/ ( numeric numeric -- `numeric )", word_divide,
        "Divide the second number by the top one.");

    add_native_word!(interpreter, "= ( any any -- boolean )", word_equal,
        "Are the two values of the same type and equal?");

    add_native_word!(interpreter, "!= ( any any -- boolean )", word_not_equal,
        "Do the two values differ in type or value?");

    add_native_word!(interpreter, "< ( any any -- boolean )", word_less,
        "Is the second value less than the top one?");

    add_native_word!(interpreter, "> ( any any -- boolean )", word_greater,
        "Is the second value greater than the top one?");

    add_native_word!(interpreter, "<= ( any any -- boolean )", word_less_equal,
        "Is the second value less than or equal to the top one?");

    add_native_word!(interpreter, ">= ( any any -- boolean )", word_greater_equal,
        "Is the second value greater than or equal to the top one?");

    add_native_word!(interpreter, "and ( boolean boolean -- boolean )", word_and,
        "Are both booleans true?");

    add_native_word!(interpreter, "or ( boolean boolean -- boolean )", word_or,
        "Is either boolean true?");

    add_native_word!(interpreter, "not ( boolean -- boolean )", word_not,
        "Flip a boolean.");

    Ok(())
}
