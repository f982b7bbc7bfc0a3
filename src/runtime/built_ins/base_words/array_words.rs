use crate::{
    add_native_word,
    runtime::{
        data_structures::{
            value::Value,
            value_vec::{ValueVec, ValueVecPtr},
        },
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::{
            Interpreter,
            marshaling::{Arguments, Returned},
        },
    },
};

/// Turn a possibly negative index into a position within the array.  Negative indices count back
/// from the end, so -1 is the last element.
fn resolve_index(
    interpreter: &mut dyn Interpreter,
    array: &ValueVecPtr,
    index: i64,
) -> error::Result<usize> {
    let len = array.borrow().len();
    let position = if index < 0 {
        len as i64 + index
    } else {
        index
    };

    if position < 0 || position >= len as i64 {
        return script_error(
            interpreter,
            ErrorKind::Runtime,
            format!("Index {} is out of bounds for array of size {}.", index, len),
        );
    }

    Ok(position as usize)
}

/// Make a new array holding the original's elements plus the value on the end.  The original is
/// left alone.
///
/// Signature: `array value -- new-array`
fn word_append(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let value = arguments.value()?;

    let mut values = array.borrow().to_vec();
    values.push(value);

    Ok(Returned::one(values))
}

/// Add the value to the end of the array itself.
///
/// Signature: `array value -- `
fn word_append_in_place(
    _interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let array = arguments.array()?;
    let value = arguments.value()?;

    array.borrow_mut().push_back(value);

    Ok(Returned::nothing())
}

/// Make a new array with the value in front of the original's elements.
///
/// Signature: `array value -- new-array`
fn word_prepend(
    _interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let array = arguments.array()?;
    let value = arguments.value()?;

    let mut values = vec![value];
    values.extend(array.borrow().iter().cloned());

    Ok(Returned::one(values))
}

/// Add the value to the front of the array itself.
///
/// Signature: `array value -- `
fn word_prepend_in_place(
    _interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let array = arguments.array()?;
    let value = arguments.value()?;

    array.borrow_mut().push_front(value);

    Ok(Returned::nothing())
}

/// Make a new array from the elements of both.
///
/// Signature: `first second -- new-array`
fn word_concat(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let first = arguments.array()?;
    let second = arguments.array()?;

    let mut values = first.borrow().to_vec();
    values.extend(second.borrow().iter().cloned());

    Ok(Returned::one(ValueVec::from_vec(values)))
}

/// Append the second array's elements to the first array itself.  Both may be the same array.
///
/// Signature: `first second -- `
fn word_concat_in_place(
    _interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let first = arguments.array()?;
    let second = arguments.array()?;

    let values = second.borrow().to_vec();
    first.borrow_mut().extend(&values);

    Ok(Returned::nothing())
}

/// The number of elements in the array.
///
/// Signature: `array -- count`
fn word_count(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let count = array.borrow().len() as i64;

    Ok(Returned::one(count))
}

/// Signature: `array -- value`
fn word_first(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let first = array.borrow().first().cloned();

    match first {
        Some(value) => Ok(Returned::one(value)),
        None => script_error_str(interpreter, ErrorKind::Runtime, "first of an empty array."),
    }
}

/// Signature: `array -- value`
fn word_last(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let last = array.borrow().last().cloned();

    match last {
        Some(value) => Ok(Returned::one(value)),
        None => script_error_str(interpreter, ErrorKind::Runtime, "last of an empty array."),
    }
}

/// Read the element at the index.  Negative indices count back from the end.
///
/// Signature: `array index -- value`
fn word_nth(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let index = arguments.int()?;

    let position = resolve_index(interpreter, &array, index)?;
    let value = array.borrow().get(position).cloned();

    match value {
        Some(value) => Ok(Returned::one(value)),
        None => script_error(
            interpreter,
            ErrorKind::Runtime,
            format!("Index {} is out of bounds.", index),
        ),
    }
}

/// Join the text of every element with the separator between them.  Strings are joined without
/// their quotes.
///
/// Signature: `array separator -- string`
fn word_join(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let array = arguments.array()?;
    let separator = arguments.text()?;

    let joined = array
        .borrow()
        .iter()
        .map(Value::plain_text)
        .collect::<Vec<String>>()
        .join(&separator);

    Ok(Returned::one(joined))
}

/// Register the array words.
pub fn register_array_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "append ( array `any -- array )", word_append,
        "Copy the array with the value added to the end.");

    add_native_word!(interpreter, "append! ( array `any -- )", word_append_in_place,
        "Add the value to the end of the array.");

    add_native_word!(interpreter, "prepend ( array `any -- array )", word_prepend,
        "Copy the array with the value added to the front.");

    add_native_word!(interpreter, "prepend! ( array `any -- )", word_prepend_in_place,
        "Add the value to the front of the array.");

    add_native_word!(interpreter, "concat ( array array -- array )", word_concat,
        "Make a new array from the elements of two arrays.");

    add_native_word!(interpreter, "concat! ( array array -- )", word_concat_in_place,
        "Append the elements of the top array to the one below it.");

    add_native_word!(interpreter, "count ( array -- integer )", word_count,
        "Get the number of elements in an array.");

    add_native_word!(interpreter, "length ( array -- integer )", word_count,
        "Get the number of elements in an array.");

    add_native_word!(interpreter, "first ( array -- `any )", word_first,
        "Get the first element of an array.");

    add_native_word!(interpreter, "last ( array -- `any )", word_last,
        "Get the last element of an array.");

    add_native_word!(interpreter, "nth ( array integer -- `any )", word_nth,
        "Get the element at an index, negative indices count from the end.");

    add_native_word!(interpreter, "join ( array string -- string )", word_join,
        "Join the text of an array's elements with a separator.");

    Ok(())
}
