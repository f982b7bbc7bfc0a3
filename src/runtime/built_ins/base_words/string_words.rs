use crate::{
    add_native_word,
    runtime::{
        data_structures::value::Value,
        error,
        interpreter::{
            Interpreter,
            marshaling::{Arguments, Returned},
        },
    },
};

/// Split a string on every occurrence of the separator.  Empty fields at the end are dropped, and
/// an empty separator splits the string into its characters.  A single space splits on runs of
/// whitespace, the same as `w`.
///
/// Signature: `string separator -- array`
fn word_split(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let text = arguments.text()?;
    let separator = arguments.text()?;

    let mut fields: Vec<Value> = if separator.is_empty() {
        text.chars().map(|c| Value::String(c.to_string())).collect()
    } else if separator == " " {
        text.split_whitespace()
            .map(|field| Value::String(field.to_string()))
            .collect()
    } else {
        text.split(separator.as_str())
            .map(|field| Value::String(field.to_string()))
            .collect()
    };

    while let Some(Value::String(field)) = fields.last()
        && field.is_empty()
    {
        let _ = fields.pop();
    }

    Ok(Returned::one(fields))
}

/// Split a string into its whitespace separated words, as strings.
///
/// Signature: `string -- array`
fn word_words(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let text = arguments.text()?;

    let words: Vec<Value> = text
        .split_whitespace()
        .map(|word| Value::String(word.to_string()))
        .collect();

    Ok(Returned::one(words))
}

/// Signature: `a b -- ab`
fn word_str_concat(
    _interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let mut a = arguments.text()?;
    let b = arguments.text()?;

    a.push_str(&b);

    Ok(Returned::one(a))
}

/// Register the string words.
pub fn register_string_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "split ( string string -- array )", word_split,
        "Split a string on a separator into an array of strings.");

    add_native_word!(interpreter, "w ( string -- array )", word_words,
        "Split a string on whitespace into an array of strings.");

    add_native_word!(interpreter, "str-concat ( string string -- string )", word_str_concat,
        "Join two strings together.");

    Ok(())
}
