use crate::{
    lang::{source_buffer::SourceBuffer, tokenizing::scan},
    runtime::{
        data_structures::{value::Value, value_vec::ValueVec},
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::{Interpreter, ValueList},
    },
};
use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::{debug, trace};

lazy_static! {
    /// The parsing words every interpreter starts out with.  `[` collects everything up to the
    /// matching `]` into a single array value.
    pub static ref DEFAULT_PARSING_WORDS: HashMap<&'static str, &'static str> = {
        let mut words = HashMap::new();

        words.insert("[", "\"]\" parse-until stack>accum");
        words
    };
}

/// The name of the control word that collects input up to a delimiter.
pub const PARSE_UNTIL: &str = "parse-until";

/// The name of the control word that moves the top of the stack into the active accumulator.
pub const STACK_TO_ACCUM: &str = "stack>accum";

/// Literals that only mean something once they reach the parser.
fn reclassify_literal(token: Value) -> Value {
    match token {
        Value::Word(text) if text == "t" => Value::Bool(true),
        Value::Word(text) if text == "f" => Value::Bool(false),
        other => other,
    }
}

/// Parse a whole piece of source text into a sequence of values.
///
/// A fresh lexer and accumulator are pushed for the duration of the call and popped again when it
/// returns, whether it succeeded or not.
pub fn parse(
    interpreter: &mut dyn Interpreter,
    path: &str,
    source: &str,
) -> error::Result<ValueList> {
    interpreter.lexer_push(SourceBuffer::new(path, source));
    interpreter.accumulator_push();

    let result = parse_all(interpreter);

    let accumulated = interpreter.accumulator_pop();
    let _ = interpreter.lexer_pop()?;

    result?;
    accumulated
}

fn parse_all(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    while parse_one(interpreter)? {}

    Ok(())
}

/// Scan one token from the active lexer and deal with it.  Parsing words are expanded on the
/// spot, anything else is appended to the active accumulator.
///
/// Returns false once the lexer has run dry.
pub fn parse_one(interpreter: &mut dyn Interpreter) -> error::Result<bool> {
    let token = match interpreter.lexer_mut() {
        Some(lexer) => scan(lexer)?,
        None => return script_error_str(interpreter, ErrorKind::Runtime, "No source to parse."),
    };

    let Some(token) = token else {
        return Ok(false);
    };

    if let Value::Word(name) = &token
        && let Some(definition) = interpreter.parsing_word(name)
    {
        debug!(word = %name, "expanding parsing word");

        let code = parse(interpreter, &format!("<parsing word {}>", name), &definition)?;
        interpreter.execute_loop(&code)?;
    } else {
        let value = reclassify_literal(token);

        trace!(token = %value, "accumulated");
        interpreter.accumulate(value)?;
    }

    Ok(true)
}

/// Collect values from the active lexer into a fresh accumulator until the word matching the
/// delimiter is collected.  The delimiter itself is dropped from the result.
///
/// Running out of input first is an unterminated delimiter error.
pub fn parse_until(interpreter: &mut dyn Interpreter, delimiter: &str) -> error::Result<ValueList> {
    if interpreter.lexer_mut().is_none() {
        return script_error(
            interpreter,
            ErrorKind::Runtime,
            format!("{} can only be used while parsing.", PARSE_UNTIL),
        );
    }

    interpreter.accumulator_push();

    let result = collect_until(interpreter, delimiter);
    let mut collected = interpreter.accumulator_pop()?;

    result?;

    let _ = collected.pop();
    Ok(collected)
}

fn collect_until(interpreter: &mut dyn Interpreter, delimiter: &str) -> error::Result<()> {
    loop {
        if !parse_one(interpreter)? {
            return script_error(
                interpreter,
                ErrorKind::UnterminatedDelimiter,
                format!("Expected '{}' but reached the end of the input.", delimiter),
            );
        }

        if let Some(Value::Word(last)) = interpreter.accumulator().and_then(|values| values.last())
            && last == delimiter
        {
            return Ok(());
        }
    }
}

/// Collect the source up to the delimiter and leave it on the stack as an array.
///
/// Signature: `delimiter -- array`
pub fn word_parse_until(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let delimiter = interpreter.pop_as_string()?;
    let collected = parse_until(interpreter, &delimiter)?;

    interpreter.push(Value::Array(ValueVec::from_vec(collected)));
    Ok(())
}

/// Move the top of the stack into the active accumulator.
///
/// Signature: `value -- `
pub fn word_stack_to_accum(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.accumulate(value)
}
