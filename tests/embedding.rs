// The host side: registering native words, marshaling, the extension hook and running sources.

use prie::add_native_word;
use prie::lang::source_buffer::SourceLocation;
use prie::runtime::built_ins::base_words::register_base_words;
use prie::runtime::data_structures::stack_effect::{Slot, StackEffect, TypeSpec};
use prie::runtime::data_structures::value::{Value, ValueType};
use prie::runtime::error::{self, ErrorKind};
use prie::runtime::interpreter::marshaling::{Arguments, Payload, Returned};
use prie::runtime::interpreter::prie_interpreter::PrieInterpreter;
use prie::runtime::interpreter::{Interpreter, InterpreterStack, WordManagement};
use std::cell::RefCell;
use std::rc::Rc;
use test_case::test_case;

fn interpreter() -> PrieInterpreter {
    let mut interpreter = PrieInterpreter::new();

    register_base_words(&mut interpreter).unwrap();
    interpreter
}

fn word_shout(_: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    Ok(Returned::one(arguments.text()?.to_uppercase()))
}

fn word_describe(_: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let value = arguments.value()?;

    Ok(Returned::one(value.value_type().name()))
}

fn word_as_word(_: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    Ok(Returned::one(arguments.text()?))
}

fn word_half(_: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    Ok(Returned::one(arguments.int()? / 2))
}

fn word_divmod(_: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let a = arguments.int()?;
    let b = arguments.int()?;

    Ok(Returned::many(vec![Payload::from(a / b), Payload::from(a % b)]))
}

fn word_too_many(_: &mut dyn Interpreter, _: Arguments) -> error::Result<Returned> {
    Ok(Returned::many(vec![Payload::from(1_i64), Payload::from(2_i64)]))
}

fn word_bare_output(_: &mut dyn Interpreter, _: Arguments) -> error::Result<Returned> {
    Ok(Returned::one(1_i64))
}

fn word_wrong_payload(_: &mut dyn Interpreter, _: Arguments) -> error::Result<Returned> {
    Ok(Returned::one("not a number"))
}

fn install(interpreter: &mut PrieInterpreter) -> error::Result<()> {
    add_native_word!(interpreter, "shout ( string -- string )", word_shout,
        "Upper case a string.");

    add_native_word!(interpreter, "describe ( `any -- string )", word_describe,
        "Name the type of any value.");

    add_native_word!(interpreter, "as-word ( string -- word )", word_as_word,
        "Turn a string into a word.");

    add_native_word!(interpreter, "half ( integer -- float )", word_half,
        "Halve an integer, wrapping the result as a float.");

    add_native_word!(interpreter, "divmod ( integer integer -- integer integer )", word_divmod,
        "Quotient and remainder.");

    add_native_word!(interpreter, "too-many ( -- integer )", word_too_many,
        "Returns more than it declares.");

    add_native_word!(interpreter, "bare-output ( -- `integer )", word_bare_output,
        "Returns a bare payload for an escaped output.");

    add_native_word!(interpreter, "wrong-payload ( -- integer )", word_wrong_payload,
        "Returns text for an integer output.");

    Ok(())
}

fn installed() -> PrieInterpreter {
    let mut interpreter = interpreter();

    install(&mut interpreter).unwrap();
    interpreter
}

#[test]
fn unescaped_inputs_arrive_as_native_payloads() {
    let mut interpreter = installed();

    assert_eq!(
        interpreter.return_value("\"quiet\" shout").unwrap(),
        Value::String("QUIET".into())
    );
}

#[test_case("1", "integer")]
#[test_case("1.5", "float")]
#[test_case("\"s\"", "string")]
#[test_case("t", "boolean")]
#[test_case("[ ]", "array")]
fn escaped_inputs_keep_their_tags(source: &str, expected: &str) {
    let mut interpreter = installed();

    assert_eq!(
        interpreter.return_value(&format!("{} describe", source)).unwrap(),
        Value::String(expected.into())
    );
}

#[test]
fn word_outputs_are_reclassified() {
    let mut interpreter = installed();

    assert_eq!(interpreter.return_value("\"42\" as-word").unwrap(), Value::Int(42));
    assert_eq!(
        interpreter.return_value("\"hello\" as-word").unwrap(),
        Value::Word("hello".into())
    );
}

#[test]
fn integer_payload_wrapped_as_float() {
    let mut interpreter = installed();
    let value = interpreter.return_value("9 half").unwrap();

    assert_eq!(value, Value::Float(4.0));
    assert_eq!(value.value_type(), ValueType::Float);
}

#[test]
fn several_outputs_push_in_declared_order() {
    let mut interpreter = installed();

    interpreter.run("17 5 divmod").unwrap();

    assert_eq!(interpreter.stack(), &vec![Value::Int(3), Value::Int(2)]);
}

#[test_case("too-many" ; "wrong number of outputs")]
#[test_case("bare-output" ; "bare payload for an escaped output")]
#[test_case("wrong-payload" ; "payload of the wrong type")]
fn broken_handlers_are_invalid_signatures(word: &str) {
    let mut interpreter = installed();
    let error = interpreter.run(word).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidSignature);
    assert!(error.error().contains(word));
}

#[test_case("noparens" ; "missing parentheses")]
#[test_case("w ( string -- " ; "missing close")]
#[test_case("w ( string )" ; "missing separator")]
#[test_case("w ( strung -- )" ; "unknown type")]
#[test_case("w ( -- -- )" ; "two separators")]
#[test_case("" ; "empty")]
fn bad_declarations_are_rejected(declaration: &str) {
    let mut interpreter = interpreter();

    let error = interpreter
        .add_word(
            SourceLocation::new_from_path("test"),
            declaration,
            Rc::new(word_shout),
            "Never registered.",
        )
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidSignature);
}

#[test]
fn declarations_round_trip_through_display() {
    let (name, effect) = StackEffect::parse_declaration("<< ( scope string `any -- )").unwrap();

    assert_eq!(name, "<<");
    assert_eq!(effect.to_string(), "( scope string `any -- )");
    assert_eq!(effect.inputs[2], Slot::escaped(TypeSpec::Any));
}

#[test]
fn words_from_an_explicit_table() {
    let mut interpreter = interpreter();

    interpreter.add_word_with_effect(
        SourceLocation::new_from_path("test"),
        "answer",
        StackEffect::new(vec![], vec![Slot::new(TypeSpec::Exact(ValueType::Integer))]),
        Rc::new(|_: &mut dyn Interpreter, _: Arguments| -> error::Result<Returned> {
            Ok(Returned::one(42_i64))
        }),
        "The answer.",
    );

    assert_eq!(interpreter.return_value("answer 1 +").unwrap(), Value::Int(43));

    let info = interpreter.find_word("answer").unwrap();
    assert_eq!(info.description, "The answer.");
    assert_eq!(info.signature.to_string(), "( -- integer )");
}

#[test]
fn redefining_a_word_replaces_it() {
    let mut interpreter = interpreter();

    interpreter
        .add_word(
            SourceLocation::new_from_path("test"),
            "dup ( `any -- )",
            Rc::new(|_: &mut dyn Interpreter, _: Arguments| -> error::Result<Returned> {
                Ok(Returned::nothing())
            }),
            "A dup that swallows.",
        )
        .unwrap();

    interpreter.run("1 dup").unwrap();
    assert!(interpreter.stack().is_empty());
}

#[test]
fn extension_hook_handles_unknown_words() {
    let mut interpreter = interpreter();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();

    interpreter.set_extension_hook(Rc::new(
        move |interpreter: &mut dyn Interpreter, word: &str| -> error::Result<bool> {
            log.borrow_mut().push(word.to_string());

            match word.strip_prefix("$") {
                Some(name) => {
                    interpreter.push(Value::String(name.to_string()));
                    Ok(true)
                }
                None => Ok(false),
            }
        },
    ));

    assert_eq!(interpreter.return_value("$home").unwrap(), Value::String("home".into()));
    assert_eq!(interpreter.run("frobnicate").unwrap_err().kind(), ErrorKind::UnknownWord);

    interpreter.run("1 dup drop").unwrap();
    assert_eq!(*seen.borrow(), vec!["$home".to_string(), "frobnicate".to_string()]);
}

#[test]
fn unknown_word_without_a_hook() {
    let mut interpreter = interpreter();
    let error = interpreter.run("frobnicate").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnknownWord);
    assert!(error.to_string().contains("frobnicate"));
}

#[test]
fn parse_then_execute_loop_equals_run() {
    let mut interpreter = interpreter();
    let code = interpreter.parse("[ 1 2 3 ] [ 2 * ] each").unwrap();

    interpreter.execute_loop(&code).unwrap();
    interpreter.execute_loop(&code).unwrap();

    assert_eq!(interpreter.stack().len(), 6);
    assert_eq!(interpreter.stack()[5], Value::Int(6));
}

#[test]
fn return_value_pops_the_top() {
    let mut interpreter = interpreter();

    assert_eq!(interpreter.return_value("1 2 3").unwrap(), Value::Int(3));
    assert_eq!(interpreter.stack(), &vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn return_value_of_nothing_is_an_underflow() {
    let mut interpreter = interpreter();

    assert_eq!(interpreter.return_value("").unwrap_err().kind(), ErrorKind::StackUnderflow);
}

#[test]
fn the_stack_can_be_seeded() {
    let mut interpreter = interpreter();

    interpreter.stack_mut().push(Value::Int(20));
    interpreter.push(Value::Int(22));

    assert_eq!(interpreter.return_value("+").unwrap(), Value::Int(42));
}

#[test]
fn script_files_run() {
    let path = std::env::temp_dir().join(format!("prie-embedding-{}.prie", std::process::id()));
    std::fs::write(&path, "[ 1 2 3 ]\n[ dup * ] map\n").unwrap();

    let mut interpreter = interpreter();
    let result = interpreter.process_source_file(path.to_str().unwrap());
    let _ = std::fs::remove_file(&path);

    result.unwrap();
    assert_eq!(interpreter.stack()[0].to_string(), "[ 1 4 9 ]");
}

#[test]
fn missing_script_file_is_an_io_error() {
    let mut interpreter = interpreter();
    let error = interpreter.process_source_file("/definitely/not/here.prie").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Io);
}

#[test]
fn errors_carry_the_source_location() {
    let mut interpreter = interpreter();
    let error = interpreter.process_source("script.prie", "1 2 +\n   [ 1").unwrap_err();

    let location = error.location().clone().unwrap();
    assert_eq!(location.path(), "script.prie");
    assert_eq!(location.line(), 2);
}

#[test]
fn dictionary_lists_words_sorted_with_effects() {
    let interpreter = interpreter();
    let listing = interpreter.dictionary().to_string();

    assert!(listing.starts_with(&format!("{} words defined.", interpreter.dictionary().len())));
    assert!(listing.contains("( array `any -- array )"));

    let append = listing.find("append ").unwrap();
    let swap = listing.find("swap ").unwrap();
    assert!(append < swap);
}
