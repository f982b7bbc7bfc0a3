// The built-in vocabulary, checked through the stack each script leaves behind.

use prie::runtime::built_ins::base_words::register_base_words;
use prie::runtime::built_ins::io_words::register_io_words;
use prie::runtime::data_structures::value::Value;
use prie::runtime::error::{ErrorKind, Result};
use prie::runtime::interpreter::prie_interpreter::PrieInterpreter;
use prie::runtime::interpreter::{Interpreter, InterpreterStack};
use test_case::test_case;

fn interpreter() -> PrieInterpreter {
    let mut interpreter = PrieInterpreter::new();

    register_base_words(&mut interpreter).unwrap();
    register_io_words(&mut interpreter).unwrap();
    interpreter
}

/// Run the source and render the resulting stack, bottom first, separated by spaces.
fn eval(source: &str) -> Result<String> {
    let mut interpreter = interpreter();

    interpreter.run(source)?;

    let rendered: Vec<String> = interpreter.stack().iter().map(Value::to_string).collect();
    Ok(rendered.join(" "))
}

fn eval_error(source: &str) -> ErrorKind {
    eval(source).unwrap_err().kind()
}

#[test_case("1 2 3 + +", "6" ; "add chain")]
#[test_case("10 4 -", "6" ; "subtract")]
#[test_case("6 7 *", "42" ; "multiply")]
#[test_case("7 2 /", "3" ; "integer divide floors")]
#[test_case("-7 2 /", "-4" ; "negative integer divide floors")]
#[test_case("7.0 2 /", "3.5" ; "float divide")]
#[test_case("1.5 1.5 +", "3" ; "integral float result becomes integer")]
#[test_case("1.5 1 +", "2.5" ; "mixed add")]
#[test_case("0.5 0.25 *", "0.125" ; "float multiply")]
#[test_case("1.0 0.0 /", "inf" ; "float divide by zero")]
fn arithmetic(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test]
fn integer_divide_by_zero_is_an_error() {
    assert_eq!(eval_error("1 0 /"), ErrorKind::Runtime);
}

#[test]
fn integer_overflow_is_an_error() {
    assert_eq!(eval_error("9223372036854775807 1 +"), ErrorKind::Runtime);
}

#[test]
fn arithmetic_on_a_string_is_a_type_mismatch() {
    assert_eq!(eval_error("1 \"2\" +"), ErrorKind::TypeMismatch);
}

#[test_case("t t and", "t")]
#[test_case("t f and", "f")]
#[test_case("f t and", "f")]
#[test_case("f f and", "f")]
#[test_case("t f or", "t")]
#[test_case("f f or", "f")]
#[test_case("t not", "f")]
#[test_case("f not", "t")]
fn logic(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test_case("2 2 =", "t" ; "equal integers")]
#[test_case("1 2 =", "f" ; "different integers")]
#[test_case("1 1.0 =", "f" ; "integer never equals float")]
#[test_case("\"a\" \"a\" =", "t" ; "equal strings")]
#[test_case("\"1\" 1 =", "f" ; "string never equals integer")]
#[test_case("t t =", "t" ; "equal booleans")]
#[test_case("[ 1 2 ] [ 1 2 ] =", "t" ; "arrays compare by contents")]
#[test_case("[ 1 2 ] [ 2 1 ] =", "f" ; "arrays with different contents")]
#[test_case("1 1.0 !=", "t" ; "not equal across tags")]
#[test_case("3 3 !=", "f" ; "not equal same")]
fn equality(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test_case("1 2 <", "t")]
#[test_case("2 1 <", "f")]
#[test_case("1 1.5 <", "t")]
#[test_case("2 2 <=", "t")]
#[test_case("3 2 >", "t")]
#[test_case("2.5 3 >=", "f")]
#[test_case("\"apple\" \"banana\" <", "t")]
fn ordering(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test]
fn ordering_across_kinds_is_a_type_mismatch() {
    assert_eq!(eval_error("1 \"2\" <"), ErrorKind::TypeMismatch);
    assert_eq!(eval_error("t f <"), ErrorKind::TypeMismatch);
}

#[test_case("1 dup", "1 1" ; "dup")]
#[test_case("1 2 drop", "1" ; "drop")]
#[test_case("1 2 swap", "2 1" ; "swap")]
#[test_case("1 2 3 clear", "" ; "clear")]
#[test_case("\"s\" dup", "\"s\" \"s\"" ; "dup keeps the tag")]
fn stack_words(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test]
fn stack_underflow() {
    assert_eq!(eval_error("drop"), ErrorKind::StackUnderflow);
    assert_eq!(eval_error("1 swap"), ErrorKind::StackUnderflow);
}

#[test]
fn dup_shares_arrays() {
    assert_eq!(eval("[ 1 ] dup 2 append!").unwrap(), "[ 1 2 ]");
}

#[test_case("[ 1 2 3 ] 4 append", "[ 1 2 3 4 ]" ; "append")]
#[test_case("[ 1 2 3 ] 0 prepend", "[ 0 1 2 3 ]" ; "prepend")]
#[test_case("[ 1 ] [ 2 3 ] concat", "[ 1 2 3 ]" ; "concat")]
#[test_case("[ 1 2 3 ] count", "3" ; "count")]
#[test_case("[ ] length", "0" ; "length of empty")]
#[test_case("[ 111 222 333 ] first", "111" ; "first")]
#[test_case("[ 111 222 333 ] last", "333" ; "last")]
#[test_case("[ 111 222 333 ] 1 nth", "222" ; "nth")]
#[test_case("[ 111 222 333 ] -1 nth", "333" ; "negative nth")]
#[test_case("[ 111 222 333 ] -3 nth", "111" ; "negative nth from the far end")]
#[test_case("[ 1 \"two\" t ] \", \" join", "\"1, two, t\"" ; "join")]
#[test_case("[ ] \",\" join", "\"\"" ; "join empty")]
fn array_words(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test]
fn array_holding_itself_displays() {
    assert_eq!(eval("[ 1 ] dup dup append!").unwrap(), "[ 1 [ ... ] ]");
    assert_eq!(eval("[ 1 ] dup dup append! \",\" join").unwrap(), "\"1,[ 1 [ ... ] ]\"");
}

#[test]
fn arrays_holding_themselves_compare() {
    assert_eq!(eval("[ 1 ] dup dup append! [ 1 ] dup dup append! =").unwrap(), "t");
    assert_eq!(eval("[ 1 ] dup dup append! [ 2 ] dup dup append! =").unwrap(), "f");
    assert_eq!(eval("[ 1 ] dup dup append! dup =").unwrap(), "t");
}

#[test]
fn array_seen_twice_is_not_cut_short() {
    assert_eq!(eval("[ 1 ] dup [ ] swap append swap append").unwrap(), "[ [ 1 ] [ 1 ] ]");
}

#[test]
fn append_leaves_the_original_alone() {
    assert_eq!(
        eval("[ 1 2 3 ] dup 4 append").unwrap(),
        "[ 1 2 3 ] [ 1 2 3 4 ]"
    );
}

#[test]
fn append_in_place_mutates() {
    assert_eq!(eval("[ 1 2 3 ] dup 4 append!").unwrap(), "[ 1 2 3 4 ]");
    assert_eq!(eval("[ 1 2 3 ] dup 0 prepend!").unwrap(), "[ 0 1 2 3 ]");
}

#[test]
fn concat_in_place_mutates_the_first_array() {
    assert_eq!(eval("[ 1 ] dup [ 2 3 ] concat!").unwrap(), "[ 1 2 3 ]");
}

#[test]
fn concat_in_place_with_itself() {
    assert_eq!(eval("[ 1 2 ] dup dup concat!").unwrap(), "[ 1 2 1 2 ]");
}

#[test]
fn array_bounds_are_errors() {
    assert_eq!(eval_error("[ ] first"), ErrorKind::Runtime);
    assert_eq!(eval_error("[ ] last"), ErrorKind::Runtime);
    assert_eq!(eval_error("[ 1 2 ] 2 nth"), ErrorKind::Runtime);
    assert_eq!(eval_error("[ 1 2 ] -3 nth"), ErrorKind::Runtime);
}

#[test_case("\"one,two,three\" \",\" split", "[ \"one\" \"two\" \"three\" ]" ; "split")]
#[test_case("\"a,b,,\" \",\" split", "[ \"a\" \"b\" ]" ; "split drops trailing empties")]
#[test_case("\",a\" \",\" split", "[ \"\" \"a\" ]" ; "split keeps leading empties")]
#[test_case("\"abc\" \"\" split", "[ \"a\" \"b\" \"c\" ]" ; "split into characters")]
#[test_case("\"a  b\" \" \" split", "[ \"a\" \"b\" ]" ; "split on a space takes runs of whitespace")]
#[test_case("\" a\tb \" \" \" split", "[ \"a\" \"b\" ]" ; "split on a space skips leading whitespace")]
#[test_case("\"ein zwei drei\" w", "[ \"ein\" \"zwei\" \"drei\" ]" ; "words")]
#[test_case("\"  spaced\t out \" w", "[ \"spaced\" \"out\" ]" ; "words with runs of whitespace")]
#[test_case("\"ein zwei drei\" w \", \" join", "\"ein, zwei, drei\"" ; "words then join")]
#[test_case("\"foo\" \"bar\" str-concat", "\"foobar\"" ; "str-concat")]
fn string_words(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test_case("[ 1 2 + ] call", "3" ; "call")]
#[test_case("1 2 = [ \"yes\" ] [ \"no\" ] if", "\"no\"" ; "if false")]
#[test_case("2 2 = [ \"yes\" ] [ \"no\" ] if", "\"yes\"" ; "if true")]
#[test_case("1 8 [ 2 * ] times", "256" ; "times")]
#[test_case("5 0 [ 2 * ] times", "5" ; "zero times")]
#[test_case("5 -3 [ 2 * ] times", "5" ; "negative times")]
#[test_case("[ 1 2 3 ] [ 2 * ] each", "2 4 6" ; "each")]
#[test_case("[ 1 2 3 ] [ dup * ] map", "[ 1 4 9 ]" ; "map")]
#[test_case("[ ] [ 2 * ] map", "[ ]" ; "map empty")]
#[test_case("[ 1 [ 2 3 ] call ] call", "1 2 3" ; "nested call")]
fn control_words(source: &str, expected: &str) {
    assert_eq!(eval(source).unwrap(), expected);
}

#[test_case("1 2 3 + +")]
#[test_case("\"a\" \"b\" str-concat")]
#[test_case("[ 1 2 ] [ 3 ] concat count")]
#[test_case("t [ 1 ] [ 2 ] if")]
fn call_matches_direct_execution(source: &str) {
    let quoted = format!("[ {} ] call", source);

    assert_eq!(eval(&quoted).unwrap(), eval(source).unwrap());
}

#[test]
fn if_needs_a_boolean() {
    assert_eq!(eval_error("1 [ ] [ ] if"), ErrorKind::TypeMismatch);
}

#[test]
fn failed_type_check_leaves_the_stack_alone() {
    let mut interpreter = interpreter();
    let error = interpreter.run("1 \"x\" +").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    assert_eq!(interpreter.stack(), &vec![Value::Int(1), Value::String("x".into())]);
}

#[test]
fn error_leaves_partial_state() {
    let mut interpreter = interpreter();
    let error = interpreter.run("1 2 + nope 4").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnknownWord);
    assert_eq!(interpreter.stack(), &vec![Value::Int(3)]);
}

#[test]
fn errors_inside_quotations_report_the_call_stack() {
    let mut interpreter = interpreter();
    let error = interpreter.run("[ 1 [ drop drop ] call ] call").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::StackUnderflow);
    assert_eq!(
        error.call_stack().clone().unwrap(),
        vec!["call".to_string(), "call".to_string()]
    );
}

#[test]
fn print_and_puts_consume_a_string() {
    assert_eq!(eval("\"\" print \"\" puts").unwrap(), "");
    assert_eq!(eval_error("1 puts"), ErrorKind::TypeMismatch);
}
