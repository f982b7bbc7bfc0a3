use crate::{
    add_native_word,
    runtime::{
        data_structures::{scope::ScopePtr, value::Value},
        error::{self, ErrorKind, script_error},
        interpreter::{
            Interpreter,
            marshaling::{Arguments, Returned},
        },
    },
};

/// Add the amount to an integer field of the scope.
fn adjust_field(
    interpreter: &mut dyn Interpreter,
    scope: &ScopePtr,
    key: &str,
    amount: i64,
) -> error::Result<()> {
    let current = scope.borrow().get(key);

    let Some(Value::Int(number)) = current else {
        return script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!(
                "Field '{}' must hold an integer to be adjusted, found {}.",
                key,
                current.map_or_else(|| "nothing".to_string(), |value| format!("{:?}", value))
            ),
        );
    };

    let Some(result) = number.checked_add(amount) else {
        return script_error(
            interpreter,
            ErrorKind::Runtime,
            format!("Integer overflow adjusting field '{}'.", key),
        );
    };

    scope.borrow_mut().set(key, Value::Int(result));
    Ok(())
}

/// Register a new empty scope under the name, replacing any scope of the same name.
///
/// Signature: `name -- `
fn word_new_scope(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let name = arguments.text()?;

    let _ = interpreter.scopes_mut().create(&name);
    Ok(Returned::nothing())
}

/// Push the registered scope of the name.
///
/// Signature: `name -- scope`
fn word_get_scope(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let name = arguments.text()?;
    let scope = interpreter.scopes().get(&name);

    match scope {
        Some(scope) => Ok(Returned::one(scope)),
        None => script_error(
            interpreter,
            ErrorKind::UndefinedScope,
            format!("Scope '{}' is not defined.", name),
        ),
    }
}

/// Write a field of the scope.
///
/// Signature: `scope key value -- `
fn word_set_field(
    _interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let scope = arguments.scope()?;
    let key = arguments.text()?;
    let value = arguments.value()?;

    scope.borrow_mut().set(&key, value);
    Ok(Returned::nothing())
}

/// Read a field of the scope.
///
/// Signature: `scope key -- value`
fn word_get_field(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let scope = arguments.scope()?;
    let key = arguments.text()?;

    let value = scope.borrow().get(&key);

    match value {
        Some(value) => Ok(Returned::one(value)),
        None => script_error(
            interpreter,
            ErrorKind::UndefinedScope,
            format!("Field '{}' is not defined in {}.", key, scope.borrow()),
        ),
    }
}

/// Signature: `scope key amount -- `
fn word_inc(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let scope = arguments.scope()?;
    let key = arguments.text()?;
    let amount = arguments.int()?;

    adjust_field(interpreter, &scope, &key, amount)?;
    Ok(Returned::nothing())
}

/// Signature: `scope key amount -- `
fn word_dec(interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned> {
    let scope = arguments.scope()?;
    let key = arguments.text()?;
    let amount = arguments.int()?;

    let Some(amount) = amount.checked_neg() else {
        return script_error(
            interpreter,
            ErrorKind::Runtime,
            format!("Integer overflow adjusting field '{}'.", key),
        );
    };

    adjust_field(interpreter, &scope, &key, amount)?;
    Ok(Returned::nothing())
}

/// Signature: `scope key -- `
fn word_increment(
    interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let scope = arguments.scope()?;
    let key = arguments.text()?;

    adjust_field(interpreter, &scope, &key, 1)?;
    Ok(Returned::nothing())
}

/// Signature: `scope key -- `
fn word_decrement(
    interpreter: &mut dyn Interpreter,
    mut arguments: Arguments,
) -> error::Result<Returned> {
    let scope = arguments.scope()?;
    let key = arguments.text()?;

    adjust_field(interpreter, &scope, &key, -1)?;
    Ok(Returned::nothing())
}

/// Register the words that create, read and write scopes.
pub fn register_scope_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "new-scope ( string -- )", word_new_scope,
        "Register a new empty scope under a name.");

    add_native_word!(interpreter, "get-scope ( string -- scope )", word_get_scope,
        "Get a registered scope by name.");

    add_native_word!(interpreter, "<< ( scope string `any -- )", word_set_field,
        "Write a field of a scope.");

    add_native_word!(interpreter, ">> ( scope string -- `any )", word_get_field,
        "Read a field of a scope.");

    add_native_word!(interpreter, "inc ( scope string integer -- )", word_inc,
        "Add an amount to an integer field of a scope.");

    add_native_word!(interpreter, "dec ( scope string integer -- )", word_dec,
        "Subtract an amount from an integer field of a scope.");

    add_native_word!(interpreter, "1+ ( scope string -- )", word_increment,
        "Add one to an integer field of a scope.");

    add_native_word!(interpreter, "1- ( scope string -- )", word_decrement,
        "Subtract one from an integer field of a scope.");

    Ok(())
}
