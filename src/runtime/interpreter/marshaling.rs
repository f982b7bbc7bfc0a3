use crate::{
    lang::tokenizing::NumberType,
    runtime::{
        data_structures::{
            scope::ScopePtr,
            stack_effect::{Slot, TypeSpec},
            value::{Value, ValueType},
            value_vec::{ValueVec, ValueVecPtr},
        },
        error::{self, ErrorKind, ScriptError},
    },
};
use std::collections::VecDeque;

/// A value as it travels between the stack and a native word handler.
///
/// Unescaped slots carry the bare payload for their declared type.  Escaped slots, and `any`
/// slots which have no narrower payload, carry the tagged value itself.
#[derive(Clone, Debug)]
pub enum Payload {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Array(ValueVecPtr),
    Scope(ScopePtr),
    Tagged(Value),
}

macro_rules! payload_conversion {
    ($data_type:ty , $variant:ident) => {
        impl From<$data_type> for Payload {
            fn from(original: $data_type) -> Payload {
                Payload::$variant(original)
            }
        }
    };
}

payload_conversion!(i64, Int);
payload_conversion!(f64, Float);
payload_conversion!(bool, Bool);
payload_conversion!(String, Text);
payload_conversion!(ValueVecPtr, Array);
payload_conversion!(ScopePtr, Scope);
payload_conversion!(Value, Tagged);

impl From<&str> for Payload {
    fn from(original: &str) -> Payload {
        Payload::Text(original.to_string())
    }
}

impl From<Vec<Value>> for Payload {
    fn from(original: Vec<Value>) -> Payload {
        Payload::Array(ValueVec::from_vec(original))
    }
}

impl From<NumberType> for Payload {
    fn from(original: NumberType) -> Payload {
        match original {
            NumberType::Int(num) => Payload::Int(num),
            NumberType::Float(num) => Payload::Float(num),
        }
    }
}

/// Build the error raised when a handler and its declaration disagree.
fn contract_error<T>(message: String) -> error::Result<T> {
    ScriptError::new_as_result(ErrorKind::InvalidSignature, None, message, None)
}

impl Payload {
    /// Prepare a value popped from the stack for the handler.  The value has already been checked
    /// against the slot.
    pub fn unwrap_value(value: Value, slot: &Slot) -> Payload {
        if slot.escaped || slot.type_spec == TypeSpec::Any {
            return Payload::Tagged(value);
        }

        match value {
            Value::Word(text) | Value::String(text) => Payload::Text(text),
            Value::Int(num) => Payload::Int(num),
            Value::Float(num) => Payload::Float(num),
            Value::Bool(flag) => Payload::Bool(flag),
            Value::Array(array) => Payload::Array(array),
            Value::Scope(scope) => Payload::Scope(scope),
        }
    }

    /// Turn a handler result back into a value for the given output slot.
    ///
    /// Escaped slots take tagged values as they are.  Other slots wrap the payload with the
    /// declared type, or with the payload's natural type for the wildcard classes.
    pub fn into_value(self, slot: &Slot) -> error::Result<Value> {
        if slot.escaped {
            return match self {
                Payload::Tagged(value) if slot.type_spec.accepts(&value) => Ok(value),
                other => contract_error(format!(
                    "Escaped output {} expects a tagged value of that type, got {:?}.",
                    slot, other
                )),
            };
        }

        let value = match (self, slot.type_spec) {
            (Payload::Tagged(value), _) => value,

            // Numeric looking text comes out as the number, just as it would from the scanner.
            (Payload::Text(text), TypeSpec::Exact(ValueType::Word)) => return Ok(Value::word(text)),
            (Payload::Int(num), TypeSpec::Exact(ValueType::Float)) => Value::Float(num as f64),

            (Payload::Text(text), _) => Value::String(text),
            (Payload::Int(num), _) => Value::Int(num),
            (Payload::Float(num), _) => Value::Float(num),
            (Payload::Bool(flag), _) => Value::Bool(flag),
            (Payload::Array(array), _) => Value::Array(array),
            (Payload::Scope(scope), _) => Value::Scope(scope),
        };

        if !slot.type_spec.accepts(&value) {
            return contract_error(format!(
                "Output {} can not hold the {} value {}.",
                slot,
                value.value_type(),
                value
            ));
        }

        Ok(value)
    }

    fn describe(&self) -> &'static str {
        match self {
            Payload::Int(_) => "integer",
            Payload::Float(_) => "float",
            Payload::Bool(_) => "boolean",
            Payload::Text(_) => "text",
            Payload::Array(_) => "array",
            Payload::Scope(_) => "scope",
            Payload::Tagged(_) => "tagged value",
        }
    }
}

/// The inputs handed to a word handler, bottom of the stack first.  Each accessor takes the next
/// input and fails if it does not hold the payload asked for.
#[derive(Debug, Default)]
pub struct Arguments {
    payloads: VecDeque<Payload>,
}

macro_rules! argument_accessor {
    ($name:ident , $data_type:ty , $variant:ident , $description:literal) => {
        #[doc = concat!("Take the next input as ", $description, ".")]
        pub fn $name(&mut self) -> error::Result<$data_type> {
            match self.next($description)? {
                Payload::$variant(value) => Ok(value),
                other => contract_error(format!(
                    "Expected {} argument, found {}.",
                    $description,
                    other.describe()
                )),
            }
        }
    };
}

impl Arguments {
    pub fn new(payloads: Vec<Payload>) -> Arguments {
        Arguments {
            payloads: VecDeque::from(payloads),
        }
    }

    /// How many inputs are left.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    fn next(&mut self, expected: &str) -> error::Result<Payload> {
        match self.payloads.pop_front() {
            Some(payload) => Ok(payload),
            None => contract_error(format!("Expected {} argument, none left.", expected)),
        }
    }

    argument_accessor!(int, i64, Int, "an integer");
    argument_accessor!(bool, bool, Bool, "a boolean");
    argument_accessor!(text, String, Text, "a text");
    argument_accessor!(array, ValueVecPtr, Array, "an array");
    argument_accessor!(scope, ScopePtr, Scope, "a scope");
    argument_accessor!(value, Value, Tagged, "a tagged value");

    /// Take the next input as a number, integer or float.
    pub fn number(&mut self) -> error::Result<NumberType> {
        match self.next("a number")? {
            Payload::Int(num) => Ok(NumberType::Int(num)),
            Payload::Float(num) => Ok(NumberType::Float(num)),
            other => contract_error(format!(
                "Expected a number argument, found {}.",
                other.describe()
            )),
        }
    }
}

/// What a word handler hands back.  A word with one output returns a single payload, a word with
/// several returns them all in declared order.
#[derive(Debug)]
pub enum Returned {
    Nothing,
    One(Payload),
    Many(Vec<Payload>),
}

impl Returned {
    pub fn nothing() -> Returned {
        Returned::Nothing
    }

    pub fn one(payload: impl Into<Payload>) -> Returned {
        Returned::One(payload.into())
    }

    pub fn many(payloads: Vec<Payload>) -> Returned {
        Returned::Many(payloads)
    }

    /// Flatten into a list, checking that it matches the declared number of outputs.
    pub fn into_payloads(self, arity: usize) -> error::Result<Vec<Payload>> {
        let payloads = match self {
            Returned::Nothing => Vec::new(),
            Returned::One(payload) => vec![payload],
            Returned::Many(payloads) => payloads,
        };

        if payloads.len() != arity {
            return contract_error(format!(
                "Word declared {} output(s) but returned {}.",
                arity,
                payloads.len()
            ));
        }

        Ok(payloads)
    }
}
