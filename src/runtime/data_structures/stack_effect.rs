use crate::runtime::{
    data_structures::value::{Value, ValueType},
    error::{self, ErrorKind, ScriptError},
};
use std::fmt::{self, Display, Formatter};

/// What a single slot of a stack effect accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    /// Exactly this type.
    Exact(ValueType),

    /// Any value at all.
    Any,

    /// An integer or a float.
    Numeric,
}

impl TypeSpec {
    /// Read a type name as written in a declaration.
    pub fn from_name(name: &str) -> Option<TypeSpec> {
        match name {
            "any" => Some(TypeSpec::Any),
            "numeric" => Some(TypeSpec::Numeric),
            _ => ValueType::from_name(name).map(TypeSpec::Exact),
        }
    }

    /// Does the value fit this slot?
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            TypeSpec::Any => true,
            TypeSpec::Numeric => value.is_numeric(),
            TypeSpec::Exact(value_type) => value.value_type() == *value_type,
        }
    }
}

impl Display for TypeSpec {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TypeSpec::Exact(value_type) => write!(f, "{}", value_type),
            TypeSpec::Any => write!(f, "any"),
            TypeSpec::Numeric => write!(f, "numeric"),
        }
    }
}

/// One input or output position of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    /// What the slot accepts or produces.
    pub type_spec: TypeSpec,

    /// Escaped slots move tagged values to and from the word untouched.  Other slots are unwrapped
    /// to native payloads on the way in and wrapped with their declared type on the way out.
    pub escaped: bool,
}

impl Slot {
    /// A plain, marshaled slot.
    pub fn new(type_spec: TypeSpec) -> Slot {
        Slot {
            type_spec,
            escaped: false,
        }
    }

    /// A slot that passes the tagged value through.
    pub fn escaped(type_spec: TypeSpec) -> Slot {
        Slot {
            type_spec,
            escaped: true,
        }
    }

    /// Read a slot as written in a declaration, `integer` or `` `any `` for example.
    pub fn from_declaration(text: &str) -> Option<Slot> {
        match text.strip_prefix('`') {
            Some(name) => TypeSpec::from_name(name).map(Slot::escaped),
            None => TypeSpec::from_name(text).map(Slot::new),
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.escaped {
            write!(f, "`")?;
        }

        write!(f, "{}", self.type_spec)
    }
}

/// The declared inputs and outputs of a word, both listed bottom of the stack first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct StackEffect {
    pub inputs: Vec<Slot>,
    pub outputs: Vec<Slot>,
}

/// Print the effect in the declaration form, `( integer array -- )`.
impl Display for StackEffect {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "(")?;

        for slot in &self.inputs {
            write!(f, " {}", slot)?;
        }

        write!(f, " --")?;

        for slot in &self.outputs {
            write!(f, " {}", slot)?;
        }

        write!(f, " )")
    }
}

impl StackEffect {
    pub fn new(inputs: Vec<Slot>, outputs: Vec<Slot>) -> StackEffect {
        StackEffect { inputs, outputs }
    }

    /// Read a full word declaration of the form `name ( inputs -- outputs )`, returning the name
    /// and its stack effect.
    pub fn parse_declaration(declaration: &str) -> error::Result<(String, StackEffect)> {
        let invalid = |reason: &str| {
            ScriptError::new_as_result(
                ErrorKind::InvalidSignature,
                None,
                format!("Invalid word declaration '{}': {}.", declaration, reason),
                None,
            )
        };

        let mut parts = declaration.split_whitespace();

        let Some(name) = parts.next() else {
            return invalid("missing the word name");
        };

        if parts.next() != Some("(") {
            return invalid("expected '(' after the word name");
        }

        let mut effect = StackEffect::default();
        let mut seen_separator = false;
        let mut closed = false;

        for part in parts.by_ref() {
            match part {
                "--" if seen_separator => return invalid("more than one '--'"),
                "--" => seen_separator = true,
                ")" => {
                    closed = true;
                    break;
                }

                _ => {
                    let Some(slot) = Slot::from_declaration(part) else {
                        return invalid(&format!("unknown type '{}'", part));
                    };

                    if seen_separator {
                        effect.outputs.push(slot);
                    } else {
                        effect.inputs.push(slot);
                    }
                }
            }
        }

        if !closed {
            return invalid("missing the closing ')'");
        }

        if !seen_separator {
            return invalid("missing the '--' separator");
        }

        if parts.next().is_some() {
            return invalid("unexpected text after ')'");
        }

        Ok((name.to_string(), effect))
    }
}
