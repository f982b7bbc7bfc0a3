use std::{ cmp::Ordering,
           fmt::{ self,
                  Debug,
                  Display,
                  Formatter },
           rc::Rc };
use crate::{ lang::tokenizing::{ to_float,
                                 to_integer,
                                 NumberType },
             runtime::data_structures::{ scope::ScopePtr,
                                         value_vec::{ ValueVec,
                                                     ValueVecPtr } } };



/// The type tag of a value.  Word declarations are written in terms of these, plus the wildcard
/// classes `any` and `numeric`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType
{
    Word,
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Scope
}


impl ValueType
{
    /// Look up a type by the name used in word declarations.
    pub fn from_name(name: &str) -> Option<ValueType>
    {
        match name
        {
            "word"    => Some(ValueType::Word),
            "string"  => Some(ValueType::String),
            "integer" => Some(ValueType::Integer),
            "float"   => Some(ValueType::Float),
            "boolean" => Some(ValueType::Boolean),
            "array"   => Some(ValueType::Array),
            "scope"   => Some(ValueType::Scope),
            _         => None
        }
    }

    /// The name used for this type in word declarations.
    pub fn name(&self) -> &'static str
    {
        match self
        {
            ValueType::Word    => "word",
            ValueType::String  => "string",
            ValueType::Integer => "integer",
            ValueType::Float   => "float",
            ValueType::Boolean => "boolean",
            ValueType::Array   => "array",
            ValueType::Scope   => "scope"
        }
    }
}


impl Display for ValueType
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.name())
    }
}



/// The universal tagged value.  Every literal, every array element and every argument or result
/// of a word is one of these.
///
/// Arrays double as code.  A quotation such as `[ 2 * ]` is just an array holding an integer and a
/// word, and executing it walks the array.  Arrays and scopes are shared by reference, so a
/// mutation through one handle is visible through every other.
#[derive(Clone)]
pub enum Value
{
    /// A token that has not been resolved yet.  Executing it runs the word of that name.
    Word(String),

    /// A string literal.
    String(String),

    /// A 64-bit integer.
    Int(i64),

    /// A 64-bit float.
    Float(f64),

    /// `t` or `f` in the source.
    Bool(bool),

    /// An ordered list of values, or equally a quotation.
    Array(ValueVecPtr),

    /// A reference to a scope.
    Scope(ScopePtr)
}


/// Values are equal only when both their tags and their payloads match.  An integer never equals a
/// float and a word never equals a string with the same text.  Scopes compare by identity.
impl PartialEq for Value
{
    fn eq(&self, other: &Value) -> bool
    {
        self.equals(other, &mut Vec::new())
    }
}


/// Render the value the way the REPL shows it.  Strings are quoted, booleans are t and f, arrays
/// are bracketed.
impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::Word(word)     => write!(f, "{}", word),
            Value::String(string) => write!(f, "{}", Value::stringify(string)),
            Value::Int(num)       => write!(f, "{}", num),
            Value::Float(num)     => write!(f, "{:?}", num),
            Value::Bool(flag)     => write!(f, "{}", if *flag { "t" } else { "f" }),
            Value::Array(array)   => write!(f, "{}", array.borrow()),
            Value::Scope(scope)   => write!(f, "{}", scope.borrow())
        }
    }
}


impl Debug for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}: {}", self.value_type(), self)
    }
}



/// Generate the conversions between a Rust type and the value variant that carries it.
macro_rules! value_conversion
{
    ($data_type:ty , $variant:ident , $as_ident:ident) =>
    {
        impl Value
        {
            #[doc = concat!("Borrow the payload if this value holds a ", stringify!($data_type), ".")]
            pub fn $as_ident(&self) -> Option<&$data_type>
            {
                match self
                {
                    Value::$variant(value) => Some(value),
                    _ => None
                }
            }
        }


        #[doc = concat!("Support converting from a ", stringify!($data_type), " to a Value.")]
        impl From<$data_type> for Value
        {
            fn from(original: $data_type) -> Value
            {
                Value::$variant(original)
            }
        }
    };
}


value_conversion!(i64, Int, as_int);
value_conversion!(f64, Float, as_float);
value_conversion!(bool, Bool, as_bool);
value_conversion!(String, String, as_string);
value_conversion!(ValueVecPtr, Array, as_array);
value_conversion!(ScopePtr, Scope, as_scope);


impl From<&str> for Value
{
    fn from(original: &str) -> Value
    {
        Value::String(original.to_string())
    }
}



impl Value
{
    /// Create a value from bare token text.  Text that reads as a number becomes that number,
    /// anything else stays a word.
    ///
    /// Float classification runs first and integer classification last, so text that is valid as
    /// both ends up an integer.  This happens once, here, and is never revisited.
    pub fn word(text: String) -> Value
    {
        let float = to_float(&text);
        let integer = to_integer(&text);

        let mut value = Value::Word(text);

        if let Some(number) = float
        {
            value = Value::Float(number);
        }

        if let Some(number) = integer
        {
            value = Value::Int(number);
        }

        value
    }

    /// Re-infer the type of a computed number.  The float reading is taken first, then replaced
    /// with an integer whenever the result is integral and fits.
    pub fn from_number(number: NumberType) -> Value
    {
        let mut value = Value::Float(number.as_float());

        match number
        {
            NumberType::Int(num) => value = Value::Int(num),

            NumberType::Float(num) if num.is_finite()
                                      && num.fract() == 0.0
                                      && num >= i64::MIN as f64
                                      && num < i64::MAX as f64 =>
            {
                value = Value::Int(num as i64);
            }

            NumberType::Float(_) => {}
        }

        value
    }

    /// The type tag of the value.
    pub fn value_type(&self) -> ValueType
    {
        match self
        {
            Value::Word(_)   => ValueType::Word,
            Value::String(_) => ValueType::String,
            Value::Int(_)    => ValueType::Integer,
            Value::Float(_)  => ValueType::Float,
            Value::Bool(_)   => ValueType::Boolean,
            Value::Array(_)  => ValueType::Array,
            Value::Scope(_)  => ValueType::Scope
        }
    }

    /// True for integers and floats.
    pub fn is_numeric(&self) -> bool
    {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// The number held, if this is an integer or a float.
    pub fn as_number(&self) -> Option<NumberType>
    {
        match self
        {
            Value::Int(num)   => Some(NumberType::Int(*num)),
            Value::Float(num) => Some(NumberType::Float(*num)),
            _                 => None
        }
    }

    /// The text of a word or a string.
    pub fn as_text(&self) -> Option<&str>
    {
        match self
        {
            Value::Word(text) | Value::String(text) => Some(text),
            _                                       => None
        }
    }

    /// The text used when the value is joined into or printed as part of a larger string.  Same as
    /// the display form except that strings are not quoted.
    pub fn plain_text(&self) -> String
    {
        match self
        {
            Value::String(string) => string.clone(),
            _                     => self.to_string()
        }
    }

    /// Order two values.  Numbers order against numbers, including mixed integer and float pairs.
    /// Strings order against strings and words against words.  Anything else has no order.
    pub fn compare(&self, other: &Value) -> Option<Ordering>
    {
        match (self, other)
        {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Word(a), Value::Word(b))     => Some(a.cmp(b)),
            _ =>
            {
                let a = self.as_number()?;
                let b = other.as_number()?;

                a.compare(&b)
            }
        }
    }

    /// Equality carrying the pairs of arrays already being compared further up.
    pub(crate) fn equals(&self,
                         other: &Value,
                         comparing: &mut Vec<(*const ValueVec, *const ValueVec)>) -> bool
    {
        match (self, other)
        {
            (Value::Word(a), Value::Word(b))       => a == b,
            (Value::String(a), Value::String(b))   => a == b,
            (Value::Int(a), Value::Int(b))         => a == b,
            (Value::Float(a), Value::Float(b))     => a == b,
            (Value::Bool(a), Value::Bool(b))       => a == b,
            (Value::Array(a), Value::Array(b))     => Rc::ptr_eq(a, b)
                                                      || a.borrow().equals(&b.borrow(), comparing),
            (Value::Scope(a), Value::Scope(b))     => Rc::ptr_eq(a, b),
            _                                      => false
        }
    }

    /// Wrap the text in double quotes for display.
    pub fn stringify(text: &str) -> String
    {
        format!("\"{}\"", text)
    }
}
