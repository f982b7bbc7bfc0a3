use crate::runtime::data_structures::value::Value;
use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// A vector of interpreter values.  This is both the array type of the language and the form code
/// takes once parsed.
#[derive(Clone, Debug, Default)]
pub struct ValueVec {
    values: VecDeque<Value>,
}

/// A pointer to the ValueVec used to manage this object by reference.
pub type ValueVecPtr = Rc<RefCell<ValueVec>>;

/// Pretty print the ValueVec as `[ a b c ]`.  An array met again while it is still being printed
/// shows up as `[ ... ]`.
impl Display for ValueVec {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.write_nested(f, &mut Vec::new())
    }
}

/// Arrays compare element by element.
impl PartialEq for ValueVec {
    fn eq(&self, other: &ValueVec) -> bool {
        self.equals(other, &mut Vec::new())
    }
}

/// Core functionality for the ValueVec type.
impl ValueVec {
    /// Create a new reference to a ValueVec with a given vector of values.
    pub fn from_vec(values: Vec<Value>) -> ValueVecPtr {
        let values = VecDeque::from(values);
        Rc::new(RefCell::new(ValueVec { values }))
    }

    /// Make sure users of the ValueVec can iterate it's values.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Value> {
        self.values.iter()
    }

    /// How big is the ValueVec?
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the ValueVec is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a value by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The first value, if any.
    pub fn first(&self) -> Option<&Value> {
        self.values.front()
    }

    /// The last value, if any.
    pub fn last(&self) -> Option<&Value> {
        self.values.back()
    }

    /// Copy the values out into a plain vector.  The values themselves are cloned shallowly, so
    /// nested arrays and scopes are still shared.
    pub fn to_vec(&self) -> Vec<Value> {
        self.values.iter().cloned().collect()
    }

    /// Append copies of the given values onto the end of the ValueVec.
    pub fn extend(&mut self, values: &[Value]) {
        self.values.extend(values.iter().cloned());
    }

    /// Push a new value onto the front of the ValueVec.
    pub fn push_front(&mut self, value: Value) {
        self.values.push_front(value);
    }

    /// Push a new value onto the back of the ValueVec.
    pub fn push_back(&mut self, value: Value) {
        self.values.push_back(value);
    }

    fn write_nested(&self, f: &mut Formatter, printing: &mut Vec<*const ValueVec>) -> fmt::Result {
        let this = self as *const ValueVec;

        if printing.contains(&this) {
            return write!(f, "[ ... ]");
        }

        printing.push(this);
        write!(f, "[ ")?;

        for value in self.values.iter() {
            match value {
                Value::Array(array) => array.borrow().write_nested(f, printing)?,
                _ => write!(f, "{}", value)?,
            }

            write!(f, " ")?;
        }

        let _ = printing.pop();
        write!(f, "]")
    }

    /// Element-wise equality that tracks the pairs of arrays already under comparison.  A pair met
    /// again is taken as equal, so arrays that contain themselves compare without looping.
    pub(crate) fn equals(
        &self,
        other: &ValueVec,
        comparing: &mut Vec<(*const ValueVec, *const ValueVec)>,
    ) -> bool {
        let pair = (self as *const ValueVec, other as *const ValueVec);

        if comparing.contains(&pair) {
            return true;
        }

        if self.len() != other.len() {
            return false;
        }

        comparing.push(pair);

        let equal = self
            .values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| a.equals(b, comparing));

        let _ = comparing.pop();
        equal
    }
}
