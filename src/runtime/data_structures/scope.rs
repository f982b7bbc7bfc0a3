use std::{ collections::HashMap,
           cell::RefCell,
           fmt::{ self,
                  Display,
                  Formatter },
           rc::Rc };
use tracing::debug;
use crate::runtime::data_structures::value::Value;



/// A named, mutable record of fields.  Field values are ordinary values, so a field holding a
/// scope value makes a nested scope and dotted paths can walk down through them.
///
/// Fields are created on first write.  Reading a field that was never written gives None rather
/// than an error.
#[derive(Clone, Debug, Default)]
pub struct Scope
{
    values: HashMap<String, Value>,

    /// How many writes the scope has seen since it was created.  Nothing reads this beyond
    /// reporting it.
    writes: usize
}


/// A reference counted pointer to a Scope.  This is the type that is held by values and by the
/// registry.
pub type ScopePtr = Rc<RefCell<Scope>>;


/// Scopes can contain themselves, so the display form lists the field names only.
impl Display for Scope
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "scope{{")?;

        for (index, key) in self.keys().iter().enumerate()
        {
            if index > 0
            {
                write!(f, ",")?;
            }

            write!(f, " {}", key)?;
        }

        write!(f, " }}")
    }
}


impl Scope
{
    /// Create a new, empty and shareable scope.
    pub fn new() -> ScopePtr
    {
        Rc::new(RefCell::new(Scope::default()))
    }

    /// Read a field.
    pub fn get(&self, key: &str) -> Option<Value>
    {
        self.values.get(key).cloned()
    }

    /// Write a field, creating it if needed.
    pub fn set(&mut self, key: &str, value: Value)
    {
        let _ = self.values.insert(key.to_string(), value);
        self.writes += 1;
    }

    /// Has the field ever been written?
    pub fn contains_key(&self, key: &str) -> bool
    {
        self.values.contains_key(key)
    }

    /// Has anything been written since the scope was created?
    pub fn is_dirty(&self) -> bool
    {
        self.writes > 0
    }

    /// How many writes the scope has seen.
    pub fn write_count(&self) -> usize
    {
        self.writes
    }

    /// The field names in sorted order.
    pub fn keys(&self) -> Vec<&String>
    {
        let mut keys: Vec<&String> = self.values.keys().collect();

        keys.sort();
        keys
    }

    /// How many fields are defined?
    pub fn len(&self) -> usize
    {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.values.is_empty()
    }
}



/// The top level scopes of an interpreter, by name.
#[derive(Clone, Debug, Default)]
pub struct ScopeRegistry
{
    scopes: HashMap<String, ScopePtr>
}


impl ScopeRegistry
{
    pub fn new() -> ScopeRegistry
    {
        ScopeRegistry::default()
    }

    /// Register a scope under a name, replacing any scope already known by that name.
    pub fn insert(&mut self, name: &str, scope: ScopePtr)
    {
        debug!(scope = name, "registering scope");
        let _ = self.scopes.insert(name.to_string(), scope);
    }

    /// Register a fresh empty scope under the name and hand it back.
    pub fn create(&mut self, name: &str) -> ScopePtr
    {
        let scope = Scope::new();

        self.insert(name, scope.clone());
        scope
    }

    /// Look up a top level scope.
    pub fn get(&self, name: &str) -> Option<ScopePtr>
    {
        self.scopes.get(name).cloned()
    }

    /// Is there a top level scope of this name?
    pub fn contains(&self, name: &str) -> bool
    {
        self.scopes.contains_key(name)
    }

    /// Walk a dotted path such as `person.address.street`.  The first segment names a registered
    /// scope, every following segment is a field of the scope found so far.
    ///
    /// None if any segment is missing, or if a segment other than the last lands on something that
    /// is not a scope.
    pub fn resolve(&self, path: &str) -> Option<Value>
    {
        let mut segments = path.split('.');
        let mut current = Value::Scope(self.get(segments.next()?)?);

        for segment in segments
        {
            let Value::Scope(scope) = current else
            {
                return None;
            };

            current = scope.borrow().get(segment)?;
        }

        Some(current)
    }
}
