use crate::{
    lang::source_buffer::SourceLocation,
    runtime::data_structures::stack_effect::StackEffect,
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The information stored in the dictionary for each word.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordInfo {
    /// The location in the source code where the word was defined.
    pub location: SourceLocation,

    /// The name of the word.
    pub name: String,

    /// A simple description of the word.
    pub description: String,

    /// The declared inputs and outputs of the word.  The dispatcher checks and marshals values
    /// according to this.
    pub signature: StackEffect,

    /// The index of the actual handler for the word in the interpreter's handler list.
    pub handler_index: usize,
}

impl WordInfo {
    /// Create a new WordInfo with an empty signature.
    pub fn new(location: SourceLocation) -> WordInfo {
        WordInfo {
            location,
            name: String::new(),
            description: String::new(),
            signature: StackEffect::default(),
            handler_index: 0,
        }
    }
}

/// The word dictionary used by the interpreter.  Later definitions of a name replace earlier ones.
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Pretty print the dictionary as a sorted listing of the words, their stack effects and their
/// descriptions.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let name_width = self.words.keys().map(|name| name.len()).max().unwrap_or(0);
        let effect_width = self
            .words
            .values()
            .map(|word| word.signature.to_string().len())
            .max()
            .unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", self.words.len())?;

        for name in self.names() {
            let word = &self.words[name];

            writeln!(
                formatter,
                "{:name_width$}  {:effect_width$}  --  {}",
                name,
                word.signature.to_string(),
                word.description,
                name_width = name_width,
                effect_width = effect_width
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a new word and it's info into the dictionary.
    pub fn insert(&mut self, name: String, info: WordInfo) {
        let _ = self.words.insert(name, info);
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    /// The names of every word in sorted order.
    pub fn names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.words.keys().collect();

        names.sort();
        names
    }

    /// How many words are defined?
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
