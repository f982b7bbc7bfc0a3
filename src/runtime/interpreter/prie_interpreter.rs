use std::{ collections::HashMap,
           rc::Rc };
use tracing::{ debug,
               trace };
use crate::{ lang::{ parsing::{ self,
                                DEFAULT_PARSING_WORDS,
                                PARSE_UNTIL,
                                STACK_TO_ACCUM },
                     source_buffer::{ SourceBuffer,
                                      SourceLocation } },
             runtime::{ data_structures::{ dictionary::{ Dictionary,
                                                         WordInfo },
                                           scope::ScopeRegistry,
                                           stack_effect::StackEffect,
                                           value::Value },
                        error::{ self,
                                 ErrorKind,
                                 script_error,
                                 script_error_str },
                        interpreter::{ marshaling::{ Arguments,
                                                     Payload,
                                                     Returned },
                                       CallStack,
                                       ExtensionHook,
                                       Interpreter,
                                       InterpreterStack,
                                       ParseManagement,
                                       ScopeManagement,
                                       ValueList,
                                       ValueStack,
                                       WordHandler,
                                       WordHandlerInfo,
                                       WordManagement } } };



/// List of word handlers known by the interpreter.
pub type WordList = Vec<WordHandlerInfo>;



/// The core interpreter implementation for the Prie language.
pub struct PrieInterpreter
{
    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// The named top level scopes.
    scopes: ScopeRegistry,


    /// The words currently executing.
    call_stack: CallStack,


    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,

    /// The list of executable word handlers associated with the dictionary.
    word_handlers: WordList,

    /// Consulted for words the dictionary does not know.
    extension_hook: Option<Rc<ExtensionHook>>,


    /// Parsing word names and the source text each one runs.
    parsing_words: HashMap<String, String>,

    /// The lexers of the parses in progress, innermost last.
    lexers: Vec<SourceBuffer>,

    /// The accumulators of the parses in progress, innermost last.
    accumulators: Vec<ValueList>
}


impl Interpreter for PrieInterpreter
{
    fn parse_source(&mut self, path: &str, source: &str) -> error::Result<ValueList>
    {
        parsing::parse(self, path, source)
    }
}


impl InterpreterStack for PrieInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut ValueStack
    {
        &mut self.stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::StackUnderflow, "Stack underflow.")
        }
    }

    fn pop_as_string(&mut self) -> error::Result<String>
    {
        match self.pop()?
        {
            Value::String(text) => Ok(text),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected a string, found {} {}.",
                                          other.value_type(),
                                          other))
        }
    }
}


impl ScopeManagement for PrieInterpreter
{
    fn scopes(&self) -> &ScopeRegistry
    {
        &self.scopes
    }

    fn scopes_mut(&mut self) -> &mut ScopeRegistry
    {
        &mut self.scopes
    }
}


impl ParseManagement for PrieInterpreter
{
    fn lexer_push(&mut self, buffer: SourceBuffer)
    {
        self.lexers.push(buffer);
    }

    fn lexer_pop(&mut self) -> error::Result<SourceBuffer>
    {
        match self.lexers.pop()
        {
            Some(buffer) => Ok(buffer),
            None => script_error_str(self, ErrorKind::Runtime, "Lexer stack underflow.")
        }
    }

    fn lexer_mut(&mut self) -> Option<&mut SourceBuffer>
    {
        self.lexers.last_mut()
    }

    fn accumulator_push(&mut self)
    {
        self.accumulators.push(ValueList::new());
    }

    fn accumulator_pop(&mut self) -> error::Result<ValueList>
    {
        match self.accumulators.pop()
        {
            Some(values) => Ok(values),
            None => script_error_str(self, ErrorKind::Runtime, "Accumulator stack underflow.")
        }
    }

    fn accumulator(&self) -> Option<&ValueList>
    {
        self.accumulators.last()
    }

    fn accumulate(&mut self, value: Value) -> error::Result<()>
    {
        match self.accumulators.last_mut()
        {
            Some(values) =>
                {
                    values.push(value);
                    Ok(())
                },

            None => script_error_str(self, ErrorKind::Runtime, "Not currently parsing.")
        }
    }

    fn parsing_word(&self, name: &str) -> Option<String>
    {
        self.parsing_words.get(name).cloned()
    }

    fn add_parsing_word(&mut self, name: &str, definition: &str)
    {
        let _ = self.parsing_words.insert(name.to_string(), definition.to_string());
    }
}


impl WordManagement for PrieInterpreter
{
    fn current_location(&self) -> Option<SourceLocation>
    {
        self.lexers.last().map(|lexer| lexer.location().clone())
    }

    fn add_word_with_effect(&mut self,
                            location: SourceLocation,
                            name: &str,
                            signature: StackEffect,
                            handler: Rc<WordHandler>,
                            description: &str)
    {
        let mut word_info = WordInfo::new(location.clone());

        let info = WordHandlerInfo::new(name.to_string(), location, handler);
        self.word_handlers.push(info);

        word_info.name = name.to_string();
        word_info.description = description.to_string();
        word_info.signature = signature;
        word_info.handler_index = self.word_handlers.len() - 1;

        self.dictionary.insert(name.to_string(), word_info);
    }

    fn find_word(&self, word: &str) -> Option<&WordInfo>
    {
        self.dictionary.try_get(word)
    }

    fn word_handler_info(&self, index: usize) -> Option<&WordHandlerInfo>
    {
        self.word_handlers.get(index)
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn set_extension_hook(&mut self, hook: Rc<ExtensionHook>)
    {
        self.extension_hook = Some(hook);
    }

    fn execute(&mut self, value: &Value) -> error::Result<()>
    {
        match value
        {
            Value::Word(name) => self.execute_word_named(name),

            _ =>
                {
                    self.push(value.clone());
                    Ok(())
                }
        }
    }

    fn execute_word(&mut self, word: &WordInfo) -> error::Result<()>
    {
        let Some(handler_info) = self.word_handler_info(word.handler_index) else
        {
            return script_error(self,
                                ErrorKind::Runtime,
                                format!("Handler for word {}, ({}) not found.",
                                        word.name,
                                        word.handler_index));
        };

        let handler = handler_info.handler();
        let arguments = self.take_arguments(word)?;

        trace!(word = %word.name, "dispatching");

        self.call_stack.push(word.name.clone());
        let result = (*handler)(self, arguments);

        let returned = match self.with_context(result)
        {
            Ok(returned) => returned,
            Err(error) =>
                {
                    let _ = self.call_stack.pop();
                    return Err(error);
                }
        };

        let pushed = self.push_results(word, returned);
        let _ = self.call_stack.pop();

        pushed
    }

    fn execute_word_named(&mut self, word: &str) -> error::Result<()>
    {
        match word
        {
            PARSE_UNTIL => return parsing::word_parse_until(self),
            STACK_TO_ACCUM => return parsing::word_stack_to_accum(self),
            _ => {}
        }

        if let Some(path) = word.strip_prefix('@')
        {
            return self.push_scope_path(path);
        }

        if let Some(word_info) = self.dictionary.try_get(word)
        {
            let word_info = word_info.clone();
            return self.execute_word(&word_info);
        }

        if let Some(hook) = self.extension_hook.clone()
        {
            debug!(word = %word, "offering unknown word to the extension hook");

            if (*hook)(self, word)?
            {
                return Ok(());
            }
        }

        script_error(self, ErrorKind::UnknownWord, format!("Word '{}' not defined.", word))
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }
}


impl PrieInterpreter
{
    pub fn new() -> PrieInterpreter
    {
        let parsing_words = DEFAULT_PARSING_WORDS.iter()
                                                 .map(|(name, definition)|
                                                      (name.to_string(), definition.to_string()))
                                                 .collect();

        PrieInterpreter
            {
                stack: Vec::with_capacity(20),
                scopes: ScopeRegistry::new(),

                call_stack: CallStack::with_capacity(40),

                dictionary: Dictionary::new(),
                word_handlers: WordList::new(),
                extension_hook: None,

                parsing_words,
                lexers: Vec::new(),
                accumulators: Vec::new()
            }
    }

    /// Check the word's declared inputs against the top of the stack, and only once they all fit,
    /// pop them.  A failed check leaves the stack as it was.
    fn take_arguments(&mut self, word: &WordInfo) -> error::Result<Arguments>
    {
        let inputs = &word.signature.inputs;

        if self.stack.len() < inputs.len()
        {
            return script_error(self,
                                ErrorKind::StackUnderflow,
                                format!("Word {} {} needs {} value(s) but the stack holds {}.",
                                        word.name,
                                        word.signature,
                                        inputs.len(),
                                        self.stack.len()));
        }

        let start = self.stack.len() - inputs.len();

        for (slot, value) in inputs.iter().zip(&self.stack[start..])
        {
            if !slot.type_spec.accepts(value)
            {
                return script_error(self,
                                    ErrorKind::TypeMismatch,
                                    format!("Word {} {} expected {} but found {} {}.",
                                            word.name,
                                            word.signature,
                                            slot.type_spec,
                                            value.value_type(),
                                            value));
            }
        }

        let payloads = self.stack
                           .split_off(start)
                           .into_iter()
                           .zip(inputs)
                           .map(|(value, slot)| Payload::unwrap_value(value, slot))
                           .collect();

        Ok(Arguments::new(payloads))
    }

    /// Push what the handler returned, in declared order.
    fn push_results(&mut self, word: &WordInfo, returned: Returned) -> error::Result<()>
    {
        let outputs = &word.signature.outputs;
        let payloads = self.with_context(returned.into_payloads(outputs.len()))?;

        for (payload, slot) in payloads.into_iter().zip(outputs)
        {
            let value = self.with_context(payload.into_value(slot))?;
            self.push(value);
        }

        Ok(())
    }

    /// Errors built without access to the interpreter pick up its location and call stack here.
    fn with_context<T>(&self, result: error::Result<T>) -> error::Result<T>
    {
        result.or_else(|error| if error.call_stack().is_some()
                               {
                                   Err(error)
                               }
                               else
                               {
                                   script_error(self,
                                            error.kind(),
                                            format!("{}: {}",
                                                    self.call_stack
                                                        .last()
                                                        .map(String::as_str)
                                                        .unwrap_or("<native>"),
                                                    error.error()))
                               })
    }

    /// Push the value found by walking a dotted scope path.
    fn push_scope_path(&mut self, path: &str) -> error::Result<()>
    {
        match self.scopes.resolve(path)
        {
            Some(value) =>
                {
                    self.push(value);
                    Ok(())
                },

            None => script_error(self,
                                 ErrorKind::UndefinedScope,
                                 format!("Scope path '@{}' does not resolve.", path))
        }
    }
}


impl Default for PrieInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
