use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the source text where a character or token was found.  Parse errors carry one
/// of these so the user can find the offending text.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source text.  For example text entered
    /// in the REPL will have a tag of "\<repl\>".
    path: String,

    /// The 1 based line number in the source text.
    line: usize,

    /// The 1 based column number in the source text.
    column: usize
}


/// Used for error reporting to show where in the source text an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl SourceLocation
{
    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  This is useful in
    /// conjunction with the location_here! macro.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source or a meaningful description of it.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// Helper macro to get the location of the macro invocation.  Native words record where in the
/// Rust code they were registered from.
#[macro_export]
macro_rules! location_here
{
    () =>
    {
        $crate::lang::source_buffer::SourceLocation::new_from_info(file!(),
                                                                   line!() as usize,
                                                                   column!() as usize)
    };
}



/// Appended once to every buffer so that the last token is always followed by whitespace.
const SENTINEL: char = ' ';



/// The lexer.  A forward only cursor over a piece of source text handing out one character at a
/// time.
///
/// Unlike a borrowing iterator the buffer owns its text.  Parsing words open nested buffers while
/// an outer one is still in use, so the interpreter keeps a stack of them.
#[derive(Clone, Debug)]
pub struct SourceBuffer
{
    /// The source text with the sentinel already appended.
    chars: Vec<char>,

    /// Index of the next character to hand out.
    cursor: usize,

    /// The logical location of the cursor in the source text.
    location: SourceLocation
}


impl SourceBuffer
{
    /// Create a new SourceBuffer with the path to, or meaningful tag for the source and the source
    /// text itself.
    pub fn new(path: &str, source: &str) -> Self
    {
        let mut chars: Vec<char> = source.chars().collect();

        chars.push(SENTINEL);

        SourceBuffer
            {
                chars,
                cursor: 0,
                location: SourceLocation::new_from_path(path)
            }
    }

    /// The location the cursor is at in the source text.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// How many characters have been consumed so far.
    pub fn cursor(&self) -> usize
    {
        self.cursor
    }

    /// True once every character, sentinel included, has been handed out.
    pub fn is_exhausted(&self) -> bool
    {
        self.cursor >= self.chars.len()
    }

    /// Get and consume the next character, or None once the buffer is exhausted.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = self.chars.get(self.cursor).copied()?;

        self.cursor += 1;
        self.increment_location(next);

        Some(next)
    }

    /// Advance one column for regular characters.  Reset the column to 1 and increment the line
    /// for new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
