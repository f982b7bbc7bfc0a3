use std::io::{ stdout,
               Write };
use crate::{ add_native_word,
             runtime::{ error,
                        interpreter::{ marshaling::{ Arguments,
                                                     Returned },
                                       Interpreter } } };



/// Write a string to standard output as is.
///
/// Signature: `string -- `
fn word_print(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned>
{
    let text = arguments.text()?;

    print!("{}", text);
    stdout().flush()?;

    Ok(Returned::nothing())
}


/// Write a string to standard output followed by a new line.
///
/// Signature: `string -- `
fn word_puts(_interpreter: &mut dyn Interpreter, mut arguments: Arguments) -> error::Result<Returned>
{
    let text = arguments.text()?;

    println!("{}", text);
    Ok(Returned::nothing())
}



/// Register the words that write to standard output.
pub fn register_io_words(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    add_native_word!(interpreter, "print ( string -- )", word_print,
                     "Write a string to standard output.");

    add_native_word!(interpreter, "puts ( string -- )", word_puts,
                     "Write a string and a new line to standard output.");

    Ok(())
}
