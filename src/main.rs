use prie::{
    add_native_word,
    runtime::{
        built_ins::{base_words::register_base_words, io_words::register_io_words},
        data_structures::value::Value,
        error,
        interpreter::{
            Interpreter, InterpreterStack,
            marshaling::{Arguments, Returned},
            prie_interpreter::PrieInterpreter,
        },
    },
};
use std::{
    env::{args, var},
    io::{Write, stdin, stdout},
    process::ExitCode,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Send log output to stderr, filtered by PRIE_LOG.  Only warnings show up by default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PRIE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print the stack, bottom first.
fn print_stack(interpreter: &PrieInterpreter) {
    for (index, value) in interpreter.stack().iter().enumerate() {
        println!("{}:  {}", index, value);
    }
}

/// Read lines from stdin and run each one as it comes.  Errors are reported and the session keeps
/// going with whatever state the failed line left behind.
fn repl(interpreter: &mut PrieInterpreter) -> error::Result<()> {
    let mut line = String::new();

    loop {
        print!("> ");
        stdout().flush()?;

        line.clear();

        if stdin().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        if let Err(error) = interpreter.process_source("<repl>", &line) {
            eprintln!("{}", error);
        }

        print_stack(interpreter);
    }
}

fn run() -> error::Result<()> {
    let mut interpreter = PrieInterpreter::new();

    // Register the native vocabulary.
    register_base_words(&mut interpreter)?;
    register_io_words(&mut interpreter)?;

    if let Ok(prelude) = var("PRIE_PRELUDE") {
        debug!(path = %prelude, "running prelude");
        interpreter.process_source_file(&prelude)?;
    }

    // The first argument, if any, is the script to run.  Anything after it is handed to the script.
    let args: Vec<String> = args().collect();

    let script_args: Vec<Value> = args
        .iter()
        .skip(2)
        .map(|arg| Value::String(arg.clone()))
        .collect();

    let handler = move |_: &mut dyn Interpreter, _: Arguments| -> error::Result<Returned> {
        Ok(Returned::one(script_args.clone()))
    };

    add_native_word!(
        &mut interpreter,
        "prie.args ( -- array )",
        handler,
        "List of command line arguments passed to the script."
    );

    match args.get(1) {
        Some(script) => interpreter.process_source_file(script),
        None => repl(&mut interpreter),
    }
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
