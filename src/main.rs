use lsh::config::{Args, Config};
use lsh::{EditorReader, Interpreter, Io, LineReader, PROGRAM_TAG, StreamReader};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    let config = Config::from_env(args);

    if let Err(err) = lsh::logging::init(&config) {
        eprintln!("{PROGRAM_TAG}: {err}");
        return ExitCode::FAILURE;
    }

    let interpreter = Interpreter::new(config.prompt.clone());
    let mut reader: Box<dyn LineReader> = if !config.plain && io::stdin().is_terminal() {
        match EditorReader::new() {
            Ok(editor) => Box::new(editor),
            Err(err) => {
                eprintln!("{PROGRAM_TAG}: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Box::new(StreamReader::new(io::stdin().lock(), io::stdout()))
    };

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    match interpreter.run(reader.as_mut(), &mut Io::new(&mut stdout, &mut stderr)) {
        Ok(end) => {
            debug!(?end, "shell finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{PROGRAM_TAG}: {err}");
            ExitCode::FAILURE
        }
    }
}
