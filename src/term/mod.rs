use crate::Args;
use ansi_term::Style;
use basic::lang::Error;
use basic::mach::{Console, Environment, Listing, Runtime, Terminal};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use log::debug;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main(args: &Args) -> i32 {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("Error setting Ctrl-C handler: {}", error);
    }
    let mut runtime = Runtime::new().trace(args.trace).interrupt(interrupted);
    if let Some(max_steps) = args.max_steps {
        runtime = runtime.max_steps(max_steps);
    }
    match &args.file {
        Some(path) => match run_file(&runtime, args.seed, path) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("{}", Style::new().bold().paint(error.to_string()));
                1
            }
        },
        None => match main_loop(&runtime, args.seed) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("{}", error);
                1
            }
        },
    }
}

fn environment(seed: Option<u64>) -> Environment {
    match seed {
        Some(seed) => Environment::with_seed(seed),
        None => Environment::new(),
    }
}

fn run_file(runtime: &Runtime, seed: Option<u64>, path: &Path) -> Result<(), Error> {
    let program = load(path)?.program()?;
    let mut env = environment(seed);
    debug!("running {} lines with seed {}", program.len(), env.seed());
    runtime.execute(&program, &mut env, &mut Terminal)
}

fn load(path: &Path) -> Result<Listing, Error> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| Error::from(e).context(&path.display().to_string()))?;
    let mut listing = Listing::new();
    listing.load(&source)?;
    debug!("loaded {} lines from {}", listing.len(), path.display());
    Ok(listing)
}

fn main_loop(runtime: &Runtime, seed: Option<u64>) -> io::Result<()> {
    let command = Interface::new("BASIC")?;
    let input = Interface::new("INPUT")?;
    input.set_report_signal(Signal::Interrupt, true);
    let mut listing = Listing::new();
    command.write_fmt(format_args!("READY.\n"))?;

    loop {
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        let line = string.trim();
        if line.is_empty() {
            continue;
        }
        command.add_history_unique(string.clone());
        if line.starts_with(|c: char| c.is_ascii_digit()) {
            if let Err(error) = listing.load_str(line) {
                report(&command, &error)?;
            }
            continue;
        }
        match line.to_ascii_uppercase().as_str() {
            "RUN" => {
                let mut shell = Shell::new(&command, &input);
                let result = listing
                    .program()
                    .and_then(|program| runtime.execute(&program, &mut environment(seed), &mut shell));
                shell.finish()?;
                if let Err(error) = result {
                    report(&command, &error)?;
                }
            }
            "LIST" => {
                for line in listing.lines() {
                    command.write_fmt(format_args!("{}\n", line))?;
                }
            }
            "CLEAR" | "NEW" => listing.clear(),
            "QUIT" | "EXIT" => break,
            _ => command.write_fmt(format_args!(
                "{}\n",
                Style::new().bold().paint(format!("unknown command: {}", line))
            ))?,
        }
    }
    Ok(())
}

fn report(command: &Interface<DefaultTerminal>, error: &Error) -> io::Result<()> {
    command.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint(error.to_string())
    ))
}

/// Program output through the line editor. Text after the last newline
/// is held back and becomes the prompt of the next INPUT.
struct Shell<'a> {
    command: &'a Interface<DefaultTerminal>,
    input: &'a Interface<DefaultTerminal>,
    pending: String,
}

impl<'a> Shell<'a> {
    fn new(
        command: &'a Interface<DefaultTerminal>,
        input: &'a Interface<DefaultTerminal>,
    ) -> Shell<'a> {
        Shell {
            command,
            input,
            pending: String::new(),
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.command.write_fmt(format_args!("{}\n", rest))?;
        }
        Ok(())
    }
}

impl<'a> Console for Shell<'a> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.pending.push_str(text);
        if let Some(pos) = self.pending.rfind('\n') {
            let done: String = self.pending.drain(..=pos).collect();
            self.command.write_fmt(format_args!("{}", done))?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        let prompt = std::mem::take(&mut self.pending);
        self.input.set_prompt(&prompt)?;
        match self.input.read_line()? {
            ReadResult::Input(string) => Ok(string),
            ReadResult::Signal(_) => Err(io::Error::new(io::ErrorKind::Interrupted, "break")),
            ReadResult::Eof => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input")),
        }
    }
}
