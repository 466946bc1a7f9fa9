use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// ## Program input and output
///
/// `PRINT` writes lines, `INPUT` writes a prompt then reads a line,
/// and the runtime writes execution traces.

pub trait Console {
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// One line without its terminator. End of input is `UnexpectedEof`.
    fn read_line(&mut self) -> io::Result<String>;

    fn trace(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text)
    }
}

fn trim_newline(mut s: String) -> String {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
    s
}

/// Standard input and output.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut s = String::new();
        if io::stdin().lock().read_line(&mut s)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(trim_newline(s))
    }

    fn trace(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stderr(), "{}", text)
    }
}

/// Scripted input with captured output and traces.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    input: VecDeque<String>,
    output: String,
    traces: Vec<String>,
}

impl Transcript {
    pub fn new() -> Transcript {
        Transcript::default()
    }

    pub fn with_input<I, S>(lines: I) -> Transcript
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Transcript {
            input: lines.into_iter().map(Into::into).collect(),
            ..Transcript::default()
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    pub fn traces(&self) -> &[String] {
        &self.traces
    }
}

impl Console for Transcript {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        match self.input.pop_front() {
            Some(line) => Ok(line),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input")),
        }
    }

    fn trace(&mut self, text: &str) -> io::Result<()> {
        self.traces.push(text.to_string());
        Ok(())
    }
}
