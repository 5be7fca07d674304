//! Line-based console I/O shared by the interactive exercises.

use eyre::{Context, Result};
use std::io::{BufRead, Write};

/// A prompt/answer console over any reader and writer.
///
/// The binary wires this to stdin/stdout; tests feed it a scripted byte
/// slice and capture the output in a `Vec<u8>`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line.
    ///
    /// Returns `None` once input is exhausted. The trailing line terminator
    /// is stripped; other whitespace is left for the caller to handle.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            log::debug!("Input closed at prompt {:?}", prompt.trim());
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Print a line.
    pub fn say(&mut self, line: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write output")
    }

    /// Give back the underlying writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_strips_line_endings() {
        let mut console = Console::new(&b"  Alice \r\nBob\n"[..], Vec::new());

        assert_eq!(console.ask("> ").unwrap(), Some("  Alice ".to_string()));
        assert_eq!(console.ask("> ").unwrap(), Some("Bob".to_string()));
        assert_eq!(console.ask("> ").unwrap(), None);
    }

    #[test]
    fn test_ask_reads_last_line_without_newline() {
        let mut console = Console::new(&b"done"[..], Vec::new());
        assert_eq!(console.ask("").unwrap(), Some("done".to_string()));
    }

    #[test]
    fn test_prompts_and_lines_are_written() {
        let mut console = Console::new(&b"x\n"[..], Vec::new());
        console.ask("Name: ").unwrap();
        console.say("hello").unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Name: hello\n");
    }
}
