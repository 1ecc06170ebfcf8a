//! User input utilities for the interactive search loop

use crate::{Error, Result};
use std::io::{self, BufRead, Write};

/// Print a prompt and read one trimmed line from standard input
///
/// Returns `None` when standard input reaches end-of-file, so a piped
/// session terminates the loop cleanly.
pub fn read_command(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| Error::io("Failed to flush stdout".to_string(), e))?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| Error::io("Failed to read user input".to_string(), e))?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Split one command line into a verb and its argument
pub fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((verb, argument)) => (verb, argument.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_with_argument() {
        assert_eq!(split_command("state SP"), ("state", "SP"));
        assert_eq!(split_command("name rio de janeiro"), ("name", "rio de janeiro"));
    }

    #[test]
    fn test_split_command_without_argument() {
        assert_eq!(split_command("exit"), ("exit", ""));
    }

    #[test]
    fn test_split_command_trims_argument() {
        assert_eq!(split_command("code   3550308  "), ("code", "3550308"));
    }
}
