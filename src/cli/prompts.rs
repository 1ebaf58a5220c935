//! Interactive prompt helpers.
//!
//! Numeric prompts re-prompt until the input parses; they never substitute
//! a default for garbage. End of input surfaces as an `UnexpectedEof`
//! error so the menu loop can wind down instead of spinning.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Print a prompt and read one trimmed line.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    let bytes = io::stdin().lock().read_line(&mut buffer)?;
    if bytes == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(buffer.trim().to_string())
}

/// Prompt until the input parses as `T`.
pub fn prompt_parse<T: FromStr>(prompt: &str) -> io::Result<T> {
    loop {
        let line = read_line(prompt)?;
        match line.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

/// Prompt for a number, falling back to `default` on empty input.
pub fn prompt_parse_or<T: FromStr + Copy>(prompt: &str, default: T) -> io::Result<T> {
    loop {
        let line = read_line(prompt)?;
        if line.is_empty() {
            return Ok(default);
        }
        match line.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

/// Ask a y/n question; anything but `y`/`Y` is a no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let answer = read_line(prompt)?;
    Ok(answer.eq_ignore_ascii_case("y"))
}
