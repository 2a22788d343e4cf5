use anyhow::{Context, Result};
use rpassword::read_password;
use std::io::{self, Write};

/// Read one line from the operator. `None` means EOF (piped input ran out
/// or the operator closed the terminal) and cancels the current operation.
pub fn prompt_input() -> Option<String> {
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None, // EOF
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            eprintln!("Error reading input: {e}");
            None
        }
    }
}

/// Print a label, then read one line.
pub fn prompt_line(label: &str) -> Option<String> {
    print!("{label}");
    prompt_input()
}

/// Read one line with only the trailing newline removed. Used where the
/// input must match a phrase exactly, surrounding whitespace included.
pub fn prompt_exact() -> Option<String> {
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            eprintln!("Error reading input: {e}");
            None
        }
    }
}

/// Masked password entry. Nothing is echoed to the terminal.
pub fn prompt_password(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("Failed to flush stdout")?;
    let password = read_password().context("Failed to read password input")?;
    Ok(password.trim().to_string())
}

pub fn wait_for_enter() {
    print!("Press ENTER to continue...");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    let _ = io::stdin().read_line(&mut buf);
}
