use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::error::{Error, Result};

/// Ask for a secret on stderr. Input is not echoed when stdin is a terminal.
pub fn read_secret(prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    if !io::stdin().is_terminal() {
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        return Ok(input.trim().to_string());
    }

    terminal::enable_raw_mode()?;
    let secret = read_masked();
    terminal::disable_raw_mode()?;
    eprintln!();

    Ok(secret?.trim().to_string())
}

fn read_masked() -> Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(Error::Config("input cancelled".to_string()));
            }
            KeyCode::Esc => return Err(Error::Config("input cancelled".to_string())),
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}
