use std::io::{self, Write};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Stylize},
    terminal::{self, ClearType},
    ExecutableCommand, QueueableCommand,
};

use super::RawModeGuard;

/// Reads one line in raw mode. `None` when the user cancels with Esc or Ctrl+C.
fn read_line(stdout: &mut io::Stdout, prompt: &str) -> Result<Option<String>> {
    stdout.queue(style::Print(prompt))?;
    stdout.flush()?;

    let mut input = String::new();
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                stdout.execute(cursor::MoveToNextLine(1))?;
                return Ok(None);
            }
            match code {
                KeyCode::Enter => {
                    stdout.execute(cursor::MoveToNextLine(1))?;
                    return Ok(Some(input));
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    stdout.queue(style::Print(c))?;
                    stdout.flush()?;
                }
                KeyCode::Backspace => {
                    if input.pop().is_some() {
                        stdout.queue(cursor::MoveLeft(1))?;
                        stdout.queue(style::Print(' '))?;
                        stdout.queue(cursor::MoveLeft(1))?;
                        stdout.flush()?;
                    }
                }
                KeyCode::Esc => {
                    stdout.execute(cursor::MoveToNextLine(1))?;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

fn clear(stdout: &mut io::Stdout) -> Result<()> {
    stdout.queue(cursor::MoveTo(0, 0))?;
    stdout.queue(terminal::Clear(ClearType::All))?;
    Ok(())
}

pub fn input_text(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    clear(&mut stdout)?;

    let display_prompt = match default {
        Some(d) => format!("{prompt} [{d}]: "),
        None => format!("{prompt}: "),
    };

    loop {
        match read_line(&mut stdout, &display_prompt)? {
            None => return Ok(None),
            Some(input) if input.trim().is_empty() => match default {
                Some(d) => return Ok(Some(d.to_string())),
                None => warn(&mut stdout, "A value is required.")?,
            },
            Some(input) => return Ok(Some(input.trim().to_string())),
        }
    }
}

/// Prompts until a valid date is entered; an empty answer takes `default`.
pub fn input_date(prompt: &str, default: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    clear(&mut stdout)?;

    let display_prompt = match default {
        Some(d) => format!("{prompt} (YYYY-MM-DD) [{d}]: "),
        None => format!("{prompt} (YYYY-MM-DD): "),
    };

    loop {
        let Some(input) = read_line(&mut stdout, &display_prompt)? else {
            return Ok(None);
        };
        match interpret_date(&input, default) {
            Ok(date) => return Ok(Some(date)),
            Err(message) => warn(&mut stdout, message)?,
        }
    }
}

fn interpret_date(input: &str, default: Option<NaiveDate>) -> Result<NaiveDate, &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return default.ok_or("Date is required.");
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| "Invalid date format. Use YYYY-MM-DD.")
}

fn warn(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    stdout.queue(style::PrintStyledContent(message.red()))?;
    stdout.queue(cursor::MoveToNextLine(1))?;
    stdout.flush()?;
    Ok(())
}
