use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Stylize},
    terminal::{self, ClearType},
    ExecutableCommand, QueueableCommand,
};

use crate::nav::Navigator;

use super::RawModeGuard;

#[derive(Debug, PartialEq, Eq)]
enum NavAction {
    Back,
    Forward,
    Today,
    Done,
}

fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<NavAction> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(NavAction::Done);
    }
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(NavAction::Back),
        KeyCode::Right | KeyCode::Char('l') => Some(NavAction::Forward),
        KeyCode::Char('t') => Some(NavAction::Today),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Some(NavAction::Done),
        _ => None,
    }
}

fn read_action() -> Result<NavAction> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            if let Some(action) = action_for(code, modifiers) {
                return Ok(action);
            }
        }
    }
}

fn render(stdout: &mut io::Stdout, nav: &Navigator<'_>) -> Result<()> {
    stdout.queue(cursor::MoveTo(0, 0))?;
    stdout.queue(terminal::Clear(ClearType::All))?;

    stdout.queue(style::PrintStyledContent("Select week:".bold()))?;
    stdout.queue(cursor::MoveToNextLine(2))?;

    let back = if nav.can_step_back() {
        "<".green()
    } else {
        "<".dark_grey()
    };
    let forward = if nav.can_step_forward() {
        ">".green()
    } else {
        ">".dark_grey()
    };
    stdout.queue(style::Print("  "))?;
    stdout.queue(style::PrintStyledContent(back))?;
    stdout.queue(style::Print(format!("  {}  ", nav.label())))?;
    stdout.queue(style::PrintStyledContent(forward))?;
    stdout.queue(cursor::MoveToNextLine(2))?;

    stdout.queue(style::PrintStyledContent(
        "←/h back  →/l forward  t today  Enter/q done".dark_grey(),
    ))?;
    stdout.flush()?;
    Ok(())
}

/// Lets the user step through weeks until they leave; the navigator keeps
/// the last position.
pub fn browse_weeks(nav: &mut Navigator<'_>) -> Result<()> {
    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    stdout.execute(cursor::Hide)?;

    render(&mut stdout, nav)?;
    loop {
        match read_action()? {
            NavAction::Back => {
                if nav.step_back() {
                    render(&mut stdout, nav)?;
                }
            }
            NavAction::Forward => {
                if nav.step_forward() {
                    render(&mut stdout, nav)?;
                }
            }
            NavAction::Today => {
                nav.reset();
                render(&mut stdout, nav)?;
            }
            NavAction::Done => break,
        }
    }

    stdout.execute(cursor::Show)?;
    stdout.execute(terminal::Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    Ok(())
}
