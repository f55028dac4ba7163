//! Terminal frontend
//!
//! Raw mode, alternate screen and mouse capture for the lifetime of the
//! frontend; everything is restored on drop.

pub mod paint;
pub mod pixels;

use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, terminal,
};

use crate::audio::Sfx;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::driver::{Cue, Frontend, Scene};
use crate::error::Error;
use crate::input::{InputEvent, Key};
use crate::sim::Size;

use paint::{Viewport, paint};
use pixels::PixelBuf;

/// Keyboard mapping
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
            Some(InputEvent::KeyDown(Key::Jump))
        }
        KeyCode::Char(c @ '1'..='9') => Some(InputEvent::KeyDown(Key::Choice(
            c as usize - '1' as usize,
        ))),
        _ => None,
    }
}

pub struct TerminalFrontend {
    out: Stdout,
    buf: PixelBuf,
    /// Field of the last drawn scene, for mapping clicks
    field: Size,
    frame: u64,
    sfx: Option<Sfx>,
}

impl TerminalFrontend {
    pub fn new(sound: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        let setup = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )
        .and_then(|()| terminal::size());
        let (cols, rows) = match setup {
            Ok(size) => size,
            Err(e) => {
                // No frontend yet, so Drop will not restore the terminal
                if let Err(undo) = leave_terminal(&mut out) {
                    log::error!("Failed to restore terminal: {undo}");
                }
                return Err(e);
            }
        };
        log::info!("Terminal {}x{}", cols, rows);
        let sfx = if sound { Sfx::open() } else { None };

        Ok(Self {
            out,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            field: Size::new(FIELD_WIDTH, FIELD_HEIGHT),
            frame: 0,
            sfx,
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::fit(self.field, self.buf.width(), self.buf.height())
    }
}

/// Undo everything `TerminalFrontend::new` switched on
fn leave_terminal(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(e) = leave_terminal(&mut self.out) {
            log::error!("Failed to restore terminal: {e}");
        }
    }
}

impl Frontend for TerminalFrontend {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, Error> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => events.extend(map_key(key)),
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let p = self.viewport().cell_to_field(mouse.column, mouse.row);
                        events.push(InputEvent::PointerDown(p));
                    }
                }
                Event::Resize(cols, rows) => {
                    log::debug!("Resized to {}x{}", cols, rows);
                    self.buf.resize(cols as usize, rows as usize * 2);
                }
                _ => {}
            }
        }
        Ok(events)
    }

    fn draw(&mut self, scene: &Scene<'_>) -> Result<(), Error> {
        self.frame += 1;
        self.field = scene.field();
        let labels = paint(&mut self.buf, scene, self.frame);
        self.buf.render(&mut self.out)?;
        for label in &labels {
            label.render(&mut self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn cue(&mut self, cue: Cue) {
        if let Some(sfx) = &self.sfx {
            sfx.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn flap_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Enter] {
            assert_eq!(map_key(press(code)), Some(InputEvent::KeyDown(Key::Jump)));
        }
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(InputEvent::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn digits_choose_menu_entries() {
        assert_eq!(
            map_key(press(KeyCode::Char('1'))),
            Some(InputEvent::KeyDown(Key::Choice(0)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('3'))),
            Some(InputEvent::KeyDown(Key::Choice(2)))
        );
        assert_eq!(map_key(press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn leaving_restores_screen_and_cursor() {
        let mut out = Vec::new();
        // Raw mode was never enabled here; only the escape sequences matter
        let _ = leave_terminal(&mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?1049l"), "alternate screen left: {text:?}");
        assert!(text.contains("\x1b[?25h"), "cursor shown: {text:?}");
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
