//! Menu screens: buttons laid out in play-field coordinates

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::input::{InputEvent, Key};
use crate::sim::{Point, Rect, Size};
use crate::theme::Theme;

const BUTTON_SIZE: Size = Size::new(200.0, 56.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Button<A> {
    pub label: &'static str,
    pub rect: Rect,
    pub action: A,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu<A> {
    pub title: &'static str,
    pub field: Size,
    pub buttons: Vec<Button<A>>,
}

impl<A: Copy> Menu<A> {
    pub fn new(title: &'static str, field: Size) -> Self {
        Self {
            title,
            field,
            buttons: Vec::new(),
        }
    }

    /// Add a button centered horizontally at height `y`
    pub fn with_button(mut self, label: &'static str, y: f32, action: A) -> Self {
        let center = Point::new(self.field.width / 2.0, y);
        self.buttons.push(Button {
            label,
            rect: Rect::centered(center, BUTTON_SIZE),
            action,
        });
        self
    }

    pub fn hit(&self, p: Point) -> Option<A> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(p))
            .map(|b| b.action)
    }

    pub fn choice(&self, index: usize) -> Option<A> {
        self.buttons.get(index).map(|b| b.action)
    }

    /// First action selected by a click or a number key in this batch
    pub fn resolve(&self, events: &[InputEvent]) -> Option<A> {
        events.iter().find_map(|event| match *event {
            InputEvent::PointerDown(p) => self.hit(p),
            InputEvent::KeyDown(Key::Choice(i)) => self.choice(i),
            _ => None,
        })
    }
}

/// What the game-over screen offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    /// Same theme, fresh round
    Restart,
    /// Back to theme selection
    Themes,
    Exit,
}

pub fn theme_menu() -> Menu<Theme> {
    let field = Size::new(FIELD_WIDTH, FIELD_HEIGHT);
    Theme::ALL
        .iter()
        .enumerate()
        .fold(Menu::new("The Chosen", field), |menu, (i, theme)| {
            menu.with_button(theme.label(), 200.0 + i as f32 * 100.0, *theme)
        })
}

pub fn game_over_menu(field: Size) -> Menu<GameOverChoice> {
    Menu::new("Game Over", field)
        .with_button("Restart", 250.0, GameOverChoice::Restart)
        .with_button("Themes", 330.0, GameOverChoice::Themes)
        .with_button("Exit", 410.0, GameOverChoice::Exit)
}
