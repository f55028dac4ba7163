//! Screen state machine
//!
//! `ThemeSelect -> Countdown -> Playing -> GameOver`, then back to `Countdown`
//! (restart), `ThemeSelect` (pick another theme) or `Quit`. Each call to
//! [`Driver::step`] handles one frame (one beat during the countdown) and
//! returns the next state; [`Driver::run`] is the only place the loop ends.

use crate::clock::Clock;
use crate::config::Config;
use crate::error::Error;
use crate::input::{InputEvent, Key, wants_quit};
use crate::menu::{GameOverChoice, Menu, game_over_menu, theme_menu};
use crate::sim::{Rect, Session, Size, TickInput};
use crate::theme::{AssetLoader, Theme, ThemeAssets};

/// One-shot sound events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Score,
    Crash,
    Beat,
}

/// A menu as the frontend sees it
#[derive(Debug, Clone)]
pub struct MenuView<'a> {
    pub title: &'static str,
    /// Text lines under the title
    pub lines: Vec<String>,
    pub field: Size,
    pub buttons: Vec<(&'static str, Rect)>,
    /// Theme to paint behind the menu, dimmed
    pub backdrop: Option<&'a ThemeAssets>,
}

impl<'a> MenuView<'a> {
    pub fn of<A: Copy>(menu: &Menu<A>) -> Self {
        Self {
            title: menu.title,
            lines: Vec::new(),
            field: menu.field,
            buttons: menu.buttons.iter().map(|b| (b.label, b.rect)).collect(),
            backdrop: None,
        }
    }
}

/// What to draw this frame
#[derive(Debug, Clone)]
pub enum Scene<'a> {
    Menu(MenuView<'a>),
    Countdown {
        assets: &'a ThemeAssets,
        beat: u8,
    },
    Playing {
        assets: &'a ThemeAssets,
        session: &'a Session,
    },
}

impl Scene<'_> {
    pub fn field(&self) -> Size {
        match self {
            Scene::Menu(view) => view.field,
            Scene::Countdown { assets, .. } => assets.field(),
            Scene::Playing { session, .. } => session.field(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scene::Menu(_) => "menu",
            Scene::Countdown { .. } => "countdown",
            Scene::Playing { .. } => "playing",
        }
    }
}

/// The presentation and input collaborator
pub trait Frontend {
    /// Every event pending since the last call. Must not block.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, Error>;

    fn draw(&mut self, scene: &Scene<'_>) -> Result<(), Error>;

    fn cue(&mut self, _cue: Cue) {}
}

/// A loaded theme and the session played with it
#[derive(Debug, Clone)]
pub struct Round {
    pub assets: ThemeAssets,
    pub session: Session,
}

#[derive(Debug)]
pub enum GameState {
    ThemeSelect,
    Countdown { round: Box<Round>, remaining: u8 },
    Playing(Box<Round>),
    GameOver(Box<Round>),
    Quit,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::ThemeSelect => "ThemeSelect",
            GameState::Countdown { .. } => "Countdown",
            GameState::Playing(_) => "Playing",
            GameState::GameOver(_) => "GameOver",
            GameState::Quit => "Quit",
        }
    }

    pub fn round(&self) -> Option<&Round> {
        match self {
            GameState::Countdown { round, .. }
            | GameState::Playing(round)
            | GameState::GameOver(round) => Some(&**round),
            GameState::ThemeSelect | GameState::Quit => None,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, GameState::Quit)
    }
}

pub struct Driver<F, C, L> {
    frontend: F,
    clock: C,
    loader: L,
    config: Config,
    theme_menu: Menu<Theme>,
    best: u32,
}

impl<F: Frontend, C: Clock, L: AssetLoader> Driver<F, C, L> {
    pub fn new(frontend: F, clock: C, loader: L, config: Config) -> Self {
        Self {
            frontend,
            clock,
            loader,
            config,
            theme_menu: theme_menu(),
            best: 0,
        }
    }

    /// Run from the theme menu until the player quits
    pub fn run(&mut self) -> Result<(), Error> {
        let mut state = GameState::ThemeSelect;
        while !state.is_quit() {
            let from = state.name();
            state = self.step(state)?;
            if state.name() != from {
                log::debug!("{} -> {}", from, state.name());
            }
        }
        log::info!("Quit (best score {})", self.best);
        Ok(())
    }

    pub fn step(&mut self, state: GameState) -> Result<GameState, Error> {
        match state {
            GameState::ThemeSelect => self.theme_select(),
            GameState::Countdown { round, remaining } => self.countdown(round, remaining),
            GameState::Playing(round) => self.playing(round),
            GameState::GameOver(round) => self.game_over(round),
            GameState::Quit => Ok(GameState::Quit),
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    fn theme_select(&mut self) -> Result<GameState, Error> {
        let events = self.frontend.poll_events()?;
        if wants_quit(&events) {
            return Ok(GameState::Quit);
        }
        if let Some(theme) = self.theme_menu.resolve(&events) {
            let round = self.start_round(theme)?;
            return Ok(self.begin_countdown(round));
        }

        let view = MenuView::of(&self.theme_menu);
        self.frontend.draw(&Scene::Menu(view))?;
        self.clock.wait_frame();
        Ok(GameState::ThemeSelect)
    }

    fn start_round(&mut self, theme: Theme) -> Result<Box<Round>, Error> {
        let assets = self.loader.load(theme)?;
        self.config
            .check_field(assets.field(), assets.actor_size())?;
        let session = Session::with_seed(
            self.config.rules,
            assets.field(),
            assets.actor_size(),
            self.config.seed,
        );
        log::info!(
            "Starting {} round on a {}x{} field",
            theme,
            assets.field().width,
            assets.field().height
        );
        Ok(Box::new(Round { assets, session }))
    }

    fn begin_countdown(&self, round: Box<Round>) -> GameState {
        GameState::Countdown {
            round,
            remaining: self.config.timing.countdown_beats,
        }
    }

    /// One beat per step. Only a quit request is honoured while counting.
    fn countdown(&mut self, round: Box<Round>, remaining: u8) -> Result<GameState, Error> {
        if remaining == 0 {
            return Ok(GameState::Playing(round));
        }

        self.frontend.draw(&Scene::Countdown {
            assets: &round.assets,
            beat: remaining,
        })?;
        self.frontend.cue(Cue::Beat);
        self.clock.pause(self.config.timing.beat());

        let events = self.frontend.poll_events()?;
        if wants_quit(&events) {
            return Ok(GameState::Quit);
        }
        Ok(GameState::Countdown {
            round,
            remaining: remaining - 1,
        })
    }

    fn playing(&mut self, mut round: Box<Round>) -> Result<GameState, Error> {
        let events = self.frontend.poll_events()?;
        if wants_quit(&events) {
            return Ok(GameState::Quit);
        }
        let input = TickInput {
            jump: events
                .iter()
                .any(|e| matches!(e, InputEvent::KeyDown(Key::Jump))),
        };

        let report = round.session.tick(&input);
        if report.jumped {
            self.frontend.cue(Cue::Flap);
        }
        if report.scored > 0 {
            self.frontend.cue(Cue::Score);
            log::debug!("Score {}", round.session.score());
        }
        if report.crash.is_some() {
            self.frontend.cue(Cue::Crash);
        }

        self.frontend.draw(&Scene::Playing {
            assets: &round.assets,
            session: &round.session,
        })?;
        self.clock.wait_frame();

        match report.crash {
            Some(crash) => {
                let score = round.session.score();
                self.best = self.best.max(score);
                log::info!(
                    "Crashed ({:?}) with score {} after {} ticks",
                    crash,
                    score,
                    round.session.ticks()
                );
                Ok(GameState::GameOver(round))
            }
            None => Ok(GameState::Playing(round)),
        }
    }

    fn game_over(&mut self, mut round: Box<Round>) -> Result<GameState, Error> {
        let events = self.frontend.poll_events()?;
        if wants_quit(&events) {
            return Ok(GameState::Quit);
        }

        let menu = game_over_menu(round.assets.field());
        match menu.resolve(&events) {
            Some(GameOverChoice::Restart) => {
                round.session.reset();
                return Ok(self.begin_countdown(round));
            }
            Some(GameOverChoice::Themes) => return Ok(GameState::ThemeSelect),
            Some(GameOverChoice::Exit) => return Ok(GameState::Quit),
            None => {}
        }

        let mut view = MenuView::of(&menu);
        view.lines = vec![
            format!("Score: {}", round.session.score()),
            format!("Best: {}", self.best),
        ];
        view.backdrop = Some(&round.assets);
        self.frontend.draw(&Scene::Menu(view))?;
        self.clock.wait_frame();
        Ok(GameState::GameOver(round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Point;
    use crate::theme::BuiltinThemes;
    use std::collections::VecDeque;
    use std::time::Duration;

    #[derive(Default)]
    struct Script {
        frames: VecDeque<Vec<InputEvent>>,
        drawn: Vec<&'static str>,
        cues: Vec<Cue>,
    }

    impl Frontend for Script {
        fn poll_events(&mut self) -> Result<Vec<InputEvent>, Error> {
            Ok(self.frames.pop_front().unwrap_or_default())
        }

        fn draw(&mut self, scene: &Scene<'_>) -> Result<(), Error> {
            self.drawn.push(scene.name());
            Ok(())
        }

        fn cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }
    }

    #[derive(Default)]
    struct Counter {
        frames: u32,
        pauses: Vec<Duration>,
    }

    impl Clock for Counter {
        fn wait_frame(&mut self) {
            self.frames += 1;
        }

        fn pause(&mut self, duration: Duration) {
            self.pauses.push(duration);
        }
    }

    fn driver(frames: Vec<Vec<InputEvent>>) -> Driver<Script, Counter, BuiltinThemes> {
        let config = Config {
            seed: Some(1),
            ..Config::default()
        };
        let script = Script {
            frames: frames.into(),
            ..Script::default()
        };
        Driver::new(script, Counter::default(), BuiltinThemes, config)
    }

    #[test]
    fn quit_from_the_theme_menu() {
        let mut d = driver(vec![vec![InputEvent::Quit]]);
        let state = d.step(GameState::ThemeSelect).unwrap();
        assert!(state.is_quit());
    }

    #[test]
    fn theme_menu_waits_for_a_choice() {
        let mut d = driver(vec![vec![InputEvent::KeyDown(Key::Jump)]]);
        let state = d.step(GameState::ThemeSelect).unwrap();
        assert!(matches!(state, GameState::ThemeSelect));
        assert_eq!(d.frontend().drawn, vec!["menu"]);
        assert_eq!(d.clock.frames, 1);
    }

    #[test]
    fn clicking_a_theme_starts_the_countdown() {
        let click = InputEvent::PointerDown(Point::new(200.0, 300.0));
        let mut d = driver(vec![vec![click]]);
        let state = d.step(GameState::ThemeSelect).unwrap();
        match &state {
            GameState::Countdown { round, remaining } => {
                assert_eq!(*remaining, 3);
                assert_eq!(round.assets.theme, Theme::Forest);
                assert_eq!(round.session.stream().len(), 3);
            }
            other => panic!("expected countdown, got {}", other.name()),
        }
    }

    #[test]
    fn countdown_pauses_one_beat_per_step() {
        let mut d = driver(vec![vec![InputEvent::KeyDown(Key::Choice(0))]]);
        let mut state = d.step(GameState::ThemeSelect).unwrap();
        for _ in 0..3 {
            state = d.step(state).unwrap();
            assert_eq!(state.name(), "Countdown");
        }
        state = d.step(state).unwrap();
        assert_eq!(state.name(), "Playing");
        assert_eq!(d.clock.pauses, vec![Duration::from_secs(1); 3]);
        assert_eq!(d.frontend().cues, vec![Cue::Beat; 3]);
        // No ticks run while counting down
        assert_eq!(state.round().map(|r| r.session.ticks()), Some(0));
    }

    #[test]
    fn a_round_that_does_not_fit_the_theme_is_refused() {
        let mut config = Config {
            seed: Some(1),
            ..Config::default()
        };
        config.rules.physics.spawn_x = 380.0;
        let script = Script {
            frames: vec![vec![InputEvent::KeyDown(Key::Choice(0))]].into(),
            ..Script::default()
        };
        let mut d = Driver::new(script, Counter::default(), BuiltinThemes, config);
        let err = d.step(GameState::ThemeSelect).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn quit_during_the_countdown() {
        let mut d = driver(vec![
            vec![InputEvent::KeyDown(Key::Choice(1))],
            vec![InputEvent::Quit],
        ]);
        let state = d.step(GameState::ThemeSelect).unwrap();
        assert!(d.step(state).unwrap().is_quit());
    }

    #[test]
    fn jump_key_flaps() {
        let mut d = driver(vec![vec![InputEvent::KeyDown(Key::Choice(0))]]);
        let mut state = d.step(GameState::ThemeSelect).unwrap();
        for _ in 0..4 {
            state = d.step(state).unwrap();
        }
        d.frontend_mut()
            .frames
            .push_back(vec![InputEvent::KeyDown(Key::Jump)]);
        let state = d.step(state).unwrap();
        let actor = state.round().unwrap().session.actor().clone();
        assert_eq!(actor.vel_y, -6.5);
        assert_eq!(d.frontend().cues.last(), Some(&Cue::Flap));
    }
}
