//! Memento: snapshots of an originator's state kept by a caretaker that
//! never looks inside them.

use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::{PatternError, Result};
use chrono::{DateTime, Local};
use rand::Rng;
use std::any::Any;
use std::io::Write;

const ALLOWED_SYMBOLS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub trait Memento {
    fn state(&self) -> &str;
    fn date(&self) -> DateTime<Local>;
    fn as_any(&self) -> &dyn Any;

    /// Creation time plus the first nine characters of the state.
    fn name(&self) -> String {
        let preview: String = self.state().chars().take(9).collect();
        format!("{} / ({})...", self.date().format("%Y-%m-%d %H:%M:%S"), preview)
    }
}

#[derive(Debug, Clone)]
pub struct ConcreteMemento {
    state: String,
    date: DateTime<Local>,
}

impl ConcreteMemento {
    pub fn new(state: String) -> Self {
        Self {
            state,
            date: Local::now(),
        }
    }
}

impl Memento for ConcreteMemento {
    fn state(&self) -> &str {
        &self.state
    }

    fn date(&self) -> DateTime<Local> {
        self.date
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct Originator<R: Rng> {
    state: String,
    rng: R,
    settings: DemoSettings,
}

impl<R: Rng> Originator<R> {
    pub fn new(state: &str, rng: R, settings: DemoSettings) -> Self {
        Self {
            state: state.to_string(),
            rng,
            settings,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn do_something(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Originator: I'm doing something important.")?;
        self.state = self.generate_random_string(30);
        writeln!(out, "Originator: and my state has changed to: {}", self.state)?;
        Ok(())
    }

    fn generate_random_string(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| {
                let symbol = ALLOWED_SYMBOLS[self.rng.gen_range(0..ALLOWED_SYMBOLS.len())];
                self.settings.simulate_work();
                symbol as char
            })
            .collect()
    }

    pub fn save(&self) -> Box<dyn Memento> {
        Box::new(ConcreteMemento::new(self.state.clone()))
    }

    /// Only snapshots this originator produced can be restored.
    pub fn restore(&mut self, memento: &dyn Memento, out: &mut dyn Write) -> Result<()> {
        if !memento.as_any().is::<ConcreteMemento>() {
            return Err(PatternError::UnknownMemento { kind: memento.name() });
        }

        self.state = memento.state().to_string();
        writeln!(out, "Originator: My state has changed to: {}", self.state)?;
        Ok(())
    }
}

pub struct Caretaker<R: Rng> {
    mementos: Vec<Box<dyn Memento>>,
    originator: Originator<R>,
}

impl<R: Rng> Caretaker<R> {
    pub fn new(originator: Originator<R>) -> Self {
        Self {
            mementos: Vec::new(),
            originator,
        }
    }

    pub fn originator(&self) -> &Originator<R> {
        &self.originator
    }

    pub fn originator_mut(&mut self) -> &mut Originator<R> {
        &mut self.originator
    }

    pub fn backup(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "Caretaker: Saving Originator's state...")?;
        self.mementos.push(self.originator.save());
        Ok(())
    }

    /// Push a snapshot obtained elsewhere.
    pub fn push(&mut self, memento: Box<dyn Memento>) {
        self.mementos.push(memento);
    }

    /// Restores the most recent snapshot. Snapshots the originator rejects
    /// are dropped and the previous one is tried instead. Returns `false`
    /// when the history ran out.
    pub fn undo(&mut self, out: &mut dyn Write) -> Result<bool> {
        while let Some(memento) = self.mementos.pop() {
            writeln!(out, "Caretaker: Restoring state to: {}", memento.name())?;

            match self.originator.restore(memento.as_ref(), out) {
                Ok(()) => return Ok(true),
                Err(PatternError::UnknownMemento { kind }) => {
                    tracing::warn!("Discarding snapshot the originator cannot read: {}", kind);
                    writeln!(out, "Caretaker: Discarding unreadable snapshot, trying the previous one.")?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    pub fn history(&self) -> Vec<String> {
        self.mementos.iter().map(|m| m.name()).collect()
    }

    pub fn show_history(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Caretaker: Here's the list of mementos:")?;
        for name in self.history() {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }
}

pub struct MementoDemo;

impl Demo for MementoDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Memento
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Originator and caretaker"
    }

    fn run(&self, settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let initial = "Super-duper-super-puper-super.";
        let originator = Originator::new(initial, settings.rng(), settings.clone());
        writeln!(out, "Originator: My initial state is: {}", initial)?;
        let mut caretaker = Caretaker::new(originator);

        for _ in 0..3 {
            caretaker.backup(out)?;
            caretaker.originator_mut().do_something(out)?;
        }

        writeln!(out)?;
        caretaker.show_history(out)?;

        writeln!(out)?;
        writeln!(out, "Client: Now, let's rollback!")?;
        writeln!(out)?;
        caretaker.undo(out)?;

        writeln!(out)?;
        writeln!(out, "Client: Once more!")?;
        writeln!(out)?;
        caretaker.undo(out)?;
        Ok(())
    }
}

/// Quick-save and quick-load in a shooter game.
pub mod game {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GameState {
        pub health: u32,
        pub killed_monsters: u32,
    }

    impl std::fmt::Display for GameState {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "Health: {}, Killed Monsters: {}", self.health, self.killed_monsters)
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct GameMemento {
        state: GameState,
    }

    impl GameMemento {
        pub fn state(&self) -> GameState {
            self.state
        }
    }

    #[derive(Debug)]
    pub struct GameOriginator {
        state: GameState,
    }

    impl Default for GameOriginator {
        fn default() -> Self {
            Self {
                state: GameState {
                    health: 100,
                    killed_monsters: 0,
                },
            }
        }
    }

    impl GameOriginator {
        pub fn state(&self) -> GameState {
            self.state
        }

        /// Every round costs a tenth of the health and kills two monsters.
        pub fn play(&mut self, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "{}", self.state)?;
            self.state = GameState {
                health: self.state.health * 9 / 10,
                killed_monsters: self.state.killed_monsters + 2,
            };
            Ok(())
        }

        pub fn save(&self) -> GameMemento {
            GameMemento { state: self.state }
        }

        pub fn load(&mut self, memento: &GameMemento) {
            self.state = memento.state;
        }
    }

    #[derive(Debug, Default)]
    pub struct GameCaretaker {
        game: GameOriginator,
        quick_saves: Vec<GameMemento>,
    }

    impl GameCaretaker {
        pub fn game(&self) -> &GameOriginator {
            &self.game
        }

        pub fn shoot(&mut self, out: &mut dyn Write) -> Result<()> {
            self.game.play(out)
        }

        /// F5
        pub fn quick_save(&mut self, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "Game: Quick save.")?;
            self.quick_saves.push(self.game.save());
            Ok(())
        }

        /// F9. Loads the latest quick save and keeps it on the stack.
        pub fn quick_load(&mut self, out: &mut dyn Write) -> Result<()> {
            let memento = self
                .quick_saves
                .last()
                .ok_or_else(|| PatternError::EmptyHistory {
                    what: "quick save".to_string(),
                })?;
            self.game.load(memento);
            writeln!(out, "Game: Quick load.")?;
            Ok(())
        }
    }

    pub struct QuickSaveDemo;

    impl Demo for QuickSaveDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Memento
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Game quick save"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let mut caretaker = GameCaretaker::default();
            caretaker.quick_save(out)?;
            caretaker.shoot(out)?;
            caretaker.quick_save(out)?;
            for _ in 0..4 {
                caretaker.shoot(out)?;
            }
            caretaker.quick_load(out)?;
            caretaker.shoot(out)?;
            Ok(())
        }
    }
}
