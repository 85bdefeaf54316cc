//! Observer: a subject notifies every attached observer, in attachment
//! order, whenever its state changes.

use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use rand::Rng;
use std::io::Write;
use std::rc::Rc;

pub trait Observer {
    fn update(&self, subject: &Subject, out: &mut dyn Write) -> Result<()>;
}

#[derive(Default)]
pub struct Subject {
    state: u32,
    observers: Vec<Rc<dyn Observer>>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn attach(&mut self, observer: Rc<dyn Observer>, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Subject: Attached an observer.")?;
        self.observers.push(observer);
        Ok(())
    }

    /// Detaches by identity. Returns whether the observer was attached.
    pub fn detach(&mut self, observer: &Rc<dyn Observer>, out: &mut dyn Write) -> Result<bool> {
        let before = self.observers.len();
        self.observers.retain(|o| !Rc::ptr_eq(o, observer));
        writeln!(out, "Subject: Detached an observer.")?;
        Ok(self.observers.len() != before)
    }

    pub fn notify(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Subject: Notifying observers...")?;
        for observer in &self.observers {
            observer.update(self, out)?;
        }
        Ok(())
    }

    pub fn change_state(&mut self, state: u32, out: &mut dyn Write) -> Result<()> {
        self.state = state;
        writeln!(out, "Subject: My state has just changed to: {}", self.state)?;
        self.notify(out)
    }

    pub fn some_business_logic<R: Rng>(
        &mut self,
        rng: &mut R,
        settings: &DemoSettings,
        out: &mut dyn Write,
    ) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "Subject: I'm doing something important.")?;
        let state = rng.gen_range(0..10);
        settings.simulate_work();
        self.change_state(state, out)
    }
}

pub struct ConcreteObserverA;

impl Observer for ConcreteObserverA {
    fn update(&self, subject: &Subject, out: &mut dyn Write) -> Result<()> {
        if subject.state() < 3 {
            writeln!(out, "ConcreteObserverA: Reacted to the event.")?;
        }
        Ok(())
    }
}

pub struct ConcreteObserverB;

impl Observer for ConcreteObserverB {
    fn update(&self, subject: &Subject, out: &mut dyn Write) -> Result<()> {
        if subject.state() == 0 || subject.state() >= 2 {
            writeln!(out, "ConcreteObserverB: Reacted to the event.")?;
        }
        Ok(())
    }
}

pub struct ObserverDemo;

impl Demo for ObserverDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Observer
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Subject with two observers"
    }

    fn run(&self, settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mut rng = settings.rng();
        let mut subject = Subject::new();

        let observer_a: Rc<dyn Observer> = Rc::new(ConcreteObserverA);
        subject.attach(Rc::clone(&observer_a), out)?;
        let observer_b: Rc<dyn Observer> = Rc::new(ConcreteObserverB);
        subject.attach(Rc::clone(&observer_b), out)?;

        subject.some_business_logic(&mut rng, settings, out)?;
        subject.some_business_logic(&mut rng, settings, out)?;

        subject.detach(&observer_b, out)?;

        subject.some_business_logic(&mut rng, settings, out)?;
        Ok(())
    }
}

/// Gamblers watching a box fight round by round.
pub mod box_fight {
    use super::*;
    use std::cell::RefCell;

    pub trait FightObserver {
        fn update(&self, fight: &BoxFight, out: &mut dyn Write) -> Result<()>;
    }

    #[derive(Default)]
    pub struct BoxFight {
        observers: Vec<Rc<dyn FightObserver>>,
        round_number: u32,
        boxer_a_score: u32,
        boxer_b_score: u32,
    }

    impl BoxFight {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn round_number(&self) -> u32 {
            self.round_number
        }

        pub fn scores(&self) -> (u32, u32) {
            (self.boxer_a_score, self.boxer_b_score)
        }

        pub fn attach(&mut self, observer: Rc<dyn FightObserver>) {
            self.observers.push(observer);
        }

        pub fn detach(&mut self, observer: &Rc<dyn FightObserver>) {
            self.observers.retain(|o| !Rc::ptr_eq(o, observer));
        }

        /// Adds the given points to each boxer and notifies the players.
        pub fn score_round(&mut self, a: u32, b: u32, out: &mut dyn Write) -> Result<()> {
            self.round_number += 1;
            self.boxer_a_score += a;
            self.boxer_b_score += b;
            writeln!(
                out,
                "Round {}: A {} - B {}",
                self.round_number, self.boxer_a_score, self.boxer_b_score
            )?;
            self.notify(out)
        }

        pub fn next_round<R: Rng>(&mut self, rng: &mut R, out: &mut dyn Write) -> Result<()> {
            let a = rng.gen_range(0..5);
            let b = rng.gen_range(0..5);
            self.score_round(a, b, out)
        }

        pub fn notify(&self, out: &mut dyn Write) -> Result<()> {
            for observer in &self.observers {
                observer.update(self, out)?;
            }
            Ok(())
        }
    }

    /// Bets on whoever is behind.
    #[derive(Default)]
    pub struct RiskyPlayer {
        bet: RefCell<String>,
    }

    impl RiskyPlayer {
        pub fn bet(&self) -> String {
            self.bet.borrow().clone()
        }
    }

    impl FightObserver for RiskyPlayer {
        fn update(&self, fight: &BoxFight, out: &mut dyn Write) -> Result<()> {
            let (a, b) = fight.scores();
            let bet = if a > b {
                "Money on B more money"
            } else {
                "Money on A more money"
            };
            *self.bet.borrow_mut() = bet.to_string();
            writeln!(out, "RISKY PLAYER: {}", bet)?;
            Ok(())
        }
    }

    /// Bets on whoever is ahead.
    #[derive(Default)]
    pub struct ConservativePlayer {
        bet: RefCell<String>,
    }

    impl ConservativePlayer {
        pub fn bet(&self) -> String {
            self.bet.borrow().clone()
        }
    }

    impl FightObserver for ConservativePlayer {
        fn update(&self, fight: &BoxFight, out: &mut dyn Write) -> Result<()> {
            let (a, b) = fight.scores();
            let bet = if a < b {
                "Money on B it's safer"
            } else {
                "Money on A it's safer"
            };
            *self.bet.borrow_mut() = bet.to_string();
            writeln!(out, "CONSERVATIVE PLAYER: {}", bet)?;
            Ok(())
        }
    }

    pub struct BoxFightDemo;

    impl Demo for BoxFightDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Observer
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Box fight bets"
        }

        fn run(&self, settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let mut rng = settings.rng();
            let mut fight = BoxFight::new();
            fight.attach(Rc::new(RiskyPlayer::default()));
            fight.attach(Rc::new(ConservativePlayer::default()));

            for _ in 0..4 {
                fight.next_round(&mut rng, out)?;
            }
            Ok(())
        }
    }
}
