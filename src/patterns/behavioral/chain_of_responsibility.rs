//! Chain of Responsibility: a request travels down a singly linked list of
//! handlers until one of them claims it.

use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

/// A link in the chain. Implementors supply their own predicate
/// (`try_handle`) and storage for the next link; forwarding is shared.
pub trait Handler {
    fn next(&self) -> Option<&dyn Handler>;
    fn next_slot(&mut self) -> &mut Option<Box<dyn Handler>>;

    /// The handler's own answer, without consulting the rest of the chain.
    fn try_handle(&self, request: &str) -> Option<String>;

    /// Links `handler` after this one and hands it back for fluent chaining.
    /// The last call wins.
    fn set_next(&mut self, handler: Box<dyn Handler>) -> &mut dyn Handler {
        &mut **self.next_slot().insert(handler)
    }

    /// First match wins; `None` means nobody in the chain wanted it.
    fn handle(&self, request: &str) -> Option<String> {
        self.try_handle(request)
            .or_else(|| self.next().and_then(|next| next.handle(request)))
    }
}

macro_rules! food_handler {
    ($name:ident, $label:literal, $food:literal) => {
        #[derive(Default)]
        pub struct $name {
            next: Option<Box<dyn Handler>>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl Handler for $name {
            fn next(&self) -> Option<&dyn Handler> {
                self.next.as_deref()
            }

            fn next_slot(&mut self) -> &mut Option<Box<dyn Handler>> {
                &mut self.next
            }

            fn try_handle(&self, request: &str) -> Option<String> {
                (request == $food).then(|| format!("{}: I'll eat the {}.", $label, request))
            }
        }
    };
}

food_handler!(MonkeyHandler, "Monkey", "Banana");
food_handler!(SquirrelHandler, "Squirrel", "Nut");
food_handler!(DogHandler, "Dog", "MeatBall");

/// Monkey > Squirrel > Dog.
pub fn animal_chain() -> MonkeyHandler {
    let mut monkey = MonkeyHandler::new();
    monkey
        .set_next(Box::new(SquirrelHandler::new()))
        .set_next(Box::new(DogHandler::new()));
    monkey
}

fn offer_food(handler: &dyn Handler, out: &mut dyn Write) -> Result<()> {
    for food in ["Nut", "Banana", "Cup of coffee"] {
        writeln!(out, "Client: Who wants a {}?", food)?;
        match handler.handle(food) {
            Some(result) => writeln!(out, "   {}", result)?,
            None => writeln!(out, "   {} was left untouched.", food)?,
        }
    }
    Ok(())
}

pub struct ChainDemo;

impl Demo for ChainDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::ChainOfResponsibility
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Hungry animals"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let monkey = animal_chain();

        writeln!(out, "Chain: Monkey > Squirrel > Dog")?;
        writeln!(out)?;
        offer_food(&monkey, out)?;
        writeln!(out)?;

        if let Some(squirrel) = monkey.next() {
            writeln!(out, "Subchain: Squirrel > Dog")?;
            writeln!(out)?;
            offer_food(squirrel, out)?;
        }
        Ok(())
    }
}

/// Friends at a café passing plates along until somebody takes them.
pub mod cafe {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Food {
        pub name: String,
        pub ingredients: Vec<String>,
    }

    impl Food {
        pub fn new(name: &str, ingredients: &[&str]) -> Self {
            Self {
                name: name.to_string(),
                ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            }
        }

        pub fn contains(&self, ingredient: &str) -> bool {
            self.ingredients.iter().any(|i| i == ingredient)
        }
    }

    pub trait CafeVisitor {
        fn name(&self) -> &'static str;
        fn next_mut(&mut self) -> Option<&mut (dyn CafeVisitor + 'static)>;

        /// Returns `true` when this visitor takes the food.
        fn take(&mut self, food: &Food, out: &mut dyn Write) -> Result<bool>;

        /// Returns the name of whoever ended up with the food.
        fn handle_food(&mut self, food: &Food, out: &mut dyn Write) -> Result<Option<&'static str>> {
            if self.take(food, out)? {
                return Ok(Some(self.name()));
            }
            match self.next_mut() {
                Some(next) => next.handle_food(food, out),
                None => Ok(None),
            }
        }
    }

    pub struct BestFriend {
        next: Option<Box<dyn CafeVisitor>>,
        coffee_containing_food: Vec<Food>,
    }

    impl BestFriend {
        pub fn new(next: Option<Box<dyn CafeVisitor>>) -> Self {
            Self {
                next,
                coffee_containing_food: Vec::new(),
            }
        }

        pub fn coffee_containing_food(&self) -> &[Food] {
            &self.coffee_containing_food
        }
    }

    impl CafeVisitor for BestFriend {
        fn name(&self) -> &'static str {
            "BestFriend"
        }

        fn next_mut(&mut self) -> Option<&mut (dyn CafeVisitor + 'static)> {
            self.next.as_deref_mut()
        }

        fn take(&mut self, food: &Food, out: &mut dyn Write) -> Result<bool> {
            if food.contains("Meat") {
                writeln!(out, "BestFriend: I just ate {}. It was tasty.", food.name)?;
                return Ok(true);
            }

            if food.contains("Coffee") && self.coffee_containing_food.is_empty() {
                self.coffee_containing_food.push(food.clone());
                writeln!(
                    out,
                    "BestFriend: I have to take something with coffee. {} looks fine.",
                    food.name
                )?;
                return Ok(true);
            }

            Ok(false)
        }
    }

    pub struct Me {
        next: Option<Box<dyn CafeVisitor>>,
    }

    impl Me {
        pub fn new(next: Option<Box<dyn CafeVisitor>>) -> Self {
            Self { next }
        }
    }

    impl CafeVisitor for Me {
        fn name(&self) -> &'static str {
            "Me"
        }

        fn next_mut(&mut self) -> Option<&mut (dyn CafeVisitor + 'static)> {
            self.next.as_deref_mut()
        }

        fn take(&mut self, food: &Food, out: &mut dyn Write) -> Result<bool> {
            if food.name == "Soup with potato" {
                writeln!(out, "Me: Woww PATATA!!!")?;
                return Ok(true);
            }
            Ok(false)
        }
    }

    pub struct GirlFriend {
        next: Option<Box<dyn CafeVisitor>>,
    }

    impl GirlFriend {
        pub fn new(next: Option<Box<dyn CafeVisitor>>) -> Self {
            Self { next }
        }
    }

    impl CafeVisitor for GirlFriend {
        fn name(&self) -> &'static str {
            "GirlFriend"
        }

        fn next_mut(&mut self) -> Option<&mut (dyn CafeVisitor + 'static)> {
            self.next.as_deref_mut()
        }

        fn take(&mut self, food: &Food, out: &mut dyn Write) -> Result<bool> {
            if food.name == "Cappuccino" {
                writeln!(out, "GirlFriend: My lovely cappuccino!!!")?;
                return Ok(true);
            }
            Ok(false)
        }
    }

    /// BestFriend > Me > GirlFriend.
    pub fn table() -> BestFriend {
        let girl_friend = GirlFriend::new(None);
        let me = Me::new(Some(Box::new(girl_friend)));
        BestFriend::new(Some(Box::new(me)))
    }

    pub fn menu() -> Vec<Food> {
        vec![
            Food::new("Cappuccino", &["Coffee", "Milk", "Sugar"]),
            Food::new("Cappuccino", &["Coffee", "Milk"]),
            Food::new("Soup with meat", &["Meat", "Water", "Potato"]),
            Food::new("Soup with potato", &["Water", "Potato"]),
            Food::new("Meat", &["Meat"]),
            Food::new("Green tea", &["Tea", "Water"]),
        ]
    }

    pub struct CafeDemo;

    impl Demo for CafeDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::ChainOfResponsibility
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Weird café visitors"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let mut best_friend = table();
            for food in menu() {
                if best_friend.handle_food(&food, out)?.is_none() {
                    writeln!(out, "Nobody wants the {}.", food.name)?;
                }
            }
            Ok(())
        }
    }
}
