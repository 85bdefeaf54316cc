use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Car {
    pub owner: Option<String>,
    pub number: Option<String>,
    pub company: String,
    pub model: String,
    pub color: String,
}

impl Car {
    pub fn shared(company: &str, model: &str, color: &str) -> Self {
        Self {
            company: company.to_string(),
            model: model.to_string(),
            color: color.to_string(),
            ..Self::default()
        }
    }

    /// The intrinsic part of this car, without owner and number.
    pub fn shared_part(&self) -> Self {
        Self::shared(&self.company, &self.model, &self.color)
    }
}

#[derive(Debug)]
pub struct Flyweight {
    shared_state: Car,
}

impl Flyweight {
    pub fn new(shared_state: Car) -> Self {
        Self { shared_state }
    }

    pub fn render(&self, unique_state: &Car) -> Result<String> {
        let shared = serde_json::to_string(&self.shared_state)?;
        let unique = serde_json::to_string(unique_state)?;
        Ok(format!(
            "Flyweight: Displaying shared {shared} and unique {unique} state."
        ))
    }

    pub fn operation(&self, unique_state: &Car, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", self.render(unique_state)?)?;
        Ok(())
    }
}

pub struct FlyweightFactory {
    flyweights: Vec<(Rc<Flyweight>, String)>,
}

impl FlyweightFactory {
    pub fn new(cars: impl IntoIterator<Item = Car>) -> Self {
        let flyweights = cars
            .into_iter()
            .map(|car| {
                let key = Self::key(&car);
                (Rc::new(Flyweight::new(car)), key)
            })
            .collect();
        Self { flyweights }
    }

    /// Sorted model, color and company, plus owner and number when both
    /// are present, joined with `_`.
    pub fn key(car: &Car) -> String {
        let mut parts = vec![car.model.as_str(), car.color.as_str(), car.company.as_str()];
        if let (Some(owner), Some(number)) = (&car.owner, &car.number) {
            parts.push(owner);
            parts.push(number);
        }
        parts.sort_unstable();
        parts.join("_")
    }

    pub fn len(&self) -> usize {
        self.flyweights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flyweights.is_empty()
    }

    pub fn get_flyweight(&mut self, shared_state: Car, out: &mut dyn Write) -> Result<Rc<Flyweight>> {
        let key = Self::key(&shared_state);

        if let Some((flyweight, _)) = self.flyweights.iter().find(|(_, k)| *k == key) {
            writeln!(out, "FlyweightFactory: Reusing existing flyweight.")?;
            return Ok(Rc::clone(flyweight));
        }

        writeln!(out, "FlyweightFactory: Can't find a flyweight, creating new one.")?;
        tracing::debug!(key = %key, "Creating flyweight");
        let flyweight = Rc::new(Flyweight::new(shared_state));
        self.flyweights.push((Rc::clone(&flyweight), key));
        Ok(flyweight)
    }

    pub fn list_flyweights(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "FlyweightFactory: I have {} flyweights:", self.flyweights.len())?;
        for (_, key) in &self.flyweights {
            writeln!(out, "{key}")?;
        }
        Ok(())
    }
}

pub fn add_car_to_police_database(
    factory: &mut FlyweightFactory,
    car: &Car,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "Client: Adding a car to database.")?;
    let flyweight = factory.get_flyweight(car.shared_part(), out)?;
    flyweight.operation(car, out)
}

pub struct FlyweightDemo;

impl Demo for FlyweightDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Flyweight
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Shared car state in a police database"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mut factory = FlyweightFactory::new([
            Car::shared("Chevrolet", "Camaro2018", "pink"),
            Car::shared("Mercedes Benz", "C300", "black"),
            Car::shared("Mercedes Benz", "C500", "red"),
            Car::shared("BMW", "M5", "red"),
            Car::shared("BMW", "X6", "white"),
        ]);
        factory.list_flyweights(out)?;

        for model in ["M5", "X1"] {
            writeln!(out)?;
            let car = Car {
                owner: Some("James Doe".to_string()),
                number: Some("CL234IR".to_string()),
                ..Car::shared("BMW", model, "red")
            };
            add_car_to_police_database(&mut factory, &car, out)?;
        }

        writeln!(out)?;
        factory.list_flyweights(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_sorted_values() {
        assert_eq!(FlyweightFactory::key(&Car::shared("BMW", "M5", "red")), "BMW_M5_red");

        let owned = Car {
            owner: Some("James Doe".to_string()),
            number: Some("CL234IR".to_string()),
            ..Car::shared("BMW", "M5", "red")
        };
        assert_eq!(FlyweightFactory::key(&owned), "BMW_CL234IR_James Doe_M5_red");

        let half_owned = Car {
            owner: Some("James Doe".to_string()),
            ..Car::shared("BMW", "M5", "red")
        };
        assert_eq!(FlyweightFactory::key(&half_owned), "BMW_M5_red");
    }

    #[test]
    fn test_factory_reuses_or_creates() {
        let mut sink = Vec::new();
        let mut factory = FlyweightFactory::new([Car::shared("BMW", "M5", "red")]);

        let a = factory.get_flyweight(Car::shared("BMW", "M5", "red"), &mut sink).unwrap();
        let b = factory.get_flyweight(Car::shared("BMW", "M5", "red"), &mut sink).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(factory.len(), 1);

        factory.get_flyweight(Car::shared("BMW", "X1", "red"), &mut sink).unwrap();
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn test_render_uses_pascal_case_and_nulls() {
        let flyweight = Flyweight::new(Car::shared("BMW", "M5", "red"));
        let unique = Car {
            owner: Some("James Doe".to_string()),
            number: Some("CL234IR".to_string()),
            ..Car::shared("BMW", "M5", "red")
        };
        let rendered = flyweight.render(&unique).unwrap();
        assert!(rendered.contains(
            r#"shared {"Owner":null,"Number":null,"Company":"BMW","Model":"M5","Color":"red"}"#
        ));
        assert!(rendered.contains(r#""Owner":"James Doe","Number":"CL234IR""#));
    }
}
