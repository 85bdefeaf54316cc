use crate::domain::model::{PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::patterns::behavioral::{
    chain_of_responsibility, command, iterator, mediator, memento, observer, state, strategy,
    template_method, visitor,
};
use crate::patterns::creational::{abstract_factory, builder, factory_method, prototype, singleton};
use crate::patterns::structural::{
    adapter, bridge, composite, decorator, facade, flyweight, proxy,
};
use crate::utils::error::{PatternError, Result};

/// Registry of every runnable demo, kept in (pattern, variant) order.
#[derive(Default)]
pub struct Catalog {
    demos: Vec<Box<dyn Demo>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All textbook demos plus the illustrative variants.
    pub fn standard() -> Self {
        let demos: Vec<Box<dyn Demo>> = vec![
            Box::new(abstract_factory::AbstractFactoryDemo),
            Box::new(abstract_factory::toys::ToyFactoryDemo),
            Box::new(builder::BuilderDemo),
            Box::new(builder::laptop::LaptopDemo),
            Box::new(factory_method::FactoryMethodDemo),
            Box::new(prototype::PrototypeDemo),
            Box::new(singleton::SingletonDemo),
            Box::new(singleton::thread_safe::ThreadSafeSingletonDemo),
            Box::new(adapter::AdapterDemo),
            Box::new(adapter::sockets::SocketDemo),
            Box::new(bridge::BridgeDemo),
            Box::new(composite::CompositeDemo),
            Box::new(decorator::DecoratorDemo),
            Box::new(facade::FacadeDemo),
            Box::new(facade::hotel::HotelDemo),
            Box::new(flyweight::FlyweightDemo),
            Box::new(proxy::ProxyDemo),
            Box::new(proxy::unreliable::UnreliableProxyDemo),
            Box::new(chain_of_responsibility::ChainDemo),
            Box::new(chain_of_responsibility::cafe::CafeDemo),
            Box::new(command::CommandDemo),
            Box::new(iterator::IteratorDemo),
            Box::new(mediator::MediatorDemo),
            Box::new(memento::MementoDemo),
            Box::new(memento::game::QuickSaveDemo),
            Box::new(observer::ObserverDemo),
            Box::new(observer::box_fight::BoxFightDemo),
            Box::new(state::StateDemo),
            Box::new(strategy::StrategyDemo),
            Box::new(strategy::wardrobe::WardrobeDemo),
            Box::new(template_method::TemplateMethodDemo),
            Box::new(visitor::VisitorDemo),
        ];

        let mut catalog = Self::new();
        for demo in demos {
            catalog.register(demo);
        }
        catalog
    }

    /// Adds a demo, replacing any existing one for the same pattern and
    /// variant.
    pub fn register(&mut self, demo: Box<dyn Demo>) {
        let key = (demo.pattern(), demo.variant());
        match self
            .demos
            .binary_search_by_key(&key, |d| (d.pattern(), d.variant()))
        {
            Ok(pos) => {
                tracing::debug!("Replacing demo {} ({})", key.0, key.1);
                self.demos[pos] = demo;
            }
            Err(pos) => self.demos.insert(pos, demo),
        }
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Demo> {
        self.demos.iter().map(|d| &**d)
    }

    pub fn find(&self, pattern: PatternKind, variant: Variant) -> Option<&dyn Demo> {
        self.iter()
            .find(|d| d.pattern() == pattern && d.variant() == variant)
    }

    pub fn variants_of(&self, pattern: PatternKind) -> Vec<Variant> {
        self.iter()
            .filter(|d| d.pattern() == pattern)
            .map(|d| d.variant())
            .collect()
    }

    /// Demos matching the given pattern and variant names, in catalogue
    /// order. An empty list matches everything; an unknown name is an error.
    pub fn select(&self, patterns: &[String], variants: &[String]) -> Result<Vec<&dyn Demo>> {
        let patterns = parse_names::<PatternKind>(patterns)?;
        let variants = parse_names::<Variant>(variants)?;

        let selected: Vec<&dyn Demo> = self
            .iter()
            .filter(|d| patterns.is_empty() || patterns.contains(&d.pattern()))
            .filter(|d| variants.is_empty() || variants.contains(&d.variant()))
            .collect();

        if selected.is_empty() {
            return Err(PatternError::ConfigError {
                message: "the selection matches no demos".to_string(),
            });
        }

        for pattern in &patterns {
            if !selected.iter().any(|d| d.pattern() == *pattern) {
                tracing::warn!("No {} demo matches the requested variants", pattern);
            }
        }

        Ok(selected)
    }
}

fn parse_names<T>(names: &[String]) -> Result<Vec<T>>
where
    T: std::str::FromStr<Err = PatternError> + PartialEq,
{
    let mut parsed = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let value = name.parse::<T>()?;
        if !parsed.contains(&value) {
            parsed.push(value);
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_standard_catalog_covers_every_pattern() {
        let catalog = Catalog::standard();
        for pattern in PatternKind::ALL {
            assert!(
                catalog.find(pattern, Variant::Textbook).is_some(),
                "missing textbook demo for {pattern}"
            );
        }
        assert_eq!(catalog.len(), 32);
    }

    #[test]
    fn test_catalog_is_ordered() {
        let catalog = Catalog::standard();
        let keys: Vec<_> = catalog.iter().map(|d| (d.pattern(), d.variant())).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_select_filters_by_pattern_and_variant() {
        let catalog = Catalog::standard();

        let both = catalog.select(&names(&["proxy"]), &[]).unwrap();
        assert_eq!(both.len(), 2);

        let only = catalog
            .select(&names(&["proxy", "Chain of Responsibility"]), &names(&["v2"]))
            .unwrap();
        assert_eq!(only.len(), 2);
        assert!(only.iter().all(|d| d.variant() == Variant::Illustrative));
    }

    #[test]
    fn test_select_rejects_unknown_names() {
        let catalog = Catalog::standard();
        assert!(matches!(
            catalog.select(&names(&["singletn"]), &[]),
            Err(PatternError::UnknownPattern { .. })
        ));
        assert!(matches!(
            catalog.select(&[], &names(&["fancy"])),
            Err(PatternError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_select_with_no_match_is_an_error() {
        let catalog = Catalog::standard();
        assert!(catalog
            .select(&names(&["visitor"]), &names(&["illustrative"]))
            .is_err());
    }

    #[test]
    fn test_variants_of() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.variants_of(PatternKind::Memento),
            vec![Variant::Textbook, Variant::Illustrative]
        );
        assert_eq!(catalog.variants_of(PatternKind::Bridge), vec![Variant::Textbook]);
    }
}
