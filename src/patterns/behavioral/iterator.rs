use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Default, Clone)]
pub struct WordsCollection {
    items: Vec<String>,
    reverse: bool,
}

impl WordsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: &str) {
        self.items.push(item.to_string());
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn reverse_direction(&mut self) {
        self.reverse = !self.reverse;
    }

    pub fn iter(&self) -> AlphabeticalOrderIterator<'_> {
        AlphabeticalOrderIterator::new(self, self.reverse)
    }
}

impl<'a> IntoIterator for &'a WordsCollection {
    type Item = &'a str;
    type IntoIter = AlphabeticalOrderIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks a collection forwards or backwards. `key`/`current` expose the
/// cursor; `None` means the iterator is not positioned on an item yet.
pub struct AlphabeticalOrderIterator<'a> {
    collection: &'a WordsCollection,
    position: Option<usize>,
    reverse: bool,
    started: bool,
}

impl<'a> AlphabeticalOrderIterator<'a> {
    pub fn new(collection: &'a WordsCollection, reverse: bool) -> Self {
        Self {
            collection,
            position: None,
            reverse,
            started: false,
        }
    }

    pub fn key(&self) -> Option<usize> {
        self.position
    }

    pub fn current(&self) -> Option<&'a str> {
        self.position
            .and_then(|p| self.collection.items.get(p))
            .map(String::as_str)
    }

    /// Advances the cursor; `false` once the end is reached.
    pub fn move_next(&mut self) -> bool {
        let len = self.collection.items.len();
        let next = match (self.position, self.reverse) {
            (None, _) if self.started => None,
            (None, false) => (len > 0).then_some(0),
            (None, true) => len.checked_sub(1),
            (Some(p), false) => (p + 1 < len).then_some(p + 1),
            (Some(p), true) => p.checked_sub(1),
        };
        self.started = true;
        match next {
            Some(p) => {
                self.position = Some(p);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.position = None;
        self.started = false;
    }
}

impl<'a> Iterator for AlphabeticalOrderIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.move_next() {
            self.current()
        } else {
            None
        }
    }
}

pub struct IteratorDemo;

impl Demo for IteratorDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Iterator
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Straight and reverse traversal"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mut collection = WordsCollection::new();
        collection.add_item("First");
        collection.add_item("Second");
        collection.add_item("Third");

        writeln!(out, "Straight traversal:")?;
        for element in &collection {
            writeln!(out, "{}", element)?;
        }

        writeln!(out)?;
        writeln!(out, "Reverse traversal:")?;
        collection.reverse_direction();
        for element in &collection {
            writeln!(out, "{}", element)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> WordsCollection {
        let mut collection = WordsCollection::new();
        for word in ["First", "Second", "Third"] {
            collection.add_item(word);
        }
        collection
    }

    #[test]
    fn test_straight_and_reverse() {
        let mut collection = collection();
        let straight: Vec<&str> = collection.iter().collect();
        assert_eq!(straight, vec!["First", "Second", "Third"]);

        collection.reverse_direction();
        let reversed: Vec<&str> = collection.iter().collect();
        assert_eq!(reversed, vec!["Third", "Second", "First"]);
    }

    #[test]
    fn test_cursor_and_reset() {
        let collection = collection();
        let mut iter = collection.iter();
        assert_eq!(iter.key(), None);
        assert!(iter.move_next());
        assert!(iter.move_next());
        assert_eq!(iter.key(), Some(1));
        assert_eq!(iter.current(), Some("Second"));
        assert!(iter.move_next());
        assert!(!iter.move_next());
        assert_eq!(iter.current(), Some("Third"));

        iter.reset();
        assert_eq!(iter.next(), Some("First"));
    }

    #[test]
    fn test_empty_collection() {
        let collection = WordsCollection::new();
        assert_eq!(collection.iter().count(), 0);
        let mut reversed = collection.clone();
        reversed.reverse_direction();
        assert_eq!(reversed.iter().next(), None);
    }
}
