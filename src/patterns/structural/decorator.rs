use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::io::Write;

const HTML_PAGE: &str = "<!DOCTYPE html>\n<html>\n<body>\n<div>{body}</div>\n</body>\n</html>";

/// A formatting step wrapping an optional inner formatter, which always
/// runs first.
pub trait TextFormatter {
    fn inner(&self) -> Option<&dyn TextFormatter>;

    fn apply(&self, text: String, out: &mut dyn Write) -> Result<String>;

    fn format(&self, text: &str, out: &mut dyn Write) -> Result<String> {
        let text = match self.inner() {
            Some(inner) => inner.format(text, out)?,
            None => text.to_string(),
        };
        self.apply(text, out)
    }
}

type Inner = Option<Box<dyn TextFormatter>>;

macro_rules! formatter_ctor {
    ($ty:ident) => {
        impl $ty {
            pub fn new() -> Self {
                Self { inner: None }
            }

            pub fn wrap(inner: impl TextFormatter + 'static) -> Self {
                Self {
                    inner: Some(Box::new(inner)),
                }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

pub struct ToUpperText {
    inner: Inner,
}

formatter_ctor!(ToUpperText);

impl TextFormatter for ToUpperText {
    fn inner(&self) -> Option<&dyn TextFormatter> {
        self.inner.as_deref()
    }

    fn apply(&self, text: String, _out: &mut dyn Write) -> Result<String> {
        Ok(text.to_uppercase())
    }
}

pub struct ReplaceSpaceWithPlus {
    inner: Inner,
}

formatter_ctor!(ReplaceSpaceWithPlus);

impl TextFormatter for ReplaceSpaceWithPlus {
    fn inner(&self) -> Option<&dyn TextFormatter> {
        self.inner.as_deref()
    }

    fn apply(&self, text: String, out: &mut dyn Write) -> Result<String> {
        writeln!(out, "All ' ' will be replaced with '+'")?;
        Ok(text.replace(' ', "+"))
    }
}

pub struct ToBase64 {
    inner: Inner,
}

formatter_ctor!(ToBase64);

impl TextFormatter for ToBase64 {
    fn inner(&self) -> Option<&dyn TextFormatter> {
        self.inner.as_deref()
    }

    fn apply(&self, text: String, _out: &mut dyn Write) -> Result<String> {
        Ok(BASE64.encode(text.as_bytes()))
    }
}

pub struct ToHtmlTemplate {
    inner: Inner,
}

formatter_ctor!(ToHtmlTemplate);

impl TextFormatter for ToHtmlTemplate {
    fn inner(&self) -> Option<&dyn TextFormatter> {
        self.inner.as_deref()
    }

    fn apply(&self, text: String, _out: &mut dyn Write) -> Result<String> {
        let lines: Vec<&str> = text.split('\n').filter(|line| !line.is_empty()).collect();
        Ok(HTML_PAGE.replace("{body}", &lines.join("<br/>\n")))
    }
}

pub struct DecoratorDemo;

impl Demo for DecoratorDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Decorator
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Stacked text formatters"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let text = "Hello!\n This article is about the pattern \"Decorator\"";

        let html = ToHtmlTemplate::wrap(ToUpperText::wrap(ReplaceSpaceWithPlus::new()));
        let formatted = html.format(text, out)?;
        writeln!(out, "{formatted}")?;

        writeln!(out)?;
        writeln!(out, "Same text, upper-cased and encoded:")?;
        let encoded = ToBase64::wrap(ToUpperText::new()).format(text, out)?;
        writeln!(out, "{encoded}")?;
        Ok(())
    }
}
