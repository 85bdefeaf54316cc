use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Singleton {
    _private: (),
}

impl Singleton {
    /// The one process-wide instance, created on first access.
    pub fn instance() -> &'static Singleton {
        static INSTANCE: OnceLock<Singleton> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            tracing::debug!("Creating singleton instance");
            Singleton { _private: () }
        })
    }

    pub fn some_business_logic(&self) -> &'static str {
        "Singleton works"
    }
}

pub struct SingletonDemo;

impl Demo for SingletonDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Singleton
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Lazy process-wide instance"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let s1 = Singleton::instance();
        let s2 = Singleton::instance();

        if std::ptr::eq(s1, s2) {
            writeln!(
                out,
                "{}, both variables contain the same instance.",
                s1.some_business_logic()
            )?;
        } else {
            writeln!(out, "Singleton failed, variables contain different instances.")?;
        }
        Ok(())
    }
}

/// A lazily built settings registry shared between worker threads.
pub mod thread_safe {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    pub struct Registry {
        value: String,
    }

    impl Registry {
        pub fn instance() -> &'static Registry {
            static INSTANCE: OnceLock<Registry> = OnceLock::new();
            INSTANCE.get_or_init(|| {
                CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("Creating shared registry");
                Registry {
                    value: "shared registry".to_string(),
                }
            })
        }

        pub fn value(&self) -> &str {
            &self.value
        }

        /// How many times the registry has been constructed in this process.
        pub fn constructions() -> usize {
            CONSTRUCTIONS.load(Ordering::SeqCst)
        }
    }

    /// Calls the accessor from `threads` threads at once and returns the
    /// address each of them observed.
    pub fn access_concurrently(threads: usize) -> Vec<usize> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..threads)
                .map(|_| scope.spawn(|| Registry::instance() as *const Registry as usize))
                .collect();
            handles
                .into_iter()
                .filter_map(|handle| handle.join().ok())
                .collect()
        })
    }

    pub struct ThreadSafeSingletonDemo;

    impl Demo for ThreadSafeSingletonDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Singleton
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Thread-safe lazy instance"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let threads = 4;
            let seen = access_concurrently(threads);
            let first = seen.first().copied();
            let same = seen.len() == threads && seen.iter().all(|addr| Some(*addr) == first);

            writeln!(out, "{threads} threads asked for the registry.")?;
            if same {
                writeln!(
                    out,
                    "All of them got the same {}.",
                    Registry::instance().value()
                )?;
            } else {
                writeln!(out, "Threads observed different instances.")?;
            }
            writeln!(out, "Constructions so far: {}", Registry::constructions())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::thread_safe::*;
    use super::*;

    #[test]
    fn test_two_calls_return_same_instance() {
        assert!(std::ptr::eq(Singleton::instance(), Singleton::instance()));
    }

    #[test]
    fn test_concurrent_access_constructs_once() {
        let seen = access_concurrently(8);
        assert_eq!(seen.len(), 8);
        assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(Registry::constructions(), 1);
        assert_eq!(seen[0], Registry::instance() as *const Registry as usize);
    }
}
