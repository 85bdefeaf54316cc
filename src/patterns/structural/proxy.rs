use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

pub trait Subject {
    fn request(&self, out: &mut dyn Write) -> Result<()>;
}

pub struct RealSubject;

impl Subject for RealSubject {
    fn request(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "RealSubject: Handling request.")?;
        Ok(())
    }
}

pub struct Proxy {
    real_subject: RealSubject,
}

impl Proxy {
    pub fn new(real_subject: RealSubject) -> Self {
        Self { real_subject }
    }

    fn check_access(&self, out: &mut dyn Write) -> Result<bool> {
        writeln!(out, "Proxy: Checking access prior to firing a real request.")?;
        Ok(true)
    }

    fn log_access(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Proxy: Logging the time of request.")?;
        Ok(())
    }
}

impl Subject for Proxy {
    fn request(&self, out: &mut dyn Write) -> Result<()> {
        if self.check_access(out)? {
            self.real_subject.request(out)?;
            self.log_access(out)?;
        }
        Ok(())
    }
}

pub struct ProxyDemo;

impl Demo for ProxyDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Proxy
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Access check and logging"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Client: Executing the client code with a real subject:")?;
        RealSubject.request(out)?;

        writeln!(out)?;

        writeln!(out, "Client: Executing the same client code with a proxy:")?;
        Proxy::new(RealSubject).request(out)
    }
}

/// A proxy guarding calls behind a connection that may drop.
pub mod unreliable {
    use super::*;
    use crate::utils::error::PatternError;
    use std::cell::Cell;

    pub trait Connection {
        fn try_connect(&self) -> bool;
    }

    /// Fails the first `failures` attempts, then stays up.
    pub struct FlakyConnection {
        failures_left: Cell<u32>,
    }

    impl FlakyConnection {
        pub fn new(failures: u32) -> Self {
            Self {
                failures_left: Cell::new(failures),
            }
        }
    }

    impl Connection for FlakyConnection {
        fn try_connect(&self) -> bool {
            match self.failures_left.get() {
                0 => true,
                n => {
                    self.failures_left.set(n - 1);
                    false
                }
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Route {
        Guarded { attempts: u32 },
        Direct,
    }

    pub struct GuardedProxy<C: Connection> {
        real_subject: RealSubject,
        connection: C,
        max_retries: u32,
    }

    impl<C: Connection> GuardedProxy<C> {
        pub fn new(real_subject: RealSubject, connection: C, max_retries: u32) -> Self {
            Self {
                real_subject,
                connection,
                max_retries,
            }
        }

        /// Tries the guarded path up to `max_retries` times, then calls the
        /// real subject directly.
        pub fn request_with_fallback(&self, out: &mut dyn Write) -> Result<Route> {
            match self.connect(out) {
                Ok(attempts) => {
                    self.real_subject.request(out)?;
                    writeln!(out, "Proxy: Request went through after {attempts} attempt(s).")?;
                    Ok(Route::Guarded { attempts })
                }
                Err(e @ PatternError::ConnectionLost { .. }) => {
                    tracing::warn!(error = %e, "Falling back to direct call");
                    writeln!(out, "Proxy: {e}. Falling back to a direct call.")?;
                    self.real_subject.request(out)?;
                    Ok(Route::Direct)
                }
                Err(e) => Err(e),
            }
        }

        fn connect(&self, out: &mut dyn Write) -> Result<u32> {
            for attempt in 1..=self.max_retries {
                if self.connection.try_connect() {
                    return Ok(attempt);
                }
                writeln!(out, "Proxy: Attempt {attempt} failed, no connection.")?;
                tracing::debug!(attempt, "Connection attempt failed");
            }
            Err(PatternError::ConnectionLost {
                attempts: self.max_retries,
            })
        }
    }

    impl<C: Connection> Subject for GuardedProxy<C> {
        fn request(&self, out: &mut dyn Write) -> Result<()> {
            self.request_with_fallback(out).map(|_| ())
        }
    }

    pub struct UnreliableProxyDemo;

    impl Demo for UnreliableProxyDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Proxy
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Retry then fall back"
        }

        fn run(&self, settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let retries = settings.proxy_max_retries;

            writeln!(out, "Client: The connection drops once.")?;
            GuardedProxy::new(RealSubject, FlakyConnection::new(1), retries).request(out)?;

            writeln!(out)?;

            writeln!(out, "Client: The connection is down.")?;
            GuardedProxy::new(RealSubject, FlakyConnection::new(u32::MAX), retries)
                .request(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::unreliable::*;
    use super::*;

    #[test]
    fn test_proxy_wraps_real_request() {
        let mut out = Vec::new();
        Proxy::new(RealSubject).request(&mut out).unwrap();
        let lines: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(
            lines,
            [
                "Proxy: Checking access prior to firing a real request.",
                "RealSubject: Handling request.",
                "Proxy: Logging the time of request.",
            ]
        );
    }

    #[test]
    fn test_guarded_route_within_retries() {
        let mut out = Vec::new();
        let proxy = GuardedProxy::new(RealSubject, FlakyConnection::new(2), 3);
        assert_eq!(
            proxy.request_with_fallback(&mut out).unwrap(),
            Route::Guarded { attempts: 3 }
        );
    }

    #[test]
    fn test_falls_back_after_retries() {
        let mut out = Vec::new();
        let proxy = GuardedProxy::new(RealSubject, FlakyConnection::new(3), 3);
        assert_eq!(proxy.request_with_fallback(&mut out).unwrap(), Route::Direct);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No connection after 3 attempts"));
        assert!(text.ends_with("RealSubject: Handling request.\n"));
    }

    #[test]
    fn test_zero_retries_goes_direct() {
        let mut out = Vec::new();
        let proxy = GuardedProxy::new(RealSubject, FlakyConnection::new(0), 0);
        assert_eq!(proxy.request_with_fallback(&mut out).unwrap(), Route::Direct);
    }
}
