use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

/// Legacy service with an incompatible string interface.
pub struct Adaptee;

impl Adaptee {
    pub fn str_num(&self) -> &'static str {
        "145"
    }
}

pub trait Target {
    fn num(&self) -> Result<i32>;
}

pub struct Adapter {
    adaptee: Adaptee,
}

impl Adapter {
    pub fn new(adaptee: Adaptee) -> Self {
        Self { adaptee }
    }
}

impl Target for Adapter {
    fn num(&self) -> Result<i32> {
        Ok(self.adaptee.str_num().parse()?)
    }
}

pub struct AdapterDemo;

impl Demo for AdapterDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Adapter
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "String service behind a numeric interface"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let target: Box<dyn Target> = Box::new(Adapter::new(Adaptee));

        writeln!(out, "Adaptee interface is incompatible with the client.")?;
        writeln!(out, "But with adapter client can call its method.")?;
        writeln!(out, "{}", target.num()?)?;
        Ok(())
    }
}

/// Plugging a US device into a European socket.
pub mod sockets {
    use super::*;
    use crate::utils::error::PatternError;

    pub trait EuropeanSocket {
        fn voltage(&self) -> u32;
        fn live(&self) -> i32;
        fn neutral(&self) -> i32;
        fn earth(&self) -> i32;
    }

    pub trait UsSocket {
        fn voltage(&self) -> u32;
        fn live(&self) -> i32;
        fn neutral(&self) -> i32;
    }

    pub struct Socket;

    impl EuropeanSocket for Socket {
        fn voltage(&self) -> u32 {
            230
        }

        fn live(&self) -> i32 {
            1
        }

        fn neutral(&self) -> i32 {
            -1
        }

        fn earth(&self) -> i32 {
            0
        }
    }

    /// Steps a European socket down to US mains; earth is not carried over.
    pub struct SocketAdapter<S: EuropeanSocket> {
        socket: S,
    }

    impl<S: EuropeanSocket> SocketAdapter<S> {
        pub fn new(socket: S) -> Self {
            Self { socket }
        }
    }

    impl<S: EuropeanSocket> UsSocket for SocketAdapter<S> {
        fn voltage(&self) -> u32 {
            self.socket.voltage() * 120 / 230
        }

        fn live(&self) -> i32 {
            self.socket.live()
        }

        fn neutral(&self) -> i32 {
            self.socket.neutral()
        }
    }

    pub struct ElectricKettle;

    impl ElectricKettle {
        pub const RATED_VOLTAGE: u32 = 120;

        pub fn boil(&self, power: &dyn UsSocket) -> Result<&'static str> {
            if power.voltage() != Self::RATED_VOLTAGE {
                return Err(PatternError::InvalidArgument {
                    argument: "voltage".to_string(),
                    reason: format!(
                        "kettle is rated for {} V, socket supplies {} V",
                        Self::RATED_VOLTAGE,
                        power.voltage()
                    ),
                });
            }
            Ok("Kettle is boiling!")
        }
    }

    /// A socket wired straight to a European supply without stepping down.
    struct RawUsPlug(Socket);

    impl UsSocket for RawUsPlug {
        fn voltage(&self) -> u32 {
            self.0.voltage()
        }

        fn live(&self) -> i32 {
            self.0.live()
        }

        fn neutral(&self) -> i32 {
            self.0.neutral()
        }
    }

    pub struct SocketDemo;

    impl Demo for SocketDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Adapter
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "230 V socket, 120 V kettle"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let kettle = ElectricKettle;

            writeln!(out, "Plugging the kettle in without an adapter...")?;
            match kettle.boil(&RawUsPlug(Socket)) {
                Ok(msg) => writeln!(out, "{msg}")?,
                Err(e) => writeln!(out, "Refused: {e}")?,
            }

            writeln!(out, "Plugging the kettle in through the adapter...")?;
            let adapter = SocketAdapter::new(Socket);
            writeln!(out, "{}", kettle.boil(&adapter)?)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::sockets::*;
    use super::*;

    #[test]
    fn test_adapter_parses_adaptee_output() {
        assert_eq!(Adapter::new(Adaptee).num().unwrap(), 145);
    }

    #[test]
    fn test_socket_adapter_steps_down_voltage() {
        let adapter = SocketAdapter::new(Socket);
        assert_eq!(adapter.voltage(), 120);
        assert_eq!(adapter.live(), 1);
        assert_eq!(ElectricKettle.boil(&adapter).unwrap(), "Kettle is boiling!");
    }

    #[test]
    fn test_demo_reports_refusal_then_success() {
        let mut out = Vec::new();
        SocketDemo.run(&DemoSettings::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Refused: Invalid argument 'voltage'"));
        assert!(text.ends_with("Kettle is boiling!\n"));
    }
}
