use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

pub struct Subsystem1;

impl Subsystem1 {
    pub fn operation1(&self) -> &'static str {
        "Subsystem1: Ready!"
    }

    pub fn operation_n(&self) -> &'static str {
        "Subsystem1: Go!"
    }
}

pub struct Subsystem2;

impl Subsystem2 {
    pub fn operation1(&self) -> &'static str {
        "Subsystem2: Ready!"
    }

    pub fn operation_x(&self) -> &'static str {
        "Subsystem2: Go!"
    }
}

pub struct Facade {
    subsystem1: Subsystem1,
    subsystem2: Subsystem2,
}

impl Facade {
    pub fn new(subsystem1: Subsystem1, subsystem2: Subsystem2) -> Self {
        Self {
            subsystem1,
            subsystem2,
        }
    }

    pub fn operation(&self) -> Vec<&'static str> {
        vec![
            "Facade initializes subsystems:",
            self.subsystem1.operation1(),
            self.subsystem2.operation1(),
            "Facade orders subsystems to perform the action:",
            self.subsystem1.operation_n(),
            self.subsystem2.operation_x(),
        ]
    }
}

pub struct FacadeDemo;

impl Demo for FacadeDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Facade
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "One call over two subsystems"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let facade = Facade::new(Subsystem1, Subsystem2);
        for line in facade.operation() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Booking a hotel room through a single entry point.
pub mod hotel {
    use super::*;
    use crate::utils::error::PatternError;

    pub const MIN_QUALITY: u8 = 1;
    pub const MAX_QUALITY: u8 = 5;
    const PRICE_PER_STAR: u32 = 40;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Booking {
        pub guest: String,
        pub room: u32,
        pub nights: u32,
        pub total: u32,
    }

    pub struct RoomService;

    impl RoomService {
        pub fn reserve(&self, quality: u8) -> Result<u32> {
            if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
                return Err(PatternError::InvalidArgument {
                    argument: "room_quality".to_string(),
                    reason: format!(
                        "{quality} is outside {MIN_QUALITY}..={MAX_QUALITY}"
                    ),
                });
            }
            Ok(100 * u32::from(quality) + 1)
        }

        pub fn nightly_rate(&self, quality: u8) -> u32 {
            PRICE_PER_STAR * u32::from(quality)
        }
    }

    pub struct PaymentService;

    impl PaymentService {
        pub fn charge(&self, guest: &str, amount: u32, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "Payment: charged {guest} ${amount}")?;
            Ok(())
        }
    }

    pub struct NotificationService;

    impl NotificationService {
        pub fn confirm(&self, booking: &Booking, out: &mut dyn Write) -> Result<()> {
            writeln!(
                out,
                "Notification: {} booked room {} for {} night(s)",
                booking.guest, booking.room, booking.nights
            )?;
            Ok(())
        }
    }

    pub struct HotelFacade {
        rooms: RoomService,
        payments: PaymentService,
        notifications: NotificationService,
    }

    impl Default for HotelFacade {
        fn default() -> Self {
            Self {
                rooms: RoomService,
                payments: PaymentService,
                notifications: NotificationService,
            }
        }
    }

    impl HotelFacade {
        fn price(&self, quality: u8, nights: u32) -> Result<u32> {
            if nights == 0 {
                return Err(PatternError::InvalidArgument {
                    argument: "nights".to_string(),
                    reason: "a booking needs at least one night".to_string(),
                });
            }
            self.rooms
                .nightly_rate(quality)
                .checked_mul(nights)
                .ok_or_else(|| PatternError::InvalidArgument {
                    argument: "nights".to_string(),
                    reason: format!("{nights} nights overflows the bill"),
                })
        }

        pub fn book(
            &self,
            guest: &str,
            quality: u8,
            nights: u32,
            out: &mut dyn Write,
        ) -> Result<Booking> {
            let room = self.rooms.reserve(quality)?;
            let total = self.price(quality, nights)?;
            self.payments.charge(guest, total, out)?;

            let booking = Booking {
                guest: guest.to_string(),
                room,
                nights,
                total,
            };
            self.notifications.confirm(&booking, out)?;
            Ok(booking)
        }
    }

    pub struct HotelDemo;

    impl Demo for HotelDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Facade
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Hotel booking"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let hotel = HotelFacade::default();

            writeln!(out, "Client: Booking a 4-star room for 2 nights.")?;
            hotel.book("Alice", 4, 2, out)?;

            writeln!(out, "Client: Booking a 7-star room for 1 night.")?;
            hotel.book("Bob", 7, 1, out)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::hotel::*;
    use super::*;
    use crate::utils::error::PatternError;

    #[test]
    fn test_facade_orders_subsystems() {
        let lines = Facade::new(Subsystem1, Subsystem2).operation();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Subsystem1: Ready!");
        assert_eq!(lines[5], "Subsystem2: Go!");
    }

    #[test]
    fn test_booking_goes_through_every_subsystem() {
        let mut out = Vec::new();
        let booking = HotelFacade::default().book("Alice", 4, 2, &mut out).unwrap();
        assert_eq!(booking.total, 320);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Payment: charged Alice $320"));
        assert!(text.contains("Notification: Alice booked room"));
    }

    #[test]
    fn test_out_of_range_quality_is_rejected() {
        let hotel = HotelFacade::default();
        for quality in [0, 6] {
            let mut out = Vec::new();
            let err = hotel.book("Bob", quality, 1, &mut out).unwrap_err();
            assert!(matches!(err, PatternError::InvalidArgument { .. }));
            assert!(out.is_empty(), "nothing is charged for a rejected booking");
        }
    }

    #[test]
    fn test_unpayable_stay_is_rejected() {
        let hotel = HotelFacade::default();
        for nights in [0, u32::MAX / 100] {
            let mut out = Vec::new();
            let err = hotel.book("Zed", MAX_QUALITY, nights, &mut out).unwrap_err();
            assert!(matches!(
                err,
                PatternError::InvalidArgument { ref argument, .. } if argument == "nights"
            ));
            assert!(out.is_empty(), "nothing is charged for a rejected booking");
        }
    }

    #[test]
    fn test_demo_terminates_on_invalid_quality() {
        let mut out = Vec::new();
        let result = HotelDemo.run(&DemoSettings::default(), &mut out);
        assert!(matches!(result, Err(PatternError::InvalidArgument { .. })));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Alice booked room"));
        assert!(!text.contains("Bob booked"));
    }
}
