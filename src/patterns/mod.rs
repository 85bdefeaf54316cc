//! The pattern demos, grouped by family. Each module holds the textbook
//! participants, a `Demo` driving them, and its illustrative variant in a
//! nested module where one exists.

pub mod behavioral;
pub mod creational;
pub mod structural;
