//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod outcome;
pub mod pool;
pub mod price;
pub mod swap;
