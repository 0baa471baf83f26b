//! Ships and the append-only fleet

pub mod registry;
pub mod ship;

pub use registry::Fleet;
pub use ship::{Ship, ShipClass, ShipStatus, ShipTemplate};
