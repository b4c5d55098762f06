pub mod clock;
pub mod pending;
