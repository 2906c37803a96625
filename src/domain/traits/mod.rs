//! Domain traits - Abstractions for infrastructure implementations

pub mod transport;

pub use transport::{Ack, Transport};
