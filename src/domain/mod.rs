//! Domain layer: value types, provider payloads, normalisation rules and the
//! ports the application layer talks through.

pub mod credential;
pub mod money;
pub mod normalize;
pub mod ports;
pub mod probe;
pub mod report;
pub mod stripe;
