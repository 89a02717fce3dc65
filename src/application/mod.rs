//! Application layer orchestrating a credential validation run.
//!
//! `KeyValidator` is the entry point: it fans out the read-only probes, gates
//! on the account probe, performs the token-then-charge test transaction and
//! assembles the report.

pub mod validator;
