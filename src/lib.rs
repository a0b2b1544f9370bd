//! Marketgen: prediction-market template engine.
//!
//! Turns a parameterized market template plus caller variables into a
//! concrete market: question text, resolution definition, and the
//! data-source queries attestation providers dispatch to resolve it.
//!
//! The entry point is [`generate::Generator`]. The `cli` and `commands`
//! modules back the `marketgen` binary.

pub mod binding;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod generate;
pub mod substitute;

#[cfg(test)]
pub(crate) mod test_support;
