//! Core building blocks for talking to a Substrate-style node over JSON-RPC.
//!
//! - [`scale`] holds the compact binary codec and the type-indexed registry
//!   that resolves readers and writers for nested/generic types.
//! - [`rpc`] holds the JSON-RPC envelope coder and the helpers that turn
//!   typed values into wire params (and results back into typed values).
//!
//! Call correlation and subscriptions live in the `scalerpc-caller`
//! extension crate.

pub mod constants;
pub mod rpc;
pub mod scale;
pub mod utils;
