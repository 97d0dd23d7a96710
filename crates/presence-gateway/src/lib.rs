//! Presence gateway library entry.
//!
//! Wires config, the shared presence store and its sweeper, the HTTP façade,
//! and the operational endpoints. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod logging;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
