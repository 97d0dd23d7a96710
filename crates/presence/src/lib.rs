//! Top-level facade crate for the presence service.
//!
//! Re-exports the core store and the gateway library so users can depend on a single crate.

pub mod core {
    pub use presence_core::*;
}

pub mod gateway {
    pub use presence_gateway::*;
}
