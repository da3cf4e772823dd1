// Application layer - validation and orchestration over the store.
// Any client (CLI, GUI shell) goes through TrackerService rather than
// talking to LedgerStore directly.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
