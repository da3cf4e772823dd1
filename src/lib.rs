pub mod application;
pub mod cli;
pub mod domain;
pub mod storage;
pub mod theme;

pub use domain::*;
pub use storage::LedgerStore;
pub use theme::ThemeRegistry;
