mod category;
mod money;
mod transaction;

pub use category::*;
pub use money::*;
pub use transaction::*;
