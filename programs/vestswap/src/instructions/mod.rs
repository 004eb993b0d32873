pub mod escrow;
pub mod market;
pub mod pool;
pub mod swap;

pub use escrow::*;
pub use market::*;
pub use pool::*;
pub use swap::*;
