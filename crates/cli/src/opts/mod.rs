mod gateway;
mod global;
mod wallet;

pub use gateway::*;
pub use global::*;
pub use wallet::*;
