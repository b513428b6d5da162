pub mod client;
pub mod urls;

pub use client::SleeperClient;
pub use urls::*;
