pub mod api;
pub mod league;
pub mod models;
pub mod player_directory;

pub use api::SleeperClient;
pub use league::{League, Team};
pub use player_directory::{PlayerDirectory, PlayerDirectoryCache, ResolvedPlayer};
