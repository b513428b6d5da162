pub mod matchups;
pub mod players;
pub mod projections;
pub mod rosters;
pub mod state;
pub mod users;

pub use matchups::SleeperMatchup;
pub use players::PlayerEntry;
pub use projections::RawProjection;
pub use rosters::{RosterSettings, SleeperRoster};
pub use state::NflState;
pub use users::{SleeperUser, UserMetadata};
