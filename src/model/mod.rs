pub mod player;
pub mod team;
pub mod tournament;

pub use player::Player;
pub use team::TournamentTeam;
pub use tournament::{Tournament, TournamentInfo, TournamentStatus};
