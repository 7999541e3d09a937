use serde::{Deserialize, Serialize};

use super::player::Player;

/// A team entered in one tournament.
///
/// The players are snapshots of the site's player records; the team does not
/// own their lifecycle. When both are present they are distinct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TournamentTeam {
    pub tournament_id: u32,
    pub player1: Option<Player>,
    pub player2: Option<Player>,
    pub seed: u32,
    /// Final placement, 0 while the tournament has no result
    pub result: u32,
    pub won_points: u32,
    pub total_points: u32,
    pub prize_money: f64,
    pub deregistered: bool,
}
