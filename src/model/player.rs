use serde::{Deserialize, Serialize};

/// A player as known to the site. `ladder_rank` 0 means unranked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub club: String,
    pub country_union: String,
    pub total_points: u32,
    pub ladder_rank: u32,
}

impl Player {
    pub fn is_ranked(&self) -> bool {
        self.ladder_rank > 0
    }
}
