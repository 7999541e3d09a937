use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::team::TournamentTeam;
use crate::normalize::slugify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Running,
    Finished,
    Canceled,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Running => "running",
            TournamentStatus::Finished => "finished",
            TournamentStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(TournamentStatus::Upcoming),
            "running" => Ok(TournamentStatus::Running),
            "finished" => Ok(TournamentStatus::Finished),
            "canceled" => Ok(TournamentStatus::Canceled),
            other => Err(format!("unknown tournament status: {}", other)),
        }
    }
}

/// One tournament occurrence as listed on the site.
///
/// League and sub-league are only set through [`TournamentInfo::set_league`]
/// and [`TournamentInfo::set_sub_league`], which derive their slugs.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TournamentInfo {
    pub id: u32,
    pub name: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub season: u16,
    pub gender: String,
    league: String,
    league_slug: String,
    sub_league: String,
    sub_league_slug: String,
    pub phase: String,
    pub status: TournamentStatus,
    pub registration_open: bool,
    pub link: String,
    pub entry_link: Option<String>,
}

impl TournamentInfo {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn set_league(&mut self, league: &str) {
        self.league = league.to_string();
        self.league_slug = slugify(league);
    }

    pub fn set_sub_league(&mut self, sub_league: &str) {
        self.sub_league = sub_league.to_string();
        self.sub_league_slug = slugify(sub_league);
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    pub fn league_slug(&self) -> &str {
        &self.league_slug
    }

    pub fn sub_league(&self) -> &str {
        &self.sub_league
    }

    pub fn sub_league_slug(&self) -> &str {
        &self.sub_league_slug
    }
}

/// Full tournament record from the detail page
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Tournament {
    #[serde(flatten)]
    pub info: TournamentInfo,
    pub location: String,
    pub mode: String,
    /// `None` when the organiser set no limit
    pub max_teams: Option<u32>,
    pub signed_up_teams: u32,
    pub organiser: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub entry_fee: f64,
    pub current_points: String,
    pub end_registration: Option<NaiveDate>,
    pub html_notes: String,
    pub teams: Vec<TournamentTeam>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_follow_names() {
        let mut info = TournamentInfo::new(21908);
        info.set_league("AMATEUR TOUR");
        info.set_sub_league("Amateur 1");
        assert_eq!(info.league_slug(), "amateur-tour");
        assert_eq!(info.sub_league_slug(), "amateur-1");

        info.set_league("Pro Tour");
        assert_eq!(info.league(), "Pro Tour");
        assert_eq!(info.league_slug(), "pro-tour");
    }

    #[test]
    fn test_slugs_serialized_with_names() {
        let mut info = TournamentInfo::new(21880);
        info.set_league("AMATEUR TOUR");
        info.set_sub_league("AMATEUR 1");

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["league"], "AMATEUR TOUR");
        assert_eq!(json["league_slug"], "amateur-tour");
        assert_eq!(json["sub_league_slug"], "amateur-1");
    }

    #[test]
    fn test_status_strings() {
        for status in [
            TournamentStatus::Upcoming,
            TournamentStatus::Running,
            TournamentStatus::Finished,
            TournamentStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<TournamentStatus>(), Ok(status));
        }
        assert!("done".parse::<TournamentStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&TournamentStatus::Canceled).unwrap(),
            "\"canceled\""
        );
    }
}
