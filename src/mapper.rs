//! Conversion of raw page rows into domain records.
//!
//! A field that fails to convert aborts the whole page: a malformed value
//! means the site template changed, not that one row is a one-off glitch.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Result, ScrapeError};
use crate::html::{
    LadderPage, LadderRow, ParsedPage, PlayerCell, TeamRow, TournamentDetail, TournamentListRow,
};
use crate::model::{Player, Tournament, TournamentInfo, TournamentStatus, TournamentTeam};
use crate::normalize::{
    gender_from_heading, id_from_link, parse_date, parse_date_range, parse_int, parse_money,
    parse_optional_int, parse_tournament_link, split_name, TournamentPath,
};

/// Inputs the mapper needs besides the page itself
#[derive(Debug, Clone)]
pub struct MapContext {
    /// Prefix for site-relative links, e.g. `https://www.volleynet.at`
    pub base_url: String,
    /// Reference date for status derivation
    pub today: NaiveDate,
    /// Tournament a standalone team table belongs to
    pub tournament_id: u32,
    pub gender: String,
}

impl MapContext {
    pub fn new(base_url: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            base_url: base_url.into(),
            today,
            tournament_id: 0,
            gender: String::new(),
        }
    }

    pub fn with_tournament(mut self, tournament_id: u32, gender: impl Into<String>) -> Self {
        self.tournament_id = tournament_id;
        self.gender = gender.into();
        self
    }

    fn link(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if href.starts_with('/') {
            format!("{}{}", base, href)
        } else {
            format!("{}/{}", base, href)
        }
    }
}

/// Typed records for one page, tagged by page kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "kebab-case")]
pub enum MappedPage {
    TournamentList(Vec<TournamentInfo>),
    TournamentDetail(Tournament),
    Ladder(Vec<Player>),
    TeamTable(Vec<TournamentTeam>),
}

pub fn map_page(page: &ParsedPage, ctx: &MapContext) -> Result<MappedPage> {
    Ok(match page {
        ParsedPage::TournamentList(rows) => MappedPage::TournamentList(map_tournament_list(rows, ctx)?),
        ParsedPage::TournamentDetail(detail) => MappedPage::TournamentDetail(map_tournament(detail, ctx)?),
        ParsedPage::Ladder(ladder) => MappedPage::Ladder(map_ladder(ladder)?),
        ParsedPage::TeamTable(rows) => MappedPage::TeamTable(
            rows.iter()
                .map(|row| map_team(row, ctx.tournament_id, &ctx.gender))
                .collect::<Result<_>>()?,
        ),
    })
}

/// Status of a tournament on `today`.
///
/// A cancel marker or a missing date range gives `Canceled`, an end before
/// `today` gives `Finished`. Besides the site's three outcomes a tournament
/// whose range contains `today` is `Running`; everything else is `Upcoming`.
pub fn derive_status(
    canceled: bool,
    dates: Option<(NaiveDate, NaiveDate)>,
    today: NaiveDate,
) -> TournamentStatus {
    match dates {
        _ if canceled => TournamentStatus::Canceled,
        None => TournamentStatus::Canceled,
        Some((_, end)) if end < today => TournamentStatus::Finished,
        Some((start, _)) if start <= today => TournamentStatus::Running,
        Some(_) => TournamentStatus::Upcoming,
    }
}

pub fn map_tournament_list(rows: &[TournamentListRow], ctx: &MapContext) -> Result<Vec<TournamentInfo>> {
    rows.iter().map(|row| map_tournament_info(row, ctx)).collect()
}

pub fn map_tournament_info(row: &TournamentListRow, ctx: &MapContext) -> Result<TournamentInfo> {
    let path = parse_tournament_link(&row.link)?;
    let dates = parse_date_range("dates", &row.dates)?;

    build_info(
        path,
        &row.name,
        &row.sub_league,
        dates,
        row.canceled,
        &row.link,
        row.entry_link.as_deref(),
        ctx,
    )
}

#[allow(clippy::too_many_arguments)]
fn build_info(
    path: TournamentPath,
    name: &str,
    sub_league: &str,
    dates: Option<(NaiveDate, NaiveDate)>,
    canceled: bool,
    href: &str,
    entry_link: Option<&str>,
    ctx: &MapContext,
) -> Result<TournamentInfo> {
    if name.is_empty() {
        return Err(ScrapeError::field("name", name));
    }

    let mut info = TournamentInfo::new(path.id);
    info.name = name.to_string();
    info.start = dates.map(|(start, _)| start);
    info.end = dates.map(|(_, end)| end);
    info.season = path.season;
    info.gender = path.gender;
    info.set_league(&path.league);
    info.set_sub_league(sub_league);
    info.phase = path.phase;
    info.status = derive_status(canceled, dates, ctx.today);
    info.registration_open = entry_link.is_some();
    info.link = ctx.link(href);
    info.entry_link = entry_link.map(str::to_string);

    Ok(info)
}

pub fn map_tournament(detail: &TournamentDetail, ctx: &MapContext) -> Result<Tournament> {
    let href = detail
        .link
        .as_deref()
        .ok_or_else(|| ScrapeError::field("link", ""))?;
    let path = parse_tournament_link(href)?;
    let dates = parse_date_range("dates", detail.dates.as_deref().unwrap_or_default())?;

    let info = build_info(
        path,
        &detail.name,
        detail.sub_league.as_deref().unwrap_or_default(),
        dates,
        detail.canceled,
        href,
        detail.entry_link.as_deref(),
        ctx,
    )?;

    let teams = detail
        .teams
        .iter()
        .map(|row| map_team(row, info.id, &info.gender))
        .collect::<Result<Vec<_>>>()?;

    let signed_up_teams = match detail.signed_up_teams.as_deref() {
        Some(count) => parse_optional_int("signed_up_teams", count)?,
        None => teams.iter().filter(|t| !t.deregistered).count() as u32,
    };

    let max_teams = match detail.max_teams.as_deref().map(str::trim) {
        None | Some("") | Some("-") => None,
        Some(max) => Some(parse_int("max_teams", max)?),
    };

    let end_registration = match detail.end_registration.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(date) => Some(parse_date("end_registration", date)?),
    };

    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    Ok(Tournament {
        info,
        location: text(&detail.location),
        mode: text(&detail.mode),
        max_teams,
        signed_up_teams,
        organiser: text(&detail.organiser),
        phone: text(&detail.phone),
        email: text(&detail.email),
        website: text(&detail.website),
        entry_fee: parse_money("entry_fee", detail.entry_fee.as_deref().unwrap_or_default())?,
        current_points: text(&detail.current_points),
        end_registration,
        html_notes: text(&detail.notes),
        teams,
    })
}

pub fn map_team(row: &TeamRow, tournament_id: u32, gender: &str) -> Result<TournamentTeam> {
    let player1 = map_player(&row.player1, gender)?;
    let player2 = map_player(&row.player2, gender)?;

    if let (Some(p1), Some(p2)) = (&player1, &player2) {
        if p1.id == p2.id {
            return Err(ScrapeError::field("player2", p2.id.to_string()));
        }
    }

    Ok(TournamentTeam {
        tournament_id,
        player1,
        player2,
        seed: parse_optional_int("seed", &row.seed)?,
        result: parse_optional_int("result", &row.result)?,
        won_points: parse_optional_int("won_points", &row.won_points)?,
        total_points: parse_optional_int("total_points", &row.total_points)?,
        prize_money: parse_money("prize_money", &row.prize_money)?,
        deregistered: row.deregistered,
    })
}

/// A player from a team cell; vacant slots map to `None`
pub fn map_player(cell: &PlayerCell, gender: &str) -> Result<Option<Player>> {
    if cell.is_empty() {
        return Ok(None);
    }

    let href = cell
        .link
        .as_deref()
        .ok_or_else(|| ScrapeError::field("player", cell.name.as_str()))?;
    let (first_name, last_name) = split_name(&cell.name);

    Ok(Some(Player {
        id: id_from_link("player", href)?,
        first_name,
        last_name,
        gender: gender.to_string(),
        ..Player::default()
    }))
}

pub fn map_ladder_entry(row: &LadderRow, gender: &str) -> Result<Player> {
    let href = row
        .link
        .as_deref()
        .ok_or_else(|| ScrapeError::field("player", row.name.as_str()))?;
    let (first_name, last_name) = split_name(&row.name);

    Ok(Player {
        id: id_from_link("player", href)?,
        first_name,
        last_name,
        gender: gender.to_string(),
        club: row.club.clone(),
        country_union: row.country_union.clone(),
        total_points: parse_int("total_points", &row.points)?,
        ladder_rank: parse_optional_int("ladder_rank", &row.rank)?,
    })
}

/// Ladder players ordered by rank; ties keep document order, unranked players go last
pub fn map_ladder(page: &LadderPage) -> Result<Vec<Player>> {
    let gender = gender_from_heading(&page.heading)
        .ok_or_else(|| ScrapeError::field("gender", page.heading.as_str()))?;

    let mut players = page
        .rows
        .iter()
        .map(|row| map_ladder_entry(row, gender))
        .collect::<Result<Vec<_>>>()?;

    players.sort_by_key(|p| (!p.is_ranked(), p.ladder_rank));

    Ok(players)
}
