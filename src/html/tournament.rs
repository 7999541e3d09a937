//! Tournament detail page (`div.turnier`)
//!
//! The tournament's canonical link comes from `link[rel=canonical]`, the
//! key/value facts from `table.turnier-info` and the entered teams from an
//! optional `table.teams`.

use lazy_static::lazy_static;
use log::debug;
use scraper::{Html, Selector};

use super::teams::{self, TeamRow};
use super::{element_text, find_container, is_canceled, selector, PageKind};
use crate::error::Result;

lazy_static! {
    static ref CONTAINER: Selector = selector("div.turnier");
    static ref CANONICAL: Selector = selector("link[rel=canonical][href]");
    static ref NAME: Selector = selector("h2");
    static ref INFO_ROW: Selector = selector("table.turnier-info tr");
    static ref LABEL: Selector = selector("th");
    static ref VALUE: Selector = selector("td");
    static ref NOTES: Selector = selector("div.hinweise");
    static ref ENTRY_LINK: Selector = selector("a.anmelden[href]");
}

/// Raw fields of a tournament detail page. Info rows the page omits stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TournamentDetail {
    pub link: Option<String>,
    pub name: String,
    pub dates: Option<String>,
    pub sub_league: Option<String>,
    pub location: Option<String>,
    pub mode: Option<String>,
    pub max_teams: Option<String>,
    pub signed_up_teams: Option<String>,
    pub organiser: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub entry_fee: Option<String>,
    pub current_points: Option<String>,
    pub end_registration: Option<String>,
    /// Inner HTML of the notes block
    pub notes: Option<String>,
    pub entry_link: Option<String>,
    pub canceled: bool,
    pub teams: Vec<TeamRow>,
}

pub(crate) fn parse(document: &Html) -> Result<TournamentDetail> {
    let kind = PageKind::TournamentDetail;
    let container = find_container(document, kind, &CONTAINER, "tournament block")?;

    let mut detail = TournamentDetail {
        link: document
            .select(&CANONICAL)
            .next()
            .and_then(|l| l.value().attr("href"))
            .map(|href| href.trim().to_string()),
        name: container
            .select(&NAME)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        notes: container
            .select(&NOTES)
            .next()
            .map(|n| n.inner_html().trim().to_string())
            .filter(|n| !n.is_empty()),
        entry_link: container
            .select(&ENTRY_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string()),
        canceled: is_canceled(container),
        teams: container
            .select(&teams::CONTAINER)
            .next()
            .map(|table| teams::parse_table(kind, table))
            .unwrap_or_default(),
        ..TournamentDetail::default()
    };

    for row in container.select(&INFO_ROW) {
        let (Some(label), Some(value)) = (row.select(&LABEL).next(), row.select(&VALUE).next()) else {
            continue;
        };

        let label = element_text(label);
        let value = element_text(value);
        let slot = match normalize_label(&label).as_str() {
            "datum" => &mut detail.dates,
            "kategorie" => &mut detail.sub_league,
            "ort" => &mut detail.location,
            "modus" => &mut detail.mode,
            "max. teams" => &mut detail.max_teams,
            "angemeldete teams" => &mut detail.signed_up_teams,
            "veranstalter" => &mut detail.organiser,
            "telefon" => &mut detail.phone,
            "email" | "e-mail" => &mut detail.email,
            "web" | "homepage" => &mut detail.website,
            "nenngeld" => &mut detail.entry_fee,
            "punkte" => &mut detail.current_points,
            "anmeldeschluss" => &mut detail.end_registration,
            _ => {
                debug!("{}: ignoring info row {:?}", kind, label);
                continue;
            }
        };
        *slot = Some(value);
    }

    Ok(detail)
}

fn normalize_label(label: &str) -> String {
    label.trim().trim_end_matches(':').trim().to_lowercase()
}
