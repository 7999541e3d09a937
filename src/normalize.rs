//! Conversion of raw cell text and link attributes into typed values

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, ScrapeError};

/// Date format used throughout the site (`DD.MM.YYYY`)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

lazy_static! {
    static ref DATE: Regex = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap();
    static ref DATE_RANGE: Regex =
        Regex::new(r"^(\d{2}\.\d{2}\.\d{4})(?:\s*-\s*(\d{2}\.\d{2}\.\d{4}))?$").unwrap();
    static ref TRAILING_ID: Regex = Regex::new(r"(\d+)/?$").unwrap();
    static ref TOURNAMENT_PATH: Regex = Regex::new(
        r"/bewerbe/([^/]+)/phase/([^/]+)/sex/([^/]+)/saison/(\d{4})/cup/(\d+)/?$"
    )
    .unwrap();
}

/// Parse a single `DD.MM.YYYY` date
pub fn parse_date(field: &'static str, text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    if !DATE.is_match(text) {
        return Err(ScrapeError::field(field, text));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| ScrapeError::field(field, text))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date cell holding either one date or `start - end`.
///
/// An empty cell yields `None`; anything else that is not a valid range
/// (including an end before the start) is a field error.
pub fn parse_date_range(field: &'static str, text: &str) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let caps = DATE_RANGE
        .captures(text)
        .ok_or_else(|| ScrapeError::field(field, text))?;

    let start = parse_date(field, &caps[1])?;
    let end = match caps.get(2) {
        Some(m) => parse_date(field, m.as_str())?,
        None => start,
    };

    if end < start {
        return Err(ScrapeError::field(field, text));
    }

    Ok(Some((start, end)))
}

/// Parse a required base-10 integer. A trailing `.` (ordinal ranks like `3.`) is accepted.
pub fn parse_int(field: &'static str, text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let digits = trimmed.strip_suffix('.').unwrap_or(trimmed);
    digits
        .parse::<u32>()
        .map_err(|_| ScrapeError::field(field, trimmed))
}

/// Like [`parse_int`], but an empty cell defaults to 0
pub fn parse_optional_int(field: &'static str, text: &str) -> Result<u32> {
    if text.trim().is_empty() {
        return Ok(0);
    }
    parse_int(field, text)
}

/// Parse an amount in the site's locale (`€ 1.200,50`). Empty cells and `-` are 0.
pub fn parse_money(field: &'static str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let amount = trimmed
        .trim_start_matches('€')
        .trim_end_matches('€')
        .trim()
        .trim_end_matches(",-");

    if amount.is_empty() || amount == "-" {
        return Ok(0.0);
    }

    if !amount
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return Err(ScrapeError::field(field, trimmed));
    }

    amount
        .replace('.', "")
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ScrapeError::field(field, trimmed))
}

/// Extract the numeric id at the end of a site link (`/beach/spieler/246`, `...?id=246`)
pub fn id_from_link(field: &'static str, href: &str) -> Result<u32> {
    let href = href.trim();
    let caps = TRAILING_ID
        .captures(href)
        .ok_or_else(|| ScrapeError::field(field, href))?;
    caps[1]
        .parse::<u32>()
        .map_err(|_| ScrapeError::field(field, href))
}

/// Components encoded in a tournament link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentPath {
    pub league: String,
    pub phase: String,
    pub gender: String,
    pub season: u16,
    pub id: u32,
}

/// Decode `/beach/bewerbe/<league>/phase/<phase>/sex/<gender>/saison/<year>/cup/<id>`
pub fn parse_tournament_link(href: &str) -> Result<TournamentPath> {
    let href = href.trim();
    let caps = TOURNAMENT_PATH
        .captures(href)
        .ok_or_else(|| ScrapeError::field("link", href))?;

    let gender = caps[3].to_string();
    if gender_label(&gender).is_none() {
        return Err(ScrapeError::field("gender", gender));
    }

    Ok(TournamentPath {
        league: caps[1].trim().to_string(),
        phase: caps[2].trim().to_string(),
        gender,
        season: caps[4]
            .parse()
            .map_err(|_| ScrapeError::field("season", &caps[4]))?,
        id: caps[5]
            .parse()
            .map_err(|_| ScrapeError::field("id", &caps[5]))?,
    })
}

/// Map a page heading (`Rangliste Herren`) to the site's gender code
pub fn gender_from_heading(heading: &str) -> Option<&'static str> {
    let heading = heading.to_lowercase();
    if heading.contains("herren") || heading.contains("männer") {
        Some("M")
    } else if heading.contains("damen") || heading.contains("frauen") {
        Some("W")
    } else {
        None
    }
}

fn gender_label(code: &str) -> Option<&'static str> {
    match code {
        "M" => Some("Herren"),
        "W" => Some("Damen"),
        _ => None,
    }
}

/// Split a `Last First [Middle]` display name into `(first, last)`
pub fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let last = parts.next().unwrap_or_default().to_string();
    let first = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// URL-safe, lowercase, hyphenated form of a name. Idempotent.
///
/// Letters are decomposed (NFKD) and their combining marks dropped, so
/// `Brașov` becomes `brasov`. Letters from other scripts are kept lowercased.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;

    let letters = s
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect::<String>();

    for c in letters.chars() {
        let folded = match fold_letter(c) {
            Some(folded) => folded,
            None if c.is_alphanumeric() => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
                continue;
            }
            None => {
                pending_dash = true;
                continue;
            }
        };

        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push_str(folded);
    }

    slug
}

/// Letters without a canonical decomposition
fn fold_letter(c: char) -> Option<&'static str> {
    match c {
        'ß' => Some("ss"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ø' => Some("o"),
        'ł' => Some("l"),
        'đ' => Some("d"),
        _ => None,
    }
}
