//! Player ladder (`table.rangliste`)

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use super::{element_text, find_container, first_link, row_cells, selector, PageKind};
use crate::error::Result;

const COLUMNS: usize = 5;

lazy_static! {
    static ref CONTAINER: Selector = selector("table.rangliste");
    static ref HEADING: Selector = selector("h1");
    static ref ROW: Selector = selector("tbody tr");
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LadderPage {
    /// Page heading, which names the ladder's gender
    pub heading: String,
    pub rows: Vec<LadderRow>,
}

/// One raw ladder row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LadderRow {
    pub rank: String,
    pub name: String,
    pub link: Option<String>,
    pub country_union: String,
    pub club: String,
    pub points: String,
}

pub(crate) fn parse(document: &Html) -> Result<LadderPage> {
    let kind = PageKind::Ladder;
    let table = find_container(document, kind, &CONTAINER, "ladder table")?;

    let heading = document
        .select(&HEADING)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let rows = table
        .select(&ROW)
        .enumerate()
        .filter_map(|(index, row)| row_cells(kind, row, index, COLUMNS))
        .map(|cells| {
            let (name, link) = match first_link(cells[1]) {
                Some((name, href)) => (name, Some(href)),
                None => (element_text(cells[1]), None),
            };

            LadderRow {
                rank: element_text(cells[0]),
                name,
                link,
                country_union: element_text(cells[2]),
                club: element_text(cells[3]),
                points: element_text(cells[4]),
            }
        })
        .collect();

    Ok(LadderPage { heading, rows })
}
