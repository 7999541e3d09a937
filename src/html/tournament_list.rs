//! Tournament list (`/beach/bewerbe/...`)
//!
//! Layout: `table.bewerbe`, one `tbody tr` per tournament with the cells
//! date range, name link, category and registration link.

use lazy_static::lazy_static;
use log::warn;
use scraper::{Html, Selector};

use super::{element_text, find_container, first_link, is_canceled, row_cells, selector, PageKind};
use crate::error::Result;

const COLUMNS: usize = 4;

lazy_static! {
    static ref CONTAINER: Selector = selector("table.bewerbe");
    static ref ROW: Selector = selector("tbody tr");
    static ref ENTRY_LINK: Selector = selector("a.anmelden[href]");
}

/// One raw tournament row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TournamentListRow {
    pub dates: String,
    pub name: String,
    /// Site-relative tournament link
    pub link: String,
    pub sub_league: String,
    pub entry_link: Option<String>,
    pub canceled: bool,
}

pub(crate) fn parse(document: &Html) -> Result<Vec<TournamentListRow>> {
    let kind = PageKind::TournamentList;
    let table = find_container(document, kind, &CONTAINER, "tournament table")?;

    let mut rows = Vec::new();

    for (index, row) in table.select(&ROW).enumerate() {
        let Some(cells) = row_cells(kind, row, index, COLUMNS) else {
            continue;
        };

        let Some((name, link)) = first_link(cells[1]) else {
            warn!("{}: skipping row {} without tournament link", kind, index + 1);
            continue;
        };

        let entry_link = cells[3]
            .select(&ENTRY_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty());

        rows.push(TournamentListRow {
            dates: element_text(cells[0]),
            name,
            link,
            sub_league: element_text(cells[2]),
            entry_link,
            canceled: is_canceled(row),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fixture() -> Vec<TournamentListRow> {
        let html = include_str!("../../testdata/tournament-list-amateur.html");
        parse(&Html::parse_document(html)).unwrap()
    }

    #[test]
    fn test_rows_in_document_order() {
        let rows = parse_fixture();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Herren Beachvolley Wien Summer Opening",
                "Herren Graz",
                "Herren Beachvolley Grieskirchen",
                "Herren Innsbruck",
            ]
        );
    }

    #[test]
    fn test_row_fields() {
        let rows = parse_fixture();

        assert_eq!(rows[1].dates, "21.04.2018 - 22.04.2018");
        assert_eq!(
            rows[1].link,
            "/beach/bewerbe/AMATEUR TOUR/phase/ABV Tour AMATEUR 1/sex/M/saison/2018/cup/21880"
        );
        assert_eq!(rows[1].sub_league, "AMATEUR 1");
        assert_eq!(rows[1].entry_link, None);
        assert!(!rows[1].canceled);

        assert_eq!(
            rows[2].entry_link.as_deref(),
            Some("https://beach.volleynet.at/Anmelden/21617-22055-00")
        );
        assert!(rows[3].canceled);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let html = r#"
            <table class="bewerbe"><tbody>
              <tr><td colspan="4">Saison 2018</td></tr>
              <tr>
                <td>06.05.2018</td>
                <td><a href="/beach/bewerbe/AMATEUR TOUR/phase/ABV Tour AMATEUR 1/sex/W/saison/2018/cup/22056">Damen Grieskirchen</a></td>
                <td>AMATEUR 1</td>
                <td></td>
              </tr>
              <tr><td>07.05.2018</td><td>ohne Link</td><td>AMATEUR 1</td><td></td></tr>
            </tbody></table>"#;

        let rows = parse(&Html::parse_document(html)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Damen Grieskirchen");
    }

    #[test]
    fn test_empty_table_has_no_rows() {
        let html = r#"<table class="bewerbe"><thead><tr><th>Datum</th></tr></thead></table>"#;
        assert!(parse(&Html::parse_document(html)).unwrap().is_empty());
    }
}
