//! Team / result table (`table.teams`)
//!
//! Cells: seed, result, player 1, player 2, total points, won points, prize money.
//! Deregistered teams carry the row class `abgemeldet`.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use super::{element_text, find_container, first_link, has_class, row_cells, selector, PageKind};
use crate::error::Result;

const COLUMNS: usize = 7;

lazy_static! {
    pub(crate) static ref CONTAINER: Selector = selector("table.teams");
    static ref ROW: Selector = selector("tbody tr");
}

/// A player name cell; both parts are empty for a vacant slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerCell {
    pub name: String,
    pub link: Option<String>,
}

impl PlayerCell {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.link.is_none()
    }
}

/// One raw team row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamRow {
    pub seed: String,
    pub result: String,
    pub player1: PlayerCell,
    pub player2: PlayerCell,
    pub total_points: String,
    pub won_points: String,
    pub prize_money: String,
    pub deregistered: bool,
}

pub(crate) fn parse(document: &Html) -> Result<Vec<TeamRow>> {
    let kind = PageKind::TeamTable;
    let table = find_container(document, kind, &CONTAINER, "team table")?;
    Ok(parse_table(kind, table))
}

/// Rows of a team table found inside another page
pub(crate) fn parse_table(kind: PageKind, table: ElementRef) -> Vec<TeamRow> {
    table
        .select(&ROW)
        .enumerate()
        .filter_map(|(index, row)| {
            row_cells(kind, row, index, COLUMNS).map(|cells| TeamRow {
                seed: element_text(cells[0]),
                result: element_text(cells[1]),
                player1: player_cell(cells[2]),
                player2: player_cell(cells[3]),
                total_points: element_text(cells[4]),
                won_points: element_text(cells[5]),
                prize_money: element_text(cells[6]),
                deregistered: has_class(row, "abgemeldet"),
            })
        })
        .collect()
}

fn player_cell(cell: ElementRef) -> PlayerCell {
    match first_link(cell) {
        Some((name, href)) => PlayerCell {
            name,
            link: Some(href),
        },
        None => PlayerCell {
            name: element_text(cell),
            link: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_team_table() {
        let html = include_str!("../../testdata/tournament-detail.html");
        let rows = parse(&Html::parse_document(html)).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].seed, "1");
        assert_eq!(rows[0].result, "1.");
        assert_eq!(rows[0].player1.name, "Horst Alexander");
        assert_eq!(rows[0].player1.link.as_deref(), Some("/beach/spieler/246"));
        assert_eq!(rows[0].player2.name, "Doppler Clemens");
        assert_eq!(rows[0].prize_money, "€ 1.200,00");
        assert!(!rows[0].deregistered);
        assert!(rows[3].deregistered);
    }

    #[test]
    fn test_vacant_player_slot() {
        let html = r#"
            <table class="teams"><tbody>
              <tr><td>5</td><td></td><td><a href="/beach/spieler/77">Muster Max</a></td><td></td><td>40</td><td></td><td></td></tr>
            </tbody></table>"#;
        let rows = parse(&Html::parse_document(html)).unwrap();
        assert!(!rows[0].player1.is_empty());
        assert!(rows[0].player2.is_empty());
    }
}
