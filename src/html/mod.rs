//! Extraction of raw rows from the site's known page layouts.
//!
//! Each page kind has a fixed container element. A missing container is a
//! hard [`ScrapeError::Parse`]; individual rows that do not have the expected
//! number of cells are skipped with a warning.

pub mod ladder;
pub mod teams;
pub mod tournament;
pub mod tournament_list;

use log::warn;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::error::{Result, ScrapeError};

pub use ladder::{LadderPage, LadderRow};
pub use teams::{PlayerCell, TeamRow};
pub use tournament::TournamentDetail;
pub use tournament_list::TournamentListRow;

/// Which known layout a document follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    TournamentList,
    TournamentDetail,
    Ladder,
    TeamTable,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::TournamentList,
        PageKind::TournamentDetail,
        PageKind::Ladder,
        PageKind::TeamTable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::TournamentList => "tournament-list",
            PageKind::TournamentDetail => "tournament-detail",
            PageKind::Ladder => "ladder",
            PageKind::TeamTable => "team-table",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown page kind: {}", s))
    }
}

/// Rows extracted from one document, tagged by page kind
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPage {
    TournamentList(Vec<TournamentListRow>),
    TournamentDetail(TournamentDetail),
    Ladder(LadderPage),
    TeamTable(Vec<TeamRow>),
}

impl ParsedPage {
    pub fn kind(&self) -> PageKind {
        match self {
            ParsedPage::TournamentList(_) => PageKind::TournamentList,
            ParsedPage::TournamentDetail(_) => PageKind::TournamentDetail,
            ParsedPage::Ladder(_) => PageKind::Ladder,
            ParsedPage::TeamTable(_) => PageKind::TeamTable,
        }
    }
}

/// Read one HTML document from `reader` and extract the rows for `kind`
pub fn parse_page<R: Read>(kind: PageKind, mut reader: R) -> Result<ParsedPage> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let html = match String::from_utf8(bytes) {
        Ok(html) => html,
        Err(e) => {
            warn!("{} document is not valid UTF-8, replacing invalid bytes", kind);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    parse_html(kind, &html)
}

/// Same as [`parse_page`] for a document that is already in memory
pub fn parse_html(kind: PageKind, html: &str) -> Result<ParsedPage> {
    let document = Html::parse_document(html);

    match kind {
        PageKind::TournamentList => tournament_list::parse(&document).map(ParsedPage::TournamentList),
        PageKind::TournamentDetail => tournament::parse(&document).map(ParsedPage::TournamentDetail),
        PageKind::Ladder => ladder::parse(&document).map(ParsedPage::Ladder),
        PageKind::TeamTable => teams::parse(&document).map(ParsedPage::TeamTable),
    }
}

/// Build a selector from a constant pattern
pub(crate) fn selector(pattern: &str) -> Selector {
    Selector::parse(pattern).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", pattern, e))
}

/// Locate the container a page kind cannot do without
pub(crate) fn find_container<'a>(
    document: &'a Html,
    kind: PageKind,
    container: &Selector,
    description: &str,
) -> Result<ElementRef<'a>> {
    document
        .select(container)
        .next()
        .ok_or_else(|| ScrapeError::parse(kind, format!("{} not found", description)))
}

/// Text content with whitespace (including `&nbsp;`) collapsed
pub(crate) fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text and href of the first link inside `element`
pub(crate) fn first_link(element: ElementRef) -> Option<(String, String)> {
    lazy_static::lazy_static! {
        static ref LINK: Selector = selector("a[href]");
    }

    element.select(&LINK).next().and_then(|link| {
        link.value()
            .attr("href")
            .map(|href| (element_text(link), href.trim().to_string()))
    })
}

pub(crate) fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c.eq_ignore_ascii_case(class))
}

/// Markers the site uses for cancelled tournaments, as class or text
const CANCEL_MARKERS: [&str; 3] = ["abgesagt", "cancelled", "canceled"];

/// Whether `element` or anything inside it carries a cancel marker
pub(crate) fn is_canceled(element: ElementRef) -> bool {
    let text = element_text(element).to_lowercase();
    let marked = |el: ElementRef| CANCEL_MARKERS.iter().any(|marker| has_class(el, marker));

    marked(element)
        || element.descendants().filter_map(ElementRef::wrap).any(marked)
        || CANCEL_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Cells of a data row, or `None` (with a warning) if the count is off
pub(crate) fn row_cells<'a>(
    kind: PageKind,
    row: ElementRef<'a>,
    index: usize,
    expected: usize,
) -> Option<Vec<ElementRef<'a>>> {
    lazy_static::lazy_static! {
        static ref CELL: Selector = selector("td");
    }

    let cells: Vec<ElementRef> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| CELL.matches(el))
        .collect();

    if cells.len() == expected {
        Some(cells)
    } else {
        warn!(
            "{}: skipping row {} with {} cells (expected {})",
            kind,
            index + 1,
            cells.len(),
            expected
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_markers() {
        let html = Html::parse_fragment(
            r#"<div id="a" class="Abgesagt"></div>
               <div id="b"><span class="canceled">x</span></div>
               <div id="c">Turnier ABGESAGT</div>
               <div id="d">Turnier findet statt</div>"#,
        );
        let canceled = |id: &str| {
            let sel = selector(&format!("div#{}", id));
            is_canceled(html.select(&sel).next().unwrap())
        };

        assert!(canceled("a"));
        assert!(canceled("b"));
        assert!(canceled("c"));
        assert!(!canceled("d"));
    }

    #[test]
    fn test_page_kind_names() {
        for kind in PageKind::ALL {
            assert_eq!(kind.as_str().parse::<PageKind>(), Ok(kind));
        }
        assert!("ranking".parse::<PageKind>().is_err());
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let document = Html::parse_fragment("<p>  Herren\n\t Graz&nbsp;&nbsp;Open </p>");
        let p = document.select(&selector("p")).next().unwrap();
        assert_eq!(element_text(p), "Herren Graz Open");
    }

    #[test]
    fn test_missing_container_is_parse_error() {
        let html = "<html><body><p>Wartungsarbeiten</p></body></html>";
        for kind in PageKind::ALL {
            match parse_html(kind, html) {
                Err(ScrapeError::Parse { kind: failed, .. }) => assert_eq!(failed, kind),
                other => panic!("expected parse error for {}, got {:?}", kind, other),
            }
        }
    }

    #[test]
    fn test_parse_page_reads_stream() {
        let html = include_str!("../../testdata/tournament-list-amateur.html");
        let page = parse_page(PageKind::TournamentList, html.as_bytes()).unwrap();
        assert_eq!(page.kind(), PageKind::TournamentList);
    }

    #[test]
    fn test_parse_page_tolerates_invalid_utf8() {
        let mut bytes = include_str!("../../testdata/ladder-men.html").as_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        let page = parse_page(PageKind::Ladder, bytes.as_slice()).unwrap();
        assert_eq!(page.kind(), PageKind::Ladder);
    }
}
