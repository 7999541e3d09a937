//! Blocking HTTP access to the volleynet site

use log::debug;
use std::time::Duration;
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::html::{parse_page, PageKind, ParsedPage};

pub const DEFAULT_BASE_URL: &str = "https://www.volleynet.at";
pub const DEFAULT_AMATEUR_PATH: &str = "beach/bewerbe/%s/phase/%s/sex/%s/saison/%s/information/all";

pub struct Client {
    http: reqwest::blocking::Client,
    pub base_url: String,
    pub amateur_path: String,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("scores-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            amateur_path: DEFAULT_AMATEUR_PATH.to_string(),
        })
    }

    /// Link to all tournaments of one league, phase, gender and season
    pub fn tournament_list_link(&self, league: &str, phase: &str, gender: &str, season: u16) -> String {
        let season = season.to_string();
        let path = [league, phase, gender, season.as_str()]
            .iter()
            .fold(self.amateur_path.clone(), |path, value| path.replacen("%s", value, 1));
        format!("{}/{}", self.base_url, path)
    }

    pub fn ladder_link(&self, gender: &str) -> String {
        format!("{}/beach/rangliste/sex/{}", self.base_url, gender)
    }

    /// Raw body of `link`
    pub fn fetch(&self, link: &str) -> Result<Vec<u8>> {
        let url = Url::parse(link)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "de-AT,de;q=0.9")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: link.to_string(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    /// Fetch `link` and extract the rows for `kind`
    pub fn fetch_page(&self, kind: PageKind, link: &str) -> Result<ParsedPage> {
        let body = self.fetch(link)?;
        parse_page(kind, body.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        let client = Client::new("http://example.com/").unwrap();

        assert_eq!(
            client.tournament_list_link("AMATEUR TOUR", "ABV Tour AMATEUR 1", "M", 2018),
            "http://example.com/beach/bewerbe/AMATEUR TOUR/phase/ABV Tour AMATEUR 1/sex/M/saison/2018/information/all"
        );
        assert_eq!(client.ladder_link("W"), "http://example.com/beach/rangliste/sex/W");
    }

    #[test]
    fn test_fetch_rejects_invalid_url() {
        let client = Client::new(DEFAULT_BASE_URL).unwrap();
        assert!(matches!(client.fetch("not a url"), Err(ScrapeError::Url(_))));
    }

    #[test]
    #[ignore] // Requires network access
    fn test_fetch_ladder() {
        let client = Client::new(DEFAULT_BASE_URL).unwrap();
        let page = client.fetch_page(PageKind::Ladder, &client.ladder_link("M"));
        assert!(page.is_ok());
    }
}
