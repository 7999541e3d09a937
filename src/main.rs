use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use scores_ingest::client::{Client, DEFAULT_BASE_URL};
use scores_ingest::migrate::{self, sqlite};
use scores_ingest::normalize::parse_date;
use scores_ingest::{map_page, parse_page, MapContext, PageKind, ParsedPage};

#[derive(Parser)]
#[command(name = "scores-ingest")]
#[command(version, about = "Scrape volleynet pages and manage the scores database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a saved HTML page and print its records as JSON
    Parse {
        /// Page layout: tournament-list, tournament-detail, ladder or team-table
        #[arg(value_parser = parse_kind)]
        kind: PageKind,

        /// HTML file
        input: PathBuf,

        #[command(flatten)]
        map: MapArgs,
    },

    /// Fetch a page from the site and print its records as JSON
    Fetch {
        #[arg(value_parser = parse_kind)]
        kind: PageKind,

        /// Page URL
        url: String,

        #[command(flatten)]
        map: MapArgs,
    },

    /// Fetch the ladder of one gender and print its players as JSON
    Ladder {
        /// Gender code, M or W
        #[arg(value_name = "GENDER")]
        sex: String,

        #[command(flatten)]
        map: MapArgs,
    },

    /// Fetch the tournaments of one league phase and print them as JSON
    Tournaments {
        /// League, e.g. "AMATEUR TOUR"
        league: String,

        /// Phase, e.g. "ABV Tour AMATEUR 1"
        phase: String,

        /// Gender code, M or W
        #[arg(value_name = "GENDER")]
        sex: String,

        season: u16,

        #[command(flatten)]
        map: MapArgs,
    },

    /// Apply all pending schema migrations
    Migrate {
        #[arg(long, env = "SCORES_DB")]
        db: PathBuf,
    },

    /// Delete all rows from the tables of the current schema version
    Reset {
        #[arg(long, env = "SCORES_DB")]
        db: PathBuf,
    },

    /// Print the current schema version
    Version {
        #[arg(long, env = "SCORES_DB")]
        db: PathBuf,
    },
}

#[derive(Args)]
struct MapArgs {
    /// Prefix for site-relative links
    #[arg(long, env = "VOLLEYNET_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Reference date (DD.MM.YYYY) for tournament status, defaults to today
    #[arg(long)]
    today: Option<String>,

    /// Tournament id for a standalone team table
    #[arg(long, default_value_t = 0)]
    tournament_id: u32,

    /// Gender code (M or W) for a standalone team table
    #[arg(long, default_value = "")]
    gender: String,
}

impl MapArgs {
    fn context(&self) -> Result<MapContext> {
        let today = match &self.today {
            Some(date) => parse_date("today", date)?,
            None => Local::now().date_naive(),
        };
        Ok(MapContext::new(self.base_url.clone(), today).with_tournament(self.tournament_id, self.gender.clone()))
    }
}

fn parse_kind(s: &str) -> std::result::Result<PageKind, String> {
    s.parse()
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { kind, input, map } => {
            let file = File::open(&input).with_context(|| format!("Failed to open {:?}", input))?;
            let page = parse_page(kind, BufReader::new(file))
                .with_context(|| format!("Failed to parse {:?}", input))?;
            print_records(&page, &map.context()?)?;
        }
        Commands::Fetch { kind, url, map } => {
            let client = Client::new(&map.base_url)?;
            fetch_and_print(&client, kind, &url, &map)?;
        }
        Commands::Ladder { sex, map } => {
            let client = Client::new(&map.base_url)?;
            let link = client.ladder_link(&sex);
            fetch_and_print(&client, PageKind::Ladder, &link, &map)?;
        }
        Commands::Tournaments {
            league,
            phase,
            sex,
            season,
            map,
        } => {
            let client = Client::new(&map.base_url)?;
            let link = client.tournament_list_link(&league, &phase, &sex, season);
            fetch_and_print(&client, PageKind::TournamentList, &link, &map)?;
        }
        Commands::Migrate { db } => {
            let mut conn = open_db(&db)?;
            let version = migrate::all(&mut conn).context("Migration failed")?;
            println!("Database {:?} is at schema v{}", db, version);
        }
        Commands::Reset { db } => {
            let conn = open_db(&db)?;
            migrate::reset_all(&conn).context("Reset failed")?;
            println!("Emptied tables of {:?}", db);
        }
        Commands::Version { db } => {
            let conn = open_db(&db)?;
            println!("{}", migrate::get_version(&conn)?);
        }
    }

    Ok(())
}

fn open_db(path: &Path) -> Result<rusqlite::Connection> {
    sqlite::open(path).with_context(|| format!("Failed to open database {:?}", path))
}

fn fetch_and_print(client: &Client, kind: PageKind, link: &str, map: &MapArgs) -> Result<()> {
    let page = client
        .fetch_page(kind, link)
        .with_context(|| format!("Failed to fetch {}", link))?;
    print_records(&page, &map.context()?)
}

fn print_records(page: &ParsedPage, ctx: &MapContext) -> Result<()> {
    let records = map_page(page, ctx)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
