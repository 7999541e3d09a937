pub mod client;
pub mod error;
pub mod html;
pub mod mapper;
pub mod migrate;
pub mod model;
pub mod normalize;

pub use error::{MigrateError, Result, ScrapeError};
pub use html::{parse_page, PageKind, ParsedPage};
pub use mapper::{map_page, MapContext, MappedPage};
pub use model::*;
