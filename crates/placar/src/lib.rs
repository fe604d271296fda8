pub mod clean;
pub mod export;
pub mod parser;
pub mod scraper;
pub mod tally;
pub mod types;

pub use scraper::{ScraperError, WebScraper};
pub use types::{VoteRecord, VoteResult};
