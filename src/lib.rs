#![forbid(unsafe_code)]

pub mod cli;
pub mod crawl;
pub mod driver;
pub mod export;
pub mod flatten;
pub mod listing;
pub mod logging;
pub mod page;
pub mod parse;
pub mod store;
