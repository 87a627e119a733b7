pub mod app;
pub mod cli;
pub mod logging;
pub mod profile;
pub mod report;
pub mod utils;
