pub mod config;
pub mod contributors;
pub mod download;
