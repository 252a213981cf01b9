pub mod config;
pub mod output;
pub mod paths;
pub mod runner;
