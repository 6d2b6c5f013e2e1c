pub mod aggregators;
pub mod config;
pub mod counter;
pub mod output;
pub mod parser;
pub mod record;
