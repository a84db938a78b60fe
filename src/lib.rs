pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod finder;
pub mod models;
pub mod outcome;
pub mod pipeline;
pub mod presentation;
pub mod prompt;
pub mod ranking;
pub mod youtube;
