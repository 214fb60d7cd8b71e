// mathops - Math operations API with an LLM-backed chat endpoint
// Author: kelexine (https://github.com/kelexine)

pub mod calculator;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;
