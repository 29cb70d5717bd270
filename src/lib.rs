pub mod assistant;
pub mod chunker;
pub mod cli;
pub mod config;
pub mod extract;
pub mod interpret;
pub mod model;
pub mod prompts;
pub mod render;
pub mod session;
pub mod util;
