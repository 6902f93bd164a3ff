pub mod classifier;
pub mod config;
pub mod error;
pub mod field;
pub mod gate;
pub mod git;
pub mod io;
pub mod mapper;
pub mod migration;
pub mod paths;
pub mod plan;
pub mod probe;
pub mod resource;
pub mod scaffold;
pub mod types;

pub use error::{KccError, Result};
