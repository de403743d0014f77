pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod record;

pub use error::EngineError;
pub use record::{Contact, DetailRecord, ExhibitorRecord, ExhibitorType};
