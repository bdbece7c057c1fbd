pub mod config;
pub mod model;
pub mod output;
pub mod parser;
pub mod references;

pub use config::Config;
pub use model::{Addressee, Finding, IvilReport, Sender};
pub use parser::NbeParser;
