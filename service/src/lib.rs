pub mod config;
pub mod dto;
pub mod error;
pub mod mutation;
pub mod notify;
pub mod query;
pub mod report;
pub mod scoring;
pub mod sheets;

pub use mutation::*;
pub use query::*;
