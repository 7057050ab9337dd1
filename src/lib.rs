pub use client::{RunReport, SyncClient};
pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use store::{DocumentStore, MemoryStore, WriteOp};
pub use sync::SyncStats;

pub mod classify;
mod client;
pub mod config;
mod country;
mod daily;
mod error;
pub mod ident;
pub mod model;
pub(crate) mod scraper;
pub mod store;
mod sync;
