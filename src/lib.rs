pub mod api;
pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod types;

pub use error::NexusError;
pub use router::{NexusState, nexus_router};
