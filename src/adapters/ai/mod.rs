pub mod balance;
pub mod cache;
pub mod icebreakers;
pub mod json;
pub mod provider;
pub mod team_names;

pub use cache::CachedTextService;
pub use provider::{test_connection, AiProvider, ConnectionReport, HttpTextService};
