// podcast-api: Async Rust client for the podcast backend

pub mod activity;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use activity::{ActivityGuard, ActivityTracker, Tracked};
pub use client::{ApiClient, Fetch};
pub use error::Error;
pub use models::{RawEpisode, RawPodcast};
pub use transport::TransportConfig;
