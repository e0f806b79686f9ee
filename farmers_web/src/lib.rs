//! Web client for the Local Farmers API: health polling and landing page rendering.

pub mod client;
pub mod config;
pub mod error;
pub mod poller;
pub mod status;
pub mod view;

pub use client::{HealthClient, Reachability};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use poller::{PendingCheck, StatusPoller};
pub use status::{HealthStatus, StatusState, StatusTone};
