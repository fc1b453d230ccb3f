//! Keeps a [`dashcore`] store in sync with a model backend over HTTP.
//!
//! A [`Dashboard`] owns the store and a [`SnapshotFetcher`]; its actions
//! fetch, normalize and commit snapshots. [`PollHandle::spawn`] runs the
//! fixed-interval poll loop in the background until cancelled.

pub mod endpoints;
pub mod fetcher;
pub mod poll;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use endpoints::Endpoints;
pub use fetcher::{FetchError, FetchedSnapshot, SnapshotFetcher};
pub use poll::PollHandle;
pub use session::{Dashboard, DashboardOptions, PollOutcome, RefreshReport};
pub use transport::{BaseUrl, Environment, HttpTransport, Transport, TransportError};
