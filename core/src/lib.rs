//! Core state and data handling for the live model dashboard.
//!
//! Backend responses are validated by [`schema`], flattened into plot
//! [`trace::Trace`]s by [`normalize`], and kept in the reducer-driven
//! [`store`]. Nothing in this crate performs I/O.

pub mod normalize;
pub mod prelude;
pub mod schema;
pub mod store;
pub mod telemetry;
pub mod trace;

pub use prelude::{ModelData, SchemaError, SchemaResult};
pub use store::{DashboardState, Mutation, Store};
pub use trace::{Trace, TraceMode, Visibility};
