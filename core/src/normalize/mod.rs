pub mod options;
pub mod traces;

pub use options::reconcile_options;
pub use traces::{normalize, visibility_for, LEGEND_ONLY_GROUP, MAX_VISIBLE_VARIABLES};
