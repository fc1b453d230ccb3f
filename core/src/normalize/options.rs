use crate::schema::options::{OptionsPayload, VarOptions};
use std::collections::BTreeMap;

/// Builds the next `vars_data` map, carrying each option's `ishidden`
/// preference over from `previous`; new options start hidden.
pub fn reconcile_options(
    payload: OptionsPayload,
    previous: &BTreeMap<String, VarOptions>,
) -> BTreeMap<String, VarOptions> {
    payload
        .entries
        .into_iter()
        .map(|(name, attributes)| {
            let ishidden = previous
                .get(&name)
                .map(|existing| existing.ishidden)
                .unwrap_or(true);
            (
                name,
                VarOptions {
                    ishidden,
                    attributes,
                },
            )
        })
        .collect()
}
