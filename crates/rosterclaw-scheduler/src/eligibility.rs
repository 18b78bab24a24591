//! Group eligibility — which groups a scheduling run may touch.

use rosterclaw_core::error::{Result, RosterError};
use rosterclaw_core::model::Group;
use rosterclaw_core::traits::Catalog;

/// Resolve the groups eligible for auto-scheduling under `group_type_id`.
///
/// A group qualifies when it is active, not archived, has a parent group,
/// its type has scheduling enabled, and it has not opted out via
/// `disable_scheduling`. With `attribute_key` set, the group's boolean
/// attribute must also resolve to true; an unresolvable attribute excludes
/// the group without erroring.
///
/// An unknown group type is a configuration error and aborts the run
/// before any occurrence work.
pub fn eligible_groups<C: Catalog>(
    catalog: &C,
    group_type_id: i64,
    attribute_key: Option<&str>,
) -> Result<Vec<Group>> {
    let Some(group_type) = catalog.group_type(group_type_id)? else {
        return Err(RosterError::Config(format!(
            "Group type {group_type_id} not found"
        )));
    };
    if !group_type.is_scheduling_enabled {
        tracing::debug!(
            "Group type '{}' does not have scheduling enabled",
            group_type.name
        );
        return Ok(Vec::new());
    }

    let mut eligible = Vec::new();
    for group in catalog.groups_of_type(group_type_id)? {
        if !group.is_schedulable() {
            continue;
        }
        if let Some(key) = attribute_key {
            match catalog.group_bool_attribute(group.id, key)? {
                Some(true) => {}
                _ => {
                    tracing::debug!("Group '{}' filtered out by attribute '{key}'", group.name);
                    continue;
                }
            }
        }
        eligible.push(group);
    }
    Ok(eligible)
}
