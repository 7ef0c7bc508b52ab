//! Pure resolution of preset permission sets against per-business overrides.
//!
//! The functions here are deterministic and do no I/O: callers load the
//! preset and the override list and get back the effective permission set
//! plus a customization summary. Malformed stored data never fails a read;
//! it is surfaced as [`ResolutionAnomaly`] diagnostics instead.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tillboard_core::PermissionId;

use crate::{OverridePolarity, PermissionOverride};

/// Why a permission is part of the effective set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionSource {
    /// Granted by the position preset.
    Preset,
    /// Granted by an `ADD` override of this business.
    Override,
}

/// Data-integrity finding reported by the resolution engine.
///
/// Anomalies indicate a write-time bug or stale catalog reference. They are
/// diagnostics only; the resolution result stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionAnomaly {
    /// More than one override stored for the same permission key.
    DuplicateOverride {
        /// Permission named by the conflicting overrides.
        permission_id: PermissionId,
    },
    /// A `REMOVE` override references a permission the preset never granted.
    RemoveOutsidePreset {
        /// Permission named by the override.
        permission_id: PermissionId,
    },
    /// An `ADD` override references a permission the preset already grants.
    AddAlreadyInPreset {
        /// Permission named by the override.
        permission_id: PermissionId,
    },
    /// An effective permission references an id no longer in the catalog.
    UnknownPermission {
        /// The dangling permission reference.
        permission_id: PermissionId,
    },
}

/// Result of resolving one `(business, position)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveResolution {
    /// Effective permissions, each tagged with its grant source.
    pub permissions: BTreeMap<PermissionId, PermissionSource>,
    /// Preset permissions revoked by `REMOVE` overrides.
    pub removed_from_preset: BTreeSet<PermissionId>,
    /// Permissions granted beyond the preset by `ADD` overrides.
    pub added_extra: BTreeSet<PermissionId>,
    /// True when at least one override exists for the pair.
    pub is_customized: bool,
    /// Data-integrity findings; empty for well-formed stores.
    pub anomalies: Vec<ResolutionAnomaly>,
}

impl EffectiveResolution {
    /// Returns the effective permission identifiers without source tags.
    #[must_use]
    pub fn permission_ids(&self) -> BTreeSet<PermissionId> {
        self.permissions.keys().copied().collect()
    }
}

/// Combines a position preset with one business's overrides.
///
/// `effective = (preset \ removes) ∪ adds`. A `REMOVE` override always wins
/// over preset membership; when duplicate overrides conflict on the same
/// permission the revocation also wins, and the conflict is reported rather
/// than silently resolved.
#[must_use]
pub fn resolve_effective(
    preset: &BTreeSet<PermissionId>,
    overrides: &[PermissionOverride],
) -> EffectiveResolution {
    let mut add_set: BTreeSet<PermissionId> = BTreeSet::new();
    let mut remove_set: BTreeSet<PermissionId> = BTreeSet::new();
    let mut seen: BTreeSet<PermissionId> = BTreeSet::new();
    let mut duplicates: BTreeSet<PermissionId> = BTreeSet::new();

    for record in overrides {
        if !seen.insert(record.permission_id) {
            duplicates.insert(record.permission_id);
        }
        match record.polarity {
            OverridePolarity::Add => {
                add_set.insert(record.permission_id);
            }
            OverridePolarity::Remove => {
                remove_set.insert(record.permission_id);
            }
        }
    }

    let mut anomalies: Vec<ResolutionAnomaly> = duplicates
        .iter()
        .map(|permission_id| ResolutionAnomaly::DuplicateOverride {
            permission_id: *permission_id,
        })
        .collect();

    for permission_id in remove_set.difference(preset) {
        anomalies.push(ResolutionAnomaly::RemoveOutsidePreset {
            permission_id: *permission_id,
        });
    }

    for permission_id in add_set.intersection(preset) {
        anomalies.push(ResolutionAnomaly::AddAlreadyInPreset {
            permission_id: *permission_id,
        });
    }

    let mut permissions: BTreeMap<PermissionId, PermissionSource> = BTreeMap::new();
    for permission_id in preset {
        if !remove_set.contains(permission_id) {
            permissions.insert(*permission_id, PermissionSource::Preset);
        }
    }
    for permission_id in &add_set {
        if remove_set.contains(permission_id) {
            // Conflicting duplicate: the revocation wins.
            continue;
        }
        permissions
            .entry(*permission_id)
            .or_insert(PermissionSource::Override);
    }

    EffectiveResolution {
        permissions,
        removed_from_preset: remove_set.intersection(preset).copied().collect(),
        added_extra: add_set.difference(preset).copied().collect(),
        is_customized: !overrides.is_empty(),
        anomalies,
    }
}

/// Permissions eligible for a fresh `ADD` override.
///
/// Preset members are excluded even when currently revoked: adding one of
/// those back is a restore, not an add.
#[must_use]
pub fn available_to_add(
    catalog: &BTreeSet<PermissionId>,
    preset: &BTreeSet<PermissionId>,
    add_set: &BTreeSet<PermissionId>,
) -> BTreeSet<PermissionId> {
    catalog
        .iter()
        .filter(|permission_id| !preset.contains(permission_id) && !add_set.contains(permission_id))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use tillboard_core::{BusinessId, PermissionId, PositionId};
    use uuid::Uuid;

    use crate::{OverridePolarity, PermissionOverride};

    use super::{
        PermissionSource, ResolutionAnomaly, available_to_add, resolve_effective,
    };

    fn permission_id(index: u32) -> PermissionId {
        PermissionId::from_uuid(Uuid::from_u128(u128::from(index) + 1))
    }

    fn record(permission: PermissionId, polarity: OverridePolarity) -> PermissionOverride {
        PermissionOverride {
            business_id: BusinessId::from_uuid(Uuid::from_u128(0xB)),
            position_id: PositionId::from_uuid(Uuid::from_u128(0xC)),
            permission_id: permission,
            polarity,
        }
    }

    fn ids(values: &[u32]) -> BTreeSet<PermissionId> {
        values.iter().copied().map(permission_id).collect()
    }

    #[test]
    fn no_overrides_yields_preset_unchanged() {
        let preset = ids(&[1, 2]);
        let resolved = resolve_effective(&preset, &[]);

        assert_eq!(resolved.permission_ids(), preset);
        assert!(!resolved.is_customized);
        assert!(resolved.removed_from_preset.is_empty());
        assert!(resolved.added_extra.is_empty());
        assert!(resolved.anomalies.is_empty());
        assert!(
            resolved
                .permissions
                .values()
                .all(|source| *source == PermissionSource::Preset)
        );
    }

    #[test]
    fn add_override_extends_preset_and_is_tagged() {
        let preset = ids(&[1, 2]);
        let resolved = resolve_effective(
            &preset,
            &[record(permission_id(3), OverridePolarity::Add)],
        );

        assert_eq!(resolved.permission_ids(), ids(&[1, 2, 3]));
        assert_eq!(resolved.added_extra, ids(&[3]));
        assert!(resolved.is_customized);
        assert_eq!(
            resolved.permissions.get(&permission_id(3)),
            Some(&PermissionSource::Override)
        );
        assert_eq!(
            resolved.permissions.get(&permission_id(1)),
            Some(&PermissionSource::Preset)
        );
    }

    #[test]
    fn remove_override_wins_over_preset_membership() {
        let preset = ids(&[1, 2]);
        let resolved = resolve_effective(
            &preset,
            &[record(permission_id(2), OverridePolarity::Remove)],
        );

        assert_eq!(resolved.permission_ids(), ids(&[1]));
        assert_eq!(resolved.removed_from_preset, ids(&[2]));
        assert!(resolved.is_customized);
        assert!(resolved.anomalies.is_empty());
    }

    #[test]
    fn mixed_overrides_match_set_formula() {
        let preset = ids(&[1, 2, 3]);
        let resolved = resolve_effective(
            &preset,
            &[
                record(permission_id(2), OverridePolarity::Remove),
                record(permission_id(9), OverridePolarity::Add),
            ],
        );

        assert_eq!(resolved.permission_ids(), ids(&[1, 3, 9]));
        assert_eq!(resolved.removed_from_preset, ids(&[2]));
        assert_eq!(resolved.added_extra, ids(&[9]));
    }

    #[test]
    fn resolution_ignores_override_ordering() {
        let preset = ids(&[1, 2, 3]);
        let forward = [
            record(permission_id(3), OverridePolarity::Remove),
            record(permission_id(7), OverridePolarity::Add),
            record(permission_id(8), OverridePolarity::Add),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(
            resolve_effective(&preset, &forward),
            resolve_effective(&preset, &reversed)
        );
    }

    #[test]
    fn duplicate_overrides_are_reported_not_swallowed() {
        let preset = ids(&[1]);
        let resolved = resolve_effective(
            &preset,
            &[
                record(permission_id(1), OverridePolarity::Remove),
                record(permission_id(1), OverridePolarity::Add),
            ],
        );

        assert!(resolved.anomalies.contains(
            &ResolutionAnomaly::DuplicateOverride {
                permission_id: permission_id(1),
            }
        ));
        // The revocation wins the conflict.
        assert!(!resolved.permission_ids().contains(&permission_id(1)));
    }

    #[test]
    fn remove_outside_preset_is_flagged_but_read_succeeds() {
        let preset = ids(&[1]);
        let resolved = resolve_effective(
            &preset,
            &[record(permission_id(5), OverridePolarity::Remove)],
        );

        assert_eq!(resolved.permission_ids(), ids(&[1]));
        assert!(resolved.removed_from_preset.is_empty());
        assert_eq!(
            resolved.anomalies,
            vec![ResolutionAnomaly::RemoveOutsidePreset {
                permission_id: permission_id(5),
            }]
        );
    }

    #[test]
    fn add_already_in_preset_is_flagged_and_keeps_preset_tag() {
        let preset = ids(&[1]);
        let resolved = resolve_effective(
            &preset,
            &[record(permission_id(1), OverridePolarity::Add)],
        );

        assert_eq!(resolved.permission_ids(), ids(&[1]));
        assert_eq!(
            resolved.permissions.get(&permission_id(1)),
            Some(&PermissionSource::Preset)
        );
        assert_eq!(
            resolved.anomalies,
            vec![ResolutionAnomaly::AddAlreadyInPreset {
                permission_id: permission_id(1),
            }]
        );
    }

    #[test]
    fn available_to_add_excludes_preset_and_existing_adds() {
        let catalog = ids(&[1, 2, 3, 4]);
        let preset = ids(&[1, 2]);
        let add_set = ids(&[3]);

        assert_eq!(available_to_add(&catalog, &preset, &add_set), ids(&[4]));
    }

    #[test]
    fn available_to_add_excludes_removed_preset_permissions() {
        // A revoked preset permission is still a preset permission; adding it
        // back goes through restore, never through a fresh ADD.
        let catalog = ids(&[1, 2, 3]);
        let preset = ids(&[1, 2]);

        assert_eq!(
            available_to_add(&catalog, &preset, &BTreeSet::new()),
            ids(&[3])
        );
    }

    fn arbitrary_ids() -> impl Strategy<Value = BTreeSet<PermissionId>> {
        proptest::collection::btree_set(0u32..16, 0..8)
            .prop_map(|values| values.into_iter().map(permission_id).collect())
    }

    proptest! {
        #[test]
        fn effective_matches_set_formula(
            preset in arbitrary_ids(),
            adds in arbitrary_ids(),
            removes in arbitrary_ids(),
        ) {
            // Keys are unique in a well-formed store.
            let adds: BTreeSet<PermissionId> =
                adds.difference(&removes).copied().collect();

            let mut overrides = Vec::new();
            for permission_id in &adds {
                overrides.push(record(*permission_id, OverridePolarity::Add));
            }
            for permission_id in &removes {
                overrides.push(record(*permission_id, OverridePolarity::Remove));
            }

            let resolved = resolve_effective(&preset, &overrides);

            let expected: BTreeSet<PermissionId> = preset
                .difference(&removes)
                .copied()
                .collect::<BTreeSet<_>>()
                .union(&adds)
                .copied()
                .collect();

            prop_assert_eq!(resolved.permission_ids(), expected);
            prop_assert_eq!(resolved.is_customized, !overrides.is_empty());
        }

        #[test]
        fn resolution_is_deterministic_under_shuffle(
            preset in arbitrary_ids(),
            adds in arbitrary_ids(),
            removes in arbitrary_ids(),
        ) {
            let adds: BTreeSet<PermissionId> =
                adds.difference(&removes).copied().collect();

            let mut overrides = Vec::new();
            for permission_id in &adds {
                overrides.push(record(*permission_id, OverridePolarity::Add));
            }
            for permission_id in &removes {
                overrides.push(record(*permission_id, OverridePolarity::Remove));
            }

            let forward = resolve_effective(&preset, &overrides);
            overrides.reverse();
            let reversed = resolve_effective(&preset, &overrides);

            prop_assert_eq!(forward, reversed);
        }
    }
}
