use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tillboard_application::OverrideStore;
use tillboard_core::{AppResult, BusinessId, PermissionId, PositionId};
use tillboard_domain::{OverridePolarity, PermissionOverride};

type OverrideKey = (BusinessId, PositionId, PermissionId);

/// In-memory override store implementation.
#[derive(Debug, Default)]
pub struct InMemoryOverrideStore {
    records: RwLock<HashMap<OverrideKey, OverridePolarity>>,
}

impl InMemoryOverrideStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OverrideStore for InMemoryOverrideStore {
    async fn list_for_position(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<Vec<PermissionOverride>> {
        let records = self.records.read().await;

        let mut values: Vec<PermissionOverride> = records
            .iter()
            .filter_map(|((stored_business_id, stored_position_id, permission_id), polarity)| {
                (stored_business_id == &business_id && stored_position_id == &position_id)
                    .then_some(PermissionOverride {
                        business_id,
                        position_id,
                        permission_id: *permission_id,
                        polarity: *polarity,
                    })
            })
            .collect();
        values.sort_by_key(|record| record.permission_id);

        Ok(values)
    }

    async fn find(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<Option<PermissionOverride>> {
        Ok(self
            .records
            .read()
            .await
            .get(&(business_id, position_id, permission_id))
            .map(|polarity| PermissionOverride {
                business_id,
                position_id,
                permission_id,
                polarity: *polarity,
            }))
    }

    async fn upsert(&self, record: PermissionOverride) -> AppResult<()> {
        self.records.write().await.insert(
            (record.business_id, record.position_id, record.permission_id),
            record.polarity,
        );
        Ok(())
    }

    async fn delete(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        Ok(self
            .records
            .write()
            .await
            .remove(&(business_id, position_id, permission_id))
            .is_some())
    }

    async fn delete_for_position(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|(stored_business_id, stored_position_id, _), _| {
            !(stored_business_id == &business_id && stored_position_id == &position_id)
        });

        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use tillboard_application::OverrideStore;
    use tillboard_core::{BusinessId, PermissionId, PositionId};
    use tillboard_domain::{OverridePolarity, PermissionOverride};
    use uuid::Uuid;

    use super::InMemoryOverrideStore;

    fn record(business: u128, polarity: OverridePolarity) -> PermissionOverride {
        PermissionOverride {
            business_id: BusinessId::from_uuid(Uuid::from_u128(business)),
            position_id: PositionId::from_uuid(Uuid::from_u128(0x10)),
            permission_id: PermissionId::from_uuid(Uuid::from_u128(0x20)),
            polarity,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_the_record_for_its_key() {
        let store = InMemoryOverrideStore::new();
        let added = record(1, OverridePolarity::Add);

        store.upsert(added.clone()).await.unwrap_or_default();
        store
            .upsert(record(1, OverridePolarity::Remove))
            .await
            .unwrap_or_default();

        let stored = store
            .list_for_position(added.business_id, added.position_id)
            .await
            .unwrap_or_default();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].polarity, OverridePolarity::Remove);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_existed() {
        let store = InMemoryOverrideStore::new();
        let added = record(1, OverridePolarity::Add);
        store.upsert(added.clone()).await.unwrap_or_default();

        let first = store
            .delete(added.business_id, added.position_id, added.permission_id)
            .await
            .unwrap_or_default();
        let second = store
            .delete(added.business_id, added.position_id, added.permission_id)
            .await
            .unwrap_or_default();

        assert!(first);
        assert!(!second);
    }

    #[tokio::test]
    async fn delete_for_position_only_touches_one_business() {
        let store = InMemoryOverrideStore::new();
        let mine = record(1, OverridePolarity::Add);
        let other = record(2, OverridePolarity::Add);
        store.upsert(mine.clone()).await.unwrap_or_default();
        store.upsert(other.clone()).await.unwrap_or_default();

        let removed = store
            .delete_for_position(mine.business_id, mine.position_id)
            .await
            .unwrap_or_default();

        assert_eq!(removed, 1);
        let remaining = store
            .list_for_position(other.business_id, other.position_id)
            .await
            .unwrap_or_default();
        assert_eq!(remaining.len(), 1);
    }
}
