use super::*;

impl PositionPermissionService {
    /// Lists every position with this business's customization summary.
    ///
    /// Rows are ordered by position name.
    pub async fn list_positions(&self, business_id: BusinessId) -> AppResult<Vec<PositionSummary>> {
        let positions = self.catalog.list_positions().await?;

        let mut rows = Vec::with_capacity(positions.len());
        for position in positions {
            let overrides = self
                .overrides
                .list_for_position(business_id, position.id)
                .await?;

            let add_count = overrides
                .iter()
                .filter(|record| record.polarity == OverridePolarity::Add)
                .count();
            let remove_count = overrides.len() - add_count;

            rows.push(PositionSummary {
                position_id: position.id,
                name: position.name,
                is_protected: position.is_protected,
                is_customized: !overrides.is_empty(),
                add_count,
                remove_count,
            });
        }
        rows.sort_by(|left, right| left.name.cmp(&right.name));

        Ok(rows)
    }
}
