// src/services/inventory_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::{required, validate_payload}},
    db::InventoryRepository,
    models::{
        auth::Identity,
        inventory::{
            AdjustStockPayload, CreateInventoryItemPayload, InventoryItem, InventoryItemView,
            StockReport, StockStatus, UpdateInventoryItemPayload,
        },
    },
};

// ---
// Monitor de estoque (funções puras)
// ---

/// `0` é esgotado mesmo quando o mínimo também é `0`.
pub fn classify_stock(current_stock: i32, min_level: i32) -> StockStatus {
    if current_stock <= 0 {
        StockStatus::OutOfStock
    } else if current_stock <= min_level {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

impl InventoryItemView {
    pub fn from_item(item: InventoryItem) -> Self {
        let stock_status = classify_stock(item.current_stock, item.min_level);
        Self { item, stock_status }
    }
}

impl StockReport {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let mut report = StockReport::default();
        for item in items {
            match classify_stock(item.current_stock, item.min_level) {
                StockStatus::InStock => report.in_stock += 1,
                StockStatus::LowStock => report.low_stock += 1,
                StockStatus::OutOfStock => report.out_of_stock += 1,
            }
            if item.current_stock <= item.min_level {
                report.needs_restock += 1;
            }
        }
        report
    }
}

#[derive(Clone)]
pub struct InventoryService {
    repo: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    pub fn new(repo: Arc<dyn InventoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_item(
        &self,
        actor: &Identity,
        payload: CreateInventoryItemPayload,
    ) -> Result<InventoryItemView, AppError> {
        let new = payload.into_new()?;
        let item = self.repo.create_item(&new).await?;
        tracing::info!("📦 Item {} cadastrado por {}", item.id, actor.user_id);
        Ok(InventoryItemView::from_item(item))
    }

    pub async fn get_item(&self, id: Uuid) -> Result<InventoryItemView, AppError> {
        self.repo
            .find_item(id)
            .await?
            .map(InventoryItemView::from_item)
            .ok_or(AppError::NotFound("Item de estoque"))
    }

    pub async fn list_items(&self) -> Result<Vec<InventoryItemView>, AppError> {
        let items = self.repo.list_items().await?;
        Ok(items.into_iter().map(InventoryItemView::from_item).collect())
    }

    pub async fn list_low_stock(&self) -> Result<Vec<InventoryItemView>, AppError> {
        let items = self.repo.list_low_stock().await?;
        Ok(items.into_iter().map(InventoryItemView::from_item).collect())
    }

    pub async fn stock_report(&self) -> Result<StockReport, AppError> {
        let items = self.repo.list_items().await?;
        Ok(StockReport::from_items(&items))
    }

    pub async fn update_item(
        &self,
        actor: &Identity,
        id: Uuid,
        payload: UpdateInventoryItemPayload,
    ) -> Result<InventoryItemView, AppError> {
        let changes = payload.into_changes()?;
        let item = self
            .repo
            .update_item(id, &changes)
            .await?
            .ok_or(AppError::NotFound("Item de estoque"))?;
        tracing::info!("📦 Item {} atualizado por {}", id, actor.user_id);
        Ok(InventoryItemView::from_item(item))
    }

    pub async fn delete_item(&self, actor: &Identity, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_item(id).await? {
            return Err(AppError::NotFound("Item de estoque"));
        }
        tracing::info!("🗑️ Item {} removido por {}", id, actor.user_id);
        Ok(())
    }

    /// Entrada ou baixa de estoque. O saldo nunca fica negativo.
    pub async fn adjust_stock(
        &self,
        actor: &Identity,
        id: Uuid,
        payload: AdjustStockPayload,
    ) -> Result<InventoryItemView, AppError> {
        validate_payload(&payload)?;
        let delta = required(payload.delta, "delta")?;

        let item = self
            .repo
            .adjust_stock(id, delta)
            .await?
            .ok_or(AppError::NotFound("Item de estoque"))?;

        tracing::info!(
            "📦 Estoque do item {} ajustado em {} por {} (saldo {})",
            id,
            delta,
            actor.user_id,
            item.current_stock
        );
        Ok(InventoryItemView::from_item(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::field_error_map;
    use crate::db::memory::MemoryStore;
    use chrono::Utc;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::models::inventory::InventoryCategory;

    fn item(current_stock: i32, min_level: i32) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: "Tinta".into(),
            brand: None,
            category: InventoryCategory::Ink,
            current_stock,
            min_level,
            unit_price: Decimal::new(4990, 2),
            supplier: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn actor() -> Identity {
        Identity { user_id: Uuid::new_v4(), role: None }
    }

    #[test]
    fn classification_examples() {
        assert_eq!(classify_stock(3, 5), StockStatus::LowStock);
        assert_eq!(classify_stock(0, 5), StockStatus::OutOfStock);
        assert_eq!(classify_stock(5, 5), StockStatus::LowStock);
        assert_eq!(classify_stock(6, 5), StockStatus::InStock);
        assert_eq!(classify_stock(0, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn report_counts_restock_as_low_plus_out() {
        let items = vec![item(10, 2), item(2, 2), item(1, 4), item(0, 3), item(0, 0)];
        let report = StockReport::from_items(&items);
        assert_eq!(
            report,
            StockReport { in_stock: 1, low_stock: 2, out_of_stock: 2, needs_restock: 4 }
        );
    }

    proptest! {
        #[test]
        fn classification_is_total_and_consistent(stock in 0i32..1_000, min in 0i32..1_000) {
            let status = classify_stock(stock, min);
            match status {
                StockStatus::OutOfStock => prop_assert_eq!(stock, 0),
                StockStatus::LowStock => prop_assert!(stock > 0 && stock <= min),
                StockStatus::InStock => prop_assert!(stock > min),
            }
        }

        #[test]
        fn report_partitions_items(levels in proptest::collection::vec((0i32..50, 0i32..50), 0..40)) {
            let items: Vec<InventoryItem> = levels.iter().map(|(s, m)| item(*s, *m)).collect();
            let report = StockReport::from_items(&items);
            prop_assert_eq!(report.in_stock + report.low_stock + report.out_of_stock, items.len());
            let expected = items.iter().filter(|i| i.current_stock <= i.min_level).count();
            prop_assert_eq!(report.needs_restock, expected);
        }
    }

    async fn seeded(stock: i32) -> (InventoryService, Uuid) {
        let service = InventoryService::new(Arc::new(MemoryStore::new()));
        let payload: CreateInventoryItemPayload = serde_json::from_value(json!({
            "name": "Agulha 5RL",
            "category": "needles",
            "currentStock": stock,
            "minLevel": 5,
            "unitPrice": 3.2
        }))
        .unwrap();
        let view = service.create_item(&actor(), payload).await.unwrap();
        (service, view.item.id)
    }

    #[tokio::test]
    async fn views_carry_stock_status() {
        let (service, id) = seeded(3).await;
        assert_eq!(service.get_item(id).await.unwrap().stock_status, StockStatus::LowStock);
        assert_eq!(service.list_low_stock().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn adjust_rejects_negative_result() {
        let (service, id) = seeded(2).await;

        let payload = AdjustStockPayload { delta: Some(-3) };
        let AppError::ValidationError(errors) =
            service.adjust_stock(&actor(), id, payload).await.unwrap_err()
        else {
            panic!("esperava erro de validação")
        };
        assert_eq!(field_error_map(&errors)["delta"], vec!["insufficient_stock".to_string()]);

        let view = service.adjust_stock(&actor(), id, AdjustStockPayload { delta: Some(-2) }).await.unwrap();
        assert_eq!(view.item.current_stock, 0);
        assert_eq!(view.stock_status, StockStatus::OutOfStock);
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let service = InventoryService::new(Arc::new(MemoryStore::new()));
        let result = service.adjust_stock(&actor(), Uuid::new_v4(), AdjustStockPayload { delta: Some(1) }).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn oversized_delta_is_a_field_error() {
        let (service, id) = seeded(2).await;

        for delta in [1_000_001, -1_000_001, i32::MAX, i32::MIN] {
            let AppError::ValidationError(errors) = service
                .adjust_stock(&actor(), id, AdjustStockPayload { delta: Some(delta) })
                .await
                .unwrap_err()
            else {
                panic!("esperava erro de validação")
            };
            assert_eq!(field_error_map(&errors)["delta"], vec!["out_of_range".to_string()]);
        }

        let view = service
            .adjust_stock(&actor(), id, AdjustStockPayload { delta: Some(1_000_000) })
            .await
            .unwrap();
        assert_eq!(view.item.current_stock, 1_000_002);
    }

    #[tokio::test]
    async fn adjust_past_integer_limit_is_rejected() {
        let (service, id) = seeded(i32::MAX).await;

        let AppError::ValidationError(errors) = service
            .adjust_stock(&actor(), id, AdjustStockPayload { delta: Some(1) })
            .await
            .unwrap_err()
        else {
            panic!("esperava erro de validação")
        };
        assert_eq!(field_error_map(&errors)["delta"], vec!["insufficient_stock".to_string()]);
        assert_eq!(service.get_item(id).await.unwrap().item.current_stock, i32::MAX);
    }
}
