// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::{
    error::AppError,
    validation::{
        parse_enum, required, validate_closed_set, validate_not_blank, validate_money,
        validate_payload,
    },
};

// --- Categorias (conjunto fechado) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "inventory_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InventoryCategory {
    Ink,
    Needles,
    Supplies,
    Equipment,
    Aftercare,
}

impl FromStr for InventoryCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ink" => Ok(InventoryCategory::Ink),
            "needles" => Ok(InventoryCategory::Needles),
            "supplies" => Ok(InventoryCategory::Supplies),
            "equipment" => Ok(InventoryCategory::Equipment),
            "aftercare" => Ok(InventoryCategory::Aftercare),
            _ => Err(()),
        }
    }
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    validate_closed_set::<InventoryCategory>(value, "invalid_category")
}

// --- Situação do estoque (derivada, nunca gravada) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    #[schema(example = "Tinta Preta Tribal")]
    pub name: String,
    pub brand: Option<String>,
    pub category: InventoryCategory,
    #[schema(example = 3)]
    pub current_stock: i32,
    #[schema(example = 5)]
    pub min_level: i32,
    #[schema(value_type = f64, example = 89.9)]
    pub unit_price: Decimal,
    pub supplier: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Item com a classificação de estoque calculada.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub stock_status: StockStatus,
}

/// Contagem por situação. `needs_restock` = estoque <= mínimo (baixo ∪ esgotado).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub needs_restock: usize,
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub name: String,
    pub brand: Option<String>,
    pub category: InventoryCategory,
    pub current_stock: i32,
    pub min_level: i32,
    pub unit_price: Decimal,
    pub supplier: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryChanges {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<InventoryCategory>,
    pub current_stock: Option<i32>,
    pub min_level: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub supplier: Option<String>,
    pub description: Option<String>,
}

// --- Payloads ---

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemPayload {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 150, message = "too_long"))]
    pub name: String,

    pub brand: Option<String>,

    #[validate(required(message = "required"), custom(function = "validate_category"))]
    #[schema(example = "ink")]
    pub category: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub current_stock: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub min_level: i32,

    #[validate(required(message = "required"), custom(function = "validate_money"))]
    #[schema(value_type = f64, example = 89.9)]
    pub unit_price: Option<Decimal>,

    pub supplier: Option<String>,
    pub description: Option<String>,
}

impl CreateInventoryItemPayload {
    pub fn into_new(self) -> Result<NewInventoryItem, AppError> {
        validate_payload(&self)?;

        let category = required(self.category, "category")?;

        Ok(NewInventoryItem {
            name: self.name.trim().to_string(),
            brand: self.brand,
            category: parse_enum(&category, "category", "invalid_category")?,
            current_stock: self.current_stock,
            min_level: self.min_level,
            unit_price: required(self.unit_price, "unit_price")?,
            supplier: self.supplier,
            description: self.description,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItemPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 150, message = "too_long"))]
    pub name: Option<String>,

    pub brand: Option<String>,

    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub current_stock: Option<i32>,

    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub min_level: Option<i32>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Decimal>,

    pub supplier: Option<String>,
    pub description: Option<String>,
}

impl UpdateInventoryItemPayload {
    pub fn into_changes(self) -> Result<InventoryChanges, AppError> {
        validate_payload(&self)?;

        let category = self
            .category
            .as_deref()
            .map(|raw| parse_enum(raw, "category", "invalid_category"))
            .transpose()?;

        Ok(InventoryChanges {
            name: self.name.map(|v| v.trim().to_string()),
            brand: self.brand,
            category,
            current_stock: self.current_stock,
            min_level: self.min_level,
            unit_price: self.unit_price,
            supplier: self.supplier,
            description: self.description,
        })
    }
}

/// Entrada (+) ou baixa (-) de estoque, até um milhão de unidades por ajuste.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    #[validate(
        required(message = "required"),
        range(min = -1_000_000, max = 1_000_000, message = "out_of_range")
    )]
    #[schema(example = -2)]
    pub delta: Option<i32>,
}
