// src/handlers/inventory.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::{IdPath, JsonBody},
    middleware::auth::AuthenticatedUser,
    models::inventory::{
        AdjustStockPayload, CreateInventoryItemPayload, InventoryItemView, StockReport,
        UpdateInventoryItemPayload,
    },
};

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = CreateInventoryItemPayload,
    responses(
        (status = 201, description = "Item cadastrado", body = InventoryItemView),
        (status = 400, description = "Campos inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(Json(payload), _): JsonBody<CreateInventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service.create_item(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "Itens com a situação do estoque", body = Vec<InventoryItemView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_items(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.inventory_service.list_items().await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/inventory/low-stock
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    tag = "Inventory",
    responses(
        (status = 200, description = "Itens no mínimo ou abaixo dele", body = Vec<InventoryItemView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_low_stock(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.inventory_service.list_low_stock().await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/inventory/stock-report
#[utoipa::path(
    get,
    path = "/api/inventory/stock-report",
    tag = "Inventory",
    responses(
        (status = 200, description = "Contagem por situação de estoque", body = StockReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn stock_report(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let report = app_state.inventory_service.stock_report().await?;
    Ok((StatusCode::OK, Json(report)))
}

// GET /api/inventory/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item", body = InventoryItemView),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service.get_item(id.0).await?;
    Ok((StatusCode::OK, Json(item)))
}

// PUT /api/inventory/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    request_body = UpdateInventoryItemPayload,
    responses(
        (status = 200, description = "Item atualizado", body = InventoryItemView),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
    WithRejection(Json(payload), _): JsonBody<UpdateInventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service.update_item(&actor, id.0, payload).await?;
    Ok((StatusCode::OK, Json(item)))
}

// POST /api/inventory/{id}/adjust
#[utoipa::path(
    post,
    path = "/api/inventory/{id}/adjust",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    request_body = AdjustStockPayload,
    responses(
        (status = 200, description = "Estoque ajustado", body = InventoryItemView),
        (status = 400, description = "Saldo ficaria negativo"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
    WithRejection(Json(payload), _): JsonBody<AdjustStockPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service.adjust_stock(&actor, id.0, payload).await?;
    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/inventory/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    app_state.inventory_service.delete_item(&actor, id.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
