// src/handlers/sales.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::{IdPath, JsonBody, QueryParams},
    middleware::auth::AuthenticatedUser,
    models::sale::{CreateSalePayload, SaleDetail, SaleFilter, UpdateSalePayload},
};

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada com saldo calculado", body = SaleDetail),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Cliente, artista ou agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(Json(payload), _): JsonBody<CreateSalePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state.sale_service.create_sale(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(SaleFilter),
    responses(
        (status = 200, description = "Vendas com cliente, artista e agendamento", body = Vec<SaleDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    WithRejection(filter, _): QueryParams<SaleFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = app_state.sale_service.list_sales(&filter).await?;
    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state.sale_service.get_sale(id.0).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    request_body = UpdateSalePayload,
    responses(
        (status = 200, description = "Venda atualizada e recalculada", body = SaleDetail),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Venda ou referência não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
    WithRejection(Json(payload), _): JsonBody<UpdateSalePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state.sale_service.update_sale(&actor, id.0, payload).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda removida"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    app_state.sale_service.delete_sale(&actor, id.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
