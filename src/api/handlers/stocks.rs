//! Stock CRUD request handlers.
//!
//! Each handler opens its own unit of work, so one request maps to exactly
//! one persistence session and at most one commit. Existence checks for
//! update and delete happen here, before anything is staged.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::api::dto::{CreateStockRequest, MessageResponse, StockResponse, UpdateStockRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::repositories::{Repository, UnitOfWork};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates stock-related routes.
///
/// Routes:
/// - GET /        - List all stocks
/// - POST /       - Create a new stock
/// - GET /{id}    - Get stock by ID
/// - PUT /{id}    - Replace stock by ID
/// - DELETE /{id} - Delete stock by ID
pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks).post(create_stock))
        .route(
            "/{id}",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
}

/// GET /api/stocks - List all stocks
async fn list_stocks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<StockResponse>>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let stocks = uow.stocks().find_all().await?;

    tracing::info!(subject = %auth.subject, count = stocks.len(), "returned all stocks");
    Ok(Json(stocks.into_iter().map(StockResponse::from).collect()))
}

/// GET /api/stocks/{id} - Get one stock, 404 when absent
async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockResponse>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    match uow.stocks().find_by_id(id).await? {
        Some(stock) => {
            tracing::info!(stock_id = id, "returned stock");
            Ok(Json(StockResponse::from(stock)))
        }
        None => {
            tracing::warn!(stock_id = id, "stock not found");
            Err(stock_not_found(id))
        }
    }
}

/// POST /api/stocks - Create a stock
///
/// The body is validated before anything is staged; the commit returns the
/// stored record with its assigned id.
async fn create_stock(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStockRequest>,
) -> Result<Json<StockResponse>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    uow.stocks().create(payload.into_new_stock());
    let report = uow.save().await?;

    let stock = report
        .created
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal {
            source: anyhow::anyhow!("commit returned no created record"),
        })?;

    tracing::info!(stock_id = stock.id, "created stock");
    Ok(Json(StockResponse::from(stock)))
}

/// PUT /api/stocks/{id} - Replace a stock
///
/// The id must already exist; the check is handler policy, the repository
/// stages the replacement without re-validating.
async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateStockRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    if uow.stocks().find_by_id(id).await?.is_none() {
        tracing::warn!(stock_id = id, "stock not found for update");
        return Err(stock_not_found(id));
    }

    uow.stocks().update(id, payload.into_changes());
    uow.save().await?;

    tracing::info!(stock_id = id, "updated stock");
    Ok(Json(MessageResponse::new("stock updated")))
}

/// DELETE /api/stocks/{id} - Delete a stock, 404 when absent
async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let Some(stock) = uow.stocks().find_by_id(id).await? else {
        tracing::warn!(stock_id = id, "stock not found for delete");
        return Err(stock_not_found(id));
    };

    uow.stocks().delete(&stock);
    uow.save().await?;

    tracing::info!(stock_id = id, "deleted stock");
    Ok(Json(MessageResponse::new("stock deleted")))
}

fn stock_not_found(id: i32) -> AppError {
    AppError::NotFound {
        entity: "stock".to_string(),
        field: "id".to_string(),
        value: id.to_string(),
    }
}
