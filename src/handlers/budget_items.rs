// src/handlers/budget_items.rs
// DOCUMENTATION: HTTP handlers for budget item operations
// PURPOSE: Parse requests, call services, return responses

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthUser, RequireAuth};
use crate::errors::ApiError;
use crate::models::{CreateBudgetItemRequest, UpdateBudgetItemRequest};
use crate::services::BudgetService;
use crate::validation::first_validation_message;

/// GET /trips/{trip_id}/budget-items
pub async fn list_budget_items(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let items = BudgetService::list(pool.get_ref(), path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// POST /trips/{trip_id}/budget-items
pub async fn create_budget_item(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<CreateBudgetItemRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let item =
        BudgetService::create(pool.get_ref(), path.into_inner(), user.id, req.into_inner())
            .await?;
    Ok(HttpResponse::Created().json(item))
}

/// PUT /budget-items/{id}
pub async fn update_budget_item(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateBudgetItemRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let item =
        BudgetService::update(pool.get_ref(), path.into_inner(), user.id, req.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /budget-items/{id}
pub async fn delete_budget_item(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    BudgetService::delete(pool.get_ref(), path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Budget item deleted" })))
}

/// Entry-addressed routes; the collection routes register under /trips.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/budget-items")
            .wrap(RequireAuth)
            .route("/{id}", web::put().to(update_budget_item))
            .route("/{id}", web::delete().to(delete_budget_item)),
    );
}
