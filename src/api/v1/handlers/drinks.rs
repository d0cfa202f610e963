/*
 * Responsibility
 * - /drinks CRUD handlers
 * - authorization happens in the route layer; handlers only see requests the
 *   guard let through (detail handler receives the decoded payload)
 * - validation → uniqueness check → repo call → {"success": true, ...} body
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{
        dto::drinks::{
            CreateDrinkRequest, DeleteResponse, DrinkDetail, DrinkSummary, DrinksResponse,
            Ingredient, UpdateDrinkRequest,
        },
        extractors::{ApiJson, AuthPayload},
    },
    error::AppError,
    repos::drink_repo,
    state::AppState,
};

fn parse_recipe(row_id: i64, raw: &str) -> Result<Vec<Ingredient>, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!(drink_id = row_id, error = %e, "stored recipe is not valid JSON");
        AppError::Internal
    })
}

fn row_to_detail(row: drink_repo::DrinkRow) -> Result<DrinkDetail, AppError> {
    let recipe = parse_recipe(row.drink_id, &row.recipe)?;
    Ok(DrinkDetail {
        id: row.drink_id,
        title: row.title,
        recipe,
    })
}

fn row_to_summary(row: drink_repo::DrinkRow) -> Result<DrinkSummary, AppError> {
    let recipe = parse_recipe(row.drink_id, &row.recipe)?;
    Ok(DrinkSummary {
        id: row.drink_id,
        title: row.title,
        recipe: recipe.into_iter().map(Into::into).collect(),
    })
}

/// Public endpoint: summary representation only.
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkSummary>>, AppError> {
    let rows = drink_repo::list(&state.db).await?;

    let mut drinks = Vec::with_capacity(rows.len());
    for row in rows {
        drinks.push(row_to_summary(row)?);
    }

    Ok(Json(DrinksResponse::of(drinks)))
}

/// Requires `get:drinks-detail`.
pub async fn list_drinks_detail(
    State(state): State<AppState>,
    payload: AuthPayload,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    tracing::debug!(
        sub = payload.claims().sub.as_deref().unwrap_or("<none>"),
        "serving drink details"
    );

    let rows = drink_repo::list(&state.db).await?;

    let mut drinks = Vec::with_capacity(rows.len());
    for row in rows {
        drinks.push(row_to_detail(row)?);
    }

    Ok(Json(DrinksResponse::of(drinks)))
}

/// Requires `post:drinks`.
pub async fn create_drink(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateDrinkRequest>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    if drink_repo::find_by_title(&state.db, &req.title)
        .await?
        .is_some()
    {
        return Err(AppError::bad_request("drink titles must be unique"));
    }

    let recipe = serde_json::to_string(&req.recipe).map_err(|_| AppError::Internal)?;
    let row = drink_repo::create(&state.db, &req.title, &recipe).await?;

    Ok(Json(DrinksResponse::of(vec![row_to_detail(row)?])))
}

/// Requires `patch:drinks`.
pub async fn update_drink(
    State(state): State<AppState>,
    Path(drink_id): Path<i64>,
    ApiJson(req): ApiJson<UpdateDrinkRequest>,
) -> Result<Json<DrinksResponse<DrinkDetail>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    if let Some(title) = &req.title
        && drink_repo::find_by_title(&state.db, title).await?.is_some()
    {
        return Err(AppError::bad_request("drink titles must be unique"));
    }

    let recipe = match &req.recipe {
        Some(recipe) => Some(serde_json::to_string(recipe).map_err(|_| AppError::Internal)?),
        None => None,
    };

    let row = drink_repo::update(
        &state.db,
        drink_id,
        req.title.as_deref(),
        recipe.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("drink"))?;

    Ok(Json(DrinksResponse::of(vec![row_to_detail(row)?])))
}

/// Requires `delete:drinks`.
pub async fn delete_drink(
    State(state): State<AppState>,
    Path(drink_id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = drink_repo::delete(&state.db, drink_id).await?;
    if !deleted {
        return Err(AppError::not_found("drink"));
    }

    Ok(Json(DeleteResponse {
        success: true,
        delete: drink_id,
    }))
}
