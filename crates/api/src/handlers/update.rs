//! Handler shared by every `PUT|PATCH /{resource}/{id}` endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use eventdesk_core::error::CoreError;
use eventdesk_core::patch::{parse_identifier, SparseInput};
use eventdesk_core::resources;
use eventdesk_core::types::DbId;
use eventdesk_db::repositories::ResourceRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a successful update.
#[derive(Debug, Serialize)]
pub struct UpdateOutcome {
    pub id: DbId,
    /// Columns written, in SET order.
    pub updated: Vec<String>,
}

/// PUT|PATCH /api/v1/{resource}/{id}
///
/// The identifier comes from the path and ownership from the token; any
/// `ID` key in the body is ignored.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, raw_id)): Path<(String, String)>,
    body: Result<Json<SparseInput>, JsonRejection>,
) -> AppResult<Json<DataResponse<UpdateOutcome>>> {
    let resource = resources::find(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown resource '{slug}'")))?;

    let id = parse_identifier(&raw_id).map_err(CoreError::from)?;

    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let plan = resource.plan(&input, Some(id)).map_err(|rejection| {
        tracing::debug!(
            resource = resource.slug,
            id,
            reason = rejection.code(),
            errors = rejection.field_errors().len(),
            "Update rejected"
        );
        CoreError::from(rejection)
    })?;

    let statement = resource.statement(&plan);
    let applied =
        ResourceRepo::update_owned(&state.pool, resource, id, user.entreprise_id, &statement)
            .await?;
    if !applied {
        return Err(AppError::Core(CoreError::NotFound {
            entity: resource.entity,
            id,
        }));
    }

    let updated: Vec<String> = plan.columns().into_iter().map(String::from).collect();
    tracing::info!(
        resource = resource.slug,
        id,
        user_id = user.user_id,
        role = %user.role,
        columns = ?updated,
        "Record updated"
    );

    Ok(Json(DataResponse::new(UpdateOutcome { id, updated })))
}
