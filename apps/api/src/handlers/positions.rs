use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use tillboard_core::{BusinessId, PermissionId, PositionId};

use crate::dto::{
    AddOverrideRequest, EffectivePermissionsResponse, OverrideSummaryResponse, PermissionResponse,
    PositionResponse, PositionSummaryResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_position_templates_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PositionResponse>>> {
    let positions = state
        .position_permission_service
        .list_position_templates()
        .await?
        .into_iter()
        .map(PositionResponse::from)
        .collect();

    Ok(Json(positions))
}

pub async fn preset_permissions_handler(
    State(state): State<AppState>,
    Path(position_id): Path<String>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let position_id = PositionId::from_str(position_id.as_str())?;
    let permissions = state
        .position_permission_service
        .preset_permissions(position_id)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn list_business_positions_handler(
    State(state): State<AppState>,
    Path(business_id): Path<String>,
) -> ApiResult<Json<Vec<PositionSummaryResponse>>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let positions = state
        .position_permission_service
        .list_positions(business_id)
        .await?
        .into_iter()
        .map(PositionSummaryResponse::from)
        .collect();

    Ok(Json(positions))
}

pub async fn effective_permissions_handler(
    State(state): State<AppState>,
    Path((business_id, position_id)): Path<(String, String)>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let position_id = PositionId::from_str(position_id.as_str())?;
    let effective = state
        .position_permission_service
        .effective_permissions(business_id, position_id)
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(effective)))
}

pub async fn available_permissions_handler(
    State(state): State<AppState>,
    Path((business_id, position_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let position_id = PositionId::from_str(position_id.as_str())?;
    let permissions = state
        .position_permission_service
        .available_permissions(business_id, position_id)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn list_overrides_handler(
    State(state): State<AppState>,
    Path((business_id, position_id)): Path<(String, String)>,
) -> ApiResult<Json<OverrideSummaryResponse>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let position_id = PositionId::from_str(position_id.as_str())?;
    let summary = state
        .position_permission_service
        .list_overrides(business_id, position_id)
        .await?;

    Ok(Json(OverrideSummaryResponse::from(summary)))
}

pub async fn add_override_handler(
    State(state): State<AppState>,
    Path((business_id, position_id)): Path<(String, String)>,
    Json(payload): Json<AddOverrideRequest>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let position_id = PositionId::from_str(position_id.as_str())?;
    let permission_id = PermissionId::from_str(payload.permission_id.as_str())?;
    let effective = state
        .position_permission_service
        .add_override(business_id, position_id, permission_id)
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(effective)))
}

pub async fn remove_override_handler(
    State(state): State<AppState>,
    Path((business_id, position_id, permission_id)): Path<(String, String, String)>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let position_id = PositionId::from_str(position_id.as_str())?;
    let permission_id = PermissionId::from_str(permission_id.as_str())?;
    let effective = state
        .position_permission_service
        .remove_override(business_id, position_id, permission_id)
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(effective)))
}

pub async fn restore_override_handler(
    State(state): State<AppState>,
    Path((business_id, position_id, permission_id)): Path<(String, String, String)>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let position_id = PositionId::from_str(position_id.as_str())?;
    let permission_id = PermissionId::from_str(permission_id.as_str())?;
    let effective = state
        .position_permission_service
        .restore_override(business_id, position_id, permission_id)
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(effective)))
}

pub async fn reset_to_preset_handler(
    State(state): State<AppState>,
    Path((business_id, position_id)): Path<(String, String)>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let business_id = BusinessId::from_str(business_id.as_str())?;
    let position_id = PositionId::from_str(position_id.as_str())?;
    let effective = state
        .position_permission_service
        .reset_to_preset(business_id, position_id)
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(effective)))
}
