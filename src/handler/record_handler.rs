use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::error;

use crate::dto::agent_dto::AgentPayload;
use crate::service::record_service::{RecordService, RecordServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind, ServiceError};

fn parse_record_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::text(HandlerErrorKind::BadRequest, "Invalid record id"))
}

/// Anything unexpected is logged and answered with a bare 500 message.
fn internal(err: ServiceError, message: &str) -> HandlerError {
    error!("{}: {}", message, err);
    HandlerError::text(HandlerErrorKind::Internal, message)
}

// GET /record
pub async fn list_records_handler(
    State(service): State<Arc<RecordServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let records = service
        .list_records()
        .await
        .map_err(|e| internal(e, "Error fetching records"))?;
    Ok(Json(records))
}

// GET /record/{id}
pub async fn get_record_handler(
    State(service): State<Arc<RecordServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_record_id(&id)?;
    let record = service.get_record(id).await.map_err(|e| match e {
        ServiceError::NotFound(_) => HandlerError::text(HandlerErrorKind::NotFound, "Not found"),
        other => internal(other, "Error fetching record"),
    })?;
    Ok(Json(record))
}

// POST /record
pub async fn create_record_handler(
    State(service): State<Arc<RecordServiceImpl>>,
    Json(payload): Json<AgentPayload>,
) -> Result<impl IntoResponse, HandlerError> {
    let result = service.create_record(payload).await.map_err(|e| match e {
        ServiceError::Validation(details) => HandlerError::validation_failed(details),
        other => internal(other, "Error adding record"),
    })?;
    Ok((StatusCode::CREATED, Json(result)))
}

// PATCH /record/{id}
pub async fn update_record_handler(
    State(service): State<Arc<RecordServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<AgentPayload>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_record_id(&id)?;
    let result = service.update_record(id, payload).await.map_err(|e| match e {
        ServiceError::Validation(details) => HandlerError::validation_failed(details),
        ServiceError::NotFound(_) => HandlerError::json(HandlerErrorKind::NotFound, "Record not found"),
        other => internal(other, "Error updating record"),
    })?;
    Ok(Json(result))
}

// DELETE /record/{id}
pub async fn delete_record_handler(
    State(service): State<Arc<RecordServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_record_id(&id)?;
    let result = service
        .delete_record(id)
        .await
        .map_err(|e| internal(e, "Error deleting record"))?;
    Ok(Json(result))
}
