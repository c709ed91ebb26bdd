// Employee CRUD handlers.
//
// Each handler validates first, then issues exactly one store call, then maps
// the outcome to a status code and JSON body. A store failure is reported
// once, without retry.
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::app::AppState;
use crate::database::models::Employee;
use crate::database::Affected;
use crate::error::ApiError;
use crate::validation::{parse_id, parse_path_id, validate_employee, ValidationError};

/// A body sent without a JSON content type is read as `{}`, so it fails
/// validation with 400 like any other empty payload.
fn request_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Default::default())),
        Err(rejection) => Err(rejection.into()),
    }
}

/// POST /create - insert a new employee, returns the assigned id
pub async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = request_body(body)?;
    let employee = validate_employee(&body)?;

    let id = state
        .store
        .create(&employee)
        .await
        .map_err(|e| state.store_error("Error registering employee", e))?;

    info!(id, "Employee registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Employee registered successfully",
            "id": id
        })),
    ))
}

/// GET /employees - every row; an empty table is an empty array
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = state
        .store
        .list()
        .await
        .map_err(|e| state.store_error("Error fetching employees", e))?;
    Ok(Json(employees))
}

/// PUT /update - replace all fields of the employee named by `id` in the body
pub async fn update_employee(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = request_body(body)?;
    let employee = validate_employee(&body)?;
    let id = parse_id(body.get("id"))?;

    let outcome = state
        .store
        .update(id, &employee)
        .await
        .map_err(|e| state.store_error("Error updating employee", e))?;

    match outcome {
        Affected::Rows(_) => {
            info!(id, "Employee updated");
            Ok(Json(json!({ "message": "Employee updated successfully" })))
        }
        Affected::NotFound => Err(ApiError::NotFound),
    }
}

/// DELETE /delete/:id - remove one employee
pub async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = match id {
        Ok(Path(raw)) => parse_path_id(&raw)?,
        Err(_) => return Err(ValidationError::InvalidId.into()),
    };

    let outcome = state
        .store
        .delete(id)
        .await
        .map_err(|e| state.store_error("Error deleting employee", e))?;

    match outcome {
        Affected::Rows(_) => {
            info!(id, "Employee deleted");
            Ok(Json(json!({ "message": "Employee deleted successfully" })))
        }
        Affected::NotFound => Err(ApiError::NotFound),
    }
}
