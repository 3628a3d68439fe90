//! # REST API for Employee Management
//!
//! Endpoints for listing, retrieving, creating, updating, and deleting
//! employees, plus the per-department listing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use shared::{CreateEmployeeRequest, UpdateEmployeeRequest};

use crate::io::rest::error_body::{not_found, ApiError};
use crate::io::rest::mappers::EmployeeMapper;
use crate::AppState;

/// List all employees
pub async fn list_employees(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/employees");

    match state.employee_service.list_all().await {
        Ok(employees) => {
            (StatusCode::OK, Json(EmployeeMapper::to_dto_list(employees))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Get an employee by id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/employees/{}", id);

    match state.employee_service.get_by_id(id).await {
        Ok(Some(employee)) => {
            (StatusCode::OK, Json(EmployeeMapper::to_dto(employee))).into_response()
        }
        Ok(None) => not_found("Employee"),
        Err(e) => ApiError(e).into_response(),
    }
}

/// List the active employees of one department
pub async fn list_employees_by_department(
    State(state): State<AppState>,
    Path(department_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/employees/department/{}", department_id);

    match state.employee_service.list_by_department(department_id).await {
        Ok(employees) => {
            (StatusCode::OK, Json(EmployeeMapper::to_dto_list(employees))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Create a new employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> impl IntoResponse {
    info!("POST /api/employees - email={}", request.email);

    match state.employee_service.create(request).await {
        Ok(employee) => {
            (StatusCode::CREATED, Json(EmployeeMapper::to_dto(employee))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Update an employee
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/employees/{}", id);

    match state.employee_service.update(id, request).await {
        Ok(Some(employee)) => {
            (StatusCode::OK, Json(EmployeeMapper::to_dto(employee))).into_response()
        }
        Ok(None) => not_found("Employee"),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/employees/{}", id);

    match state.employee_service.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("Employee"),
        Err(e) => ApiError(e).into_response(),
    }
}
