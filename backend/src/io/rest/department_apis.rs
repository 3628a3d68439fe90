//! # REST API for Department Management
//!
//! Endpoints for listing, retrieving, creating, updating, and deleting
//! departments.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use shared::{CreateDepartmentRequest, UpdateDepartmentRequest};

use crate::io::rest::error_body::{not_found, ApiError};
use crate::io::rest::mappers::DepartmentMapper;
use crate::AppState;

/// List all departments
pub async fn list_departments(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/departments");

    match state.department_service.list_all().await {
        Ok(departments) => {
            (StatusCode::OK, Json(DepartmentMapper::to_dto_list(departments))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Get a department by id
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/departments/{}", id);

    match state.department_service.get_by_id(id).await {
        Ok(Some(department)) => {
            (StatusCode::OK, Json(DepartmentMapper::to_dto(department))).into_response()
        }
        Ok(None) => not_found("Department"),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Create a new department
pub async fn create_department(
    State(state): State<AppState>,
    Json(request): Json<CreateDepartmentRequest>,
) -> impl IntoResponse {
    info!("POST /api/departments - code={}", request.code);

    match state.department_service.create(request).await {
        Ok(department) => {
            (StatusCode::CREATED, Json(DepartmentMapper::to_dto(department))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Update a department
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDepartmentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/departments/{}", id);

    match state.department_service.update(id, request).await {
        Ok(Some(department)) => {
            (StatusCode::OK, Json(DepartmentMapper::to_dto(department))).into_response()
        }
        Ok(None) => not_found("Department"),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Delete a department with no active employees
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/departments/{}", id);

    match state.department_service.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("Department"),
        Err(e) => ApiError(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;

    async fn setup_test() -> AppState {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppState::new(db)
    }

    fn create_request(code: &str, name: &str) -> CreateDepartmentRequest {
        CreateDepartmentRequest {
            code: code.to_string(),
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_returns_201_and_duplicate_returns_400() {
        let state = setup_test().await;

        let response = create_department(
            State(state.clone()),
            Json(create_request("IT", "Information Technology")),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = create_department(
            State(state),
            Json(create_request("IT", "Other")),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_department_returns_404() {
        let state = setup_test().await;

        let response = get_department(State(state), Path(42)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_returns_200() {
        let state = setup_test().await;

        let response = list_departments(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_and_delete_status_codes() {
        let state = setup_test().await;

        let department = state
            .department_service
            .create(create_request("IT", "Information Technology"))
            .await
            .unwrap();

        let response = update_department(
            State(state.clone()),
            Path(department.id),
            Json(UpdateDepartmentRequest {
                code: "IT".to_string(),
                name: "Technology".to_string(),
                description: None,
                is_active: true,
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = delete_department(State(state.clone()), Path(department.id))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = delete_department(State(state), Path(department.id))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
