//! # Workforce Backend
//!
//! CRUD REST API for departments and employees over a SQLite store.
//!
//! Layers, top to bottom:
//! - **IO**: axum handlers mapping service results to status codes
//! - **Domain**: services enforcing uniqueness, referential and delete-guard
//!   invariants
//! - **Storage**: repositories translating entity operations into SQL
//!
//! Services receive their stores by constructor injection; everything is
//! composed once in [`initialize_backend`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{DepartmentService, EmployeeService};
use crate::storage::sqlite::{SqliteDepartmentRepository, SqliteEmployeeRepository};
use crate::storage::{DbConnection, DepartmentStore, EmployeeStore};

pub use config::Config;

/// Main application state that holds both services
#[derive(Clone)]
pub struct AppState {
    pub department_service: DepartmentService,
    pub employee_service: EmployeeService,
}

impl AppState {
    /// Wire repositories and services over one database connection
    pub fn new(db: DbConnection) -> Self {
        let departments: Arc<dyn DepartmentStore> =
            Arc::new(SqliteDepartmentRepository::new(db.clone()));
        let employees: Arc<dyn EmployeeStore> = Arc::new(SqliteEmployeeRepository::new(db));

        AppState {
            department_service: DepartmentService::new(departments.clone()),
            employee_service: EmployeeService::new(employees, departments),
        }
    }
}

/// Initialize the backend: open the store, seed it on first run, and wire
/// the services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;
    db.seed_if_empty().await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    // CORS setup to allow the web frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/departments",
            get(io::rest::list_departments).post(io::rest::create_department),
        )
        .route(
            "/departments/:id",
            get(io::rest::get_department)
                .put(io::rest::update_department)
                .delete(io::rest::delete_department),
        )
        .route(
            "/employees",
            get(io::rest::list_employees).post(io::rest::create_employee),
        )
        .route(
            "/employees/:id",
            get(io::rest::get_employee)
                .put(io::rest::update_employee)
                .delete(io::rest::delete_employee),
        )
        .route(
            "/employees/department/:department_id",
            get(io::rest::list_employees_by_department),
        );

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
