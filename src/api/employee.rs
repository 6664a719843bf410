use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::attendance::AttendanceService;
use crate::error::{ApiError, ErrorBody};
use crate::model::employee::{Employee, NewEmployee};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "General", nullable = true)]
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Pagination page number (starts at 1)
    pub page: Option<u32>,
    /// Items per page
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
}

/// Register Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee registered successfully", body = Employee),
        (status = 400, description = "Missing or malformed name/email", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<AttendanceService>,
    payload: web::Json<CreateEmployee>,
) -> Result<impl Responder, ApiError> {
    let CreateEmployee {
        name,
        email,
        department,
    } = payload.into_inner();
    let name = name.trim().to_string();
    let email = email.trim().to_string();

    if name.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    if email.is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    let employees = service.employees();
    if employees.exists_by_email(&email).await? {
        return Err(ApiError::DuplicateEmail(email));
    }

    let employee = employees
        .create(NewEmployee {
            name,
            email,
            department: department
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "General".to_string()),
        })
        .await?;

    info!(employee_id = employee.id, "employee registered");
    Ok(HttpResponse::Ok().json(employee))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();
    let employee = service
        .employees()
        .find_by_id(employee_id)
        .await?
        .ok_or(ApiError::EmployeeNotFound(employee_id))?;
    Ok(HttpResponse::Ok().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: web::Data<AttendanceService>,
    query: web::Query<EmployeeQuery>,
) -> Result<impl Responder, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let (data, total) = service.employees().list(page, per_page).await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data,
        page,
        per_page,
        total,
    }))
}
