use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use crate::db::{self, DbConfig};
use crate::errors::{AppError, PlainTextError};
use crate::models::employee::{self, EmployeeRecord, NewEmployee};

const LIST_EMPLOYEES_SQL: &str = "SELECT * FROM employees ORDER BY created_at DESC";
const INSERT_EMPLOYEE_SQL: &str =
    "INSERT INTO employees (name, email, role, department) VALUES (?, ?, ?, ?)";

pub const CREATED_MESSAGE: &str = "✅ Employee added successfully!";

pub async fn get_employees(
    config: web::Data<DbConfig>,
) -> Result<HttpResponse, AppError> {
    let mut conn = db::connect(&config).await?;

    let result = sqlx::query(LIST_EMPLOYEES_SQL)
        .fetch_all(&mut conn)
        .await;

    db::release(conn).await;

    let employees = result
        .and_then(|rows| {
            rows.iter()
                .map(employee::record_from_row)
                .collect::<Result<Vec<EmployeeRecord>, _>>()
        })
        .map_err(|err| {
            log::error!("Listing employees failed: {:?}", err);
            AppError::QueryFailed(db::driver_message(&err))
        })?;

    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_employee(
    config: web::Data<DbConfig>,
    new_employee: web::Form<NewEmployee>,
) -> Result<HttpResponse, PlainTextError> {
    let mut conn = db::connect(&config).await?;

    let result = sqlx::query(INSERT_EMPLOYEE_SQL)
        .bind(&new_employee.name)
        .bind(&new_employee.email)
        .bind(&new_employee.role)
        .bind(&new_employee.department)
        .execute(&mut conn)
        .await;

    db::release(conn).await;

    let body = match result {
        Ok(done) => {
            log::info!("Employee added (id {})", done.last_insert_id());
            CREATED_MESSAGE.to_string()
        }
        Err(err) => {
            log::warn!("Employee insert failed: {:?}", err);
            format!("❌ Error: {}", db::driver_message(&err))
        }
    };

    Ok(HttpResponse::Ok().content_type(ContentType::plaintext()).body(body))
}
