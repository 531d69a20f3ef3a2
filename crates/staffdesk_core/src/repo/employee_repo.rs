//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `employees` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Employee::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::StorageError;
use crate::model::employee::{Employee, EmployeeId, EmployeeStatus, EmployeeValidationError};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    uuid,
    full_name,
    cpf,
    pis,
    ctps_number,
    ctps_series,
    email,
    phone,
    admission_date,
    status,
    is_deleted
FROM employees";

const DB_DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Storage(StorageError),
    NotFound(EmployeeId),
    /// Another record already holds this CPF.
    DuplicateCpf(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::DuplicateCpf(cpf) => write!(f, "cpf already registered: {cpf}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) => None,
            Self::DuplicateCpf(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Sqlite(value))
    }
}

/// Query options for roster listings.
#[derive(Debug, Clone, Default)]
pub struct EmployeeListQuery {
    pub status: Option<EmployeeStatus>,
    /// Case-insensitive substring match on `full_name`.
    pub name_contains: Option<String>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn get_employee(&self, id: EmployeeId, include_deleted: bool)
        -> RepoResult<Option<Employee>>;
    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>>;
    fn soft_delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        self.conn
            .execute(
                "INSERT INTO employees (
                    uuid,
                    full_name,
                    cpf,
                    pis,
                    ctps_number,
                    ctps_series,
                    email,
                    phone,
                    admission_date,
                    status,
                    is_deleted
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
                params![
                    employee.uuid.to_string(),
                    employee.full_name.as_str(),
                    employee.cpf.as_str(),
                    employee.pis.as_deref(),
                    employee.ctps_number.as_deref(),
                    employee.ctps_series.as_deref(),
                    employee.email.as_deref(),
                    employee.phone.as_deref(),
                    employee.admission_date.map(date_to_db),
                    status_to_db(employee.status),
                    bool_to_int(employee.is_deleted),
                ],
            )
            .map_err(|err| map_unique_cpf_violation(err, &employee.cpf))?;

        Ok(employee.uuid)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        employee.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE employees
                 SET
                    full_name = ?1,
                    cpf = ?2,
                    pis = ?3,
                    ctps_number = ?4,
                    ctps_series = ?5,
                    email = ?6,
                    phone = ?7,
                    admission_date = ?8,
                    status = ?9,
                    is_deleted = ?10,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?11;",
                params![
                    employee.full_name.as_str(),
                    employee.cpf.as_str(),
                    employee.pis.as_deref(),
                    employee.ctps_number.as_deref(),
                    employee.ctps_series.as_deref(),
                    employee.email.as_deref(),
                    employee.phone.as_deref(),
                    employee.admission_date.map(date_to_db),
                    status_to_db(employee.status),
                    bool_to_int(employee.is_deleted),
                    employee.uuid.to_string(),
                ],
            )
            .map_err(|err| map_unique_cpf_violation(err, &employee.cpf))?;

        if changed == 0 {
            return Err(RepoError::NotFound(employee.uuid));
        }

        Ok(())
    }

    fn get_employee(
        &self,
        id: EmployeeId,
        include_deleted: bool,
    ) -> RepoResult<Option<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        let mut sql = format!("{EMPLOYEE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status_to_db(status).to_string()));
        }

        if let Some(fragment) = &query.name_contains {
            sql.push_str(" AND full_name LIKE ? COLLATE NOCASE");
            bind_values.push(Value::Text(format!("%{fragment}%")));
        }

        sql.push_str(" ORDER BY full_name ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn soft_delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in employees.uuid"))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in employees.status"
        ))
    })?;

    let admission_date = match row.get::<_, Option<String>>("admission_date")? {
        Some(value) => Some(date_from_db(&value)?),
        None => None,
    };

    let is_deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_deleted value `{other}` in employees.is_deleted"
            )));
        }
    };

    let employee = Employee {
        uuid,
        full_name: row.get("full_name")?,
        cpf: row.get("cpf")?,
        pis: row.get("pis")?,
        ctps_number: row.get("ctps_number")?,
        ctps_series: row.get("ctps_series")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        admission_date,
        status,
        is_deleted,
    };
    employee.validate()?;
    Ok(employee)
}

fn map_unique_cpf_violation(err: rusqlite::Error, cpf: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message.contains("employees.cpf") =>
        {
            RepoError::DuplicateCpf(cpf.to_string())
        }
        _ => RepoError::from(err),
    }
}

fn status_to_db(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Active => "active",
        EmployeeStatus::Inactive => "inactive",
        EmployeeStatus::OnLeave => "on_leave",
        EmployeeStatus::Vacation => "vacation",
    }
}

fn parse_status(value: &str) -> Option<EmployeeStatus> {
    match value {
        "active" => Some(EmployeeStatus::Active),
        "inactive" => Some(EmployeeStatus::Inactive),
        "on_leave" => Some(EmployeeStatus::OnLeave),
        "vacation" => Some(EmployeeStatus::Vacation),
        _ => None,
    }
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DB_DATE_FORMAT).to_string()
}

fn date_from_db(value: &str) -> Result<NaiveDate, RepoError> {
    NaiveDate::parse_from_str(value, DB_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid admission_date value `{value}` in employees.admission_date"
        ))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
