//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable registration/roster entry points for core callers.
//! - Normalize user-facing input (punctuated documents, Brazilian dates)
//!   before it reaches the model.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Service layer remains storage-agnostic.

use crate::model::document::{self, DocumentError};
use crate::model::employee::{Employee, EmployeeId, EmployeeStatus, EmployeeValidationError};
use crate::repo::employee_repo::{EmployeeListQuery, EmployeeRepository, RepoError, RepoResult};

/// Use-case service wrapper for employee records.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

/// Request model for registering a new employee from form input.
///
/// Document fields accept punctuated display shapes; dates use the
/// Brazilian `dd/mm/yyyy` format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterEmployeeRequest {
    pub full_name: String,
    pub cpf: String,
    pub pis: Option<String>,
    pub ctps_number: Option<String>,
    pub ctps_series: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub admission_date: Option<String>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new employee from form input.
    ///
    /// # Contract
    /// - Documents are normalized to bare digits before persistence.
    /// - The record starts `Active` and not deleted.
    /// - Returns the created stable employee ID.
    pub fn register_employee(
        &self,
        request: &RegisterEmployeeRequest,
    ) -> RepoResult<EmployeeId> {
        let admission_date = request
            .admission_date
            .as_deref()
            .map(document::parse_br_date)
            .transpose()
            .map_err(into_validation)?;

        let mut employee = Employee::new(request.full_name.clone(), &request.cpf);
        employee.pis = request
            .pis
            .as_deref()
            .map(document::strip_to_digits)
            .filter(|value| !value.is_empty());
        employee.ctps_number = request
            .ctps_number
            .as_deref()
            .map(document::strip_to_digits)
            .filter(|value| !value.is_empty());
        employee.ctps_series = request
            .ctps_series
            .as_deref()
            .map(document::strip_to_digits)
            .filter(|value| !value.is_empty());
        employee.email = request.email.clone();
        employee.phone = request.phone.clone();
        employee.admission_date = admission_date;

        self.repo.create_employee(&employee)
    }

    /// Updates an existing employee record by stable ID.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        self.repo.update_employee(employee)
    }

    /// Gets one employee by ID with optional tombstone visibility.
    pub fn get_employee(
        &self,
        id: EmployeeId,
        include_deleted: bool,
    ) -> RepoResult<Option<Employee>> {
        self.repo.get_employee(id, include_deleted)
    }

    /// Lists employees using filter and pagination options.
    pub fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        self.repo.list_employees(query)
    }

    /// Lists the active roster in name order.
    pub fn list_active(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_employees(&EmployeeListQuery {
            status: Some(EmployeeStatus::Active),
            ..EmployeeListQuery::default()
        })
    }

    /// Moves an employee to `Inactive` status, keeping the record visible.
    pub fn terminate_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let mut employee = self
            .repo
            .get_employee(id, false)?
            .ok_or(RepoError::NotFound(id))?;
        employee.status = EmployeeStatus::Inactive;
        self.repo.update_employee(&employee)
    }

    /// Soft-deletes an employee record by ID.
    pub fn archive_employee(&self, id: EmployeeId) -> RepoResult<()> {
        self.repo.soft_delete_employee(id)
    }
}

fn into_validation(err: DocumentError) -> RepoError {
    RepoError::Validation(EmployeeValidationError::Document(err))
}
