//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record and its lifecycle helpers.
//! - Enforce document validity before any write reaches persistence.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another employee.
//! - `cpf` and `pis` are stored as bare digit strings; display formatting
//!   happens at the presentation boundary.
//! - `is_deleted` is the source of truth for tombstone state.

use crate::model::document::{self, DocumentError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every employee record.
pub type EmployeeId = Uuid;

/// Employment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// On the active roster.
    Active,
    /// Terminated or otherwise off the roster.
    Inactive,
    /// Temporarily away (medical or legal leave).
    OnLeave,
    /// On scheduled vacation.
    Vacation,
}

/// Validation failure raised before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Full name is empty or whitespace.
    EmptyFullName,
    /// A document field failed its shape or check-digit rules.
    Document(DocumentError),
    /// CTPS number and series must be provided together.
    CtpsPairIncomplete,
}

impl std::fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "full name is required"),
            Self::Document(err) => write!(f, "{err}"),
            Self::CtpsPairIncomplete => {
                write!(f, "ctps number and series must be provided together")
            }
        }
    }
}

impl std::error::Error for EmployeeValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Document(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DocumentError> for EmployeeValidationError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Stable global ID used for linking and auditing.
    pub uuid: EmployeeId,
    pub full_name: String,
    /// Bare 11-digit CPF.
    pub cpf: String,
    /// Bare 11-digit PIS/PASEP, when enrolled.
    pub pis: Option<String>,
    pub ctps_number: Option<String>,
    pub ctps_series: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
    /// Soft delete tombstone preserving record history.
    pub is_deleted: bool,
}

impl Employee {
    /// Creates a new active employee with a generated stable ID.
    ///
    /// `cpf` is normalized to bare digits; validity is checked by
    /// `validate()` on the write path, not here.
    pub fn new(full_name: impl Into<String>, cpf: &str) -> Self {
        Self::with_id(Uuid::new_v4(), full_name, cpf)
    }

    /// Creates an employee with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: EmployeeId, full_name: impl Into<String>, cpf: &str) -> Self {
        Self {
            uuid,
            full_name: full_name.into(),
            cpf: document::strip_to_digits(cpf),
            pis: None,
            ctps_number: None,
            ctps_series: None,
            email: None,
            phone: None,
            admission_date: None,
            status: EmployeeStatus::Active,
            is_deleted: false,
        }
    }

    /// Checks every document and shape invariant for this record.
    ///
    /// Write paths must call this before SQL mutations.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyFullName);
        }

        document::validate_cpf(&self.cpf)?;

        if let Some(pis) = &self.pis {
            document::validate_pis(pis)?;
        }

        match (&self.ctps_number, &self.ctps_series) {
            (Some(number), Some(series)) => document::validate_ctps(number, series)?,
            (None, None) => {}
            _ => return Err(EmployeeValidationError::CtpsPairIncomplete),
        }

        Ok(())
    }

    /// Marks this record as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears the soft-delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this record is visible on the roster.
    pub fn is_active(&self) -> bool {
        !self.is_deleted && self.status == EmployeeStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::{Employee, EmployeeStatus, EmployeeValidationError};
    use crate::model::document::DocumentError;

    fn valid_employee() -> Employee {
        Employee::new("Ana Souza", "529.982.247-25")
    }

    #[test]
    fn new_normalizes_cpf_to_digits() {
        let employee = valid_employee();
        assert_eq!(employee.cpf, "52998224725");
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert!(!employee.is_deleted);
    }

    #[test]
    fn validate_accepts_complete_record() {
        let mut employee = valid_employee();
        employee.pis = Some("12045678905".to_string());
        employee.ctps_number = Some("123456".to_string());
        employee.ctps_series = Some("1234".to_string());
        employee.validate().expect("complete record is valid");
    }

    #[test]
    fn validate_rejects_empty_name_and_bad_cpf() {
        let mut employee = valid_employee();
        employee.full_name = "   ".to_string();
        assert_eq!(
            employee.validate(),
            Err(EmployeeValidationError::EmptyFullName)
        );

        let mut employee = valid_employee();
        employee.cpf = "11111111111".to_string();
        assert_eq!(
            employee.validate(),
            Err(EmployeeValidationError::Document(
                DocumentError::RepeatedDigits { field: "cpf" }
            ))
        );
    }

    #[test]
    fn validate_rejects_half_ctps_pair() {
        let mut employee = valid_employee();
        employee.ctps_number = Some("123456".to_string());
        assert_eq!(
            employee.validate(),
            Err(EmployeeValidationError::CtpsPairIncomplete)
        );
    }

    #[test]
    fn soft_delete_and_restore_toggle_visibility() {
        let mut employee = valid_employee();
        assert!(employee.is_active());
        employee.soft_delete();
        assert!(!employee.is_active());
        employee.restore();
        assert!(employee.is_active());
    }

    #[test]
    fn serde_round_trip_keeps_status_naming() {
        let employee = valid_employee();
        let json = serde_json::to_string(&employee).expect("serialize employee");
        assert!(json.contains("\"active\""));
        let back: Employee = serde_json::from_str(&json).expect("deserialize employee");
        assert_eq!(back, employee);
    }
}
