//! Brazilian labor-document validation and display formatting.
//!
//! # Responsibility
//! - Validate CPF, PIS/PASEP and CTPS values on their check-digit and
//!   length rules.
//! - Parse dates in the Brazilian `dd/mm/yyyy` display format.
//! - Format stored digit strings back into display shapes.
//!
//! # Invariants
//! - Validators operate on stripped digit strings; punctuation in the
//!   input never changes the outcome.
//! - Validation is pure; no IO, no locale lookups.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\D").expect("valid non-digit regex"));

const CPF_LEN: usize = 11;
const PIS_LEN: usize = 11;
const PIS_WEIGHTS: [u32; 10] = [3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const BR_DATE_FORMAT: &str = "%d/%m/%Y";

/// Validation error for document fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A required value is empty.
    Missing { field: &'static str },
    /// The digit count does not match the document shape.
    WrongLength {
        field: &'static str,
        expected: &'static str,
        actual: usize,
    },
    /// All digits identical; formally well-shaped but never issued.
    RepeatedDigits { field: &'static str },
    /// Check digits do not match the document body.
    CheckDigitMismatch { field: &'static str },
    /// Date text does not parse as `dd/mm/yyyy`.
    InvalidDate { value: String },
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::WrongLength {
                field,
                expected,
                actual,
            } => write!(f, "{field} must have {expected} digits, got {actual}"),
            Self::RepeatedDigits { field } => {
                write!(f, "{field} with repeated digits is not a valid document")
            }
            Self::CheckDigitMismatch { field } => write!(f, "{field} check digits do not match"),
            Self::InvalidDate { value } => {
                write!(f, "invalid date `{value}`; expected dd/mm/yyyy")
            }
        }
    }
}

impl Error for DocumentError {}

/// Removes every non-digit character from `value`.
pub fn strip_to_digits(value: &str) -> String {
    NON_DIGIT_RE.replace_all(value, "").into_owned()
}

/// Validates a CPF by length, repeated-digit rejection and both mod-11
/// verifier digits. Accepts punctuated or bare input.
pub fn validate_cpf(cpf: &str) -> Result<(), DocumentError> {
    let digits = digits_of(cpf, "cpf")?;

    if digits.len() != CPF_LEN {
        return Err(DocumentError::WrongLength {
            field: "cpf",
            expected: "11",
            actual: digits.len(),
        });
    }

    if digits.iter().all(|digit| *digit == digits[0]) {
        return Err(DocumentError::RepeatedDigits { field: "cpf" });
    }

    if cpf_check_digit(&digits, 9) != digits[9] || cpf_check_digit(&digits, 10) != digits[10] {
        return Err(DocumentError::CheckDigitMismatch { field: "cpf" });
    }

    Ok(())
}

/// Validates a PIS/PASEP number by length and its weighted mod-11 check
/// digit.
pub fn validate_pis(pis: &str) -> Result<(), DocumentError> {
    let digits = digits_of(pis, "pis")?;

    if digits.len() != PIS_LEN {
        return Err(DocumentError::WrongLength {
            field: "pis",
            expected: "11",
            actual: digits.len(),
        });
    }

    let sum: u32 = digits
        .iter()
        .take(10)
        .zip(PIS_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    let mut check = 11 - (sum % 11);
    if check >= 10 {
        check = 0;
    }

    if check != digits[10] {
        return Err(DocumentError::CheckDigitMismatch { field: "pis" });
    }

    Ok(())
}

/// Validates CTPS number and series on their digit-count rules.
pub fn validate_ctps(number: &str, series: &str) -> Result<(), DocumentError> {
    let number_digits = digits_of(number, "ctps number")?;
    let series_digits = digits_of(series, "ctps series")?;

    if !(5..=7).contains(&number_digits.len()) {
        return Err(DocumentError::WrongLength {
            field: "ctps number",
            expected: "5 to 7",
            actual: number_digits.len(),
        });
    }

    if !(3..=4).contains(&series_digits.len()) {
        return Err(DocumentError::WrongLength {
            field: "ctps series",
            expected: "3 to 4",
            actual: series_digits.len(),
        });
    }

    Ok(())
}

/// Parses a Brazilian-format date (`dd/mm/yyyy`).
pub fn parse_br_date(value: &str) -> Result<NaiveDate, DocumentError> {
    if value.trim().is_empty() {
        return Err(DocumentError::Missing { field: "date" });
    }

    NaiveDate::parse_from_str(value.trim(), BR_DATE_FORMAT).map_err(|_| {
        DocumentError::InvalidDate {
            value: value.to_string(),
        }
    })
}

/// Formats a CPF for display as `000.000.000-00`.
///
/// Input that does not strip to 11 digits is returned unchanged.
pub fn format_cpf(cpf: &str) -> String {
    let digits = strip_to_digits(cpf);
    if digits.len() != CPF_LEN {
        return cpf.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..]
    )
}

/// Formats a PIS for display as `000.00000.00-0`.
///
/// Input that does not strip to 11 digits is returned unchanged.
pub fn format_pis(pis: &str) -> String {
    let digits = strip_to_digits(pis);
    if digits.len() != PIS_LEN {
        return pis.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[..3],
        &digits[3..8],
        &digits[8..10],
        &digits[10..]
    )
}

fn digits_of(value: &str, field: &'static str) -> Result<Vec<u32>, DocumentError> {
    if value.trim().is_empty() {
        return Err(DocumentError::Missing { field });
    }

    Ok(strip_to_digits(value)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect())
}

fn cpf_check_digit(digits: &[u32], body_len: usize) -> u32 {
    let weight_base = (body_len + 1) as u32;
    let sum: u32 = digits
        .iter()
        .take(body_len)
        .enumerate()
        .map(|(index, digit)| digit * (weight_base - index as u32))
        .sum();

    let remainder = (sum * 10) % 11;
    if remainder >= 10 {
        0
    } else {
        remainder
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_cpf, format_pis, parse_br_date, strip_to_digits, validate_cpf, validate_ctps,
        validate_pis, DocumentError,
    };

    #[test]
    fn strip_to_digits_drops_punctuation() {
        assert_eq!(strip_to_digits("529.982.247-25"), "52998224725");
        assert_eq!(strip_to_digits("abc"), "");
    }

    #[test]
    fn valid_cpfs_pass() {
        validate_cpf("52998224725").expect("bare cpf");
        validate_cpf("529.982.247-25").expect("punctuated cpf");
        validate_cpf("111.444.777-35").expect("second fixture");
    }

    #[test]
    fn invalid_cpfs_fail_with_specific_errors() {
        assert_eq!(
            validate_cpf(""),
            Err(DocumentError::Missing { field: "cpf" })
        );
        assert_eq!(
            validate_cpf("123"),
            Err(DocumentError::WrongLength {
                field: "cpf",
                expected: "11",
                actual: 3
            })
        );
        assert_eq!(
            validate_cpf("111.111.111-11"),
            Err(DocumentError::RepeatedDigits { field: "cpf" })
        );
        assert_eq!(
            validate_cpf("52998224726"),
            Err(DocumentError::CheckDigitMismatch { field: "cpf" })
        );
    }

    #[test]
    fn pis_check_digit_is_enforced() {
        validate_pis("120.45678.90-5").expect("valid pis");
        assert_eq!(
            validate_pis("12045678904"),
            Err(DocumentError::CheckDigitMismatch { field: "pis" })
        );
    }

    #[test]
    fn ctps_length_rules() {
        validate_ctps("12345", "123").expect("minimum lengths");
        validate_ctps("1234567", "1234").expect("maximum lengths");
        assert!(validate_ctps("1234", "123").is_err());
        assert!(validate_ctps("12345", "12").is_err());
    }

    #[test]
    fn br_dates_parse_and_reject() {
        let date = parse_br_date("15/01/1990").expect("valid date");
        assert_eq!(date.to_string(), "1990-01-15");
        assert!(parse_br_date("31/02/2020").is_err());
        assert!(parse_br_date("1990-01-15").is_err());
    }

    #[test]
    fn display_formatters_round_digits() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_pis("12045678905"), "120.45678.90-5");
        // Unformattable input passes through untouched.
        assert_eq!(format_cpf("123"), "123");
        assert_eq!(format_pis("12"), "12");
    }
}
