//! Field normalization and validation applied by every store before a write.
//!
//! Each function takes a creation input, normalizes it (trim, lowercase email,
//! deduplicate references) and returns the normalized copy, or the first rule
//! that failed.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::error::ValidationError;
use crate::types::{NewDepartment, NewEmployee, NewManager};

pub const EMPLOYEE_NAME_MAX: usize = 100;
pub const MANAGER_NAME_MAX: usize = 100;
pub const DEPARTMENT_NAME_MAX: usize = 50;
pub const SLOGAN_MAX: usize = 200;

const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Trim and lowercase an email the way it is stored.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Compile a department-name lookup pattern, matched unanchored and ignoring
/// case. An empty pattern matches every name.
pub fn name_pattern(pattern: &str) -> Result<Regex, ValidationError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "nombre",
            value: pattern.to_string(),
        })
}

pub fn employee(input: &NewEmployee) -> Result<NewEmployee, ValidationError> {
    let name = required_text("nombre", &input.name, EMPLOYEE_NAME_MAX)?;
    if !input.salary.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "sueldo",
            value: input.salary.to_string(),
        });
    }
    if input.salary < 0.0 {
        return Err(ValidationError::Negative { field: "sueldo" });
    }
    Ok(NewEmployee {
        name,
        salary: input.salary,
    })
}

pub fn manager(input: &NewManager) -> Result<NewManager, ValidationError> {
    let name = required_text("nombre", &input.name, MANAGER_NAME_MAX)?;
    let email = normalize_email(&input.email);
    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }
    if !email_regex().is_match(&email) {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            value: email,
        });
    }
    Ok(NewManager { name, email })
}

/// Validate a department. Repeated employee references collapse to their
/// first occurrence.
pub fn department(input: &NewDepartment) -> Result<NewDepartment, ValidationError> {
    let name = required_text("nombre", &input.name, DEPARTMENT_NAME_MAX)?;
    let slogan = required_text("slogan", &input.slogan, SLOGAN_MAX)?;

    let mut employees = Vec::with_capacity(input.employees.len());
    for id in &input.employees {
        if !employees.contains(id) {
            employees.push(*id);
        }
    }

    Ok(NewDepartment {
        name,
        slogan,
        employees,
        manager: input.manager,
    })
}

fn required_text(field: &'static str, raw: &str, max: usize) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value.to_string())
}
