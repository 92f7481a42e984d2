use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{
    errors::{Violation, Violations},
    models::MessageSubmission,
};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct ValidationRules {
    pub name_min: usize,
    pub name_max: usize,
    pub subject_min: usize,
    pub subject_max: usize,
    pub body_min: usize,
    pub body_max: usize,
    pub email_max: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            name_min: 3,
            name_max: 256,
            subject_min: 5,
            subject_max: 256,
            body_min: 10,
            body_max: 4096,
            email_max: 254,
        }
    }
}

/// Checks submitted fields. Collects every violation instead of stopping at the first one.
#[derive(Debug, Clone, Default)]
pub struct MessageValidator {
    rules: ValidationRules,
}

impl MessageValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn validate(&self, submission: &MessageSubmission) -> Result<(), Violations> {
        let rules = &self.rules;
        let mut violations = Violations::default();

        check_length(
            &mut violations,
            "name",
            &submission.name,
            rules.name_min,
            rules.name_max,
        );
        check_email(&mut violations, &submission.email, rules.email_max);
        if let Some(phone) = &submission.phone {
            check_phone(&mut violations, phone);
        }
        check_length(
            &mut violations,
            "subject",
            &submission.subject,
            rules.subject_min,
            rules.subject_max,
        );
        check_length(
            &mut violations,
            "body",
            &submission.body,
            rules.body_min,
            rules.body_max,
        );

        violations.into_result()
    }
}

fn check_length(
    violations: &mut Violations,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        violations.push(Violation::new(field, "must not be blank"));
        return;
    }

    let length = trimmed.chars().count();
    if length < min {
        violations.push(Violation::new(
            field,
            format!("must be at least {min} characters"),
        ));
    } else if length > max {
        violations.push(Violation::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
}

fn check_email(violations: &mut Violations, value: &str, max: usize) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        violations.push(Violation::new("email", "must not be blank"));
        return;
    }

    if trimmed.chars().count() > max {
        violations.push(Violation::new(
            "email",
            format!("must be at most {max} characters"),
        ));
    }
    if !EMAIL_PATTERN.is_match(trimmed) {
        violations.push(Violation::new("email", "must be a valid email address"));
    }
}

fn check_phone(violations: &mut Violations, value: &str) {
    let valid = value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        violations.push(Violation::new(
            "phone",
            format!("must be exactly {PHONE_DIGITS} digits"),
        ));
    }
}
