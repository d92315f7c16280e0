//! Contact form validation.
//!
//! [`validate_contact`] turns an untyped JSON form submission into a
//! [`ContactSubmission`] or a [`FieldErrors`] map with one message per
//! invalid field. Every field is checked; validation never stops at the
//! first failure. Pure logic, no I/O.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field names and limits
// ---------------------------------------------------------------------------

pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_COMPANY: &str = "company";
pub const FIELD_SERVICE_TYPE: &str = "serviceType";
pub const FIELD_PROJECT_TITLE: &str = "projectTitle";
pub const FIELD_TIMELINE: &str = "timeline";
pub const FIELD_MESSAGE: &str = "message";

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 100;
pub const MAX_COMPANY_LENGTH: usize = 100;
pub const MAX_PROJECT_TITLE_LENGTH: usize = 100;
pub const MIN_MESSAGE_LENGTH: usize = 10;
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// `+27` or `0` followed by nine ASCII digits, checked after whitespace is removed.
static SA_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+27|0)[0-9]{9}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Service type
// ---------------------------------------------------------------------------

pub const SERVICE_WEB_DEVELOPMENT: &str = "web-development";
pub const SERVICE_MOBILE_DEVELOPMENT: &str = "mobile-development";
pub const SERVICE_CONSULTATION: &str = "consultation";
pub const SERVICE_OTHER: &str = "other";

pub const VALID_SERVICE_TYPES: &[&str] = &[
    SERVICE_WEB_DEVELOPMENT,
    SERVICE_MOBILE_DEVELOPMENT,
    SERVICE_CONSULTATION,
    SERVICE_OTHER,
];

/// Service the visitor is enquiring about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    WebDevelopment,
    MobileDevelopment,
    Consultation,
    Other,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebDevelopment => SERVICE_WEB_DEVELOPMENT,
            Self::MobileDevelopment => SERVICE_MOBILE_DEVELOPMENT,
            Self::Consultation => SERVICE_CONSULTATION,
            Self::Other => SERVICE_OTHER,
        }
    }

    /// Human-readable name used in notification emails.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::MobileDevelopment => "Mobile Development",
            Self::Consultation => "Consultation",
            Self::Other => "Other",
        }
    }
}

impl FromStr for ServiceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SERVICE_WEB_DEVELOPMENT => Ok(Self::WebDevelopment),
            SERVICE_MOBILE_DEVELOPMENT => Ok(Self::MobileDevelopment),
            SERVICE_CONSULTATION => Ok(Self::Consultation),
            SERVICE_OTHER => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown service type: '{other}'. Valid types: {}",
                VALID_SERVICE_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

pub const TIMELINE_ASAP: &str = "asap";
pub const TIMELINE_ONE_MONTH: &str = "1-month";
pub const TIMELINE_ONE_TO_THREE_MONTHS: &str = "1-3-months";
pub const TIMELINE_THREE_TO_SIX_MONTHS: &str = "3-6-months";
pub const TIMELINE_FLEXIBLE: &str = "flexible";

pub const VALID_TIMELINES: &[&str] = &[
    TIMELINE_ASAP,
    TIMELINE_ONE_MONTH,
    TIMELINE_ONE_TO_THREE_MONTHS,
    TIMELINE_THREE_TO_SIX_MONTHS,
    TIMELINE_FLEXIBLE,
];

/// Desired project start / delivery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "1-3-months")]
    OneToThreeMonths,
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Timeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asap => TIMELINE_ASAP,
            Self::OneMonth => TIMELINE_ONE_MONTH,
            Self::OneToThreeMonths => TIMELINE_ONE_TO_THREE_MONTHS,
            Self::ThreeToSixMonths => TIMELINE_THREE_TO_SIX_MONTHS,
            Self::Flexible => TIMELINE_FLEXIBLE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Asap => "As soon as possible",
            Self::OneMonth => "Within 1 month",
            Self::OneToThreeMonths => "1-3 months",
            Self::ThreeToSixMonths => "3-6 months",
            Self::Flexible => "Flexible",
        }
    }
}

impl FromStr for Timeline {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TIMELINE_ASAP => Ok(Self::Asap),
            TIMELINE_ONE_MONTH => Ok(Self::OneMonth),
            TIMELINE_ONE_TO_THREE_MONTHS => Ok(Self::OneToThreeMonths),
            TIMELINE_THREE_TO_SIX_MONTHS => Ok(Self::ThreeToSixMonths),
            TIMELINE_FLEXIBLE => Ok(Self::Flexible),
            other => Err(CoreError::Validation(format!(
                "Unknown timeline: '{other}'. Valid timelines: {}",
                VALID_TIMELINES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A validated contact form submission, ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub service_type: ServiceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    pub message: String,
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Field name -> message for every field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a raw contact form submission.
pub fn validate_contact(input: &Map<String, Value>) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    let first_name = required_text(input, FIELD_FIRST_NAME, "First name", &mut errors)
        .and_then(|v| check_name(v, FIELD_FIRST_NAME, "First name", &mut errors));
    let last_name = required_text(input, FIELD_LAST_NAME, "Last name", &mut errors)
        .and_then(|v| check_name(v, FIELD_LAST_NAME, "Last name", &mut errors));
    let email = required_text(input, FIELD_EMAIL, "Email", &mut errors)
        .and_then(|v| check_email(v, &mut errors));
    let phone = optional_text(input, FIELD_PHONE, "Phone number", &mut errors)
        .and_then(|v| check_phone(v, &mut errors));
    let company = optional_text(input, FIELD_COMPANY, "Company", &mut errors).and_then(|v| {
        check_max(v, MAX_COMPANY_LENGTH, FIELD_COMPANY, "Company name", &mut errors)
    });
    let service_type = match optional_text(input, FIELD_SERVICE_TYPE, "Service type", &mut errors) {
        Some(v) => check_choice::<ServiceType>(&v, FIELD_SERVICE_TYPE, "service type", &mut errors),
        None => {
            if !errors.contains(FIELD_SERVICE_TYPE) {
                errors.insert(FIELD_SERVICE_TYPE, "Please select a service type");
            }
            None
        }
    };
    let project_title = optional_text(input, FIELD_PROJECT_TITLE, "Project title", &mut errors)
        .and_then(|v| {
            check_max(
                v,
                MAX_PROJECT_TITLE_LENGTH,
                FIELD_PROJECT_TITLE,
                "Project title",
                &mut errors,
            )
        });
    let timeline = optional_text(input, FIELD_TIMELINE, "Timeline", &mut errors)
        .and_then(|v| check_choice::<Timeline>(&v, FIELD_TIMELINE, "timeline", &mut errors));
    let message = required_text(input, FIELD_MESSAGE, "Message", &mut errors)
        .and_then(|v| check_message(v, &mut errors));

    match (first_name, last_name, email, service_type, message) {
        (Some(first_name), Some(last_name), Some(email), Some(service_type), Some(message))
            if errors.is_empty() =>
        {
            Ok(ContactSubmission {
                first_name,
                last_name,
                email,
                phone,
                company,
                service_type,
                project_title,
                timeline,
                message,
            })
        }
        _ => Err(errors),
    }
}

/// Read a string field, trimmed. Absent, `null`, and blank all mean "not
/// provided"; any non-string value is recorded as an error.
fn optional_text(
    input: &Map<String, Value>,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match input.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(_) => {
            errors.insert(field, format!("{label} must be text"));
            None
        }
    }
}

fn required_text(
    input: &Map<String, Value>,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = optional_text(input, field, label, errors);
    if value.is_none() && !errors.contains(field) {
        errors.insert(field, format!("{label} is required"));
    }
    value
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_name(
    value: String,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let len = char_len(&value);
    if len < MIN_NAME_LENGTH {
        errors.insert(
            field,
            format!("{label} must be at least {MIN_NAME_LENGTH} characters"),
        );
        return None;
    }
    if len > MAX_NAME_LENGTH {
        errors.insert(
            field,
            format!("{label} must be at most {MAX_NAME_LENGTH} characters"),
        );
        return None;
    }
    Some(value)
}

fn check_email(value: String, errors: &mut FieldErrors) -> Option<String> {
    if char_len(&value) > MAX_EMAIL_LENGTH {
        errors.insert(
            FIELD_EMAIL,
            format!("Email must be at most {MAX_EMAIL_LENGTH} characters"),
        );
        return None;
    }
    if !value.validate_email() {
        errors.insert(FIELD_EMAIL, "Please enter a valid email address");
        return None;
    }
    Some(value)
}

fn check_phone(value: String, errors: &mut FieldErrors) -> Option<String> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if SA_PHONE_RE.is_match(&compact) {
        Some(compact)
    } else {
        errors.insert(
            FIELD_PHONE,
            "Please enter a valid South African phone number (+27XXXXXXXXX or 0XXXXXXXXX)",
        );
        None
    }
}

fn check_max(
    value: String,
    max: usize,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    if char_len(&value) > max {
        errors.insert(field, format!("{label} must be at most {max} characters"));
        None
    } else {
        Some(value)
    }
}

fn check_message(value: String, errors: &mut FieldErrors) -> Option<String> {
    let len = char_len(&value);
    if len < MIN_MESSAGE_LENGTH {
        errors.insert(
            FIELD_MESSAGE,
            format!("Message must be at least {MIN_MESSAGE_LENGTH} characters"),
        );
        return None;
    }
    if len > MAX_MESSAGE_LENGTH {
        errors.insert(
            FIELD_MESSAGE,
            format!("Message must be at most {MAX_MESSAGE_LENGTH} characters"),
        );
        return None;
    }
    Some(value)
}

fn check_choice<T: FromStr>(
    value: &str,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    match value.parse::<T>() {
        Ok(choice) => Some(choice),
        Err(_) => {
            errors.insert(field, format!("Please select a valid {label}"));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn form(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn minimal() -> Value {
        json!({
            "firstName": "Jo",
            "lastName": "Doe",
            "email": "jo@x.com",
            "serviceType": "consultation",
            "message": "0123456789"
        })
    }

    #[test]
    fn minimal_submission_is_accepted() {
        let submission = validate_contact(&form(minimal())).unwrap();
        assert_eq!(submission.first_name, "Jo");
        assert_eq!(submission.service_type, ServiceType::Consultation);
        assert_eq!(submission.message, "0123456789");
        assert_eq!(submission.phone, None);
        assert_eq!(submission.timeline, None);
    }

    #[test]
    fn nine_char_message_is_rejected() {
        let mut input = form(minimal());
        input.insert("message".into(), json!("012345678"));
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FIELD_MESSAGE),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn overlong_message_is_rejected() {
        let mut input = form(minimal());
        input.insert("message".into(), json!("x".repeat(MAX_MESSAGE_LENGTH + 1)));
        let errors = validate_contact(&input).unwrap_err();
        assert!(errors.get(FIELD_MESSAGE).unwrap().contains("at most 2000"));
    }

    #[test]
    fn phone_with_spaces_is_normalized() {
        let mut input = form(minimal());
        input.insert("phone".into(), json!("083 123 4567"));
        let submission = validate_contact(&input).unwrap();
        assert_eq!(submission.phone.as_deref(), Some("0831234567"));

        input.insert("phone".into(), json!("+27 83 123 4567"));
        let submission = validate_contact(&input).unwrap();
        assert_eq!(submission.phone.as_deref(), Some("+27831234567"));
    }

    #[test]
    fn short_phone_is_rejected() {
        let mut input = form(minimal());
        input.insert("phone".into(), json!("12345"));
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FIELD_PHONE]);
    }

    #[test]
    fn non_ascii_digits_phone_is_rejected() {
        let mut input = form(minimal());
        input.insert("phone".into(), json!("0\u{668}\u{663}\u{661}\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}"));
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FIELD_PHONE]);

        input.insert("phone".into(), json!("+27\u{ff18}31234567"));
        assert!(validate_contact(&input).unwrap_err().contains(FIELD_PHONE));
    }

    #[test]
    fn blank_optional_fields_count_as_absent() {
        let mut input = form(minimal());
        input.insert("phone".into(), json!("   "));
        input.insert("company".into(), json!(""));
        input.insert("timeline".into(), Value::Null);
        let submission = validate_contact(&input).unwrap();
        assert_eq!(submission.phone, None);
        assert_eq!(submission.company, None);
        assert_eq!(submission.timeline, None);
    }

    #[test]
    fn missing_service_type_is_the_only_error() {
        let mut input = form(minimal());
        input.remove("serviceType");
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FIELD_SERVICE_TYPE]);
        assert_eq!(
            errors.get(FIELD_SERVICE_TYPE),
            Some("Please select a service type")
        );
    }

    #[test]
    fn unknown_service_type_is_rejected() {
        let mut input = form(minimal());
        input.insert("serviceType".into(), json!("gardening"));
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(
            errors.get(FIELD_SERVICE_TYPE),
            Some("Please select a valid service type")
        );
    }

    #[test]
    fn all_optional_fields_are_carried_through() {
        let mut input = form(minimal());
        input.insert("phone".into(), json!("0821234567"));
        input.insert("company".into(), json!("  Acme  "));
        input.insert("projectTitle".into(), json!("New storefront"));
        input.insert("timeline".into(), json!("1-3-months"));
        let submission = validate_contact(&input).unwrap();
        assert_eq!(submission.company.as_deref(), Some("Acme"));
        assert_eq!(submission.project_title.as_deref(), Some("New storefront"));
        assert_eq!(submission.timeline, Some(Timeline::OneToThreeMonths));
    }

    #[test]
    fn invalid_timeline_is_rejected() {
        let mut input = form(minimal());
        input.insert("timeline".into(), json!("next-year"));
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FIELD_TIMELINE]);
    }

    #[test]
    fn every_violation_is_reported_in_one_pass() {
        let input = form(json!({
            "firstName": "J",
            "email": "not-an-email",
            "phone": "12345",
            "company": "c".repeat(101),
            "serviceType": "gardening",
            "message": 42
        }));
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                FIELD_COMPANY,
                FIELD_EMAIL,
                FIELD_FIRST_NAME,
                FIELD_LAST_NAME,
                FIELD_MESSAGE,
                FIELD_PHONE,
                FIELD_SERVICE_TYPE,
            ]
        );
        assert_eq!(errors.get(FIELD_LAST_NAME), Some("Last name is required"));
        assert_eq!(errors.get(FIELD_MESSAGE), Some("Message must be text"));
    }

    #[test]
    fn overlong_email_is_rejected_before_format_check() {
        let mut input = form(minimal());
        let local = "a".repeat(95);
        input.insert("email".into(), json!(format!("{local}@x.com")));
        let errors = validate_contact(&input).unwrap_err();
        assert_matches!(errors.get(FIELD_EMAIL), Some(msg) if msg.contains("at most 100"));
    }

    #[test]
    fn names_are_trimmed_before_length_check() {
        let mut input = form(minimal());
        input.insert("firstName".into(), json!("  J  "));
        let errors = validate_contact(&input).unwrap_err();
        assert_eq!(
            errors.get(FIELD_FIRST_NAME),
            Some("First name must be at least 2 characters")
        );
    }

    #[test]
    fn submission_serializes_camel_case_without_empty_optionals() {
        let submission = validate_contact(&form(minimal())).unwrap();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["firstName"], "Jo");
        assert_eq!(json["serviceType"], "consultation");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn field_errors_serialize_as_flat_map() {
        let mut errors = FieldErrors::default();
        errors.insert(FIELD_EMAIL, "bad");
        assert_eq!(serde_json::to_value(&errors).unwrap(), json!({ "email": "bad" }));
    }
}
