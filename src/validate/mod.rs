// Request validation helpers shared by every handler.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ErrorDetail};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$"#,
    )
    .unwrap_or_else(|e| panic!("email pattern must compile: {}", e))
});

/// Whether a submitted value counts as provided.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

macro_rules! always_present {
    ($($ty:ty),*) => {
        $(impl Presence for $ty {
            fn is_present(&self) -> bool {
                true
            }
        })*
    };
}

always_present!(i32, i64, Decimal, bool);

/// Collects missing required fields in declaration order.
///
/// ```ignore
/// RequiredFields::new()
///     .field("name", &payload.name)
///     .field("price", &payload.price)
///     .check()?;
/// ```
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<ErrorDetail>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<V: Presence + ?Sized>(mut self, name: &str, value: &V) -> Self {
        if !value.is_present() {
            self.missing.push(ErrorDetail::missing_field(name));
        }
        self
    }

    pub fn check(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::invalid_arguments(self.missing))
        }
    }
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Partial updates treat a blank string like an absent field.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Validate and normalise an email for storage and lookup.
pub fn normalize_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    if !validate_email(email) {
        return Err(ApiError::invalid_email());
    }
    Ok(email.to_lowercase())
}

pub fn is_integer_and_positive(n: i64) -> bool {
    n > 0
}

/// Path ids must be positive integers.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| is_integer_and_positive(i64::from(*id)))
        .ok_or_else(|| ApiError::invalid_argument(format!("id must be a positive integer, got '{}'", raw)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdminRole {
    Superadmin,
    Admin,
    Moderator,
}

impl AdminRole {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw {
            "SUPERADMIN" => Ok(AdminRole::Superadmin),
            "ADMIN" => Ok(AdminRole::Admin),
            "MODERATOR" => Ok(AdminRole::Moderator),
            _ => Err(ApiError::invalid_argument_with(
                "role type is not valid",
                vec![ErrorDetail::new(
                    "invalidRole",
                    "role must be one of 'SUPERADMIN', 'ADMIN', and 'MODERATOR'",
                )],
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Superadmin => "SUPERADMIN",
            AdminRole::Admin => "ADMIN",
            AdminRole::Moderator => "MODERATOR",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Register {
        email: Option<String>,
        fullname: Option<String>,
        password: Option<String>,
        shipping_address: Option<String>,
    }

    fn check(body: &Register) -> Result<(), ApiError> {
        RequiredFields::new()
            .field("email", &body.email)
            .field("fullname", &body.fullname)
            .field("password", &body.password)
            .field("shippingAddress", &body.shipping_address)
            .check()
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let body = Register { fullname: Some("Jane".into()), password: Some(String::new()), ..Default::default() };
        let Err(ApiError::InvalidArgument { detail: Some(detail), .. }) = check(&body) else {
            panic!("expected invalid argument");
        };
        let codes: Vec<_> = detail.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["missingEmail", "missingPassword", "missingShippingAddress"]);
    }

    #[test]
    fn complete_body_passes() {
        let body = Register {
            email: Some("jane@example.com".into()),
            fullname: Some("Jane".into()),
            password: Some("secret".into()),
            shipping_address: Some("1 Main St".into()),
        };
        assert!(check(&body).is_ok());
    }

    #[test]
    fn numbers_count_as_present() {
        assert!(RequiredFields::new().field("categoryId", &Some(0_i32)).check().is_ok());
        assert!(RequiredFields::new().field("categoryId", &None::<i32>).check().is_err());
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("jane.doe@example.com"));
        assert!(validate_email("JANE@EXAMPLE.COM"));
        assert!(!validate_email("jane@"));
        assert!(!validate_email("not an email"));
        assert!(!validate_email("jane@example.com trailing"));
        assert!(!validate_email(r#""jane doe"@example.com"#));
        assert!(!validate_email("jane@[192.168.0.1]"));
        assert_eq!(normalize_email(" Jane@Example.com ").unwrap(), "jane@example.com");
    }

    #[test]
    fn blank_strings_are_absent() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some(" Mugs ".into())), Some(" Mugs ".into()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("abc").is_err());
        assert!(is_integer_and_positive(1));
        assert!(!is_integer_and_positive(0));
    }

    #[test]
    fn roles_parse_exactly() {
        assert_eq!(AdminRole::parse("MODERATOR").unwrap(), AdminRole::Moderator);
        let err = AdminRole::parse("admin").unwrap_err();
        assert_eq!(err.message(), "role type is not valid");
        assert_eq!(err.to_json()["detail"][0]["code"], "invalidRole");
    }
}
