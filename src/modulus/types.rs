use serde::{Deserialize, Serialize};

use crate::table::Method;

/// A sort code and account number pair to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub sort_code: String,
    pub account_number: String,
}

impl ValidationRequest {
    pub fn new(sort_code: impl Into<String>, account_number: impl Into<String>) -> Self {
        Self {
            sort_code: sort_code.into(),
            account_number: account_number.into(),
        }
    }
}

/// Result of evaluating one matched weighting rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub method: Method,
    pub pass: bool,
    /// Exception code attached to the rule, whether or not it fired.
    pub exception_code: Option<String>,
    /// True when the exception actually changed how this input was evaluated.
    pub exception_applied: bool,
}

/// The request plus one outcome per matched rule, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub request: ValidationRequest,
    pub outcomes: Vec<ValidationOutcome>,
}

impl ValidationResult {
    /// True when every matched rule passed.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(pass: bool) -> ValidationOutcome {
        ValidationOutcome {
            method: Method::Mod11,
            pass,
            exception_code: None,
            exception_applied: false,
        }
    }

    #[test]
    fn test_all_passed() {
        let mut result = ValidationResult {
            request: ValidationRequest::new("070116", "12345678"),
            outcomes: vec![outcome(true), outcome(true)],
        };
        assert!(result.all_passed());

        result.outcomes.push(outcome(false));
        assert!(!result.all_passed());
    }

    #[test]
    fn test_result_json_field_names() {
        let result = ValidationResult {
            request: ValidationRequest::new("070116", "12345678"),
            outcomes: vec![ValidationOutcome {
                method: Method::Dblal,
                pass: true,
                exception_code: Some("7".to_string()),
                exception_applied: true,
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["request"]["sortCode"], "070116");
        assert_eq!(json["request"]["accountNumber"], "12345678");
        assert_eq!(json["outcomes"][0]["method"], "DBLAL");
        assert_eq!(json["outcomes"][0]["exceptionCode"], "7");
        assert_eq!(json["outcomes"][0]["exceptionApplied"], true);
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let req: ValidationRequest =
            serde_json::from_str(r#"{"sortCode":"089999","accountNumber":"66374958"}"#).unwrap();
        assert_eq!(req, ValidationRequest::new("089999", "66374958"));
    }
}
