use std::path::PathBuf;

use super::error::ModulusError;
use super::types::{ValidationOutcome, ValidationRequest, ValidationResult};
use crate::table::{LazyTable, Method, WeightingRule, WeightingTable, WEIGHT_COUNT};

pub const SORT_CODE_LEN: usize = 6;
pub const ACCOUNT_NUMBER_LEN: usize = 8;

/// The last two account digits, compared against the MOD11 remainder by
/// exception 4 and tested for 9 by exception 7.
const CHECK_DIGIT_POSITIONS: [usize; 2] = [12, 13];

/// Weight positions cleared by exception 7 (the sort code and the first two
/// account digits).
const EXCEPTION_7_ZEROED: std::ops::RangeInclusive<usize> = 0..=7;

const EXCEPTION_REMAINDER_IS_CHECK_DIGITS: &str = "4";
const EXCEPTION_ZERO_LEADING_WEIGHTS: &str = "7";

/// Validates sort code / account number pairs against an owned table.
#[derive(Debug, Clone)]
pub struct ModulusEngine {
    table: WeightingTable,
}

impl ModulusEngine {
    pub fn new(table: WeightingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &WeightingTable {
        &self.table
    }

    pub fn validate(
        &self,
        sort_code: &str,
        account_number: &str,
    ) -> Result<ValidationResult, ModulusError> {
        self.validate_request(&ValidationRequest::new(sort_code, account_number))
    }

    pub fn validate_request(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, ModulusError> {
        let input = parse_input(request)?;
        evaluate(&self.table, request, &input)
    }
}

/// Validates against a table file that is only read on the first request.
///
/// Input shape errors are reported without touching the file. A table that
/// fails to load surfaces as [`ModulusError::TableLoad`] and is retried on
/// the next request.
#[derive(Debug)]
pub struct LazyEngine {
    table: LazyTable,
}

impl LazyEngine {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: LazyTable::new(path),
        }
    }

    pub fn table(&self) -> &LazyTable {
        &self.table
    }

    pub fn validate(
        &self,
        sort_code: &str,
        account_number: &str,
    ) -> Result<ValidationResult, ModulusError> {
        self.validate_request(&ValidationRequest::new(sort_code, account_number))
    }

    pub fn validate_request(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, ModulusError> {
        let input = parse_input(request)?;
        let table = self.table.get()?;
        evaluate(table, request, &input)
    }
}

struct ParsedInput {
    sort_code: u32,
    digits: [u8; WEIGHT_COUNT],
}

fn parse_input(request: &ValidationRequest) -> Result<ParsedInput, ModulusError> {
    check_length("sort code", &request.sort_code, SORT_CODE_LEN)?;
    check_length("account number", &request.account_number, ACCOUNT_NUMBER_LEN)?;
    check_numeric("sort code", &request.sort_code)?;
    check_numeric("account number", &request.account_number)?;

    let mut digits = [0u8; WEIGHT_COUNT];
    let combined = request.sort_code.bytes().chain(request.account_number.bytes());
    for (digit, byte) in digits.iter_mut().zip(combined) {
        *digit = byte - b'0';
    }

    let sort_code = digits[..SORT_CODE_LEN]
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d));

    Ok(ParsedInput { sort_code, digits })
}

fn check_length(field: &'static str, value: &str, expected: usize) -> Result<(), ModulusError> {
    let len = value.chars().count();
    if len != expected {
        return Err(ModulusError::MalformedInput {
            field,
            reason: format!("must be {} digits, got {} characters", expected, len),
        });
    }
    Ok(())
}

fn check_numeric(field: &'static str, value: &str) -> Result<(), ModulusError> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModulusError::MalformedInput {
            field,
            reason: format!("'{}' is not numeric", value),
        });
    }
    Ok(())
}

fn evaluate(
    table: &WeightingTable,
    request: &ValidationRequest,
    input: &ParsedInput,
) -> Result<ValidationResult, ModulusError> {
    let outcomes: Vec<ValidationOutcome> = table
        .matching(input.sort_code)
        .map(|rule| evaluate_rule(rule, &input.digits))
        .collect();

    if outcomes.is_empty() {
        return Err(ModulusError::NoMatchingRule {
            sort_code: request.sort_code.clone(),
        });
    }

    Ok(ValidationResult {
        request: request.clone(),
        outcomes,
    })
}

/// Evaluate one rule against the 14 digits of sort code + account number.
///
/// Only exceptions 4 and 7 change the evaluation. Any other exception code
/// is reported on the outcome but otherwise ignored.
pub fn evaluate_rule(rule: &WeightingRule, digits: &[u8; WEIGHT_COUNT]) -> ValidationOutcome {
    let exception = rule.exception_code();
    let mut weights = *rule.weights();
    let mut exception_applied = false;

    if exception == Some(EXCEPTION_ZERO_LEADING_WEIGHTS) && digits[CHECK_DIGIT_POSITIONS[0]] == 9 {
        weights[EXCEPTION_7_ZEROED].fill(0);
        exception_applied = true;
    }

    let products = digits
        .iter()
        .zip(weights.iter())
        .map(|(&d, &w)| i64::from(d) * i64::from(w));

    let sum: i64 = match rule.method() {
        Method::Dblal => products.map(digit_sum).sum(),
        Method::Mod10 | Method::Mod11 => products.sum(),
    };
    let remainder = sum.rem_euclid(rule.method().modulus());

    let pass = if rule.method() == Method::Mod11
        && exception == Some(EXCEPTION_REMAINDER_IS_CHECK_DIGITS)
    {
        exception_applied = true;
        remainder == check_digits(digits)
    } else {
        remainder == 0
    };

    ValidationOutcome {
        method: rule.method(),
        pass,
        exception_code: exception.map(str::to_string),
        exception_applied,
    }
}

/// Two-digit number formed by the check digits of the unweighted input.
fn check_digits(digits: &[u8; WEIGHT_COUNT]) -> i64 {
    let [g, h] = CHECK_DIGIT_POSITIONS;
    i64::from(digits[g]) * 10 + i64::from(digits[h])
}

fn digit_sum(n: i64) -> i64 {
    let mut n = n.unsigned_abs();
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum as i64
}
