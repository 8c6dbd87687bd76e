use serde::Serialize;
use std::fmt;

use super::error::RuleError;

/// Number of digits in a sort code followed by an account number.
pub const WEIGHT_COUNT: usize = 14;

const MIN_TOKENS: usize = 3 + WEIGHT_COUNT;
const MAX_TOKENS: usize = MIN_TOKENS + 1;

/// Checksum algorithm assigned to a sort code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    #[serde(rename = "MOD10")]
    Mod10,
    #[serde(rename = "MOD11")]
    Mod11,
    /// Double-alternate: digits of each product are summed, then checked mod 10.
    #[serde(rename = "DBLAL")]
    Dblal,
}

impl Method {
    pub fn parse(s: &str) -> Result<Self, RuleError> {
        match s {
            "MOD10" => Ok(Method::Mod10),
            "MOD11" => Ok(Method::Mod11),
            "DBLAL" => Ok(Method::Dblal),
            other => Err(RuleError::UnknownMethod(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Mod10 => "MOD10",
            Method::Mod11 => "MOD11",
            Method::Dblal => "DBLAL",
        }
    }

    /// Divisor the weighted sum is reduced by.
    pub fn modulus(self) -> i64 {
        match self {
            Method::Mod10 | Method::Dblal => 10,
            Method::Mod11 => 11,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the weighting table: an inclusive sort code range, the
/// checksum method, 14 positional weights and an optional exception code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightingRule {
    range_start: i32,
    range_end: i32,
    method: Method,
    weights: [i32; WEIGHT_COUNT],
    exception_code: Option<String>,
}

impl WeightingRule {
    pub fn new(
        range_start: i32,
        range_end: i32,
        method: Method,
        weights: [i32; WEIGHT_COUNT],
        exception_code: Option<String>,
    ) -> Result<Self, RuleError> {
        if range_start > range_end {
            return Err(RuleError::InvertedRange {
                start: range_start,
                end: range_end,
            });
        }
        Ok(Self {
            range_start,
            range_end,
            method,
            weights,
            exception_code,
        })
    }

    /// Parse a record of the form
    /// `<start> <end> <MOD10|MOD11|DBLAL> <w0> .. <w13> [<exception>]`.
    pub fn parse_line(line: &str) -> Result<Self, RuleError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < MIN_TOKENS {
            return Err(RuleError::TooFewTokens(tokens.len()));
        }
        if tokens.len() > MAX_TOKENS {
            return Err(RuleError::TooManyTokens(tokens.len()));
        }

        let range_start = parse_bound(tokens[0], "start")?;
        let range_end = parse_bound(tokens[1], "end")?;
        let method = Method::parse(tokens[2])?;

        let mut weights = [0i32; WEIGHT_COUNT];
        for (position, (weight, token)) in weights.iter_mut().zip(&tokens[3..MIN_TOKENS]).enumerate() {
            *weight = token.parse().map_err(|_| RuleError::InvalidWeight {
                position,
                token: token.to_string(),
            })?;
        }

        let exception_code = tokens.get(MIN_TOKENS).map(|t| t.to_string());

        Self::new(range_start, range_end, method, weights, exception_code)
    }

    pub fn range_start(&self) -> i32 {
        self.range_start
    }

    pub fn range_end(&self) -> i32 {
        self.range_end
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn weights(&self) -> &[i32; WEIGHT_COUNT] {
        &self.weights
    }

    pub fn exception_code(&self) -> Option<&str> {
        self.exception_code.as_deref()
    }

    /// Inclusive range check against a numeric sort code.
    pub fn contains(&self, sort_code: u32) -> bool {
        let sort_code = i64::from(sort_code);
        sort_code >= i64::from(self.range_start) && sort_code <= i64::from(self.range_end)
    }
}

fn parse_bound(token: &str, which: &'static str) -> Result<i32, RuleError> {
    token.parse().map_err(|_| RuleError::InvalidRangeBound {
        which,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOD11_LINE: &str = "070116 070116 MOD11 0 0 0 0 0 0 8 7 6 5 4 3 2 1";

    #[test]
    fn test_parse_method_tokens() {
        assert_eq!(Method::parse("MOD10").unwrap(), Method::Mod10);
        assert_eq!(Method::parse("MOD11").unwrap(), Method::Mod11);
        assert_eq!(Method::parse("DBLAL").unwrap(), Method::Dblal);
    }

    #[test]
    fn test_parse_method_rejects_unknown() {
        let err = Method::parse("mod10").unwrap_err();
        assert_eq!(err, RuleError::UnknownMethod("mod10".to_string()));
        assert!(Method::parse("").is_err());
    }

    #[test]
    fn test_parse_line_without_exception() {
        let rule = WeightingRule::parse_line(MOD11_LINE).unwrap();
        assert_eq!(rule.range_start(), 70116);
        assert_eq!(rule.range_end(), 70116);
        assert_eq!(rule.method(), Method::Mod11);
        assert_eq!(rule.weights(), &[0, 0, 0, 0, 0, 0, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(rule.exception_code().is_none());
    }

    #[test]
    fn test_parse_line_with_exception() {
        let rule =
            WeightingRule::parse_line("134012 134020 MOD11 0 0 0 0 0 0 7 5 2 10 9 8 4 2 4").unwrap();
        assert_eq!(rule.exception_code(), Some("4"));
        assert_eq!(rule.weights()[9], 10);
    }

    #[test]
    fn test_parse_line_tolerates_repeated_whitespace() {
        let rule = WeightingRule::parse_line(
            "  200000   200002  DBLAL 2 1 2 1 2 1 2 1 2 1 2 1 2 1\t",
        )
        .unwrap();
        assert_eq!(rule.method(), Method::Dblal);
        assert_eq!(rule.range_end(), 200002);
    }

    #[test]
    fn test_parse_line_too_few_tokens() {
        let err =
            WeightingRule::parse_line("070116 070116 MOD11 0 0 0 0 0 0 8 7 6 5 4 3 2").unwrap_err();
        assert_eq!(err, RuleError::TooFewTokens(16));
    }

    #[test]
    fn test_parse_line_too_many_tokens() {
        let err = WeightingRule::parse_line(&format!("{} 4 extra", MOD11_LINE)).unwrap_err();
        assert_eq!(err, RuleError::TooManyTokens(19));
    }

    #[test]
    fn test_parse_line_invalid_bounds() {
        let err = WeightingRule::parse_line("07O116 070116 MOD11 0 0 0 0 0 0 8 7 6 5 4 3 2 1")
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidRangeBound { which: "start", .. }));

        let err = WeightingRule::parse_line("070116 7O116 MOD11 0 0 0 0 0 0 8 7 6 5 4 3 2 1")
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidRangeBound { which: "end", .. }));
    }

    #[test]
    fn test_parse_line_accepts_negative_bounds() {
        let rule = WeightingRule::parse_line("-5 10 MOD10 0 0 0 0 0 0 7 1 3 7 1 3 7 1").unwrap();
        assert_eq!(rule.range_start(), -5);
        assert!(rule.contains(0));
        assert!(rule.contains(10));
        assert!(!rule.contains(11));

        let err = WeightingRule::parse_line("070116 -1 MOD11 0 0 0 0 0 0 8 7 6 5 4 3 2 1")
            .unwrap_err();
        assert_eq!(err, RuleError::InvertedRange { start: 70116, end: -1 });
    }

    #[test]
    fn test_parse_line_inverted_range() {
        let err = WeightingRule::parse_line("070117 070116 MOD11 0 0 0 0 0 0 8 7 6 5 4 3 2 1")
            .unwrap_err();
        assert_eq!(err, RuleError::InvertedRange { start: 70117, end: 70116 });
    }

    #[test]
    fn test_parse_line_unknown_method() {
        let err = WeightingRule::parse_line("070116 070116 MOD12 0 0 0 0 0 0 8 7 6 5 4 3 2 1")
            .unwrap_err();
        assert_eq!(err, RuleError::UnknownMethod("MOD12".to_string()));
    }

    #[test]
    fn test_parse_line_invalid_weight() {
        let err = WeightingRule::parse_line("070116 070116 MOD11 0 0 0 0 0 0 8 x 6 5 4 3 2 1")
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::InvalidWeight {
                position: 7,
                token: "x".to_string()
            }
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let rule = WeightingRule::new(100, 200, Method::Mod10, [1; WEIGHT_COUNT], None).unwrap();
        assert!(!rule.contains(99));
        assert!(rule.contains(100));
        assert!(rule.contains(150));
        assert!(rule.contains(200));
        assert!(!rule.contains(201));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Dblal.to_string(), "DBLAL");
        assert_eq!(Method::Mod11.modulus(), 11);
        assert_eq!(Method::Dblal.modulus(), 10);
    }
}
