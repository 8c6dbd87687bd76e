use std::io::IsTerminal;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::modulus::{ValidationOutcome, ValidationRequest, ValidationResult};
use crate::table::WeightingRule;

/// Detect if stdout is a TTY (for color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a validation result as a header line plus one line per outcome
/// Format: "{sort_code} {account_number}: {PASS|FAIL}"
pub fn format_result(result: &ValidationResult, use_colors: bool) -> String {
    let verdict = format_verdict(result.all_passed(), use_colors);
    let mut lines = vec![format!("{}: {}", format_request(&result.request), verdict)];
    lines.extend(
        result
            .outcomes
            .iter()
            .map(|outcome| format!("  {}", format_outcome(outcome, use_colors))),
    );
    lines.join("\n")
}

/// Format a single outcome
/// Format: "{method} {PASS|FAIL}[ exception {code} (applied|not applied)]"
pub fn format_outcome(outcome: &ValidationOutcome, use_colors: bool) -> String {
    let mut line = format!(
        "{:<5} {}",
        outcome.method.as_str(),
        format_verdict(outcome.pass, use_colors)
    );
    if let Some(ref code) = outcome.exception_code {
        let state = if outcome.exception_applied {
            "applied"
        } else {
            "not applied"
        };
        line.push_str(&format!("  exception {} ({})", code, state));
    }
    line
}

/// Format a rejected request
pub fn format_error(request: &ValidationRequest, message: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}: {} {}", format_request(request), "error:".red().bold(), message)
    } else {
        format!("{}: error: {}", format_request(request), message)
    }
}

/// Format weighting rules one per line
/// Format: "{start}-{end} {method} {w0} .. {w13}[ ex {code}]"
pub fn format_rules(rules: &[&WeightingRule], use_colors: bool) -> String {
    if rules.is_empty() {
        return "No weighting rules match.".to_string();
    }

    rules
        .iter()
        .map(|rule| format_rule(rule, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_rule(rule: &WeightingRule, use_colors: bool) -> String {
    let range = format!("{:06}-{:06}", rule.range_start(), rule.range_end());
    let weights = rule
        .weights()
        .iter()
        .map(|w| format!("{:>2}", w))
        .collect::<Vec<_>>()
        .join(" ");
    let exception = rule
        .exception_code()
        .map(|code| format!(" ex {}", code))
        .unwrap_or_default();

    if use_colors {
        format!(
            "{} {:<5} {}{}",
            range.cyan(),
            rule.method().as_str().bold(),
            weights,
            exception.yellow()
        )
    } else {
        format!("{} {:<5} {}{}", range, rule.method().as_str(), weights, exception)
    }
}

/// Pretty-printed JSON for any serializable output value
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn format_request(request: &ValidationRequest) -> String {
    format!("{} {}", request.sort_code, request.account_number)
}

fn format_verdict(pass: bool, use_colors: bool) -> String {
    match (pass, use_colors) {
        (true, true) => "PASS".green().bold().to_string(),
        (false, true) => "FAIL".red().bold().to_string(),
        (true, false) => "PASS".to_string(),
        (false, false) => "FAIL".to_string(),
    }
}
