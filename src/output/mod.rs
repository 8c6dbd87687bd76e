pub mod formatter;

pub use formatter::{
    format_error, format_json, format_outcome, format_result, format_rules, should_use_colors,
};
