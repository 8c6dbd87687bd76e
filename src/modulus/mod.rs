pub mod engine;
pub mod error;
pub mod types;

pub use engine::{evaluate_rule, LazyEngine, ModulusEngine, ACCOUNT_NUMBER_LEN, SORT_CODE_LEN};
pub use error::ModulusError;
pub use types::{ValidationOutcome, ValidationRequest, ValidationResult};
