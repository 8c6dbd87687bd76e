//! UK sort code and account number modulus checking.
//!
//! [`table`] parses the Vocalink weighting table; [`modulus`] evaluates a
//! sort code and account number against every rule whose range covers it.

pub mod config;
pub mod logging;
pub mod modulus;
pub mod output;
pub mod table;

pub use modulus::{
    LazyEngine, ModulusEngine, ModulusError, ValidationOutcome, ValidationRequest,
    ValidationResult,
};
pub use table::{Method, TableError, WeightingRule, WeightingTable};
