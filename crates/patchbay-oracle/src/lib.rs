//! Validation oracle contract for Patchbay
//!
//! The conversion engine never validates filter trees itself; it hands each
//! candidate tree to an injected [`Validator`] and either proceeds or
//! surfaces the oracle's rejection verbatim. This crate defines that
//! capability plus the concrete providers (accept-all, HTTP, subprocess).

pub mod providers;
pub mod validator;


pub use providers::create_validator;
pub use validator::{OracleError, Validator};
