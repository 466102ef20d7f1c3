//! Common building blocks shared by the IBM Cloud service crates.
//!
//! # Modules
//!
//! - `error`: the SDK-wide [`SdkError`] type, error codes and classification
//! - `validation`: required-field checks used by option structs and models
//! - `string_enum!`: open string enumerations that tolerate unknown values
//!
//! # Feature Tiers
//!
//! - `observability` (default): `SdkError::trace` emits errors as structured
//!   `tracing` events

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

#[macro_use]
mod macros;

pub mod error;
pub mod validation;

pub use error::{
    codes, ComponentInfo, ErrorClassification, ErrorKind, ErrorSeverity, HttpProblem, SdkError,
    SdkResult,
};
pub use validation::{require_value, Required, Validate, ValidationError, ValidationResult};
