//! # Terraform plugin-framework data sources
//!
//! The plugin-framework contract for data sources, plus the Db2 pieces
//! built on it.
//!
//! This crate contains:
//! - [`DataSource`] and [`DataSourceWithConfigValidators`]: read a data
//!   source and validate its configuration before any read
//! - [`Config`], [`State`], [`Schema`] and [`Diagnostics`]: the values
//!   exchanged with Terraform
//! - [`db2`]: the `db2_tuneable_param` data source and the autoscale and
//!   custom-setting blocks of a Db2 instance
//!
//! Configuration and state are JSON objects. Nested blocks arrive the way
//! Terraform encodes them, as a list holding one object.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod datasource;
pub mod db2;
pub mod diagnostics;
pub mod schema;
pub mod validators;
pub mod value;

pub use datasource::{ConfigValidator, DataSource, DataSourceWithConfigValidators};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use schema::{AttributeKind, AttributeMode, Schema, SchemaAttribute};
pub use value::{AttributePath, Config, State};
