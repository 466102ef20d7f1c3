//! Request and response models of the IAM Policy Management API

mod enums;
mod roles;
mod rules;
mod templates;
mod v1;
mod v2;

pub use enums::*;
pub use roles::*;
pub use rules::*;
pub use templates::*;
pub use v1::*;
pub use v2::*;
