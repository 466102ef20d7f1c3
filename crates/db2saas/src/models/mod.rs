//! Request and response models of the Db2 SaaS API

mod connection;
mod manage;
mod settings;
mod users;

pub use connection::*;
pub use manage::*;
pub use settings::{CustomSettingsDb, CustomSettingsDbm, CustomSettingsRegistry};
pub use users::*;
