//! Parameters of each operation
//!
//! Required values go through `new`; optional ones through `with_*`
//! setters. [`Validate`](ibmcloud_common::Validate) checks required values
//! before any request is built. `headers` is applied first, so the
//! operation's own headers win on conflict.

/// Generates `with_*` setters for optional fields plus `with_headers`.
macro_rules! optional_setters {
    ($ty:ident { $($setter:ident => $field:ident: $arg:ty),* $(,)? }) => {
        impl $ty {
            $(
                #[must_use]
                pub fn $setter(mut self, value: impl Into<$arg>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            #[must_use]
            pub fn with_headers(
                mut self,
                headers: ::std::collections::HashMap<String, String>,
            ) -> Self {
                self.headers = headers;
                self
            }
        }
    };
}

mod policies;
mod roles;
mod templates;
mod v2;

pub use policies::*;
pub use roles::*;
pub use templates::*;
pub use v2::*;
