//! Remote token validation performed before any catalog data is served.

pub mod error;
pub mod validator;

pub use error::AuthError;
pub use validator::{shop_domain, TokenValidator};
