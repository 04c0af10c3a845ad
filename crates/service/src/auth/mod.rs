//! Shared-secret check for the CSV endpoints.

mod token;

pub use token::StaticTokenAuth;
