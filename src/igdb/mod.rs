pub mod client;
pub mod token;

pub use client::IgdbClient;
pub use token::{Credentials, TokenManager, EXPIRY_MARGIN_SECS};
