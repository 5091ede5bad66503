pub mod extractor;
pub mod json;
pub mod jwt;
pub mod password;
pub mod session;
pub mod state;
pub mod validation;
