//! Accounts: signup, login, password reset and profile reads.
//!
//! Passwords are hashed with Argon2id; sessions are stateless HS256 tokens.

pub mod handlers;
pub mod password;
pub mod profile;
pub mod service;
pub mod tokens;
