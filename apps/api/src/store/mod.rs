//! SQL access for the relational store. Functions take the pool (or, for
//! inserts that run inside signup's transaction, any executor) and return
//! raw `sqlx::Error`s; mapping to HTTP errors happens in the services.

pub mod jobs;
pub mod users;
