//! API layer - REST handlers and the in-process client

pub mod native;
pub mod rest;
