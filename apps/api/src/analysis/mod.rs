//! Analysis API: resume and job ingestion, stored compatibility analyses and
//! a stateless scoring preview.

pub mod handlers;
pub mod service;
pub mod store;
