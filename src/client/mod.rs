//! In-process client for the backend: a typed HTTP wrapper, a durable
//! session context, and the optimistically reconciled feed list.

pub mod api_client;
pub mod feed;
pub mod session;
