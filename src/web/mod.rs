//! Server-rendered HTML pages.

pub mod handlers;
