//! Command implementations dispatched from `main`.

pub mod index;
pub mod init;
pub mod query;
pub mod serve;
