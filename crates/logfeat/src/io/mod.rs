//! Table loaders for Arrow IPC and Parquet files.
//!
//! Loading keeps the file's record batch boundaries, which are the unit of
//! parallel work during extraction.
//!
//! # Feature gates
//!
//! - `io-parquet`: Parquet file loading

mod error;
mod ipc;

#[cfg(feature = "io-parquet")]
mod parquet;

pub use error::LoadError;
pub use ipc::{read_ipc_table, write_ipc_table};

#[cfg(feature = "io-parquet")]
pub use self::parquet::read_parquet_table;
