//! Shared wire types for the CryptoMarket REST API
//!
//! This crate provides the type definitions used across the client crates.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Market`], [`OrderSide`], [`Wallet`] - Exchange enums with their wire strings
//! - [`WireTable`], [`WireEnum`] - Read-only bidirectional string tables backing the enums
//! - [`Cursor`], [`Pagination`] - Page cursors tolerant of the exchange's `"null"` strings
//! - [`ExchangeTime`] - Timestamps in either of the two formats the exchange emits
//! - [`TypesError`] - Parse errors

pub mod enums;
pub mod error;
pub mod pagination;
pub mod time;
pub mod wire;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use pagination::*;
pub use time::*;
pub use wire::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
