//! Core pipeline for pfi ledger reports.
//!
//! This crate contains the pure reporting logic with ZERO CLI dependencies:
//! reading a ledger, deriving calendar dimensions, aggregating amounts, and
//! assembling and writing reports.
//!
//! # Modules
//!
//! - `ledger` - Tab-separated ledger reader and transaction rows
//! - `calendar` - Year, month, weekday and hour derivation
//! - `aggregate` - Group sums, pivot tables and column statistics
//! - `reports` - Report tree, table rendering, HTML/text writer
//! - `datagen` - Synthetic ledger fixtures
//! - `pipeline` - End-to-end runs and the self-check

pub mod aggregate;
pub mod calendar;
pub mod datagen;
pub mod ledger;
pub mod pipeline;
pub mod reports;
