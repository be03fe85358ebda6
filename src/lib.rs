//! Payroll calculation engine.
//!
//! This crate turns a month of attendance records and a staff member's
//! compensation configuration into a deterministic salary record with an
//! itemized breakdown, and reconciles payments, deductions, and recoveries
//! posted against finalized salaries.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
