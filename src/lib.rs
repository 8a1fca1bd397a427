//! Timesheet engine for punch-clock cards.
//!
//! This crate turns the noisy punches an OCR service reads from a paper
//! punch card into canonical Entry/Exit columns, and computes a month of
//! Brazilian labor-time accounting from them: daily balances, holidays,
//! faults, Sunday compensation, weekly paid rest (DSR) and overtime
//! classification, plus advisory labor warnings for human review.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
