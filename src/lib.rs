//! Payroll engine for restaurant staff.
//!
//! This crate turns raw time-clock punches and employee pay policies into
//! regular hours, daily overtime (beyond 9 hours a day), weekly overtime
//! (beyond 44 regular hours per ISO week) and pay. It also provides payroll
//! runs over a reporting period, payslips with simulated deductions, and an
//! HTTP API over all of it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
