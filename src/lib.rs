//! Payroll Engine
//!
//! This crate computes gross-to-net payroll totals from itemized earnings and
//! deductions, decides who may view a payslip, guards employee deletion
//! against dangling payrolls, and enforces the registration rules. Records
//! are reached through the [`store`] interface, and the actions are served
//! over HTTP by the [`api`] router.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod authorization;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
