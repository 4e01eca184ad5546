// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request routing for tfpilot.
//!
//! This crate provides:
//! - [`QueryRouter`]: heuristic complexity scoring, no model call
//! - [`Dispatcher`]: runs the chosen processor and falls back to the fast
//!   path when orchestration is unavailable or fails
//!
//! The vocabulary driving both lives in [`keywords`].

pub mod classifier;
pub mod dispatch;
pub mod keywords;

pub use classifier::{ClassifierConfig, DecisionRule, DomainTag, QueryRouter, RoutingDecision};
pub use dispatch::{DispatchOutcome, Dispatcher, Route};
pub use keywords::VOCABULARY_VERSION;
