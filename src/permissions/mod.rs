// Copyright 2025 Cowboy AI, LLC.

//! Permission matrix
//!
//! A fixed set of authorization facts, each keyed by
//! `(role, sending, approval, submitted, view, milestone)`. Rules are loaded
//! once from a [`PermissionSource`] and treated as read-only; a reload builds
//! a whole new matrix and swaps it in through [`MatrixHandle`].

pub mod handle;
pub mod matrix;
pub mod rule;
pub mod source;

pub use handle::MatrixHandle;
pub use matrix::PermissionMatrix;
pub use rule::{Permission, PermissionRule, RuleKey, View};
pub use source::{JsonRuleSource, PermissionSource, StaticRuleSource};
