// Copyright 2025 Cowboy AI, LLC.

//! Identifier types for work items, groups and roles
//!
//! A group is the unit of status rollup: every work item sharing a parent
//! (proposal or project), a period (quarter) and an entity.

use crate::errors::{ApprovalError, ApprovalResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Work item ID - identifies one cost line within the item store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkItemId(Uuid);

impl WorkItemId {
    /// Create a new random work item ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WorkItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<WorkItemId> for Uuid {
    fn from(id: WorkItemId) -> Self {
        id.0
    }
}

/// A caller role as it appears in the permission matrix
///
/// Roles carry no structure of their own. Which person holds which role is
/// decided by a [`MembershipResolver`](crate::MembershipResolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Name of the finance-operations role
    pub const FINANCE_OPERATIONS: &'static str = "FinOps";

    /// Create a role from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The finance-operations role
    ///
    /// Its extra reach is expressed entirely by matrix rows; resolution does
    /// not treat it differently from any other role.
    pub fn finance_operations() -> Self {
        Self::new(Self::FINANCE_OPERATIONS)
    }

    /// Get the role name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The parent a work item is grouped under
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum GroupParent {
    /// A cost proposal
    Proposal(String),
    /// An approved project
    Project(String),
}

impl GroupParent {
    /// Get the parent identifier without its kind
    pub fn id(&self) -> &str {
        match self {
            GroupParent::Proposal(id) | GroupParent::Project(id) => id,
        }
    }
}

impl fmt::Display for GroupParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupParent::Proposal(id) => write!(f, "proposal {id}"),
            GroupParent::Project(id) => write!(f, "project {id}"),
        }
    }
}

/// A calendar quarter, written `YYYY-Qn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quarter {
    year: u16,
    quarter: u8,
}

impl Quarter {
    /// Create a quarter, rejecting quarter numbers outside 1..=4 and years
    /// that do not have four digits
    pub fn new(year: u16, quarter: u8) -> ApprovalResult<Self> {
        if !(1000..=9999).contains(&year) {
            return Err(ApprovalError::InvalidGroupKey(format!(
                "year must have four digits, got {year}"
            )));
        }
        if !(1..=4).contains(&quarter) {
            return Err(ApprovalError::InvalidGroupKey(format!(
                "quarter must be between 1 and 4, got {quarter}"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// Calendar year
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Quarter number (1-4)
    pub fn quarter(&self) -> u8 {
        self.quarter
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

impl FromStr for Quarter {
    type Err = ApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApprovalError::InvalidGroupKey(format!("not a YYYY-Qn quarter: {s}"));
        let (year, quarter) = s.trim().split_once("-Q").ok_or_else(invalid)?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if quarter.len() != 1 {
            return Err(invalid());
        }
        let year = year.parse::<u16>().map_err(|_| invalid())?;
        let quarter = quarter.parse::<u8>().map_err(|_| invalid())?;
        Self::new(year, quarter)
    }
}

impl TryFrom<String> for Quarter {
    type Error = ApprovalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quarter> for String {
    fn from(q: Quarter) -> Self {
        q.to_string()
    }
}

/// Key identifying one rollup group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    /// Proposal or project the items belong to
    pub parent: GroupParent,
    /// Reporting period
    pub period: Quarter,
    /// Billing entity
    pub entity: String,
}

impl GroupKey {
    /// Create a group key
    pub fn new(parent: GroupParent, period: Quarter, entity: impl Into<String>) -> Self {
        Self {
            parent,
            period,
            entity: entity.into(),
        }
    }

    /// Group key for a proposal
    pub fn proposal(id: impl Into<String>, period: Quarter, entity: impl Into<String>) -> Self {
        Self::new(GroupParent::Proposal(id.into()), period, entity)
    }

    /// Group key for a project
    pub fn project(id: impl Into<String>, period: Quarter, entity: impl Into<String>) -> Self {
        Self::new(GroupParent::Project(id.into()), period, entity)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.parent, self.period, self.entity)
    }
}
