use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity kind a node item operates on.
///
/// Serialized values follow parameter schema version 1: `project`,
/// `timeEntry`, `booking`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Project,
    TimeEntry,
    Booking,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Project,
        ResourceKind::TimeEntry,
        ResourceKind::Booking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Project => "project",
            ResourceKind::TimeEntry => "timeEntry",
            ResourceKind::Booking => "booking",
        }
    }

    /// Listing/creation endpoint, relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Project => "/projects",
            ResourceKind::TimeEntry => "/time-entries",
            ResourceKind::Booking => "/bookings",
        }
    }

    /// Endpoint of a single entity. The ID is encoded as one path segment.
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint(), urlencoding::encode(id))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// CRUD-style action. Every resource supports all five.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Create,
    Get,
    GetAll,
    Update,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Create,
        OperationKind::Delete,
        OperationKind::Get,
        OperationKind::GetAll,
        OperationKind::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Get => "get",
            OperationKind::GetAll => "getAll",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// How many records a paged listing may return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Limit {
    /// Walk every page.
    All,
    /// Stop once this many records were collected.
    AtMost(usize),
}
