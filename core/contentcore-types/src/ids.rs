//! Identifier types used throughout the contentcore engine.
//!
//! Identifiers are plain 32-bit integers on the wire. The newtypes keep a
//! portal id from being passed where a content type id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Identifier of a portal (tenant).
///
/// [`PortalId::HOST`] is the host-level scope: content types registered
/// there are visible from every portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortalId(i32);

impl PortalId {
    /// The host-level portal shared by all tenants.
    pub const HOST: Self = Self(-1);

    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns true for the host-level scope.
    #[must_use]
    pub const fn is_host(&self) -> bool {
        self.0 == Self::HOST.0
    }
}

impl Default for PortalId {
    fn default() -> Self {
        Self::HOST
    }
}

/// Identifier of a dynamic content type (schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTypeId(i32);

impl ContentTypeId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

/// Identifier of a single field definition within a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldDefinitionId(i32);

impl FieldDefinitionId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

macro_rules! int_id_impls {
    ($($ty:ident),+) => {$(
        impl From<i32> for $ty {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$ty> for i32 {
            fn from(id: $ty) -> Self {
                id.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i32>()
                    .map(Self)
                    .map_err(|_| Error::InvalidId(s.to_string()))
            }
        }
    )+};
}

int_id_impls!(PortalId, ContentTypeId, FieldDefinitionId);
