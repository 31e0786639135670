//! Entity identity - prefixed ULID identifiers
//!
//! Every entity carries a globally unique, unguessable id of the form
//! `PREFIX-ULID` (e.g. `WB-01KCWY20F01B21V0G4E835NW3J`). Ids are generated
//! once at creation time and never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityPrefix {
    /// Waybill (WB)
    Wb,
    /// Manifest (MF)
    Mf,
    /// Vehicle (VEH)
    Veh,
    /// Company (CMP)
    Cmp,
    /// Inventory item (INV)
    Inv,
}

impl EntityPrefix {
    /// The string form used in ids
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Wb => "WB",
            EntityPrefix::Mf => "MF",
            EntityPrefix::Veh => "VEH",
            EntityPrefix::Cmp => "CMP",
            EntityPrefix::Inv => "INV",
        }
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WB" => Ok(EntityPrefix::Wb),
            "MF" => Ok(EntityPrefix::Mf),
            "VEH" => Ok(EntityPrefix::Veh),
            "CMP" => Ok(EntityPrefix::Cmp),
            "INV" => Ok(EntityPrefix::Inv),
            other => Err(IdParseError::UnknownPrefix {
                prefix: other.to_string(),
            }),
        }
    }
}

/// Errors from parsing entity ids
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("Unknown entity prefix: {prefix}")]
    UnknownPrefix { prefix: String },

    #[error("Malformed entity id: {id} (expected PREFIX-ULID)")]
    Malformed { id: String },

    #[error("Invalid ULID in entity id: {id}")]
    InvalidUlid { id: String },
}

/// A prefixed ULID entity identifier
///
/// Serializes as its string form so persisted records stay human-readable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Generate a fresh id for the given entity type
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// The entity type prefix
    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }

    /// First 8 ULID characters, for compact display
    pub fn short(&self) -> String {
        let s = self.ulid.to_string();
        format!("{}-{}", self.prefix, &s[..8])
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s.split_once('-').ok_or_else(|| IdParseError::Malformed {
            id: s.to_string(),
        })?;
        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str).map_err(|_| IdParseError::InvalidUlid {
            id: s.to_string(),
        })?;
        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
