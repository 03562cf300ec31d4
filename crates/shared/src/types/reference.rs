//! Populated-or-unpopulated references to backend entities.
//!
//! The backend returns related entities either as a bare id string or as the
//! full embedded document, depending on how the query was populated. The
//! shape is decided once here, at deserialization, so downstream code matches
//! on `EntityRef` instead of probing the JSON value.

use serde::{Deserialize, Deserializer, Serialize};

/// Something that carries its own backend identifier.
pub trait HasId {
    /// Returns the entity's identifier.
    fn id(&self) -> &str;
}

/// A reference to a backend entity, either unpopulated or populated.
///
/// Serializes as `{"kind": "ref", "id": ...}` or
/// `{"kind": "populated", "entity": {...}}`. Deserializes from that tagged form
/// or from the backend's raw forms: a bare string id or the entity object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef<T> {
    /// Only the identifier is known.
    Ref {
        /// Backend identifier.
        id: String,
    },
    /// The full entity was embedded.
    Populated {
        /// The embedded entity.
        entity: T,
    },
}

impl<T> EntityRef<T> {
    /// Returns the populated entity, if any.
    pub fn entity(&self) -> Option<&T> {
        match self {
            Self::Ref { .. } => None,
            Self::Populated { entity } => Some(entity),
        }
    }

    /// Returns true if the entity was embedded.
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated { .. })
    }
}

impl<T: HasId> EntityRef<T> {
    /// Returns the identifier regardless of population state.
    pub fn id(&self) -> &str {
        match self {
            Self::Ref { id } => id,
            Self::Populated { entity } => entity.id(),
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Tagged<T> {
    Ref { id: String },
    Populated { entity: T },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Wire<T> {
    Tagged(Tagged<T>),
    Id(String),
    Entity(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for EntityRef<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Tagged(Tagged::Ref { id }) | Wire::Id(id) => Self::Ref { id },
            Wire::Tagged(Tagged::Populated { entity }) | Wire::Entity(entity) => {
                Self::Populated { entity }
            }
        })
    }
}
