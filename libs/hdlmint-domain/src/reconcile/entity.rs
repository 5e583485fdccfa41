//! Domain entities for handle reconciliation
//!
//! This module defines the configuration record that decides which objects
//! carry handles, and the event payload delivered when a datastream changes.

use serde::{Deserialize, Serialize};

use crate::reconcile::ids::Dsid;

/// Binding between a content model and the datastream that should carry a
/// handle
///
/// Associations are read-only configuration sourced from an
/// [`AssociationStore`](crate::ports::AssociationStore). An object with
/// several content models can match several associations; the reconciler uses
/// the first one whose datastream matches the triggering event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Content model this association applies to
    content_model: String,

    /// Datastream that should carry the handle reference
    dsid: Dsid,

    /// Transform the attachment step applies to embed the reference
    transform: String,
}

impl Association {
    /// Create an association record
    pub fn new(
        content_model: impl Into<String>,
        dsid: impl Into<Dsid>,
        transform: impl Into<String>,
    ) -> Self {
        Self {
            content_model: content_model.into(),
            dsid: dsid.into(),
            transform: transform.into(),
        }
    }

    /// Content model this association applies to
    pub fn content_model(&self) -> &str {
        &self.content_model
    }

    /// Datastream that should carry the handle reference
    pub fn dsid(&self) -> &Dsid {
        &self.dsid
    }

    /// Transform applied by the attachment step
    pub fn transform(&self) -> &str {
        &self.transform
    }
}

/// Event payload from the derivative pipeline: the datastream that just
/// changed on an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeHook {
    destination_dsid: Dsid,
}

impl DerivativeHook {
    /// Create a hook for the datastream that changed
    pub fn new(destination_dsid: impl Into<Dsid>) -> Self {
        Self {
            destination_dsid: destination_dsid.into(),
        }
    }

    /// The datastream the event targets
    pub fn destination_dsid(&self) -> &Dsid {
        &self.destination_dsid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_accessors() {
        let association = Association::new("islandora:sp_basic_image", "OBJ", "handle.xsl");

        assert_eq!(association.content_model(), "islandora:sp_basic_image");
        assert_eq!(association.dsid().as_str(), "OBJ");
        assert_eq!(association.transform(), "handle.xsl");
    }

    #[test]
    fn test_hook_carries_destination() {
        let hook = DerivativeHook::new("OBJ");
        assert_eq!(hook.destination_dsid().as_str(), "OBJ");
    }
}
