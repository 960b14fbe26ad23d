use crate::catalog::{ApproachRecord, OrbitRecord};
use crate::prelude::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// The nested document carried inside an [`ObjectEnvelope`].
///
/// Both sequences are required: a document missing either one fails to
/// decode and the whole response takes the generic-failure path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetail {
    pub sorted_approaches: Vec<ApproachRecord>,
    pub orbital_data: Vec<OrbitRecord>,
}

/// Wire envelope for a single-object response.
///
/// `data` is a JSON-encoded [`ObjectDetail`], not an inline document; the
/// legacy backend double-encoded it and the viewer decodes it in a second
/// step. `message` is absent on some legacy success replies, hence the
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEnvelope {
    pub data: String,
    #[serde(default)]
    pub message: String,
    pub identifier: String,
}

impl ObjectEnvelope {
    pub fn encode(detail: &ObjectDetail, identifier: &str, message: &str) -> CatalogResult<Self> {
        let data = serde_json::to_string(detail)
            .map_err(|err| CatalogError::MalformedPayload(err.to_string()))?;
        Ok(Self {
            data,
            message: message.to_string(),
            identifier: identifier.to_string(),
        })
    }

    pub fn decode(&self) -> CatalogResult<ObjectDetail> {
        serde_json::from_str(&self.data)
            .map_err(|err| CatalogError::MalformedPayload(err.to_string()))
    }
}
