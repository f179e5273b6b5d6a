use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Featured;

/// Photos required before the submission validator lets a property publish.
///
/// The check itself lives with the form validation, not in the photo core.
pub const MIN_PHOTOS_TO_PUBLISH: usize = 5;

/// A single image in a property's `Foto` array.
///
/// Field names mirror the stored document. Anything the core does not model
/// (`Descricao`, `Alt`, `_id`, ...) rides along in `extra` so legacy fields
/// survive a round trip through the reconciler.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(rename = "Codigo", default)]
    pub code: String,
    #[serde(rename = "Foto", default)]
    pub url: String,
    #[serde(rename = "Destaque", default)]
    pub featured: Featured,
    #[serde(
        rename = "ordem",
        default,
        deserialize_with = "tolerant_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Photo {
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}

// Legacy documents carry `ordem` as a string, a float or null; anything
// that is not an integer >= 0 reads back as missing.
fn tolerant_order<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|o| u32::try_from(o).ok()))
}
