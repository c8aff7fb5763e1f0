// SPDX-License-Identifier: GPL-3.0-only

//! SMART-style diagnostics payloads

use serde::{Deserialize, Serialize};

use crate::limits::{DIAGNOSTICS_BLOB_LENGTH, MAX_DIAGNOSTIC_ATTRIBUTES};
use crate::{BoundedVec, ModelError, ShortText};

/// Individual diagnostics attribute
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagAttribute {
    /// Attribute name (e.g., "PRE_EOL_INFO")
    pub name: ShortText,

    /// Attribute value; multiple values are comma separated
    pub value: ShortText,
}

impl DiagAttribute {
    pub fn new(name: &str, value: &str) -> Result<Self, ModelError> {
        Ok(Self {
            name: ShortText::new(name)?,
            value: ShortText::new(value)?,
        })
    }

    /// Individual values of a comma-separated attribute value, trimmed.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Up to [`MAX_DIAGNOSTIC_ATTRIBUTES`] attributes
pub type DiagAttributeList = BoundedVec<DiagAttribute, MAX_DIAGNOSTIC_ATTRIBUTES>;

impl BoundedVec<DiagAttribute, MAX_DIAGNOSTIC_ATTRIBUTES> {
    /// First attribute whose name matches, ignoring ASCII case.
    pub fn attribute(&self, name: &str) -> Option<&DiagAttribute> {
        self.iter().find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(|attr| attr.value.as_str())
    }
}

/// Opaque vendor diagnostics payload of at most [`DIAGNOSTICS_BLOB_LENGTH`] bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DiagnosticsBlob(Vec<u8>);

impl DiagnosticsBlob {
    pub const CAPACITY: usize = DIAGNOSTICS_BLOB_LENGTH;

    pub fn new(bytes: Vec<u8>) -> Result<Self, ModelError> {
        if bytes.len() > Self::CAPACITY {
            return Err(ModelError::BlobTooLarge {
                len: bytes.len(),
                capacity: Self::CAPACITY,
            });
        }
        Ok(Self(bytes))
    }

    pub fn from_text(text: &str) -> Result<Self, ModelError> {
        Self::new(text.as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload up to the first NUL, decoded lossily.
    pub fn text(&self) -> String {
        let raw = self.0.split(|b| *b == 0).next().unwrap_or(&self.0);
        String::from_utf8_lossy(raw).to_string()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for DiagnosticsBlob {
    type Error = ModelError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl From<DiagnosticsBlob> for Vec<u8> {
    fn from(blob: DiagnosticsBlob) -> Self {
        blob.0
    }
}

/// Health diagnostics, either structured or opaque.
///
/// Which form a platform reports is a vendor convention; the two never
/// coexist in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Diagnostics {
    Attributes(DiagAttributeList),
    Blob(DiagnosticsBlob),
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::Attributes(DiagAttributeList::new())
    }
}

impl Diagnostics {
    pub fn attributes(&self) -> Option<&DiagAttributeList> {
        match self {
            Self::Attributes(list) => Some(list),
            Self::Blob(_) => None,
        }
    }

    pub fn blob(&self) -> Option<&DiagnosticsBlob> {
        match self {
            Self::Attributes(_) => None,
            Self::Blob(blob) => Some(blob),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_are_comma_separated() {
        let attr = DiagAttribute::new("LIFE_TIME_EST", "0x01, 0x02,").unwrap();
        assert_eq!(attr.values().collect::<Vec<_>>(), vec!["0x01", "0x02"]);
    }

    #[test]
    fn attribute_lookup_ignores_case() {
        let list = DiagAttributeList::try_from(vec![
            DiagAttribute::new("PRE_EOL_INFO", "0x01").unwrap(),
            DiagAttribute::new("LIFE_TIME_EST_A", "0x02").unwrap(),
        ])
        .unwrap();
        assert_eq!(list.value_of("pre_eol_info"), Some("0x01"));
        assert!(list.attribute("missing").is_none());
    }

    #[test]
    fn attribute_list_is_bounded_to_twenty() {
        let mut list = DiagAttributeList::new();
        for i in 0..MAX_DIAGNOSTIC_ATTRIBUTES {
            list.push(DiagAttribute::new(&format!("attr{i}"), "0").unwrap())
                .unwrap();
        }
        assert!(list.push(DiagAttribute::default()).is_err());
    }

    #[test]
    fn blob_is_bounded() {
        assert!(DiagnosticsBlob::new(vec![0xAA; DIAGNOSTICS_BLOB_LENGTH]).is_ok());
        assert_eq!(
            DiagnosticsBlob::new(vec![0; DIAGNOSTICS_BLOB_LENGTH + 1]).unwrap_err(),
            ModelError::BlobTooLarge {
                len: DIAGNOSTICS_BLOB_LENGTH + 1,
                capacity: DIAGNOSTICS_BLOB_LENGTH
            }
        );
    }

    #[test]
    fn blob_text_stops_at_nul() {
        let blob = DiagnosticsBlob::new(b"EXT_CSD ok\0\0junk".to_vec()).unwrap();
        assert_eq!(blob.text(), "EXT_CSD ok");
    }

    #[test]
    fn diagnostics_variant_is_tagged() {
        let diagnostics = Diagnostics::Blob(DiagnosticsBlob::from_text("raw").unwrap());
        let value = serde_json::to_value(&diagnostics).unwrap();
        assert_eq!(value["kind"], "blob");

        let parsed: Diagnostics = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, diagnostics);
        assert!(parsed.attributes().is_none());
    }
}
