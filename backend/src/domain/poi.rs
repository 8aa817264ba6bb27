//! Points of interest and their images.
//!
//! A POI is identified for de-duplication by its name and location compared
//! case-insensitively. [`PoiLookupKey`] carries that normalised pair so the
//! persistence layer and the create-or-find flow agree on a single rule: a
//! missing or blank location is the empty string.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PoiId, PoiImageId};

/// Maximum length for POI names and locations, matching the column width.
pub const POI_TEXT_MAX: usize = 255;

/// Validation errors raised while building POI values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoiValidationError {
    /// The name was missing or only whitespace.
    #[error("poi name must not be empty")]
    EmptyName,
    /// A text field exceeds [`POI_TEXT_MAX`] characters.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Configured maximum.
        max: usize,
    },
}

mod base64_bytes {
    //! Serialise optional byte buffers as standard base64 strings.

    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Image attached to a POI, with an opaque embedding vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PoiImage {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: PoiImageId,
    /// Public image location.
    pub image_url: Option<String>,
    /// Embedding bytes, base64 encoded on the wire.
    #[serde(default, with = "base64_bytes")]
    #[schema(value_type = Option<String>, format = Byte)]
    pub embedding: Option<Vec<u8>>,
}

/// Point of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Poi {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 1)]
    pub id: PoiId,
    /// Display name, stored trimmed.
    #[schema(example = "Eiffel Tower")]
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Town or area, stored trimmed.
    #[schema(example = "Paris")]
    pub location: Option<String>,
    /// Cover image location.
    pub image_url: Option<String>,
    /// Images owned by this POI.
    #[serde(default)]
    pub images: Vec<PoiImage>,
}

/// Image fields supplied when creating or replacing a POI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PoiImageDraft {
    /// Public image location.
    pub image_url: Option<String>,
    /// Embedding bytes.
    pub embedding: Option<Vec<u8>>,
}

/// Validated fields for creating or replacing a POI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoiDraft {
    name: String,
    description: Option<String>,
    location: Option<String>,
    image_url: Option<String>,
    images: Vec<PoiImageDraft>,
}

fn check_length(field: &'static str, value: &str) -> Result<(), PoiValidationError> {
    if value.chars().count() > POI_TEXT_MAX {
        return Err(PoiValidationError::TooLong {
            field,
            max: POI_TEXT_MAX,
        });
    }
    Ok(())
}

impl PoiDraft {
    /// Validate and normalise POI fields.
    ///
    /// The name is trimmed and must be non-empty. A blank location is stored
    /// as absent.
    ///
    /// # Examples
    /// ```
    /// use travel_backend::domain::PoiDraft;
    ///
    /// let draft = PoiDraft::new(" Louvre ", None, Some("  ".into()), None, Vec::new())
    ///     .expect("valid draft");
    /// assert_eq!(draft.name(), "Louvre");
    /// assert_eq!(draft.location(), None);
    /// ```
    pub fn new(
        name: impl AsRef<str>,
        description: Option<String>,
        location: Option<String>,
        image_url: Option<String>,
        images: Vec<PoiImageDraft>,
    ) -> Result<Self, PoiValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(PoiValidationError::EmptyName);
        }
        check_length("name", name)?;
        let location = location
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        if let Some(value) = location.as_deref() {
            check_length("location", value)?;
        }
        Ok(Self {
            name: name.to_owned(),
            description,
            location,
            image_url,
            images,
        })
    }

    /// Trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Trimmed location, absent when blank.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Cover image location.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Images to attach.
    pub fn images(&self) -> &[PoiImageDraft] {
        &self.images
    }

    /// Lookup key identifying this POI for de-duplication.
    #[must_use]
    pub fn lookup_key(&self) -> PoiLookupKey {
        PoiLookupKey::normalised(&self.name, self.location.as_deref())
    }
}

/// Case-insensitive `(name, location)` pair used to find an existing POI.
///
/// Mirrors the unique index on `(lower(name), lower(coalesce(location, '')))`.
/// Equality and hashing use the folded pair only.
#[derive(Debug, Clone)]
pub struct PoiLookupKey {
    name: String,
    location: String,
    input_name: String,
    input_location: String,
}

impl PartialEq for PoiLookupKey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.location == other.location
    }
}

impl Eq for PoiLookupKey {}

impl std::hash::Hash for PoiLookupKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.location.hash(state);
    }
}

impl PoiLookupKey {
    /// Build a lookup key from raw user input.
    ///
    /// # Examples
    /// ```
    /// use travel_backend::domain::PoiLookupKey;
    ///
    /// let key = PoiLookupKey::new("  Eiffel Tower", Some("PARIS ")).expect("valid key");
    /// assert_eq!(key.name(), "eiffel tower");
    /// assert_eq!(key.location(), "paris");
    ///
    /// let blank = PoiLookupKey::new("Eiffel Tower", Some("   ")).expect("valid key");
    /// assert_eq!(blank.location(), "");
    /// ```
    pub fn new(name: &str, location: Option<&str>) -> Result<Self, PoiValidationError> {
        if name.trim().is_empty() {
            return Err(PoiValidationError::EmptyName);
        }
        Ok(Self::normalised(name, location))
    }

    fn normalised(name: &str, location: Option<&str>) -> Self {
        let input_name = name.trim().to_owned();
        let input_location = location.map(str::trim).unwrap_or_default().to_owned();
        Self {
            name: input_name.to_lowercase(),
            location: input_location.to_lowercase(),
            input_name,
            input_location,
        }
    }

    /// Lower-cased, trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased, trimmed location; empty when none was given.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Trimmed name in the caller's spelling, for folding by the database.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Trimmed location in the caller's spelling; empty when none was given.
    pub fn input_location(&self) -> &str {
        &self.input_location
    }

    /// Report whether a stored POI matches this key.
    #[must_use]
    pub fn matches(&self, poi: &Poi) -> bool {
        poi.name.to_lowercase() == self.name
            && poi.location.as_deref().unwrap_or_default().to_lowercase() == self.location
    }
}
