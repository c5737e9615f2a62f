//! Image identity types
//!
//! An [`ImageName`] identifies one image variant by namespace, name and tag.
//! It is the key of every lookup in the library and the resolution cache.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identity of a container image (namespace, name, tag)
///
/// An empty namespace denotes a root image, one that lives directly under
/// the library directory. A blank tag is stored as no tag, so `alpine`
/// and `alpine:` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageName {
    #[serde(default)]
    namespace: String,
    name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_tag"
    )]
    tag: Option<String>,
}

fn normalize_tag(tag: Option<String>) -> Option<String> {
    tag.filter(|t| !t.trim().is_empty())
}

fn deserialize_tag<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(normalize_tag)
}

impl ImageName {
    /// Start building an image name
    pub fn builder() -> ImageNameBuilder {
        ImageNameBuilder::default()
    }

    /// Parse an image name like "library/alpine:3.18", "alpine" or "alpine:3.18"
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_image_name(input, "image name cannot be empty"));
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(Error::invalid_image_name(input, "image name contains whitespace"));
        }

        let (path, tag) = match trimmed.rsplit_once(':') {
            Some((before, after)) if !after.contains('/') => (before, Some(after)),
            _ => (trimmed, None),
        };

        let (namespace, name) = match path.rsplit_once('/') {
            Some((ns, name)) => (ns, name),
            None => ("", path),
        };

        let mut builder = ImageNameBuilder::default().namespace(namespace).name(name);
        if let Some(tag) = tag {
            builder = builder.tag(tag);
        }
        builder
            .build()
            .map_err(|_| Error::invalid_image_name(input, "image name must not be blank"))
    }

    /// Namespace, empty for root images
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Image name within its namespace
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag, if one is set
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether this image has no namespace
    pub fn is_root_image(&self) -> bool {
        self.namespace.trim().is_empty()
    }

    /// Render as `namespace/name:tag`, omitting empty parts
    pub fn full_name(&self) -> String {
        self.to_string()
    }

    /// Builder pre-filled with this identity's namespace and name
    pub fn to_builder(&self) -> ImageNameBuilder {
        ImageNameBuilder::default()
            .namespace(self.namespace.clone())
            .name(self.name.clone())
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_root_image() {
            write!(f, "{}/", self.namespace)?;
        }
        f.write_str(&self.name)?;
        if let Some(tag) = self.tag() {
            write!(f, ":{}", tag)?;
        }
        Ok(())
    }
}

/// Incremental builder for [`ImageName`]
///
/// The parser clones a builder seeded with namespace and name, then sets
/// the tag per library line.
#[derive(Debug, Clone, Default)]
pub struct ImageNameBuilder {
    namespace: Option<String>,
    name: Option<String>,
    tag: Option<String>,
}

impl ImageNameBuilder {
    /// Set the namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the image name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the tag in place, for builders reused across lines
    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    /// Build the image name
    ///
    /// A blank tag becomes no tag.
    ///
    /// # Errors
    /// Returns `MissingField` if the name is unset or blank
    pub fn build(&self) -> Result<ImageName> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::missing_field("name"))?;

        Ok(ImageName {
            namespace: self.namespace.clone().unwrap_or_default(),
            name: name.to_string(),
            tag: normalize_tag(self.tag.clone()),
        })
    }
}
