//! Capability tags shared with every module that asks for a provider.

use crate::{Error, ErrorContext};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of AI operation a provider can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Capability {
    TextToText,
    TextToEmbedding,
    TextToImage,
    ImageToImage,
    ImageToText,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::TextToText,
        Capability::TextToEmbedding,
        Capability::TextToImage,
        Capability::ImageToImage,
        Capability::ImageToText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextToText => "text-to-text",
            Self::TextToEmbedding => "text-to-embedding",
            Self::TextToImage => "text-to-image",
            Self::ImageToImage => "image-to-image",
            Self::ImageToText => "image-to-text",
        }
    }

    /// Whether the capability consumes image input.
    pub fn takes_image(&self) -> bool {
        matches!(self, Self::ImageToImage | Self::ImageToText)
    }

    /// Whether the capability produces images.
    pub fn produces_image(&self) -> bool {
        matches!(self, Self::TextToImage | Self::ImageToImage)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                Error::validation_with_context(
                    format!("unknown capability '{}'", s),
                    ErrorContext::new()
                        .with_field_path("capability")
                        .with_details(format!(
                            "expected one of: {}",
                            Capability::ALL.map(|c| c.as_str()).join(", ")
                        )),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Capability::TextToImage).unwrap();
        assert_eq!(json, "\"text-to-image\"");
        let cap: Capability = serde_json::from_str("\"image-to-text\"").unwrap();
        assert_eq!(cap, Capability::ImageToText);
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for cap in Capability::ALL {
            assert_eq!(cap.as_str().parse::<Capability>().unwrap(), cap);
        }
        assert!("text-to-video".parse::<Capability>().is_err());
    }

    #[test]
    fn test_modalities() {
        assert!(Capability::ImageToImage.takes_image());
        assert!(Capability::ImageToImage.produces_image());
        assert!(!Capability::TextToEmbedding.produces_image());
    }
}
