//! Model identifiers
//!
//! See all models: <https://platform.openai.com/docs/models/overview>

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a text generation model.
///
/// The named variants are the well-known identifiers. The backing API adds
/// models independently of this crate, so any other identifier is carried
/// verbatim in [`AiModel::Other`]. Parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AiModel {
    /// `gpt-3.5-turbo`
    #[default]
    Gpt35Turbo,
    /// `gpt-3.5-turbo-0301`
    Gpt35Turbo0301,
    /// `gpt-4`
    Gpt4,
    /// `gpt-4-0314`
    Gpt40314,
    /// `gpt-4-32k`
    Gpt4_32k,
    /// `gpt-4-32k-0314`
    Gpt4_32k0314,
    /// `text-davinci-003`
    TextDavinci003,
    /// `text-davinci-002`
    TextDavinci002,
    /// `code-davinci-002`
    CodeDavinci002,
    /// Any identifier not listed above
    Other(String),
}

impl AiModel {
    /// All named identifiers, in declaration order.
    pub const KNOWN: [AiModel; 9] = [
        AiModel::Gpt35Turbo,
        AiModel::Gpt35Turbo0301,
        AiModel::Gpt4,
        AiModel::Gpt40314,
        AiModel::Gpt4_32k,
        AiModel::Gpt4_32k0314,
        AiModel::TextDavinci003,
        AiModel::TextDavinci002,
        AiModel::CodeDavinci002,
    ];

    /// Wire identifier of the model.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt35Turbo0301 => "gpt-3.5-turbo-0301",
            Self::Gpt4 => "gpt-4",
            Self::Gpt40314 => "gpt-4-0314",
            Self::Gpt4_32k => "gpt-4-32k",
            Self::Gpt4_32k0314 => "gpt-4-32k-0314",
            Self::TextDavinci003 => "text-davinci-003",
            Self::TextDavinci002 => "text-davinci-002",
            Self::CodeDavinci002 => "code-davinci-002",
            Self::Other(id) => id,
        }
    }

    /// Whether this is one of the named identifiers.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for AiModel {
    fn from(id: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|model| model.as_str() == id)
            .cloned()
            .unwrap_or_else(|| Self::Other(id.to_string()))
    }
}

impl From<String> for AiModel {
    fn from(id: String) -> Self {
        match Self::from(id.as_str()) {
            Self::Other(_) => Self::Other(id),
            known => known,
        }
    }
}

impl From<AiModel> for String {
    fn from(model: AiModel) -> Self {
        match model {
            AiModel::Other(id) => id,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for AiModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
