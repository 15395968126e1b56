//! Wire types for the architect grammar API
//!
//! The same structs double as the domain objects the mapper builds, so every
//! field is optional and absent fields are skipped on serialization.

use serde::{
    Deserialize,
    Serialize,
};
use switchboard_resource_api::{
    Attachment,
    RemoteObject,
    SubResource,
};

pub const VOICE: &str = "voice";
pub const DTMF: &str = "dtmf";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<GrammarLanguage>>,
}

impl Grammar {
    /// Parent-level fields only; languages go through their own endpoint
    pub fn parent_only(&self) -> Self {
        Self {
            id: None,
            languages: None,
            ..self.clone()
        }
    }

    pub fn languages(&self) -> &[GrammarLanguage] {
        self.languages.as_deref().unwrap_or_default()
    }
}

impl RemoteObject for Grammar {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarLanguage {
    /// Locale code, the natural key of the language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_file_metadata: Option<FileMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtmf_file_metadata: Option<FileMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// Mutable subset of a language
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarLanguageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_file_metadata: Option<FileMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtmf_file_metadata: Option<FileMetadata>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileUploadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

fn attachment(kind: &str, metadata: Option<&FileMetadata>) -> Option<Attachment> {
    let metadata = metadata?;
    Some(Attachment {
        kind: kind.to_string(),
        file_name: metadata.file_name.as_ref()?.into(),
        file_type: metadata.file_type.clone(),
    })
}

impl SubResource for GrammarLanguage {
    type Patch = GrammarLanguageUpdate;

    fn natural_key(&self) -> &str {
        self.language.as_deref().unwrap_or_default()
    }

    fn patch(&self) -> GrammarLanguageUpdate {
        GrammarLanguageUpdate {
            voice_file_metadata: self.voice_file_metadata.clone(),
            dtmf_file_metadata: self.dtmf_file_metadata.clone(),
        }
    }

    /// Voice before dtmf
    fn attachments(&self) -> Vec<Attachment> {
        [
            attachment(VOICE, self.voice_file_metadata.as_ref()),
            attachment(DTMF, self.dtmf_file_metadata.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
