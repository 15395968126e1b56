use switchboard_resource_api::{
    ConfigNode,
    Fields,
    FromConfigNode,
    NodeBuilder,
    ResourceResult,
    ToConfigNode,
};

use crate::types::{
    FileMetadata,
    Grammar,
    GrammarLanguage,
};

fn read_file_data(fields: Fields<'_>) -> ResourceResult<FileMetadata> {
    Ok(FileMetadata {
        file_name: fields.string("file_name")?,
        file_type: fields.string("file_type")?,
    })
}

impl FromConfigNode for Grammar {
    fn from_node_at(node: &ConfigNode, path: &str) -> ResourceResult<Self> {
        Fields::read(node, path, |fields| {
            Ok(Grammar {
                id: None,
                name: Some(fields.required_string("name")?),
                description: fields.string("description")?,
                languages: fields.list("languages", |language| {
                    Ok(GrammarLanguage {
                        language: Some(language.required_string("language")?),
                        voice_file_metadata: language.block("voice_file_data", read_file_data)?,
                        dtmf_file_metadata: language.block("dtmf_file_data", read_file_data)?,
                    })
                })?,
            })
        })
    }
}

impl ToConfigNode for FileMetadata {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("file_name", self.file_name.as_deref())
            .string("file_type", self.file_type.as_deref())
            .build()
    }
}

impl ToConfigNode for GrammarLanguage {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("language", self.language.as_deref())
            .block("voice_file_data", self.voice_file_metadata.as_ref())
            .block("dtmf_file_data", self.dtmf_file_metadata.as_ref())
            .build()
    }
}

impl ToConfigNode for Grammar {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("name", self.name.as_deref())
            .string("description", self.description.as_deref())
            .list("languages", self.languages.as_deref())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use switchboard_resource_api::{
        build,
        flatten,
        ResourceError,
    };

    use super::*;

    fn node(value: serde_json::Value) -> ConfigNode {
        ConfigNode::try_from(value).unwrap()
    }

    #[test]
    fn test_build_languages_with_file_blocks() {
        let grammar: Grammar = build(&node(json!({
            "name": "main menu",
            "languages": [
                {"language": "en-us", "voice_file_data": [{"file_name": "en.grxml", "file_type": "Grxml"}]},
                {"language": "fr-fr", "dtmf_file_data": []}
            ]
        })))
        .unwrap();

        let languages = grammar.languages();
        assert_eq!(languages.len(), 2);
        assert_eq!(
            languages[0]
                .voice_file_metadata
                .as_ref()
                .and_then(|m| m.file_name.as_deref()),
            Some("en.grxml")
        );
        assert!(languages[1].dtmf_file_metadata.is_none());
        assert_eq!(grammar.description, None);
    }

    #[test]
    fn test_missing_language_code_is_invalid() {
        let err = build::<Grammar>(&node(json!({"name": "x", "languages": [{}]}))).unwrap_err();
        assert!(matches!(err, ResourceError::InvalidConfig(ref msg) if msg.contains("languages[0].language")));
    }

    #[test]
    fn test_round_trip() {
        let input = node(json!({
            "name": "main menu",
            "description": "top level",
            "languages": [
                {"language": "en-us", "dtmf_file_data": [{"file_name": "en.gram"}]}
            ]
        }));
        let grammar: Grammar = build(&input).unwrap();
        assert!(flatten(&grammar).semantic_eq(&input));
    }

    #[test]
    fn test_flatten_remote_object_omits_unset_fields() {
        let grammar: Grammar = serde_json::from_value(json!({
            "id": "g-1",
            "name": "main menu",
            "languages": [{"language": "en-us"}]
        }))
        .unwrap();

        assert_eq!(
            flatten(&grammar).to_json(),
            json!({"name": "main menu", "languages": [{"language": "en-us"}]})
        );
    }
}
