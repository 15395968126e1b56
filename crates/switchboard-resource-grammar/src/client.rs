//! Remote proxy for architect grammars

use async_trait::async_trait;
use switchboard_resource_api::transport::segment;
use switchboard_resource_api::{
    Attachment,
    ChildProxy,
    ListFilter,
    Page,
    PageCursor,
    PlatformClient,
    RemoteError,
    RemoteProxy,
    RemoteResult,
    UploadTarget,
};

use crate::types::{
    FileUploadRequest,
    Grammar,
    GrammarLanguage,
    GrammarLanguageUpdate,
    DTMF,
    VOICE,
};

const GRAMMARS_PATH: &str = "/api/v2/architect/grammars";

pub struct ArchitectGrammarProxy {
    client: PlatformClient,
}

impl ArchitectGrammarProxy {
    pub fn new(client: &PlatformClient) -> Self {
        Self {
            client: client.clone(),
        }
    }

    fn grammar_path(id: &str) -> String {
        format!("{GRAMMARS_PATH}/{}", segment(id))
    }

    fn language_path(id: &str, language: &str) -> String {
        format!("{}/languages/{}", Self::grammar_path(id), segment(language))
    }
}

#[async_trait]
impl RemoteProxy for ArchitectGrammarProxy {
    type Object = Grammar;

    fn family(&self) -> &str {
        "architect grammar"
    }

    async fn create(&self, grammar: &Grammar) -> RemoteResult<Grammar> {
        self.client.post_json(GRAMMARS_PATH, grammar).await
    }

    async fn get_by_id(&self, id: &str) -> RemoteResult<Grammar> {
        self.client
            .get_json(&Self::grammar_path(id), &[])
            .await
    }

    async fn update(&self, id: &str, grammar: &Grammar) -> RemoteResult<Grammar> {
        self.client
            .patch_json(&Self::grammar_path(id), grammar)
            .await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.client.delete(&Self::grammar_path(id)).await
    }

    async fn list_page(
        &self, cursor: PageCursor, filter: &ListFilter,
    ) -> RemoteResult<Page<Grammar>> {
        self.client
            .get_json(GRAMMARS_PATH, &filter.query(cursor))
            .await
    }
}

#[async_trait]
impl ChildProxy for ArchitectGrammarProxy {
    type Child = GrammarLanguage;

    async fn create_child(
        &self, grammar_id: &str, language: &GrammarLanguage,
    ) -> RemoteResult<GrammarLanguage> {
        self.client
            .post_json(
                &format!("{}/languages", Self::grammar_path(grammar_id)),
                language,
            )
            .await
    }

    async fn get_child(&self, grammar_id: &str, language: &str) -> RemoteResult<GrammarLanguage> {
        self.client
            .get_json(&Self::language_path(grammar_id, language), &[])
            .await
    }

    async fn patch_child(
        &self, grammar_id: &str, language: &str, update: &GrammarLanguageUpdate,
    ) -> RemoteResult<GrammarLanguage> {
        self.client
            .patch_json(&Self::language_path(grammar_id, language), update)
            .await
    }

    async fn request_upload_target(
        &self, grammar_id: &str, language: &str, attachment: &Attachment,
    ) -> RemoteResult<UploadTarget> {
        let kind = attachment.kind.as_str();
        if kind != VOICE && kind != DTMF {
            return Err(RemoteError::transport(format!(
                "Invalid file type '{kind}', specify either {VOICE} or {DTMF}"
            )));
        }

        let request = FileUploadRequest {
            file_type: attachment.file_type.clone(),
        };
        self.client
            .post_json(
                &format!("{}/files/{kind}", Self::language_path(grammar_id, language)),
                &request,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_path_encodes_segments() {
        assert_eq!(
            ArchitectGrammarProxy::language_path("g 1", "en-us"),
            "/api/v2/architect/grammars/g%201/languages/en-us"
        );
    }
}
