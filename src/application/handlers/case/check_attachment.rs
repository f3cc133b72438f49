//! CheckAttachmentHandler - gate used by the file store before accepting an
//! upload.

use std::sync::Arc;

use crate::domain::case::{check_attachment, CaseError};
use crate::ports::SettingsProvider;

pub struct CheckAttachmentHandler {
    settings: Arc<dyn SettingsProvider>,
}

impl CheckAttachmentHandler {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self { settings }
    }

    /// # Errors
    ///
    /// - `Validation` if the file's extension or size is not allowed
    pub async fn handle(&self, file_name: &str, size_bytes: u64) -> Result<(), CaseError> {
        let settings = self.settings.current().await?;
        check_attachment(file_name, size_bytes, &settings)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySettingsStore;
    use crate::domain::case::CaseSettings;

    #[tokio::test]
    async fn uses_the_current_allow_list() {
        let store = Arc::new(InMemorySettingsStore::new(CaseSettings {
            allowed_extensions: vec!["pdf".to_string()],
            ..CaseSettings::default()
        }));
        let handler = CheckAttachmentHandler::new(store);

        assert!(handler.handle("acta.pdf", 100).await.is_ok());
        assert!(matches!(
            handler.handle("photo.png", 100).await,
            Err(CaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let handler = CheckAttachmentHandler::new(Arc::new(InMemorySettingsStore::default()));
        assert!(handler.handle("acta.pdf", 11 * 1024 * 1024).await.is_err());
    }
}
