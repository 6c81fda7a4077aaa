use crate::domain::model::ServiceContext;
use crate::domain::ports::Storage;
use crate::utils::error::{GeneratorError, Result};

pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Whole-document persistence of the service model on top of a [`Storage`].
pub struct ModelStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> ModelStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// `None` when no document exists yet. A document that exists but does
    /// not parse is an error, so it is never replaced by a fresh model.
    pub async fn load(&self) -> Result<Option<ServiceContext>> {
        let data = match self.storage.read_file(&self.file_name).await {
            Ok(data) => data,
            Err(GeneratorError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No saved model at {}", self.file_name);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let context = serde_json::from_slice::<ServiceContext>(&data).map_err(|e| {
            tracing::error!("Unreadable model in {}: {}", self.file_name, e);
            GeneratorError::SerializationError(e)
        })?;

        tracing::info!(
            "Loaded service context '{}' with {} services",
            context.name,
            context.services.len()
        );
        Ok(Some(context))
    }

    /// Overwrites the document with a full snapshot of `context`.
    pub async fn save(&self, context: &ServiceContext) -> Result<()> {
        let json = serde_json::to_vec(context)?;
        self.storage.write_file(&self.file_name, &json).await?;
        tracing::debug!(
            "Saved {} services to {}",
            context.services.len(),
            self.file_name
        );
        Ok(())
    }
}
