use crate::core::editor::MenuSession;
use crate::core::encoding::DiagramUrlEncoder;
use crate::core::render;
use crate::core::store::ModelStore;
use crate::domain::model::{Framework, ServiceContext, DEFAULT_CONTEXT_NAME};
use crate::domain::ports::{ConfigProvider, DiagramFetcher, Prompter, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct GeneratorOutput {
    pub context: ServiceContext,
    pub diagram: String,
    pub url: String,
    pub diagram_file: String,
    pub image_file: Option<String>,
}

/// Runs the generator lifecycle: load the saved model, let the user edit
/// it, then render, encode, persist and optionally download the diagram.
pub struct ModelGenerator<S: Storage, C: ConfigProvider, F: DiagramFetcher> {
    store: ModelStore<S>,
    config: C,
    fetcher: F,
    encoder: DiagramUrlEncoder,
}

impl<S: Storage, C: ConfigProvider, F: DiagramFetcher> ModelGenerator<S, C, F> {
    pub fn new(storage: S, config: C, fetcher: F) -> Self {
        let store = ModelStore::new(storage, config.data_file());
        let encoder = DiagramUrlEncoder::new(config.server());
        Self {
            store,
            config,
            fetcher,
            encoder,
        }
    }

    pub fn store(&self) -> &ModelStore<S> {
        &self.store
    }

    pub async fn run<P: Prompter>(&self, prompter: &mut P) -> Result<GeneratorOutput> {
        tracing::info!("Starting service definition model generator");

        let saved = self.store.load().await?;
        let context = self.prompting(saved, prompter).await?;
        self.writing(context).await
    }

    /// Non-interactive variant of [`ModelGenerator::run`] for an already saved model.
    pub async fn compile(&self) -> Result<GeneratorOutput> {
        let saved = self.store.load().await?;
        let context = validate_required_field(self.store.file_name(), &saved)?.clone();
        self.writing(context).await
    }

    pub async fn prompting<P: Prompter>(
        &self,
        saved: Option<ServiceContext>,
        prompter: &mut P,
    ) -> Result<ServiceContext> {
        let context = match saved {
            Some(context) => context,
            None => {
                prompter.say("Welcome to the Service Definition Model generator!")?;
                let context = prompt_context(prompter)?;
                self.store.save(&context).await?;
                context
            }
        };

        let mut session = MenuSession::new(context, prompter, &self.store);
        session.run().await?;
        Ok(session.into_context())
    }

    pub async fn writing(&self, context: ServiceContext) -> Result<GeneratorOutput> {
        let diagram = render::render(&context);
        let url = self.encoder.url(&diagram, self.config.variant())?;
        tracing::info!("🔗 Diagram URL: {}", url);

        let storage = self.store.storage();
        storage
            .write_file(self.config.diagram_file(), diagram.as_bytes())
            .await?;
        self.store.save(&context).await?;

        let image_file = if self.config.download() {
            let file_name = format!(
                "{}.{}",
                file_stem(&context.name),
                self.config.variant().file_extension()
            );
            let image = self.fetcher.fetch(&url).await?;
            storage.write_file(&file_name, &image).await?;
            tracing::info!("🖼 Saved rendered diagram ({} bytes) as {}", image.len(), file_name);
            Some(file_name)
        } else {
            None
        };

        Ok(GeneratorOutput {
            context,
            diagram,
            url,
            diagram_file: self.config.diagram_file().to_string(),
            image_file,
        })
    }
}

fn prompt_context<P: Prompter>(prompter: &mut P) -> Result<ServiceContext> {
    let name = prompter.input(
        "What is the name of your service context?",
        DEFAULT_CONTEXT_NAME,
    )?;

    let labels: Vec<&str> = Framework::ALL.iter().map(|f| f.label()).collect();
    let index = prompter.select("What is the Framework for your Service?", &labels, 0)?;
    let framework = Framework::ALL.get(index).copied().unwrap_or_default();

    Ok(ServiceContext::new(name, framework))
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_strips_separators() {
        assert_eq!(file_stem("Orders"), "Orders");
        assert_eq!(file_stem("a/b\\c:d"), "a_b_c_d");
    }
}
