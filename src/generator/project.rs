use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

use super::controller::ControllerBuilder;
use super::data::DataBuilder;
use super::emit::{ArtifactKind, FileEmitter, ManifestEntry};
use super::example_value::ExampleSynthesizer;
use super::templates::StubLoader;
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::model::Schema;

/// An entity (or controller) whose artifact could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityFailure {
    /// Entity or controller class name
    pub name: String,
    pub kind: &'static str,
    pub error: String,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub manifest: Vec<ManifestEntry>,
    pub failures: Vec<EntityFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives one generation run over a schema.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    stubs: StubLoader,
    examples: ExampleSynthesizer,
    only: BTreeSet<ArtifactKind>,
}

impl Generator {
    /// Examples are anchored to `config.example_timestamp`, or to the
    /// current time when none is configured.
    pub fn new(config: GeneratorConfig) -> Self {
        let now = config.example_timestamp.unwrap_or_else(chrono::Utc::now);
        Self {
            stubs: StubLoader::from_config(&config),
            examples: ExampleSynthesizer::new(now),
            config,
            only: [ArtifactKind::Controller, ArtifactKind::Data].into_iter().collect(),
        }
    }

    /// Restrict the run to the given artifact kinds.
    pub fn only(mut self, kinds: impl IntoIterator<Item = ArtifactKind>) -> Self {
        self.only = kinds.into_iter().collect();
        self
    }

    /// Generate every artifact for `schema` through `emitter`.
    ///
    /// A missing class stub fails only the artifact being built and is
    /// listed in the report. I/O errors abort the run.
    pub fn generate(
        &self,
        schema: &Schema,
        emitter: &mut FileEmitter,
    ) -> Result<GenerationReport, GeneratorError> {
        let mut report = GenerationReport::default();

        if self.only.contains(&ArtifactKind::Controller) {
            let builder = ControllerBuilder::new(&self.config, &self.stubs, &self.examples);
            for controller in schema
                .effective_controllers(&self.config.controller_namespace)
                .iter()
                .filter(|c| c.namespace.starts_with(&self.config.controller_namespace))
            {
                let name = controller.class_name();
                match builder.render(schema, controller) {
                    Ok(content) => {
                        let path = emitter.path_for(builder.relative_path(controller));
                        emitter.emit(ArtifactKind::Controller, path, content)?;
                    }
                    Err(e @ GeneratorError::TemplateNotFound { .. }) => {
                        record_failure(&mut report, name, ArtifactKind::Controller, &e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        if self.only.contains(&ArtifactKind::Data) {
            let builder = DataBuilder::new(&self.config, &self.stubs);
            for entity in &schema.models {
                match builder.render(entity) {
                    Ok(content) => {
                        let path = emitter.path_for(builder.relative_path(entity));
                        emitter.emit(ArtifactKind::Data, path, content)?;
                    }
                    Err(e @ GeneratorError::TemplateNotFound { .. }) => {
                        record_failure(&mut report, entity.name.clone(), ArtifactKind::Data, &e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        report.manifest = emitter.manifest();
        info!(
            artifacts = report.manifest.len(),
            failures = report.failures.len(),
            "Generation finished"
        );
        Ok(report)
    }
}

fn record_failure(
    report: &mut GenerationReport,
    name: String,
    kind: ArtifactKind,
    error: &GeneratorError,
) {
    warn!(name = %name, kind = kind.label(), error = %error, "Skipping artifact");
    report.failures.push(EntityFailure {
        name,
        kind: kind.label(),
        error: error.to_string(),
    });
}
