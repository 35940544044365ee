pub mod error;
pub mod scene_template;
pub mod source_files;
pub mod sweep;
pub mod sweep_config;

use std::{fs, path::PathBuf};

use crate::{
    error::SweepError,
    scene_template::{render_scene, SceneTemplate, SkipReason},
    source_files::{read_source_files, SourceFileRef},
    sweep::SweepValue,
    sweep_config::SweepConfig,
};

/// What a run did.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Files whose name matched, before any of them were parsed.
    pub templates_found: usize,
    /// In the order they were written.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(SourceFileRef, SkipReason)>,
}

impl SweepReport {
    pub fn found_nothing(&self) -> bool {
        self.templates_found == 0
    }
}

pub struct SceneSweepGenerator {
    pub config: SweepConfig,
}

impl SceneSweepGenerator {
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// Writes one scene per template and sweep value.
    ///
    /// Files that are not usable templates are skipped and show up in the report.
    /// A template whose bsdf lacks its own parameter aborts the whole run with
    /// [`SweepError::ParameterNotFound`], files written up to that point stay on disk.
    pub fn generate(&self) -> Result<SweepReport, SweepError> {
        fs::create_dir_all(&self.config.target)
            .map_err(|e| SweepError::io(&self.config.target, e))?;

        let source_files = read_source_files(&self.config);
        let mut report = SweepReport {
            templates_found: source_files.len(),
            ..Default::default()
        };
        let values = self.config.sweep.values();

        for source_file in source_files {
            match self.load_template(&source_file)? {
                Ok(template) => self.write_sweep(&template, &values, &mut report)?,
                Err(reason) => {
                    log::debug!("Skipping {:?}: {}", source_file.get_path(), reason);
                    report.skipped.push((source_file, reason));
                }
            }
        }

        Ok(report)
    }

    /// Only I/O problems are errors, everything else is a reason to skip the file.
    fn load_template(
        &self,
        source_file: &SourceFileRef,
    ) -> Result<Result<SceneTemplate, SkipReason>, SweepError> {
        let Some(parameter) = source_file.parameter_name(&self.config.prefix) else {
            return Ok(Err(SkipReason::NotATemplateName));
        };
        let path = source_file.get_path();
        let source = fs::read(path).map_err(|e| SweepError::io(path, e))?;

        Ok(SceneTemplate::parse(
            path.to_path_buf(),
            parameter,
            &source,
            &self.config.path_rewrite,
        ))
    }

    fn write_sweep(
        &self,
        template: &SceneTemplate,
        values: &[SweepValue],
        report: &mut SweepReport,
    ) -> Result<(), SweepError> {
        log::info!(
            "Sweeping {:?} over parameter {}",
            template.path,
            template.parameter
        );
        for value in values {
            let id = self.config.output_id(&template.parameter, &value.formatted);
            let scene = template.variant(&id, value)?;
            let text = render_scene(&scene, &id)?;

            let output_path = self.config.get_output_path(&id);
            fs::write(&output_path, text).map_err(|e| SweepError::io(&output_path, e))?;
            log::info!("Wrote {:?}", output_path);
            report.written.push(output_path);
        }
        Ok(())
    }
}
