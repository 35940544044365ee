use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::sweep_config::SweepConfig;

/// A file that looks like a template, judging by its name alone.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SourceFileRef(PathBuf);
impl SourceFileRef {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn get_path(&self) -> &Path {
        &self.0
    }

    /// The file stem with every occurrence of the prefix removed,
    /// so `disney_disney_x` names the parameter `x`.
    /// `None` if the stem does not start with the prefix or nothing is left.
    pub fn parameter_name(&self, prefix: &str) -> Option<String> {
        let stem = self.0.file_stem()?.to_str()?;
        if !stem.starts_with(prefix) {
            return None;
        }
        let name = stem.replace(prefix, "");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Finds `<prefix>*.<extension>` files directly inside the source directory, sorted by name.
pub fn read_source_files(config: &SweepConfig) -> Vec<SourceFileRef> {
    let mut source_files = vec![];
    for entry in WalkDir::new(&config.source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Failed to read an entry of {:?}: {}", config.source, e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_template_name(entry.path(), config) {
            continue;
        }
        source_files.push(SourceFileRef::new(entry.into_path()));
    }

    source_files
}

fn is_template_name(path: &Path, config: &SweepConfig) -> bool {
    let has_extension = match path.extension() {
        Some(extension) => extension == config.extension.as_str(),
        None => false,
    };
    let has_prefix = match path.file_name().and_then(|v| v.to_str()) {
        Some(name) => name.starts_with(&config.prefix),
        None => false,
    };
    has_extension && has_prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(dir: &Path) -> SweepConfig {
        SweepConfig {
            source: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn parameter_name_strips_prefix() {
        let file = SourceFileRef::new("scenes/disney_roughness.xml".into());
        assert_eq!(file.parameter_name("disney_").as_deref(), Some("roughness"));
    }

    #[test]
    fn parameter_name_removes_every_prefix_occurrence() {
        let file = SourceFileRef::new("disney_disney_x.xml".into());
        assert_eq!(file.parameter_name("disney_").as_deref(), Some("x"));

        let file = SourceFileRef::new("disney_sheen_disney_tint.xml".into());
        assert_eq!(file.parameter_name("disney_").as_deref(), Some("sheentint"));

        assert_eq!(
            SourceFileRef::new("disney_disney_.xml".into()).parameter_name("disney_"),
            None
        );
    }

    #[test]
    fn parameter_name_rejects_other_and_empty_names() {
        assert_eq!(
            SourceFileRef::new("principled_roughness.xml".into()).parameter_name("disney_"),
            None
        );
        assert_eq!(
            SourceFileRef::new("disney_.xml".into()).parameter_name("disney_"),
            None
        );
    }

    #[test]
    fn finds_only_matching_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "disney_sheen.xml",
            "disney_metallic.xml",
            "disney_roughness.json",
            "other_metallic.xml",
        ] {
            std::fs::write(dir.path().join(name), "<test/>").unwrap();
        }
        std::fs::create_dir(dir.path().join("disney_nested.xml")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/disney_clearcoat.xml"), "<test/>").unwrap();

        let found: Vec<_> = read_source_files(&config_for(dir.path()))
            .iter()
            .map(|v| v.get_path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(found, vec!["disney_metallic.xml", "disney_sheen.xml"]);
    }

    #[test]
    fn missing_source_directory_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_source_files(&config_for(&dir.path().join("missing"))).is_empty());
    }
}
