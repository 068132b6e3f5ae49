use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Input files of an annotation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationConfig {
    /// Genome assembly FASTA (plain or gzip).
    pub assembly: PathBuf,
    /// Gene model GFF3 (plain or gzip).
    pub gene_annotation: PathBuf,
    /// Protein domain GFF3 (plain or gzip).
    pub protein_domains: PathBuf,
}

impl AnnotationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;

        // relative paths are resolved against the config file's directory
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, path) in self.file_entries() {
            if path.as_os_str().is_empty() {
                bail!("empty path for '{name}'");
            }
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.assembly,
            &mut self.gene_annotation,
            &mut self.protein_domains,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Iterate all input files uniformly as (name, path) pairs.
    pub fn file_entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        [
            ("assembly", self.assembly.as_path()),
            ("geneAnnotation", self.gene_annotation.as_path()),
            ("proteinDomains", self.protein_domains.as_path()),
        ]
        .into_iter()
    }
}
