use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

/// Intermediate results a run can dump for inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceArtifact {
    /// Items bucketed by normalized English string.
    Groups,
    /// Template built from the reference pair.
    Template,
}

impl TraceArtifact {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Groups => "groups.json",
            Self::Template => "template.json",
        }
    }
}

/// Writes [`TraceArtifact`]s as pretty JSON into one directory, or nothing when disabled.
pub struct TraceWriter {
    dir: PathBuf,
    enabled: bool,
}

impl TraceWriter {
    pub fn new(dir: PathBuf, enabled: bool) -> anyhow::Result<Self> {
        if enabled {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create trace dir: {}", dir.display()))?;
        }
        Ok(Self { dir, enabled })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn path_of(&self, artifact: TraceArtifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }

    pub fn write_json<T: Serialize>(&self, artifact: TraceArtifact, value: &T) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let path = self.path_of(artifact);
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("serialize trace: {}", artifact.file_name()))?;
        std::fs::write(&path, json).with_context(|| format!("write trace: {}", path.display()))
    }
}
