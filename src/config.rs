use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::batch::{DEFAULT_ENGLISH_FIELD, DEFAULT_LANG};

pub const CONFIG_FILENAME: &str = "template-translator.toml";
pub const CONFIG_ENV: &str = "TEMPLATE_TRANSLATOR_CONFIG";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub suggest: SuggestSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct SuggestSection {
    /// Target locale code. Only "pt" changes math notation today.
    #[serde(default)]
    pub lang: Option<String>,

    /// Field holding the English string when items are JSON objects.
    #[serde(default)]
    pub english_field: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct OutputSection {
    #[serde(default)]
    pub pretty: Option<bool>,
    #[serde(default)]
    pub trace: Option<bool>,
    #[serde(default)]
    pub trace_dir: Option<String>,
}

/// Settings for one CLI run after merging flags, config file and defaults.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub config_path: Option<PathBuf>,
    pub lang: String,
    pub english_field: String,
    pub pretty: bool,
    pub trace: bool,
    pub trace_dir: PathBuf,
}

impl RunConfig {
    pub fn from_paths_and_args(
        items: Option<&Path>,
        output: Option<&Path>,
        config_path: Option<PathBuf>,
        lang: Option<String>,
        english_field: Option<String>,
        trace: bool,
    ) -> anyhow::Result<Self> {
        let workdir = items
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let cfg_file = config_path
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .or_else(|| find_default_config(&workdir, CONFIG_FILENAME));

        let mut file_cfg = AppConfig::default();
        if let Some(p) = cfg_file.as_ref() {
            if p.exists() {
                file_cfg = load_config(p)?;
            }
        }

        let lang = lang
            .or(file_cfg.suggest.lang)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LANG.to_string());
        let english_field = english_field
            .or(file_cfg.suggest.english_field)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENGLISH_FIELD.to_string());
        let pretty = file_cfg.output.pretty.unwrap_or(true);
        let trace = trace || file_cfg.output.trace.unwrap_or(false);

        let output_dir = output
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| workdir.clone());
        let trace_dir = file_cfg
            .output
            .trace_dir
            .unwrap_or_else(|| "_trace".to_string());
        let trace_dir = if Path::new(&trace_dir).is_absolute() {
            PathBuf::from(trace_dir)
        } else {
            output_dir.join(trace_dir)
        };

        Ok(Self {
            config_path: cfg_file.filter(|p| p.exists()),
            lang,
            english_field,
            pretty,
            trace,
            trace_dir,
        })
    }
}

/// Walks from `start_dir` towards the root, at most `max_levels` parents up.
pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .take(max_levels + 1)
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
}

/// Search order: current directory, the items' directory, then the executable's directory.
pub fn find_default_config(workdir: &Path, filename: &str) -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let roots = [std::env::current_dir().ok(), Some(workdir.to_path_buf()), exe_dir];
    roots
        .iter()
        .flatten()
        .find_map(|root| find_file_upwards(root, filename, SEARCH_LEVELS))
}

const SEARCH_LEVELS: usize = 8;

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppConfig = toml::from_str(&text).context("parse config toml")?;
    Ok(cfg)
}

pub fn init_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create config dir: {}", dir.display()))?;
    let cfg_path = dir.join(CONFIG_FILENAME);
    if cfg_path.exists() && !force {
        return Ok(cfg_path);
    }
    std::fs::write(&cfg_path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("write config: {}", cfg_path.display()))?;
    Ok(cfg_path)
}

const DEFAULT_CONFIG_TOML: &str = r#"[suggest]
# Target locale code. "pt" rewrites \sin as \operatorname{sen}; other codes keep math as is.
lang = "en"
# Items may be plain JSON strings or objects; objects carry the English string in this field.
english_field = "englishStr"

[output]
pretty = true
# Write groups.json / template.json for each run.
trace = false
trace_dir = "_trace"
"#;
