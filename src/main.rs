use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser};

use template_translator::batch::{
    fallback_reason, group_items, run_request, template_for, ReferencePair, SuggestRequest,
};
use template_translator::config::{init_default_config, RunConfig};
use template_translator::console::ConsoleLog;
use template_translator::normalize::normalize_string;
use template_translator::trace::{TraceArtifact, TraceWriter};

#[derive(Parser, Debug)]
#[command(name = "template-translator")]
#[command(about = "Suggest translations for strings with embedded math, graphies and widgets by reusing an approved translation as a template", long_about = None)]
struct Args {
    /// Generate a default config file, then exit
    #[arg(long)]
    init_config: bool,

    /// Directory to write the config file (default: current directory)
    #[arg(long, value_name = "DIR")]
    init_config_dir: Option<PathBuf>,

    /// Overwrite an existing config file when used with --init-config
    #[arg(long)]
    force: bool,

    /// Items JSON: an array of strings or objects carrying the English string
    #[arg(value_name = "ITEMS")]
    items: Option<PathBuf>,

    /// Reference pairs JSON: an array of [english|null, translation|null]
    #[arg(long, value_name = "JSON")]
    pairs: Option<PathBuf>,

    /// Output JSON (default: stdout)
    #[arg(short, long, value_name = "JSON")]
    output: Option<PathBuf>,

    /// Target language code (e.g. pt, es)
    #[arg(long)]
    lang: Option<String>,

    /// Object field holding the English string (default: englishStr)
    #[arg(long)]
    english_field: Option<String>,

    /// Config file path (default: search for template-translator.toml upwards)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the normalized form of TEXT, then exit
    #[arg(long, value_name = "TEXT")]
    normalize: Option<String>,

    /// Print the items grouped by normalized English string (no suggestions)
    #[arg(long)]
    groups_only: bool,

    /// Print the template built from the first usable reference pair (no suggestions)
    #[arg(long)]
    template_only: bool,

    /// Write groups.json / template.json into the trace directory
    #[arg(long)]
    trace: bool,

    /// No status lines on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log = ConsoleLog::new(!args.quiet);

    if args.init_config {
        let dir = args
            .init_config_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let cfg_path = init_default_config(&dir, args.force).context("init default config")?;
        log.info(format!("wrote config: {}", cfg_path.display()));
        return Ok(());
    }

    if let Some(text) = args.normalize.as_deref() {
        println!("{}", normalize_string(text));
        return Ok(());
    }

    let cfg = RunConfig::from_paths_and_args(
        args.items.as_deref(),
        args.output.as_deref(),
        args.config.clone(),
        args.lang.clone(),
        args.english_field.clone(),
        args.trace,
    )
    .context("build config")?;
    if let Some(p) = cfg.config_path.as_ref() {
        log.info(format!("config: {}", p.display()));
    }
    let trace = TraceWriter::new(cfg.trace_dir.clone(), cfg.trace)?;

    let pairs: Vec<ReferencePair> = match args.pairs.as_ref() {
        Some(p) => read_json(p).context("read reference pairs")?,
        None => Vec::new(),
    };

    if args.template_only {
        let template = template_for(&pairs, &cfg.lang)?;
        trace.write_json(TraceArtifact::Template, &template)?;
        return emit(&template, args.output.as_deref(), cfg.pretty);
    }

    let items_path = match args.items.as_ref() {
        Some(p) => p,
        None => {
            let mut cmd = Args::command();
            cmd.print_help().context("print help")?;
            eprintln!(
                "\n\nUSAGE:\n  template-translator items.json --pairs pairs.json --lang pt -o suggestions.json\n"
            );
            return Ok(());
        }
    };
    let items: Vec<serde_json::Value> = read_json(items_path).context("read items")?;

    let groups = group_items(&items, &cfg.english_field)?;
    trace.write_json(TraceArtifact::Groups, &groups)?;
    if args.groups_only {
        return emit(&groups, args.output.as_deref(), cfg.pretty);
    }

    if let Some(reason) = fallback_reason(&pairs, groups.len()) {
        log.warn(reason);
    }
    if trace.enabled() && groups.len() == 1 {
        if let Ok(template) = template_for(&pairs, &cfg.lang) {
            trace.write_json(TraceArtifact::Template, &template)?;
        }
    }

    let request = SuggestRequest {
        pairs,
        items,
        lang: cfg.lang.clone(),
        english_field: Some(cfg.english_field.clone()),
    };
    let records = run_request(&request)?;
    let suggested = records.iter().filter(|r| r.1.is_some()).count();
    log.batch_summary(records.len(), suggested, groups.len());

    emit(&records, args.output.as_deref(), cfg.pretty)?;
    if trace.enabled() {
        log.info(format!("trace: {}", trace.dir().display()));
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read json: {}", path.display()))?;
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    serde_json::from_str(text).with_context(|| format!("parse json: {}", path.display()))
}

fn emit<T: serde::Serialize>(value: &T, output: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize output")?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("write output: {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
