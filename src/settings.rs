use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use linker::LinkerParams;
use storage::StatsPaths;

/// Format of the annotation output.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `doc_id<TAB>score<TAB>entity<TAB>mention<TAB>page-id`
    Tsv,
    /// One JSON object per linked mention.
    Jsonl,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Tsv
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            other => Err(format!("unknown output format `{}`", other)),
        }
    }
}

fn default_jobs() -> usize {
    1
}

/// Where and how annotations are written.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Output {
    /// Output file; standard output when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
    /// Documents annotated in parallel. 0 uses one worker per core.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            path: None,
            format: OutputFormat::default(),
            jobs: default_jobs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settings {
    pub stats: StatsPaths,
    /// Binary snapshot of the statistics, preferred over the raw files when
    /// it exists.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    /// `id<TAB>text` input documents.
    #[serde(default)]
    pub snippets: Option<PathBuf>,
    #[serde(default)]
    pub linker: LinkerParams,
    #[serde(default)]
    pub output: Output,
}

impl Settings {
    /// Read settings from a TOML file, with `WIKILINKER_*` environment
    /// variables taking precedence (`__` separates nested keys).
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let mut settings = Config::new();
        settings.merge(File::with_name(path))?;
        settings.merge(Environment::with_prefix("WIKILINKER").separator("__"))?;
        settings.try_into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use linker::Strategy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_settings_use_defaults() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("wikilinker.toml");
        fs::write(&path, "[stats]\ncommonness = \"data/mention_entity.tsv\"\n").unwrap();

        let settings = Settings::new(path.to_str().unwrap()).unwrap();
        assert_eq!(
            settings.stats.commonness,
            PathBuf::from("data/mention_entity.tsv")
        );
        assert!(settings.stats.inlinks.is_none());
        assert_eq!(settings.linker, LinkerParams::default());
        assert_eq!(settings.output.format, OutputFormat::Tsv);
        assert_eq!(settings.output.jobs, 1);
    }

    #[test]
    fn test_full_settings() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("wikilinker.toml");
        fs::write(
            &path,
            r#"
snapshot = "data/stats.bin"
snippets = "data/snippets.txt"

[stats]
commonness = "data/mention_entity.tsv"
inlinks = "data/entity_inlinks.tsv"
pair_inlinks = "data/entity_pairs_inlinks.tsv"

[linker]
strategy = "tagme"
k_th = 0.5
total_entity_count = 1000

[output]
path = "data/output_tagme.txt"
format = "jsonl"
jobs = 4
"#,
        )
        .unwrap();

        let settings = Settings::new(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.linker.strategy, Strategy::Tagme);
        assert_eq!(settings.linker.k_th, 0.5);
        assert_eq!(settings.linker.top_k, 10);
        assert_eq!(settings.linker.total_entity_count, Some(1000));
        assert_eq!(settings.output.format, OutputFormat::Jsonl);
        assert_eq!(settings.output.jobs, 4);
        assert_eq!(settings.snapshot, Some(PathBuf::from("data/stats.bin")));
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
