use std::env;
use std::path::PathBuf;

use wordnet_db::LoadMode;

use crate::chart::DEFAULT_TOP_K;
use crate::table::SUMMARY_COLUMN;

pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_PLOT_PATH: &str = "plots";
pub const DEFAULT_RESOURCES_PATH: &str = "nltk_data";
pub const DEFAULT_REMOVE_YEARS: &[&str] = &["2022"];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub plot_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub wordnet_mode: LoadMode,
    pub text_column: String,
    pub top_k: usize,
    pub remove_years: Vec<String>,
    /// Name of the optional JSON dump of ranked nouns under `data_dir`.
    pub dump_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_PATH),
            plot_dir: PathBuf::from(DEFAULT_PLOT_PATH),
            resources_dir: PathBuf::from(DEFAULT_RESOURCES_PATH),
            wordnet_mode: LoadMode::Mmap,
            text_column: SUMMARY_COLUMN.to_string(),
            top_k: DEFAULT_TOP_K,
            remove_years: DEFAULT_REMOVE_YEARS.iter().map(|y| y.to_string()).collect(),
            dump_name: None,
        }
    }
}

impl Config {
    /// Read the process arguments and environment.
    pub fn load() -> Self {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Flags win over environment variables, which win over defaults.
    /// Values that fail to parse are ignored.
    pub fn from_sources<I, E>(args: I, env: E) -> Self
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = env("DATA_PATH") {
            config.data_dir = PathBuf::from(path);
        }
        if let Some(path) = env("PLOT_PATH") {
            config.plot_dir = PathBuf::from(path);
        }
        if let Some(path) = env("NLTK_DATA") {
            config.resources_dir = PathBuf::from(path);
        }
        if let Some(mode) = env("WORDNET_LOAD_MODE").as_deref().and_then(LoadMode::parse) {
            config.wordnet_mode = mode;
        }
        if let Some(top_k) = env("TOP_K").as_deref().and_then(parse_top_k) {
            config.top_k = top_k;
        }
        if let Some(years) = env("REMOVE_YEARS") {
            config.remove_years = years
                .split(',')
                .map(str::trim)
                .filter(|y| !y.is_empty())
                .map(str::to_string)
                .collect();
        }

        let mut cli_years: Vec<String> = Vec::new();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };
            let mut value = || inline.clone().or_else(|| args.next());
            match flag.as_str() {
                "--data-dir" => {
                    if let Some(v) = value() {
                        config.data_dir = PathBuf::from(v);
                    }
                }
                "--plot-dir" => {
                    if let Some(v) = value() {
                        config.plot_dir = PathBuf::from(v);
                    }
                }
                "--resources-dir" => {
                    if let Some(v) = value() {
                        config.resources_dir = PathBuf::from(v);
                    }
                }
                "--wordnet-mode" => {
                    if let Some(mode) = value().as_deref().and_then(LoadMode::parse) {
                        config.wordnet_mode = mode;
                    }
                }
                "--column" => {
                    if let Some(v) = value() {
                        config.text_column = v;
                    }
                }
                "--top-k" => {
                    if let Some(top_k) = value().as_deref().and_then(parse_top_k) {
                        config.top_k = top_k;
                    }
                }
                "--remove-year" => {
                    if let Some(v) = value() {
                        cli_years.push(v);
                    }
                }
                "--dump" => config.dump_name = value(),
                _ => {}
            }
        }
        if !cli_years.is_empty() {
            config.remove_years = cli_years;
        }

        config
    }
}

fn parse_top_k(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = Config::from_sources(Vec::new(), env_of(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.top_k, 10);
        assert_eq!(config.remove_years, vec!["2022"]);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_sources(
            Vec::new(),
            env_of(&[
                ("DATA_PATH", "/srv/papers"),
                ("TOP_K", "25"),
                ("REMOVE_YEARS", "2021, 2022,"),
                ("WORDNET_LOAD_MODE", "owned"),
            ]),
        );
        assert_eq!(config.data_dir, PathBuf::from("/srv/papers"));
        assert_eq!(config.top_k, 25);
        assert_eq!(config.remove_years, vec!["2021", "2022"]);
        assert_eq!(config.wordnet_mode, LoadMode::Owned);
    }

    #[test]
    fn flags_override_environment() {
        let config = Config::from_sources(
            args(&[
                "--data-dir",
                "in",
                "--plot-dir=out",
                "--top-k=5",
                "--remove-year",
                "2020",
                "--remove-year=2023",
                "--column",
                "abstract",
                "--dump=nouns",
                "--unknown",
            ]),
            env_of(&[("DATA_PATH", "ignored"), ("REMOVE_YEARS", "1999")]),
        );
        assert_eq!(config.data_dir, PathBuf::from("in"));
        assert_eq!(config.plot_dir, PathBuf::from("out"));
        assert_eq!(config.top_k, 5);
        assert_eq!(config.remove_years, vec!["2020", "2023"]);
        assert_eq!(config.text_column, "abstract");
        assert_eq!(config.dump_name.as_deref(), Some("nouns"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_sources(
            args(&["--top-k", "zero", "--wordnet-mode=lazy"]),
            env_of(&[("TOP_K", "0")]),
        );
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert_eq!(config.wordnet_mode, LoadMode::Mmap);
    }
}
