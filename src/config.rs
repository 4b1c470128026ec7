use crate::logger::DEFAULT_LOG_FILE;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Interactive clavicle, sternum and shoulder girdle worksheet
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "anatomy-worksheet")]
#[command(version, about, long_about = None)]
pub struct WorksheetConfig {
    /// Alternative content file. Without one the embedded worksheet is used.
    #[arg(value_name = "CONTENT", env = "WORKSHEET_CONTENT")]
    pub content_path: Option<PathBuf>,

    /// Where debug logs are appended
    #[arg(long = "log", env = "WORKSHEET_LOG", default_value = "worksheet_debug.log")]
    pub log_path: PathBuf,

    /// Fixed seed for the cosmetic shuffles, mostly useful for demos
    #[arg(long = "seed", env = "WORKSHEET_SEED")]
    pub shuffle_seed: Option<u64>,
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self {
            content_path: None,
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            shuffle_seed: None,
        }
    }
}

impl WorksheetConfig {
    /// Parse the process arguments, falling back to `WORKSHEET_*` variables.
    /// Invalid input prints clap's usage error and exits.
    pub fn from_env() -> Self {
        Self::parse()
    }

    pub fn rng(&self) -> StdRng {
        match self.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = WorksheetConfig::try_parse_from(["anatomy-worksheet"]).unwrap();
        assert_eq!(config, WorksheetConfig::default());
        assert_eq!(config.log_path, PathBuf::from("worksheet_debug.log"));
    }

    #[test]
    fn test_arguments_are_read() {
        let config = WorksheetConfig::try_parse_from([
            "anatomy-worksheet",
            "content/other.json",
            "--log",
            "/tmp/ws.log",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(config.content_path, Some(PathBuf::from("content/other.json")));
        assert_eq!(config.log_path, PathBuf::from("/tmp/ws.log"));
        assert_eq!(config.shuffle_seed, Some(42));
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        let result = WorksheetConfig::try_parse_from(["anatomy-worksheet", "--seed", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        let result = WorksheetConfig::try_parse_from(["anatomy-worksheet", "a.json", "b.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let config = WorksheetConfig {
            shuffle_seed: Some(7),
            ..WorksheetConfig::default()
        };
        let a: u64 = config.rng().r#gen();
        let b: u64 = config.rng().r#gen();
        assert_eq!(a, b);
    }
}
