use std::path::PathBuf;

use crate::data::aggregate::DEFAULT_TOP_N;

/// Data file used when neither the command line nor the environment names one.
pub const DEFAULT_DATA_FILE: &str = "enhanced_health_insurance_claims.csv";

pub const DATA_PATH_VAR: &str = "CLAIMS_DATA";
pub const TOP_N_VAR: &str = "CLAIMS_TOP_N";

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV file holding the claims table.
    pub data_path: PathBuf,
    /// How many specialties the ranking chart keeps.
    pub top_n: usize,
    /// Print the unfiltered dashboard as JSON and exit instead of opening a window.
    pub summary_only: bool,
}

impl Config {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// `args` excludes the program name. The first non-flag argument is the
    /// data path; it wins over `CLAIMS_DATA`.
    pub fn resolve<I, F>(args: I, var: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut summary_only = false;
        let mut path_arg = None;
        for arg in args {
            match arg.as_str() {
                "--summary" => summary_only = true,
                other if other.starts_with("--") => {
                    log::warn!("Ignoring unknown option {other}");
                }
                _ => {
                    if path_arg.is_none() {
                        path_arg = Some(PathBuf::from(arg));
                    }
                }
            }
        }

        let data_path = path_arg
            .or_else(|| var(DATA_PATH_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let top_n = match var(TOP_N_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!("{TOP_N_VAR}={raw:?} is not a positive integer; using {DEFAULT_TOP_N}");
                    DEFAULT_TOP_N
                }
            },
            None => DEFAULT_TOP_N,
        };

        Config {
            data_path,
            top_n,
            summary_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_args_or_env() {
        let cfg = Config::resolve(Vec::new(), |_| None);
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(cfg.top_n, DEFAULT_TOP_N);
        assert!(!cfg.summary_only);
    }

    #[test]
    fn argument_beats_environment() {
        let cfg = Config::resolve(args(&["claims.csv", "--summary"]), |key| match key {
            DATA_PATH_VAR => Some("/data/other.csv".to_string()),
            TOP_N_VAR => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(cfg.data_path, PathBuf::from("claims.csv"));
        assert_eq!(cfg.top_n, 5);
        assert!(cfg.summary_only);
    }

    #[test]
    fn environment_path_and_bad_top_n() {
        let cfg = Config::resolve(Vec::new(), |key| match key {
            DATA_PATH_VAR => Some("/data/other.csv".to_string()),
            TOP_N_VAR => Some("zero".to_string()),
            _ => None,
        });
        assert_eq!(cfg.data_path, PathBuf::from("/data/other.csv"));
        assert_eq!(cfg.top_n, DEFAULT_TOP_N);
    }
}
