use crate::energy::EnergyKind;
use crate::error::SfResult;
use crate::stepper::{Stepper, DEFAULT_MAX_SWAP_ATTEMPTS};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub seed: SeedParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 10_000)]
    pub iterations: usize,
    #[arg(long, value_enum, default_value_t = Stepper::ClosenessGuided)]
    pub stepper: Stepper,
    #[arg(long, value_enum, default_value_t = EnergyKind::Square)]
    pub energy: EnergyKind,
    // Refused swaps tolerated per step before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_SWAP_ATTEMPTS)]
    pub max_swap_attempts: usize,
    /// Try this many swaps at once per iteration instead of single steps
    #[arg(long)]
    pub batch: Option<usize>,
    #[arg(long, default_value_t = false)]
    pub shuffle: bool,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            stepper: Stepper::ClosenessGuided,
            energy: EnergyKind::Square,
            max_swap_attempts: DEFAULT_MAX_SWAP_ATTEMPTS,
            batch: None,
            shuffle: false,
            seed: None,
        }
    }
}

/// Shape of a generated starting seating.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedParams {
    #[arg(long, default_value_t = 150)]
    pub persons: usize,
    #[arg(long, default_value_t = 5)]
    pub meals: usize,
    #[arg(long, default_value_t = 15)]
    pub tables: usize,
    #[arg(long, default_value_t = 10)]
    pub groups: usize,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            persons: 150,
            meals: 5,
            tables: 15,
            groups: 10,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Lets flags given on the command line win over values from a file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search.iterations);
        update_if_present!(search.stepper);
        update_if_present!(search.energy);
        update_if_present!(search.max_swap_attempts);
        update_if_present!(search.batch);
        update_if_present!(search.shuffle);
        update_if_present!(search.seed);

        update_if_present!(seed.persons);
        update_if_present!(seed.meals);
        update_if_present!(seed.tables);
        update_if_present!(seed.groups);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches, Parser};
    use std::io::Write;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "search": {{ "iterations": 42, "stepper": "blind" }} }}"#).unwrap();

        let cfg = Config::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.search.iterations, 42);
        assert_eq!(cfg.search.stepper, Stepper::Blind);
        assert_eq!(cfg.search.energy, EnergyKind::Square);
        assert_eq!(cfg.seed.persons, 150);
    }

    #[test]
    fn command_line_overrides_file_values() {
        let matches = TestCli::command().get_matches_from(["test", "--iterations", "7", "--groups", "3"]);
        let cli = TestCli::from_arg_matches(&matches).unwrap();

        let mut from_file = Config::default();
        from_file.search.iterations = 500;
        from_file.search.stepper = Stepper::Blind;
        from_file.merge_from_cli(&cli.config, &matches);

        assert_eq!(from_file.search.iterations, 7);
        assert_eq!(from_file.seed.groups, 3);
        // Not given on the command line, so the file value stays.
        assert_eq!(from_file.search.stepper, Stepper::Blind);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res = Config::load_from_file("/definitely/not/here.json");
        assert!(matches!(res, Err(crate::error::SeatingError::Io(_))));
    }
}
