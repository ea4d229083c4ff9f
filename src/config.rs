use std::{env, path::PathBuf};

pub const DEFAULT_INPUT: &str = "information/scripts_mainnet/20251224-output-script-mainnet.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "information/scripts_mainnet";
pub const DEFAULT_ADDRESS_PREFIX: &str = crate::address::MAINNET_PREFIX;
pub const DEFAULT_EXPLORER_API: &str = "https://mainnet-api.explorer.nervos.org/api";
pub const DEFAULT_UDT_DIR: &str = "information/udts";

pub const ENV_INPUT: &str = "SCRIPTCAT_INPUT";
pub const ENV_OUTPUT_DIR: &str = "SCRIPTCAT_OUTPUT_DIR";
pub const ENV_ADDRESS_PREFIX: &str = "SCRIPTCAT_ADDRESS_PREFIX";
pub const ENV_EXPLORER_API: &str = "SCRIPTCAT_EXPLORER_API";
pub const ENV_UDT_DIR: &str = "SCRIPTCAT_UDT_DIR";

/// Where the transformer reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    pub input: PathBuf,
    /// Base directory; records land in its `live/` and `history/` children.
    pub output_dir: PathBuf,
    pub address_prefix: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
        }
    }
}

impl TransformConfig {
    /// Positional args `[input] [output_dir] [prefix]`, then environment, then defaults.
    pub fn from_env_and_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        Self::resolve(args, |key| env::var(key).ok())
    }

    fn resolve<I, F>(args: I, lookup: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let mut pick = |env_key: &str, default: &str| {
            args.next()
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(env_key).filter(|v| !v.is_empty()))
                .unwrap_or_else(|| default.to_string())
        };

        let input = pick(ENV_INPUT, DEFAULT_INPUT);
        let output_dir = pick(ENV_OUTPUT_DIR, DEFAULT_OUTPUT_DIR);
        let address_prefix = pick(ENV_ADDRESS_PREFIX, DEFAULT_ADDRESS_PREFIX);

        Self {
            input: PathBuf::from(input),
            output_dir: PathBuf::from(output_dir),
            address_prefix,
        }
    }
}

/// Base URL of the explorer API used by the UDT tools.
pub fn explorer_api() -> String {
    env_or(ENV_EXPLORER_API, DEFAULT_EXPLORER_API)
}

/// Directory holding UDT descriptor templates.
pub fn udt_dir() -> PathBuf {
    PathBuf::from(env_or(ENV_UDT_DIR, DEFAULT_UDT_DIR))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_when_nothing_given() {
        let cfg = TransformConfig::resolve(Vec::new(), |_| None);
        assert_eq!(cfg, TransformConfig::default());
        assert_eq!(cfg.address_prefix, "ckb");
    }

    #[test]
    fn args_override_env() {
        let env: HashMap<&str, &str> =
            [(ENV_INPUT, "env.csv"), (ENV_ADDRESS_PREFIX, "ckt")].into_iter().collect();
        let cfg = TransformConfig::resolve(args(&["dump.csv", "out"]), |k| {
            env.get(k).map(|v| v.to_string())
        });
        assert_eq!(cfg.input, PathBuf::from("dump.csv"));
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.address_prefix, "ckt");
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let cfg = TransformConfig::resolve(args(&[""]), |_| Some(String::new()));
        assert_eq!(cfg.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(cfg.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }
}
