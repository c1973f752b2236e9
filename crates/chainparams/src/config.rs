//! `geekd.conf` loading and network resolution from arguments and config.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use geekd_consensus::Network;

pub const DEFAULT_CONF_FILE_NAME: &str = "geekd.conf";

/// Keys are lowercased; a key may repeat, so every value is kept in order.
pub type ConfFile = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    InvalidBool { key: String, value: String },
    ConflictingNetworks,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
            ConfigError::InvalidBool { key, value } => {
                write!(f, "invalid boolean '{value}' for {key}")
            }
            ConfigError::ConflictingNetworks => {
                write!(f, "invalid combination of regtest and testnet")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reads a key=value config file. A missing file is not an error.
pub fn load_conf(path: &Path) -> Result<Option<ConfFile>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
        }
    };
    Ok(Some(parse_conf(&contents)))
}

pub fn parse_conf(contents: &str) -> ConfFile {
    let mut out = ConfFile::new();
    for raw_line in contents.lines() {
        let mut line = raw_line.trim();
        if let Some(idx) = line.find(['#', ';']) {
            line = &line[..idx];
        }
        line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = match line.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (line, "1"),
        };
        if key.is_empty() {
            continue;
        }
        out.entry(key.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }
    out
}

pub fn parse_conf_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.is_empty() {
        return Some(true);
    }
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Last value wins when a boolean key repeats.
fn conf_bool(conf: &ConfFile, key: &str) -> Result<bool, ConfigError> {
    let Some(value) = conf.get(key).and_then(|values| values.last()) else {
        return Ok(false);
    };
    parse_conf_bool(value).ok_or_else(|| ConfigError::InvalidBool {
        key: key.to_string(),
        value: value.clone(),
    })
}

/// Network-related command line options.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NetworkArgs {
    pub network: Option<String>,
    pub testnet: bool,
    pub regtest: bool,
}

impl NetworkArgs {
    fn is_set(&self) -> bool {
        self.network.is_some() || self.testnet || self.regtest
    }
}

/// Resolves the chain id to select. Command line options take precedence
/// over the config file as a whole; within one source, asking for both
/// regtest and testnet is an error. An explicit id is returned unparsed so
/// the registry reports unknown names.
pub fn network_from_args(
    args: &NetworkArgs,
    conf: Option<&ConfFile>,
) -> Result<String, ConfigError> {
    if args.is_set() {
        return resolve(args.network.as_deref(), args.testnet, args.regtest);
    }
    let Some(conf) = conf else {
        return Ok(Network::Mainnet.id().to_string());
    };
    let network = conf
        .get("network")
        .and_then(|values| values.last())
        .map(String::as_str);
    resolve(
        network,
        conf_bool(conf, "testnet")?,
        conf_bool(conf, "regtest")?,
    )
}

fn resolve(network: Option<&str>, testnet: bool, regtest: bool) -> Result<String, ConfigError> {
    let flagged = match (testnet, regtest) {
        (true, true) => return Err(ConfigError::ConflictingNetworks),
        (true, false) => Some(Network::Testnet.id()),
        (false, true) => Some(Network::Regtest.id()),
        (false, false) => None,
    };
    match (network, flagged) {
        (Some(explicit), Some(flag)) if explicit != flag => Err(ConfigError::ConflictingNetworks),
        (Some(explicit), _) => Ok(explicit.to_string()),
        (None, Some(flag)) => Ok(flag.to_string()),
        (None, None) => Ok(Network::Mainnet.id().to_string()),
    }
}
