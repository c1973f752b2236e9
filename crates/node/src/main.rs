use geekd_log as logging;
use geekd_log::{log_debug, log_info, log_warn};

pub mod summary;

use std::path::PathBuf;

use geekd_chainparams::config::DEFAULT_CONF_FILE_NAME;
use geekd_chainparams::{load_conf, network_from_args, ChainParams, NetworkArgs, Registry};
use geekd_consensus::hash256_to_hex;
use geekd_primitives::{address_to_script_pubkey, script_pubkey_to_address};

use crate::summary::ParamsSummary;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliAction {
    PrintHelp,
    PrintVersion,
    Run(Config),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub conf_path: Option<PathBuf>,
    pub network: NetworkArgs,
    pub log_level: logging::Level,
    pub log_format: logging::Format,
    pub log_timestamps: bool,
    pub print_params: bool,
    pub validate_addresses: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let log = logging::LogConfig::default();
        Self {
            conf_path: None,
            network: NetworkArgs::default(),
            log_level: log.level,
            log_format: log.format,
            log_timestamps: log.timestamps,
            print_params: false,
            validate_addresses: Vec::new(),
        }
    }
}

pub fn run_entry() -> Result<(), String> {
    match parse_args_from(std::env::args().skip(1))? {
        CliAction::PrintHelp => {
            println!("{}", usage());
            Ok(())
        }
        CliAction::PrintVersion => {
            println!("geekd {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliAction::Run(config) => run_with_config(config),
    }
}

fn run_with_config(config: Config) -> Result<(), String> {
    logging::init(logging::LogConfig {
        level: config.log_level,
        format: config.log_format,
        timestamps: config.log_timestamps,
    });

    let conf_path = config
        .conf_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONF_FILE_NAME));
    let conf = load_conf(&conf_path).map_err(|err| err.to_string())?;
    match &conf {
        Some(conf) => log_debug!("Loaded {} ({} keys)", conf_path.display(), conf.len()),
        None if config.conf_path.is_some() => {
            log_warn!("Config file {} not found", conf_path.display())
        }
        None => {}
    }

    let chain_id =
        network_from_args(&config.network, conf.as_ref()).map_err(|err| err.to_string())?;

    let mut registry = Registry::new().map_err(|err| err.to_string())?;
    let params = registry
        .select_network(&chain_id)
        .map_err(|err| err.to_string())?;
    logging::set_chain(params.id());
    log_summary(params);

    for address in &config.validate_addresses {
        println!("{}", validate_address(params, address));
    }

    if config.print_params {
        let summary = ParamsSummary::from_params(params);
        let json = serde_json::to_string_pretty(&summary).map_err(|err| err.to_string())?;
        println!("{json}");
    }

    Ok(())
}

fn log_summary(params: &ChainParams) {
    let last_checkpoint = params
        .checkpoints
        .last_checkpoint()
        .map(|checkpoint| checkpoint.height)
        .unwrap_or(0);
    log_info!(
        "Network {}: magic {:02x?}, port {}, {} dns seeds, last checkpoint {}",
        params.id(),
        params.message_start,
        params.default_port,
        params.dns_seeds.len(),
        last_checkpoint
    );
    log_debug!(
        "Consensus: spacing {}s, retarget every {} blocks, pow limit {}",
        params.consensus.pow_target_spacing,
        params.consensus.difficulty_adjustment_interval(),
        hash256_to_hex(&params.consensus.pow_limit)
    );
}

/// Checks an address against the active network's prefixes and reports the
/// script it pays to.
pub fn validate_address(params: &ChainParams, address: &str) -> String {
    match address_to_script_pubkey(address, &params.base58_prefixes) {
        Ok(script) => {
            let canonical = script_pubkey_to_address(&script, &params.base58_prefixes)
                .unwrap_or_default();
            let script_hex: String = script.iter().map(|byte| format!("{byte:02x}")).collect();
            format!("{canonical}: valid on {} (script {script_hex})", params.id())
        }
        Err(err) => format!("{address}: invalid on {} ({err})", params.id()),
    }
}

pub fn parse_args_from<I>(raw_args: I) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config::default();
    let mut args = raw_args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "help" | "--help" | "-h" => return Ok(CliAction::PrintHelp),
            "version" | "--version" | "-V" => return Ok(CliAction::PrintVersion),
            "--conf" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for --conf\n{}", usage()))?;
                config.conf_path = Some(PathBuf::from(value));
            }
            "--network" | "--chain" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for {arg}\n{}", usage()))?;
                config.network.network = Some(value);
            }
            "--testnet" => config.network.testnet = true,
            "--regtest" => config.network.regtest = true,
            "--log-level" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for --log-level\n{}", usage()))?;
                config.log_level = logging::Level::parse(&value)
                    .ok_or_else(|| format!("invalid log level '{value}'\n{}", usage()))?;
            }
            "--log-format" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for --log-format\n{}", usage()))?;
                config.log_format = logging::Format::parse(&value)
                    .ok_or_else(|| format!("invalid log format '{value}'\n{}", usage()))?;
            }
            "--log-timestamps" => config.log_timestamps = true,
            "--no-log-timestamps" => config.log_timestamps = false,
            "--print-params" => config.print_params = true,
            "--validate-address" => {
                let value = args.next().ok_or_else(|| {
                    format!("missing value for --validate-address\n{}", usage())
                })?;
                config.validate_addresses.push(value);
            }
            other => return Err(format!("unknown argument '{other}'\n{}", usage())),
        }
    }

    Ok(CliAction::Run(config))
}

fn usage() -> String {
    [
        "Usage:",
        "  geekd [options]",
        "",
        "Options:",
        "  --help, -h  Print this help and exit",
        "  --version, -V  Print version and exit",
        "  --conf  Config file path (default: ./geekd.conf)",
        "  --network  Chain to use (main|test|regtest) (default: main)",
        "  --testnet  Use the test chain",
        "  --regtest  Use the regression test chain",
        "  --log-level  Log verbosity (error|warn|info|debug|trace) (default: info)",
        "  --log-format  Log output format (text|json) (default: text)",
        "  --log-timestamps  Enable timestamps in text logs (default: on)",
        "  --no-log-timestamps  Disable timestamps in text logs",
        "  --print-params  Print the selected chain's parameters as JSON",
        "  --validate-address  Check an address against the selected chain (repeatable)",
    ]
    .join("\n")
}
