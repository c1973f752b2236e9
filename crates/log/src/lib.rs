//! Process-wide leveled logging to stderr, as text or JSON lines.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::json;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Level {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Text = 0,
    Json = 1,
}

impl Format {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Text,
            timestamps: true,
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);
static LOG_FORMAT: AtomicU8 = AtomicU8::new(Format::Text as u8);
static LOG_TIMESTAMPS: AtomicBool = AtomicBool::new(true);
static LOG_CHAIN: OnceLock<&'static str> = OnceLock::new();

pub fn init(config: LogConfig) {
    LOG_LEVEL.store(config.level as u8, Ordering::Relaxed);
    LOG_FORMAT.store(config.format as u8, Ordering::Relaxed);
    LOG_TIMESTAMPS.store(config.timestamps, Ordering::Relaxed);
}

/// Tags every subsequent line with the active chain id. Only the first call
/// takes effect.
pub fn set_chain(chain: &'static str) {
    let _ = LOG_CHAIN.set(chain);
}

pub fn enabled(level: Level) -> bool {
    level as u8 <= LOG_LEVEL.load(Ordering::Relaxed)
}

fn current_format() -> Format {
    match LOG_FORMAT.load(Ordering::Relaxed) {
        1 => Format::Json,
        _ => Format::Text,
    }
}

pub struct Record<'a> {
    pub level: Level,
    pub target: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub chain: Option<&'static str>,
    pub args: fmt::Arguments<'a>,
}

/// Renders one log line without the trailing newline.
pub fn render(record: &Record<'_>, format: Format, now: Option<Duration>) -> String {
    match format {
        Format::Text => {
            let mut out = String::new();
            if let Some(now) = now {
                let ts = Timestamp {
                    unix_seconds: now.as_secs(),
                    millis: now.subsec_millis(),
                };
                out.push_str(&format!("{ts} "));
            }
            out.push_str(&format!("{} {}", record.level.as_str(), record.target));
            if let Some(chain) = record.chain {
                out.push_str(&format!(" [{chain}]"));
            }
            out.push_str(&format!(": {}", record.args));
            out
        }
        Format::Json => {
            let ts_ms: u64 = now
                .map(|now| now.as_millis().try_into().unwrap_or(u64::MAX))
                .unwrap_or_default();
            json!({
                "ts_ms": ts_ms,
                "level": record.level.as_str(),
                "target": record.target,
                "chain": record.chain,
                "file": record.file,
                "line": record.line,
                "msg": record.args.to_string(),
            })
            .to_string()
        }
    }
}

pub fn log(
    level: Level,
    target: &'static str,
    file: &'static str,
    line: u32,
    args: fmt::Arguments<'_>,
) {
    if !enabled(level) {
        return;
    }

    let format = current_format();
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let now = match format {
        Format::Text if !LOG_TIMESTAMPS.load(Ordering::Relaxed) => None,
        _ => Some(now),
    };
    let record = Record {
        level,
        target,
        file,
        line,
        chain: LOG_CHAIN.get().copied(),
        args,
    };
    let rendered = render(&record, format, now);
    let mut out = io::stderr().lock();
    let _ = writeln!(out, "{rendered}");
}

#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {{
        if $crate::enabled($level) {
            $crate::log($level, module_path!(), file!(), line!(), format_args!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Error, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Warn, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Info, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Debug, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Trace, $($arg)*);
    }};
}

struct Timestamp {
    unix_seconds: u64,
    millis: u32,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SECS_PER_DAY: u64 = 86_400;
        let days = (self.unix_seconds / SECS_PER_DAY) as i64;
        let secs_of_day = self.unix_seconds % SECS_PER_DAY;
        let hour = secs_of_day / 3600;
        let minute = (secs_of_day % 3600) / 60;
        let second = secs_of_day % 60;
        let (year, month, day) = civil_from_days(days);
        write!(
            f,
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millis:03}Z",
            millis = self.millis
        )
    }
}

fn civil_from_days(days_since_unix_epoch: i64) -> (i32, u32, u32) {
    // Howard Hinnant's days-to-civil conversion.
    let z = days_since_unix_epoch + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = (yoe as i32) + (era as i32) * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = y + if m <= 2 { 1 } else { 0 };
    (year, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level() {
        assert_eq!(Level::parse("info"), Some(Level::Info));
        assert_eq!(Level::parse("WARN"), Some(Level::Warn));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse("debug"), Some(Level::Debug));
        assert_eq!(Level::parse("nope"), None);
    }

    #[test]
    fn parse_format() {
        assert_eq!(Format::parse("text"), Some(Format::Text));
        assert_eq!(Format::parse("JSON"), Some(Format::Json));
        assert_eq!(Format::parse("nope"), None);
    }

    #[test]
    fn timestamp_formats_as_utc() {
        // 2018-05-08 16:22:39 UTC, the main network's genesis time.
        let ts = Timestamp {
            unix_seconds: 1_525_796_559,
            millis: 7,
        };
        assert_eq!(ts.to_string(), "2018-05-08T16:22:39.007Z");
    }

    fn render_with(
        level: Level,
        chain: Option<&'static str>,
        format: Format,
        now: Option<Duration>,
        args: fmt::Arguments<'_>,
    ) -> String {
        let record = Record {
            level,
            target: "geekd_chainparams::registry",
            file: "registry.rs",
            line: 9,
            chain,
            args,
        };
        render(&record, format, now)
    }

    #[test]
    fn text_line_includes_chain_tag() {
        let rendered = render_with(
            Level::Info,
            Some("regtest"),
            Format::Text,
            None,
            format_args!("selected {}", 3),
        );
        assert_eq!(
            rendered,
            "INFO geekd_chainparams::registry [regtest]: selected 3"
        );
    }

    #[test]
    fn json_line_is_parseable() {
        let rendered = render_with(
            Level::Debug,
            None,
            Format::Json,
            Some(Duration::from_millis(1500)),
            format_args!("hello"),
        );
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(value["ts_ms"], 1500);
        assert_eq!(value["level"], "DEBUG");
        assert_eq!(value["line"], 9);
        assert_eq!(value["chain"], serde_json::Value::Null);
        assert_eq!(value["msg"], "hello");
    }
}
