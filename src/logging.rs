//! stderr ロガー
//!
//! レベルは `-v` 指定で debug、それ以外は環境変数 `SHEET_RECONCILE_LOG` で決める。

use log::{LevelFilter, Metadata, Record};

pub const LOG_ENV: &str = "SHEET_RECONCILE_LOG";

pub fn init_logging(verbose: bool) {
    static LOGGER: StderrLogger = StderrLogger;
    let _ = log::set_logger(&LOGGER);
    let level = if verbose {
        LevelFilter::Debug
    } else {
        level_from_env(std::env::var(LOG_ENV).ok().as_deref())
    };
    log::set_max_level(level);
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("error") => LevelFilter::Error,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some("off") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}
