//! Minimal stderr backend for the `log` facade.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Level used for a given `--verbose` flag.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        Level::Warn.to_level_filter()
    }
}

/// Installs the stderr logger. Later calls only adjust the level.
pub fn init(verbose: bool) {
    log::set_max_level(level_for(verbose));
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed, level set to {}", log::max_level());
    }
}
