use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the stderr logger. Later calls are no-ops, `RUST_LOG`
/// overrides the default filters.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("chain_bench", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Tests may race to install a logger of their own.
        let _ = builder.try_init();
    });
}
