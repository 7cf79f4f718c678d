use env_logger::Env;

/// Filter used when `RUST_LOG` is unset. The ✓ lines already go to stdout,
/// so per-file records stay at `debug`.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr logger. `RUST_LOG` overrides [`DEFAULT_FILTER`];
/// a second call is a no-op.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .try_init();
}

pub fn log_error(prefix: &str, e: &dyn std::error::Error) {
    log::error!("{}: {}", prefix, e);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_hides_per_file_records() {
        assert_eq!(DEFAULT_FILTER, "warn");
        let level: log::LevelFilter = DEFAULT_FILTER.parse().unwrap();
        assert!(level < log::LevelFilter::Debug);
        assert!(level >= log::LevelFilter::Error);
    }

    #[test]
    fn init_twice_is_harmless() {
        init();
        init();
    }
}
