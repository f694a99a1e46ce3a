use tracing_subscriber::EnvFilter;

const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];
const CRATE_TARGETS: &[&str] = &["weatherwise", "weatherwise_core"];

/// Install the stderr subscriber. Each `-v` raises the level one step from
/// `warn`; a set `RUST_LOG` wins over the flag.
pub fn init(verbosity: u8) {
    let level = LEVELS[usize::from(verbosity).min(LEVELS.len() - 1)];
    let default_filter = CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
