// Logger setup. Everything else logs through the `log` facade.

/// Install the env_logger backend: RUST_LOG if set, `info` otherwise.
/// Later calls leave the first logger in place.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        log::debug!("logging initialized");
    }
}
