use env_logger::Env;

/// Install the `env_logger` backend for the `log` facade.
///
/// Honours `RUST_LOG` and defaults to `warn`. Safe to call more than once;
/// later calls are no-ops.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .is_test(cfg!(test))
        .try_init();
}
