use std::sync::Once;

static INIT: Once = Once::new();

/// Install `env_logger` once per test binary. Honors `RUST_LOG`.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .is_test(true)
            .try_init();
    });
}
