#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

/// Route engine logs to the test harness output, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
