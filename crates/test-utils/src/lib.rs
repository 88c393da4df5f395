pub mod builders;
pub mod recording_task;

use std::sync::Once;

use stargate::logging::{LOG_ENV_VAR, filter_directives};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Route `stargate` logs into the per-test capture buffer.
///
/// Honours `STARGATE_LOG` the same way the binary does, so
/// `STARGATE_LOG=stargate::flow=debug cargo test -- --nocapture` shows the
/// orchestrator's decisions.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env_value = std::env::var(LOG_ENV_VAR).ok();
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directives(None, env_value.as_deref())))
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}
