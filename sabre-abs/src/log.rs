/*!

Logging facade. The (crate) public interface consists only of
`set_global_logging_threshold()`/`get_global_logging_threshold()`, `init_logging()`, and the
re-exported `tracing` macros. The backing implementation is encapsulated here.

The numeric threshold maps onto `tracing` levels: 0 silences everything, 1 = error, 2 = warn,
3 = info, 4 = debug, 5 and above = trace.

*/

use std::sync::atomic::{AtomicU8, Ordering};

pub use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::{fmt, EnvFilter};

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(2);

#[inline(always)]
pub fn set_global_logging_threshold(threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(threshold, Ordering::Relaxed);
}

#[inline(always)]
pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::Relaxed)
}

fn threshold_directive(threshold: u8) -> &'static str {
  match threshold {
    0 => "off",
    1 => "error",
    2 => "warn",
    3 => "info",
    4 => "debug",
    _ => "trace",
  }
}

/// Installs a global subscriber honoring the current threshold. Safe to call more than once; only
/// the first installation wins.
pub fn init_logging() {
  let directive = threshold_directive(get_global_logging_threshold());
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

  // try_init fails if a subscriber is already set, which is fine in tests.
  let _ = fmt().with_env_filter(filter).without_time().try_init();
}
