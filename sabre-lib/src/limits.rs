/*!

Resource limits.

The core never checks the wall clock itself: long-running searches are iterator-shaped and yield
at explicit boundaries, where the host loop consults its `Limits`. Two CPU-limit flavours exist —
the hard limit terminates the run, the soft limit asks the loop to emit a partial result and stop
calling core primitives.

*/

use std::time::Duration;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
  pub cpu_limit:      Option<Duration>,
  pub soft_cpu_limit: Option<Duration>,
  /// In bytes.
  pub memory_limit: Option<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LimitStatus {
  Ok,
  /// Soft limit reached: finish up and emit a partial result.
  SoftExpired,
  /// Hard limit reached: the run is over.
  HardExpired,
}

impl Limits {
  pub fn check_cpu(&self, elapsed: Duration) -> LimitStatus {
    if let Some(hard) = self.cpu_limit {
      if elapsed >= hard {
        return LimitStatus::HardExpired;
      }
    }
    if let Some(soft) = self.soft_cpu_limit {
      if elapsed >= soft {
        return LimitStatus::SoftExpired;
      }
    }
    LimitStatus::Ok
  }
}
