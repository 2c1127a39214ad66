//! The action contract shared by the store, middleware and subscriptions

use std::fmt::Debug;

/// Something the reducer can be asked to do.
///
/// Actions cross task boundaries (timer tasks send them into the runtime)
/// and middleware logs them after dispatch, hence the bounds.
pub trait Action: Clone + Debug + Send + 'static {
    /// Stable name used in log lines
    fn name(&self) -> &'static str;

    /// Group name used to filter log output (e.g. `"counter"`, `"focus"`)
    fn category(&self) -> Option<&'static str> {
        None
    }
}
