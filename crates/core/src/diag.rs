//! Tag-prefixed diagnostics on stderr.
//!
//! Lines look like `[Registry] unregistered cell id ...`. Set `BUCKET_GRID_QUIET=1`
//! to silence them.

use std::sync::OnceLock;

use crate::config::GridConfig;

pub fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| !GridConfig::quiet_from_env())
}

/// Emit a diagnostic line: `diag!("Grid", "reset to {}x{}", w, h)`.
#[macro_export]
macro_rules! diag {
    ($tag:expr, $($arg:tt)*) => {
        if $crate::diag::enabled() {
            eprintln!("[{}] {}", $tag, format_args!($($arg)*));
        }
    };
}
