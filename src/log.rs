//! Logging shims.
//!
//! Built with the `tracing` feature, `debug!`, `info!` and `warn!` are the
//! `tracing` macros. Built without it, they swallow their arguments, so the
//! per-step logging in the tracers compiles away.

/// Whether log macros emit anything in this build.
pub const ENABLED: bool = cfg!(feature = "tracing");

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, info, warn};
