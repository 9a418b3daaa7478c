//! Crate-internal assertion macro.

/// Panic when a core invariant is broken.
///
/// A broken invariant means a defect in this crate, not bad user input, so it
/// is never turned into a `Result`.
#[macro_export]
macro_rules! invariant {
    ($cond:expr, $($msg:tt)+) => {
        if !$cond {
            panic!("hypconx invariant violated: {}", format_args!($($msg)+));
        }
    };
}
