//! This module provides observability and diagnostics for the pipeline stages.
//!
//! The `log_metric!` macro emits one structured key/value line per event through
//! the `log` facade at debug level, so stage sizes and timings can be grepped out
//! of a verbose run.
//!
//! It is a zero-cost abstraction: the `#[cfg(debug_assertions)]` attribute ensures
//! that the macro body is compiled out of release builds.

/// Logs a structured key-value metric line at debug level, only in debug builds.
///
/// # Example
/// ```
/// use yuvdelta::log_metric;
/// let frames = 4;
/// log_metric!("event"="stage_done", "stage"="color_encode", "frames"=&frames);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts: Vec<String> = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            $crate::__log::debug!("YUVDELTA_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}
