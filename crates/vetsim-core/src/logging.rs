//! Logging facilities for VetSim.
//!
//! VetSim uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("vetsim=debug,vetsim_core=info")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "vetsim_core";
    /// Timer system target.
    pub const TIMER: &str = "vetsim_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "vetsim_core::signal";
    /// Carousel controller target.
    pub const CAROUSEL: &str = "vetsim::carousel";
    /// Stat counter target.
    pub const COUNTER: &str = "vetsim::counter";
    /// Navigation bar target.
    pub const NAV: &str = "vetsim::nav";
    /// Page composition target.
    pub const PAGE: &str = "vetsim::page";
    /// Configuration loading target.
    pub const CONFIG: &str = "vetsim::config";
}

/// A performance tracing span.
///
/// Enters an `info`-level span named `perf` for the lifetime of the guard,
/// so a timing-aware subscriber reports how long the scope took.
///
/// ```
/// use vetsim_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("page_setup");
///     // ... work ...
/// }
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "vetsim::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test_operation");
            tracing::debug!(target: targets::CORE, "inside span");
        });
    }
}
