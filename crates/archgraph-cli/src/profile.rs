//! Profiling utilities.

#[cfg(feature = "profile")]
use std::fs::File;

#[cfg(feature = "profile")]
use tracing::{info, warn};

/// Profile a phase and write `<name>.svg` as a flamegraph (when profiling is enabled).
#[cfg(feature = "profile")]
pub fn profile_phase<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    use pprof::ProfilerGuard;

    let guard = match ProfilerGuard::new(1000) {
        Ok(guard) => guard,
        Err(e) => {
            warn!(phase = name, error = %e, "profiler unavailable");
            return f();
        }
    };
    let result = f();

    if let Ok(report) = guard.report().build() {
        let filename = format!("{name}.svg");
        match File::create(&filename).map(|file| report.flamegraph(file)) {
            Ok(Ok(())) => info!("Flamegraph saved to {}", filename),
            Ok(Err(e)) => warn!(path = %filename, error = %e, "flamegraph write failed"),
            Err(e) => warn!(path = %filename, error = %e, "flamegraph create failed"),
        }
    }

    result
}

/// No-op profiling when feature is disabled.
#[cfg(not(feature = "profile"))]
pub fn profile_phase<F, R>(_name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}
