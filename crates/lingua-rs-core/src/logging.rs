//! Logging integration for lingua-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-session spans.

use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

/// Crates whose events a bare level such as `"debug"` applies to.
const LINGUA_TARGETS: &[&str] = &[
    "lingua_rs",
    "lingua_rs_core",
    "lingua_rs_signals",
    "lingua_rs_storage",
    "lingua_rs_runtime",
];

/// Level for everything outside the lingua-rs crates.
const OTHER_TARGETS_LEVEL: &str = "warn";

/// Expands `log_level` into filter directives.
///
/// A bare level (`"debug"`) is scoped to the lingua-rs crates, with other
/// targets held at `warn`. Anything containing a directive (`=`) or a list
/// (`,`) is taken verbatim.
fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = if level.is_empty() { "info" } else { level };

    let mut directives = OTHER_TARGETS_LEVEL.to_string();
    for target in LINGUA_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(log_level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives("info")))
}

/// Sets up the global tracing subscriber based on the given settings.
///
/// In debug mode a pretty, human-readable format is used; otherwise a
/// structured JSON format is used. Returns `true` if this call installed the
/// subscriber and `false` if one was already installed, in which case
/// nothing changes.
pub fn setup_logging(settings: &Settings) -> bool {
    use tracing_subscriber::fmt;

    let filter = env_filter(&settings.log_level);
    let installed = if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .is_ok()
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(
            log_level = %settings.log_level,
            json = !settings.debug,
            "lingua-rs logging initialized"
        );
    }
    installed
}

/// Creates a tracing span for a localization session.
///
/// Work done on behalf of a session, including background preference
/// restores and saves, runs inside this span so its events carry the
/// session id.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::logging::session_span;
///
/// let span = session_span("3f6c2a");
/// let _guard = span.enter();
/// tracing::info!("language changed");
/// ```
pub fn session_span(session_id: &str) -> tracing::Span {
    tracing::info_span!("lingua_session", id = session_id)
}
