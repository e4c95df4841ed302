//! Internal structured logging helpers.

/// Single logging target for the crate.
pub(crate) const LOG_TARGET: &str = "pandatex";

/// Emit `event=<name> <formatted fields>` under [`LOG_TARGET`], skipping the
/// formatting entirely when the level is disabled.
macro_rules! pandatex_log {
    ($level:expr, $event:expr, $fmt:expr $(, $args:expr)* $(,)?) => {{
        if log::log_enabled!(target: crate::logging::LOG_TARGET, $level) {
            log::log!(
                target: crate::logging::LOG_TARGET,
                $level,
                "event={} {}",
                $event,
                format_args!($fmt $(, $args)*)
            );
        }
    }};
}

pub(crate) use pandatex_log;
