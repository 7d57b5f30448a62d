//! Environment configuration.
//!
//! - `ZETRACE_API_TRACING`: `1`, `on`, `true` or `enabled` brings the tracing
//!   layer up at driver init. Anything else (or unset) leaves it down and the
//!   driver hands out its real dispatch table.
//! - `ZETRACE_LOG`: minimum level for the layer's JSONL log
//!   (`off|error|warn|info|debug|trace`, default `off`).
//!
//! Both are read once and cached.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::structured_log::LogLevel;

pub const TRACING_ENV: &str = "ZETRACE_API_TRACING";
pub const LOG_ENV: &str = "ZETRACE_LOG";

/// Whether driver init should bring the tracing layer up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TracingMode {
    #[default]
    Disabled,
    Enabled,
}

impl TracingMode {
    /// Parse from string (case-insensitive). Unknown values disable tracing.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "on" | "true" | "enabled" => Self::Enabled,
            _ => Self::Disabled,
        }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Parse a `ZETRACE_LOG` value. `None` means logging is off.
#[must_use]
pub fn parse_log_level(s: &str) -> Option<LogLevel> {
    match s.trim().to_ascii_lowercase().as_str() {
        "error" => Some(LogLevel::Error),
        "warn" | "warning" => Some(LogLevel::Warn),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        "trace" | "all" => Some(LogLevel::Trace),
        _ => None,
    }
}

// Atomic caches: 0=unresolved, 255=resolving, anything else is an encoded
// value. Env reads can re-enter the driver on some platforms, so a reader
// arriving mid-resolution gets the default instead of blocking.
const UNRESOLVED: u8 = 0;
const RESOLVING: u8 = 255;

const MODE_DISABLED: u8 = 1;
const MODE_ENABLED: u8 = 2;

const LOG_OFF: u8 = 1;

static CACHED_MODE: AtomicU8 = AtomicU8::new(UNRESOLVED);
static CACHED_LOG: AtomicU8 = AtomicU8::new(UNRESOLVED);

fn mode_to_u8(mode: TracingMode) -> u8 {
    match mode {
        TracingMode::Disabled => MODE_DISABLED,
        TracingMode::Enabled => MODE_ENABLED,
    }
}

fn u8_to_mode(v: u8) -> TracingMode {
    if v == MODE_ENABLED {
        TracingMode::Enabled
    } else {
        TracingMode::Disabled
    }
}

fn log_to_u8(level: Option<LogLevel>) -> u8 {
    match level {
        None => LOG_OFF,
        Some(level) => LOG_OFF + 1 + level.rank(),
    }
}

fn u8_to_log(v: u8) -> Option<LogLevel> {
    if v <= LOG_OFF || v == RESOLVING {
        return None;
    }
    LogLevel::from_rank(v - LOG_OFF - 1)
}

/// Resolve `cache` through the non-blocking state machine, reading the
/// environment at most once.
fn resolve_cached(cache: &AtomicU8, default: u8, read: impl FnOnce() -> u8) -> u8 {
    let cached = cache.load(Ordering::Acquire);
    if cached != UNRESOLVED && cached != RESOLVING {
        return cached;
    }
    if cached == RESOLVING {
        return default;
    }
    if cache
        .compare_exchange(UNRESOLVED, RESOLVING, Ordering::SeqCst, Ordering::Acquire)
        .is_err()
    {
        let v = cache.load(Ordering::Acquire);
        return if v != UNRESOLVED && v != RESOLVING {
            v
        } else {
            default
        };
    }
    let value = read();
    cache.store(value, Ordering::Release);
    value
}

/// Configured tracing mode (reads the env var on first call, cached thereafter).
#[must_use]
pub fn tracing_mode() -> TracingMode {
    u8_to_mode(resolve_cached(&CACHED_MODE, MODE_DISABLED, || {
        std::env::var(TRACING_ENV)
            .map(|v| mode_to_u8(TracingMode::from_str_loose(&v)))
            .unwrap_or(MODE_DISABLED)
    }))
}

/// Configured log threshold, `None` when logging is off.
#[must_use]
pub fn log_level() -> Option<LogLevel> {
    u8_to_log(resolve_cached(&CACHED_LOG, LOG_OFF, || {
        std::env::var(LOG_ENV)
            .map(|v| log_to_u8(parse_log_level(&v)))
            .unwrap_or(LOG_OFF)
    }))
}

/// Drop both cached values so the next read consults the environment again.
pub fn reset_cache() {
    CACHED_MODE.store(UNRESOLVED, Ordering::SeqCst);
    CACHED_LOG.store(UNRESOLVED, Ordering::SeqCst);
}
