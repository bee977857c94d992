//! Leveled debug output on stderr, filtered by engine module.
//!
//! Every message carries a module tag, one of [`MODULES`]. Nothing is printed
//! until a level is set, so the library is silent by default.

use std::cell::RefCell;
use std::fmt;

/// Tags the engine logs under.
pub const MODULES: [&str; 5] = ["scan", "normalize", "encode", "decode", "store"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DebugLevel {
    #[default]
    None = 0,
    Error = 1,
    /// Rejected duplicates, serial formulas with two counts
    Warn = 2,
    /// Store changes and listing loads
    Info = 3,
    /// One line per encoded formula
    Debug = 4,
    /// Scanner decisions and the decoder cascade
    Trace = 5,
}

impl DebugLevel {
    pub fn label(self) -> &'static str {
        match self {
            DebugLevel::None => "NONE",
            DebugLevel::Error => "ERROR",
            DebugLevel::Warn => "WARN",
            DebugLevel::Info => "INFO",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }

    /// Map a `-v` count to a level, `--trace` wins over the count.
    pub fn from_verbosity(verbose: u8, trace: bool) -> Self {
        if trace {
            return DebugLevel::Trace;
        }
        match verbose {
            0 => DebugLevel::Error,
            1 => DebugLevel::Warn,
            2 => DebugLevel::Info,
            3 => DebugLevel::Debug,
            _ => DebugLevel::Trace,
        }
    }
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current level and module filters of this thread.
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    pub level: DebugLevel,
    /// Empty means every module.
    pub module_filters: Vec<String>,
}

impl DebugConfig {
    /// Filters match a tag exactly, ignoring ASCII case.
    pub fn enabled(&self, level: DebugLevel, module: &str) -> bool {
        level != DebugLevel::None
            && level <= self.level
            && (self.module_filters.is_empty()
                || self
                    .module_filters
                    .iter()
                    .any(|filter| filter.eq_ignore_ascii_case(module)))
    }
}

thread_local! {
    static DEBUG_CONFIG: RefCell<DebugConfig> = RefCell::new(DebugConfig::default());
}

fn with_config<R>(f: impl FnOnce(&mut DebugConfig) -> R) -> R {
    DEBUG_CONFIG.with(|config| f(&mut config.borrow_mut()))
}

pub fn set_debug_level(level: DebugLevel) {
    with_config(|config| config.level = level);
}

/// Only print messages tagged `module` (may be called once per tag).
pub fn add_module_filter(module: &str) {
    with_config(|config| config.module_filters.push(module.trim().to_string()));
}

pub fn clear_module_filters() {
    with_config(|config| config.module_filters.clear());
}

pub fn is_debug_enabled(level: DebugLevel, module: &str) -> bool {
    with_config(|config| config.enabled(level, module))
}

/// Print `[LEVEL:module] message` to stderr when enabled.
#[macro_export]
macro_rules! debug {
    ($level:expr, $module:expr, $($arg:tt)*) => {{
        let level = $level;
        let module = $module;
        if $crate::logic::debug::is_debug_enabled(level, module) {
            eprintln!("[{}:{}] {}", level, module, format_args!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! debug_error {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::logic::debug::DebugLevel::Error, $module, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_warn {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::logic::debug::DebugLevel::Warn, $module, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_info {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::logic::debug::DebugLevel::Info, $module, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_debug {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::logic::debug::DebugLevel::Debug, $module, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::logic::debug::DebugLevel::Trace, $module, $($arg)*)
    };
}

/// Caret markers for scanner traces.
pub struct DebugUtils;

impl DebugUtils {
    /// Render `text` with a `^` marker under the character at byte `index`.
    ///
    /// Falls back to a plain `@index` suffix when `index` is not on a char boundary
    /// or past the end.
    pub fn mark_position(text: &str, index: usize) -> String {
        if index > text.len() || !text.is_char_boundary(index) {
            return format!("'{}' @{}", Self::escape(text), index);
        }
        let column = text[..index].chars().count();
        format!("'{}'\n {}^", Self::escape(text), " ".repeat(column))
    }

    fn escape(text: &str) -> String {
        text.replace('\n', "\\n").replace('\t', "\\t")
    }
}

/// Key/value steps of one operation, printed as a single line.
#[derive(Debug, Default)]
pub struct DebugContext {
    pub operation: &'static str,
    pub steps: Vec<(&'static str, String)>,
}

impl DebugContext {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            steps: Vec::new(),
        }
    }

    pub fn add(&mut self, key: &'static str, value: impl Into<String>) {
        self.steps.push((key, value.into()));
    }

    pub fn render(&self) -> String {
        let steps: Vec<String> = self
            .steps
            .iter()
            .map(|(key, value)| format!("{}={:?}", key, value))
            .collect();
        format!("{}: {}", self.operation, steps.join(" "))
    }

    pub fn debug_dump(&self, level: DebugLevel, module: &str) {
        crate::debug!(level, module, "{}", self.render());
    }
}
