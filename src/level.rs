use std::fmt;
use std::str::FromStr;

/// Severity attached to a structured log record.
///
/// Parsing is case-insensitive and accepts `warning` and `critical` as
/// aliases for [`FemtoLevel::Warn`] and [`FemtoLevel::Fatal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FemtoLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Default for FemtoLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl FemtoLevel {
    /// Lowercase name used in serialised records.
    pub fn as_str(self) -> &'static str {
        match self {
            FemtoLevel::Trace => "trace",
            FemtoLevel::Debug => "debug",
            FemtoLevel::Info => "info",
            FemtoLevel::Warn => "warn",
            FemtoLevel::Error => "error",
            FemtoLevel::Fatal => "fatal",
            FemtoLevel::Panic => "panic",
        }
    }
}

impl fmt::Display for FemtoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FemtoLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" | "critical" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            _ => Err(()),
        }
    }
}
