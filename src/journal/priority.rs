//! Mapping from record levels to syslog severities.

use crate::level::FemtoLevel;

/// Syslog severity carried in the journal `PRIORITY` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Priority {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Informational = 6,
    Debug = 7,
}

impl Priority {
    /// Severity for `level`. Records without a recognised level are notices.
    pub fn from_level(level: Option<FemtoLevel>) -> Self {
        match level {
            Some(FemtoLevel::Trace | FemtoLevel::Debug) => Priority::Debug,
            Some(FemtoLevel::Info) => Priority::Informational,
            Some(FemtoLevel::Warn) => Priority::Warning,
            Some(FemtoLevel::Error) => Priority::Error,
            Some(FemtoLevel::Fatal) => Priority::Critical,
            Some(FemtoLevel::Panic) => Priority::Emergency,
            None => Priority::Notice,
        }
    }

    /// ASCII digit written on the wire.
    pub fn as_digit(self) -> u8 {
        b'0' + self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(FemtoLevel::Trace), b'7')]
    #[case(Some(FemtoLevel::Debug), b'7')]
    #[case(Some(FemtoLevel::Info), b'6')]
    #[case(Some(FemtoLevel::Warn), b'4')]
    #[case(Some(FemtoLevel::Error), b'3')]
    #[case(Some(FemtoLevel::Fatal), b'2')]
    #[case(Some(FemtoLevel::Panic), b'0')]
    #[case(None, b'5')]
    fn maps_levels_to_digits(#[case] level: Option<FemtoLevel>, #[case] digit: u8) {
        assert_eq!(Priority::from_level(level).as_digit(), digit);
    }
}
