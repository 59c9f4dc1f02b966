//! Machine configuration loaded from environment variables.

use chrono::TimeDelta;

/// Default time a temporary message stays on the display.
pub const DEFAULT_DISPLAY_WINDOW_MS: u32 = 3_000;

/// Default decimal separator for amounts on the display.
pub const DEFAULT_DECIMAL_SEPARATOR: char = ',';

/// Presentation settings for a machine, with sensible defaults.
///
/// Reads from environment variables:
/// - `VENDING_DISPLAY_WINDOW_MS`: how long a temporary message is shown (default: `3000`)
/// - `VENDING_DECIMAL_SEPARATOR`: single character between units and cents (default: `","`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    pub display_window: TimeDelta,
    pub decimal_separator: char,
}

impl MachineConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("VENDING_DISPLAY_WINDOW_MS").ok().as_deref(),
            std::env::var("VENDING_DECIMAL_SEPARATOR").ok().as_deref(),
        )
    }

    fn from_vars(display_window_ms: Option<&str>, decimal_separator: Option<&str>) -> Self {
        let display_window_ms = display_window_ms
            .and_then(|ms| ms.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_DISPLAY_WINDOW_MS);
        let decimal_separator = decimal_separator
            .and_then(|value| {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(separator), None) => Some(separator),
                    _ => None,
                }
            })
            .unwrap_or(DEFAULT_DECIMAL_SEPARATOR);

        Self {
            display_window: TimeDelta::milliseconds(i64::from(display_window_ms)),
            decimal_separator,
        }
    }

    /// Returns a copy with a different display window.
    pub fn with_display_window(mut self, display_window: TimeDelta) -> Self {
        self.display_window = display_window;
        self
    }

    /// Returns a copy with a different decimal separator.
    pub fn with_decimal_separator(mut self, decimal_separator: char) -> Self {
        self.decimal_separator = decimal_separator;
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            display_window: TimeDelta::milliseconds(i64::from(DEFAULT_DISPLAY_WINDOW_MS)),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = MachineConfig::default();
        assert_eq!(config.display_window, TimeDelta::seconds(3));
        assert_eq!(config.decimal_separator, ',');
    }

    #[test]
    fn test_from_vars_reads_values() {
        let config = MachineConfig::from_vars(Some("1500"), Some("."));
        assert_eq!(config.display_window, TimeDelta::milliseconds(1500));
        assert_eq!(config.decimal_separator, '.');
    }

    #[test]
    fn test_from_vars_falls_back_on_missing_or_invalid() {
        assert_eq!(MachineConfig::from_vars(None, None), MachineConfig::default());
        assert_eq!(
            MachineConfig::from_vars(Some("soon"), Some("::")),
            MachineConfig::default()
        );
        assert_eq!(
            MachineConfig::from_vars(Some("-1"), Some("")),
            MachineConfig::default()
        );
    }

    #[test]
    fn test_builders() {
        let config = MachineConfig::default()
            .with_display_window(TimeDelta::seconds(5))
            .with_decimal_separator('.');
        assert_eq!(config.display_window, TimeDelta::seconds(5));
        assert_eq!(config.decimal_separator, '.');
    }
}
