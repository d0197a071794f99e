// ── Gateway clock and address ──

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::clock;

/// `GET /config` projected into a single clock value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GatewaySettings {
    /// Gateway wall clock; `None` until the first successful fetch.
    pub clock: Option<NaiveDateTime>,
    /// LoRa address of the gateway radio.
    pub address: String,
}

impl GatewaySettings {
    /// Date half as `YYYY-MM-DD` (empty when unset).
    pub fn date(&self) -> String {
        clock::date_string(self.clock)
    }

    /// Time half as `HH:MM:SS` (empty when unset).
    pub fn time(&self) -> String {
        clock::time_string(self.clock)
    }

    /// Replace only the date half. Malformed input leaves the clock as is.
    pub fn set_date(&mut self, date: &str) -> bool {
        self.patch_clock(Some(date), None)
    }

    /// Replace only the time half. Malformed input leaves the clock as is.
    pub fn set_time(&mut self, time: &str) -> bool {
        self.patch_clock(None, Some(time))
    }

    fn patch_clock(&mut self, date: Option<&str>, time: Option<&str>) -> bool {
        match clock::recompose(self.clock, date, time) {
            Some(moment) => {
                self.clock = Some(moment);
                true
            }
            None => false,
        }
    }
}

/// Fields a `save` may change. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub date: Option<String>,
    pub time: Option<String>,
    pub address: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.address.is_none()
    }

    /// Apply to `settings`. Unparseable halves are ignored.
    pub fn apply(&self, settings: &mut GatewaySettings) {
        if let Some(date) = self.date.as_deref() {
            settings.set_date(date);
        }
        if let Some(time) = self.time.as_deref() {
            settings.set_time(time);
        }
        if let Some(address) = &self.address {
            settings.address.clone_from(address);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> GatewaySettings {
        GatewaySettings {
            clock: clock::recompose(None, Some("23/06/2025"), Some("14:19:00")),
            address: "0xaa".into(),
        }
    }

    #[test]
    fn set_date_keeps_time() {
        let mut s = settings();
        assert!(s.set_date("2025-07-01"));
        assert_eq!(s.date(), "2025-07-01");
        assert_eq!(s.time(), "14:19:00");
    }

    #[test]
    fn malformed_time_is_no_change() {
        let mut s = settings();
        assert!(!s.set_time("25:99"));
        assert_eq!(s, settings());
    }

    #[test]
    fn patch_applies_each_field() {
        let mut s = settings();
        SettingsPatch {
            date: None,
            time: Some("08:00".into()),
            address: Some("0xab".into()),
        }
        .apply(&mut s);
        assert_eq!(s.date(), "2025-06-23");
        assert_eq!(s.time(), "08:00:00");
        assert_eq!(s.address, "0xab");
    }

    #[test]
    fn unset_clock_renders_empty() {
        let s = GatewaySettings::default();
        assert_eq!(s.date(), "");
        assert_eq!(s.time(), "");
    }
}
