//! Reading and writing the settings section

use crate::config::{
    options, FanControlSettings, CONFIG_NAME, MAX_INTERVAL_SECONDS, SECTION_NAME, SECTION_TYPE,
};
use crate::domain::codec::{self, CurveEncoding, PersistedCurve};
use crate::error::ConfigError;
use crate::uci::{ConfigStore, UciValue};

use std::path::PathBuf;
use std::str::FromStr;

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "yes" | "on" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disabled" => Some(false),
        _ => None,
    }
}

fn bool_value(value: bool) -> UciValue {
    UciValue::Scalar(if value { "1" } else { "0" }.to_string())
}

fn path_value(path: &Option<PathBuf>) -> UciValue {
    UciValue::Scalar(
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    )
}

impl FanControlSettings {
    /// Load the config and read the settings section
    pub fn load<S: ConfigStore + ?Sized>(store: &mut S) -> Result<Self, ConfigError> {
        store.load(CONFIG_NAME)?;
        Ok(Self::read(store))
    }

    /// Read settings from an already loaded store
    ///
    /// Missing or unparsable options keep their defaults.
    pub fn read<S: ConfigStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        let scalar = |option: &str| {
            store
                .get(CONFIG_NAME, SECTION_NAME, option)
                .and_then(|v| v.as_scalar().map(str::to_string))
        };

        fn number<T: FromStr>(option: &str, raw: Option<String>, default: T) -> T {
            match raw {
                Some(text) => text.trim().parse().unwrap_or_else(|_| {
                    log::debug!("Ignoring invalid {} '{}'", option, text);
                    default
                }),
                None => default,
            }
        }

        let flag = |option: &str, default: bool| match scalar(option) {
            Some(text) => parse_bool(&text).unwrap_or_else(|| {
                log::debug!("Ignoring invalid {} '{}'", option, text);
                default
            }),
            None => default,
        };

        let path = |option: &str, default: Option<PathBuf>| match scalar(option) {
            Some(text) if text.trim().is_empty() => None,
            Some(text) => Some(PathBuf::from(text.trim())),
            None => default,
        };

        let temp_div = number(options::TEMP_DIV, scalar(options::TEMP_DIV), defaults.temp_div);
        let interval_seconds = number(
            options::INTERVAL,
            scalar(options::INTERVAL),
            defaults.interval_seconds,
        );

        Self {
            enabled: flag(options::ENABLED, defaults.enabled),
            thermal_file: path(options::THERMAL_FILE, defaults.thermal_file),
            fan_file: path(options::FAN_FILE, defaults.fan_file),
            temp_div: if temp_div == 0 { defaults.temp_div } else { temp_div },
            curve: codec::decode_or_default(Self::stored_curve(store).as_ref()),
            interval_seconds: interval_seconds.clamp(1, MAX_INTERVAL_SECONDS),
            hysteresis: number(
                options::HYSTERESIS,
                scalar(options::HYSTERESIS),
                defaults.hysteresis,
            ),
            min_write_delta: number(
                options::MIN_WRITE_DELTA,
                scalar(options::MIN_WRITE_DELTA),
                defaults.min_write_delta,
            ),
            debug: flag(options::DEBUG, defaults.debug),
        }
    }

    /// The stored curve value, preferring `curve_data` over the legacy list
    pub fn stored_curve<S: ConfigStore + ?Sized>(store: &S) -> Option<PersistedCurve> {
        if let Some(value) = store.get(CONFIG_NAME, SECTION_NAME, options::CURVE_DATA) {
            return Some(match value {
                UciValue::Scalar(s) => PersistedCurve::Scalar(s),
                UciValue::List(items) => PersistedCurve::Scalar(items.join(",")),
            });
        }

        store
            .get(CONFIG_NAME, SECTION_NAME, options::CURVE_POINT)
            .map(|value| {
                log::debug!("Reading curve from legacy '{}' list", options::CURVE_POINT);
                match value {
                    UciValue::List(items) => PersistedCurve::List(items),
                    UciValue::Scalar(s) => PersistedCurve::List(vec![s]),
                }
            })
    }

    /// Whether the section still carries the legacy list option
    pub fn has_legacy_curve<S: ConfigStore + ?Sized>(store: &S) -> bool {
        store
            .get(CONFIG_NAME, SECTION_NAME, options::CURVE_POINT)
            .is_some()
    }

    /// Write every option and commit
    ///
    /// The curve is written in the canonical pair form and the legacy list
    /// option is removed.
    pub fn save<S: ConfigStore + ?Sized>(&self, store: &mut S) -> Result<(), ConfigError> {
        store.ensure_section(CONFIG_NAME, SECTION_NAME, SECTION_TYPE)?;

        let curve = match codec::encode(&self.curve, CurveEncoding::Pairs) {
            PersistedCurve::Scalar(s) => s,
            PersistedCurve::List(items) => items.join(","),
        };

        let values = [
            (options::ENABLED, bool_value(self.enabled)),
            (options::THERMAL_FILE, path_value(&self.thermal_file)),
            (options::FAN_FILE, path_value(&self.fan_file)),
            (options::TEMP_DIV, UciValue::Scalar(self.temp_div.to_string())),
            (options::CURVE_DATA, UciValue::Scalar(curve)),
            (
                options::INTERVAL,
                UciValue::Scalar(self.interval_seconds.to_string()),
            ),
            (
                options::HYSTERESIS,
                UciValue::Scalar(self.hysteresis.to_string()),
            ),
            (
                options::MIN_WRITE_DELTA,
                UciValue::Scalar(self.min_write_delta.to_string()),
            ),
            (options::DEBUG, bool_value(self.debug)),
        ];
        for (option, value) in values {
            store.set(CONFIG_NAME, SECTION_NAME, option, value)?;
        }
        store.delete(CONFIG_NAME, SECTION_NAME, options::CURVE_POINT)?;

        store.commit(CONFIG_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Curve;
    use crate::uci::UciStore;
    use tempfile::TempDir;

    fn store_with(content: &str) -> (TempDir, UciStore) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_NAME), content).unwrap();
        let store = UciStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_load_full_section() {
        let (_dir, mut store) = store_with(
            "config fancontrol 'settings'\n\
             \toption enabled '1'\n\
             \toption thermal_file '/tmp/temp'\n\
             \toption fan_file '/tmp/pwm'\n\
             \toption temp_div '1'\n\
             \toption curve_data '30:10,70:200'\n",
        );
        let s = FanControlSettings::load(&mut store).unwrap();
        assert!(s.enabled);
        assert_eq!(s.thermal_file, Some(PathBuf::from("/tmp/temp")));
        assert_eq!(s.fan_file, Some(PathBuf::from("/tmp/pwm")));
        assert_eq!(s.temp_div, 1);
        assert_eq!(s.curve.to_string(), "30:10,70:200");
        assert_eq!(s.interval_seconds, 3);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let (_dir, mut store) = store_with(
            "config fancontrol 'settings'\n\
             \toption enabled 'maybe'\n\
             \toption temp_div 'zero'\n\
             \toption interval '0'\n\
             \toption curve_data 'garbage'\n\
             \toption fan_file ''\n",
        );
        let s = FanControlSettings::load(&mut store).unwrap();
        assert!(!s.enabled);
        assert_eq!(s.temp_div, 1000);
        assert_eq!(s.interval_seconds, 1);
        assert_eq!(s.curve, Curve::default_curve());
        assert_eq!(s.fan_file, None);
    }

    #[test]
    fn test_oversized_interval_is_capped() {
        let (_dir, mut store) = store_with(
            "config fancontrol 'settings'\n\
             \toption interval '18446744073709551615'\n",
        );
        let s = FanControlSettings::load(&mut store).unwrap();
        assert_eq!(s.interval_seconds, MAX_INTERVAL_SECONDS);
    }

    #[test]
    fn test_legacy_list_is_read_and_removed_on_save() {
        let (dir, mut store) = store_with(
            "config fancontrol 'settings'\n\
             \tlist curve_point '30 0'\n\
             \tlist curve_point '70 200'\n",
        );
        let s = FanControlSettings::load(&mut store).unwrap();
        assert!(FanControlSettings::has_legacy_curve(&store));
        assert_eq!(s.curve.to_string(), "30:0,70:200");

        s.save(&mut store).unwrap();
        let written = std::fs::read_to_string(dir.path().join(CONFIG_NAME)).unwrap();
        assert!(!written.contains("curve_point"));
        assert!(written.contains("option curve_data '30:0,70:200'"));
    }

    #[test]
    fn test_curve_data_wins_over_legacy() {
        let (_dir, mut store) = store_with(
            "config fancontrol 'settings'\n\
             \toption curve_data '40:0,80:255'\n\
             \tlist curve_point '30 0'\n\
             \tlist curve_point '70 200'\n",
        );
        let s = FanControlSettings::load(&mut store).unwrap();
        assert_eq!(s.curve.to_string(), "40:0,80:255");
    }

    #[test]
    fn test_save_creates_section_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = UciStore::new(dir.path());
        let mut settings = FanControlSettings::load(&mut store).unwrap();
        assert_eq!(settings, FanControlSettings::default());

        settings.enabled = true;
        settings.thermal_file = None;
        settings.save(&mut store).unwrap();

        let mut fresh = UciStore::new(dir.path());
        let reloaded = FanControlSettings::load(&mut fresh).unwrap();
        assert_eq!(reloaded, settings);
    }
}
