//! Fan control loop
//!
//! Every interval: read the temperature and the current PWM level, look the
//! temperature up on the curve, and write the result if it differs enough
//! from what the fan is already doing. On shutdown the fan is switched off.

use crate::config::FanControlSettings;
use crate::domain::Curve;
use crate::error::{AppError, StatusError};
use crate::services::FanDevice;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How often a sleeping loop checks for shutdown
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Configuration for the controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Interval between control ticks
    pub interval: Duration,
    /// Whether to exit after one tick
    pub single_use: bool,
    /// Log instead of writing
    pub dry_run: bool,
    /// Degrees below the first active point the fan keeps spinning
    pub hysteresis: i32,
    /// Smallest PWM change worth writing
    pub min_write_delta: i32,
    /// Log every tick at info level
    pub debug: bool,
    /// Whether to keep going after a failed tick
    pub retry: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            single_use: false,
            dry_run: false,
            hysteresis: 3,
            min_write_delta: 2,
            debug: false,
            retry: true,
        }
    }
}

impl ControllerConfig {
    /// Take interval, hysteresis and write threshold from the settings
    pub fn from_settings(settings: &FanControlSettings) -> Self {
        Self {
            interval: Duration::from_secs(settings.interval_seconds.max(1)),
            hysteresis: settings.hysteresis,
            min_write_delta: settings.min_write_delta,
            debug: settings.debug,
            ..Self::default()
        }
    }
}

/// Result of one control tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Temperature unreadable or not above zero
    Skipped,
    /// Target close enough to the current level
    Held { temperature: i32, target: u8, current: i64 },
    /// New level applied (or logged in dry-run mode)
    Written {
        temperature: i32,
        target: u8,
        current: i64,
        dry_run: bool,
    },
}

/// PWM level for a temperature, given what the fan is doing now
///
/// A running fan is kept at the lowest active level while the temperature
/// is within `hysteresis` degrees of the first active point, instead of
/// stopping as soon as the curve says zero. A curve with no active point
/// has no level to hold, so its target is used as-is rather than a fixed
/// fallback level.
pub fn target_pwm(curve: &Curve, temperature: i32, current: i64, hysteresis: i32) -> u8 {
    let target = curve.speed_for_temperature(temperature);
    if current > 0 && target == 0 {
        if let Some(first) = curve.first_active() {
            if temperature >= first.temperature - hysteresis {
                return first.speed;
            }
        }
    }
    target
}

/// Whether a target is worth writing
///
/// Small adjustments are skipped; switching the fan on or off always
/// counts.
pub fn should_write(target: u8, current: i64, min_delta: i32) -> bool {
    let target = i64::from(target);
    (target - current).abs() > i64::from(min_delta) || ((target == 0) != (current == 0))
}

/// Curve-driven fan controller
pub struct Controller {
    curve: Curve,
    config: ControllerConfig,
}

impl Controller {
    /// Create a controller for a curve
    pub fn new(curve: Curve, config: ControllerConfig) -> Self {
        Self { curve, config }
    }

    /// Execute a single control tick
    pub fn tick<D: FanDevice + ?Sized>(&self, device: &mut D) -> Result<TickOutcome, AppError> {
        let temperature = match device.temperature() {
            Ok(t) if t > 0 => t,
            Ok(t) => {
                log::debug!("Ignoring temperature reading {}°C", t);
                return Ok(TickOutcome::Skipped);
            }
            Err(e) => {
                log::warn!("{}", e);
                return Ok(TickOutcome::Skipped);
            }
        };

        let current = device.pwm().unwrap_or_else(|e| {
            log::debug!("Treating fan as stopped: {}", e);
            0
        });

        let target = target_pwm(&self.curve, temperature, current, self.config.hysteresis);

        if self.config.debug {
            log::info!(
                "Temp: {}°C, Target: {}, Current: {}",
                temperature,
                target,
                current
            );
        }

        if !should_write(target, current, self.config.min_write_delta) {
            return Ok(TickOutcome::Held {
                temperature,
                target,
                current,
            });
        }

        if self.config.dry_run {
            log::info!("[DRY RUN] Would set fan PWM to {} at {}°C", target, temperature);
        } else {
            device.set_pwm(target)?;
            log::debug!("Set fan PWM {} -> {} at {}°C", current, target, temperature);
        }

        Ok(TickOutcome::Written {
            temperature,
            target,
            current,
            dry_run: self.config.dry_run,
        })
    }

    /// Run until `running` is cleared, then switch the fan off
    pub fn run<D: FanDevice + ?Sized>(
        &self,
        device: &mut D,
        running: &AtomicBool,
    ) -> Result<(), AppError> {
        while running.load(Ordering::SeqCst) {
            if let Err(e) = self.tick(device) {
                log::error!("Control tick failed: {}", e);
                if !self.config.retry {
                    return Err(e);
                }
            }

            if self.config.single_use {
                log::info!("Single-use mode: exiting after one tick");
                return Ok(());
            }

            self.sleep(running);
        }

        self.shutdown(device)?;
        Ok(())
    }

    /// Switch the fan off
    pub fn shutdown<D: FanDevice + ?Sized>(&self, device: &mut D) -> Result<(), StatusError> {
        if self.config.dry_run {
            log::info!("[DRY RUN] Would switch fan off");
            return Ok(());
        }
        log::info!("Switching fan off");
        device.set_pwm(0)
    }

    fn sleep(&self, running: &AtomicBool) {
        // An interval past what Instant can represent waits for shutdown only
        let deadline = Instant::now().checked_add(self.config.interval);
        while running.load(Ordering::SeqCst) {
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    SHUTDOWN_POLL.min(deadline - now)
                }
                None => SHUTDOWN_POLL,
            };
            std::thread::sleep(pause);
        }
    }

    /// The curve being followed
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Get the controller configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}
