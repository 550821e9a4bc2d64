//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::builder::BoolishValueParser;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Temperature-driven fan control
///
/// Edit the fan curve, inspect live status, and run the control loop.
#[derive(Parser, Debug)]
#[command(name = "fancontrol")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Directory holding UCI config files
    #[arg(
        long,
        global = true,
        env = "FANCONTROL_CONFIG_DIR",
        default_value = "/etc/config"
    )]
    pub config_dir: PathBuf,

    /// Dry run mode - don't write the fan or the config
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show current temperature and fan level
    Status(StatusArgs),

    /// Inspect or edit the fan curve
    Curve(CurveArgs),

    /// Inspect or edit the settings section
    Config(ConfigArgs),

    /// Start the control loop
    Run(RunArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Keep polling until interrupted
    #[arg(short, long)]
    pub watch: bool,

    /// Poll interval in seconds when watching
    #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}

/// Arguments for curve commands
#[derive(Parser, Debug)]
pub struct CurveArgs {
    #[command(subcommand)]
    pub command: CurveCommands,
}

/// Curve subcommands
#[derive(Subcommand, Debug)]
pub enum CurveCommands {
    /// Show the stored curve
    Show,

    /// Replace the curve (format: TEMP:PWM,TEMP:PWM,...)
    Set {
        /// New curve, e.g. 35:0,45:36,60:90,85:255
        value: String,
    },

    /// Drag one point to a position on the editor surface
    Drag {
        /// Index of the point, left to right from 0
        index: usize,

        /// Pointer x position in pixels
        #[arg(allow_negative_numbers = true)]
        x: f32,

        /// Pointer y position in pixels
        #[arg(allow_negative_numbers = true)]
        y: f32,

        /// Size the surface is displayed at, if not its logical 600x300
        #[arg(long, value_name = "WxH", value_parser = parse_size)]
        rendered: Option<(f32, f32)>,
    },

    /// Add a point (format: TEMP:PWM)
    Add {
        /// Point to add, e.g. 70:180
        point: String,
    },

    /// Remove a point
    Remove {
        /// Index of the point, left to right from 0
        index: usize,
    },

    /// Rewrite a legacy curve_point list as curve_data
    Migrate,

    /// Show the PWM level the curve gives at a temperature
    Eval {
        /// Temperature in Celsius
        #[arg(allow_negative_numbers = true)]
        temperature: i32,
    },
}

/// Arguments for config commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all settings
    Show,

    /// Change settings
    Set {
        /// Enable or disable fan control (1/0, yes/no, true/false)
        #[arg(long, value_parser = BoolishValueParser::new())]
        enabled: Option<bool>,

        /// Temperature file; empty to unset
        #[arg(long)]
        thermal_file: Option<PathBuf>,

        /// Fan control file; empty to unset
        #[arg(long)]
        fan_file: Option<PathBuf>,

        /// Raw temperature divisor
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        temp_div: Option<u32>,

        /// Control loop interval in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Log every control tick
        #[arg(long, value_parser = BoolishValueParser::new())]
        debug: Option<bool>,
    },
}

/// Arguments for the control loop command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Control loop interval in seconds (defaults to the stored setting)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Run once and exit (single-use mode)
    #[arg(long)]
    pub single_use: bool,

    /// Stop on the first failed tick instead of retrying
    #[arg(long)]
    pub no_retry: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Parse a `WIDTHxHEIGHT` size
fn parse_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w: f32 = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h: f32 = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    if w <= 0.0 || h <= 0.0 {
        return Err("size must be positive".to_string());
    }
    Ok((w, h))
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_status() {
        let args = Cli::try_parse_from(["fancontrol", "status"]).unwrap();
        if let Commands::Status(status) = args.command {
            assert!(!status.watch);
            assert_eq!(status.interval, 3);
        } else {
            panic!("Expected Status command");
        }
    }

    #[test]
    fn test_cli_parse_verbose_and_config_dir() {
        let args =
            Cli::try_parse_from(["fancontrol", "-v", "--config-dir", "/tmp/uci", "status"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.config_dir, PathBuf::from("/tmp/uci"));
    }

    #[test]
    fn test_cli_parse_curve_drag() {
        let args = Cli::try_parse_from([
            "fancontrol",
            "curve",
            "drag",
            "1",
            "450",
            "-20",
            "--rendered",
            "300x150",
        ])
        .unwrap();

        if let Commands::Curve(CurveArgs {
            command:
                CurveCommands::Drag {
                    index,
                    x,
                    y,
                    rendered,
                },
        }) = args.command
        {
            assert_eq!(index, 1);
            assert_eq!(x, 450.0);
            assert_eq!(y, -20.0);
            assert_eq!(rendered, Some((300.0, 150.0)));
        } else {
            panic!("Expected Curve Drag command");
        }
    }

    #[test]
    fn test_cli_rejects_bad_size() {
        let result = Cli::try_parse_from(["fancontrol", "curve", "drag", "0", "1", "1", "--rendered", "300"]);
        assert!(result.is_err());
        assert!(parse_size("0x10").is_err());
        assert_eq!(parse_size("1200X600"), Ok((1200.0, 600.0)));
    }

    #[test]
    fn test_cli_parse_config_set() {
        let args = Cli::try_parse_from([
            "fancontrol",
            "config",
            "set",
            "--enabled",
            "1",
            "--temp-div",
            "1",
        ])
        .unwrap();

        if let Commands::Config(ConfigArgs {
            command: ConfigCommands::Set {
                enabled, temp_div, ..
            },
        }) = args.command
        {
            assert_eq!(enabled, Some(true));
            assert_eq!(temp_div, Some(1));
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_cli_temp_div_validation() {
        let result = Cli::try_parse_from(["fancontrol", "config", "set", "--temp-div", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_run_args() {
        let args =
            Cli::try_parse_from(["fancontrol", "--dry-run", "run", "--interval", "10", "--single-use"])
                .unwrap();
        assert!(args.dry_run);
        if let Commands::Run(run) = args.command {
            assert_eq!(run.interval, Some(10));
            assert!(run.single_use);
            assert!(!run.no_retry);
        } else {
            panic!("Expected Run command");
        }
    }
}
