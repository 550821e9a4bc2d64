//! fancontrol - temperature-driven PWM fan control
//!
//! A command-line tool for inspecting and editing the fan curve and for
//! running the control loop against sysfs files.

use clap::Parser;
use fancontrol::cli::args::{generate_completions, Cli, Commands};
use fancontrol::commands::{run_config, run_control, run_curve, run_status};
use fancontrol::error::{AppError, ConfigError, DomainError, StatusError};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Commands::Status(args) => run_status(args, cli.format, &cli.config_dir),

        Commands::Curve(args) => run_curve(args, cli.format, &cli.config_dir, cli.dry_run),

        Commands::Config(args) => run_config(args, cli.format, &cli.config_dir, cli.dry_run),

        Commands::Run(args) => {
            run_control(args, cli.format, &cli.config_dir, cli.dry_run, cli.verbose)
        }

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Disabled { .. } => {
            eprintln!();
            eprintln!("Hint: Enable fan control with 'fancontrol config set --enabled 1'.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Point --config-dir (or FANCONTROL_CONFIG_DIR) at the");
            eprintln!("      directory holding the 'fancontrol' config file.");
        }
        AppError::Status(StatusError::Read { .. } | StatusError::Write { .. }) => {
            eprintln!();
            eprintln!("Hint: Check the thermal_file and fan_file paths.");
            eprintln!("      Writing PWM files usually needs root.");
        }
        AppError::Domain(DomainError::InvalidToken(_)) => {
            eprintln!();
            eprintln!("Hint: Curves are written as 'temp:pwm' pairs, e.g. '35:0,45:36,85:255'.");
        }
        _ => {}
    }
}
