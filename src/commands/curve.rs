//! Curve command implementation
//!
//! Shows and edits the stored curve. Edits go through the same paths the
//! editor uses: strict parsing for typed values, a drag session for
//! pointer positions.

use crate::cli::args::{CurveArgs, CurveCommands, OutputFormat};
use crate::cli::output::{print_output, CurveReport, DragReport, EvalReport, Message};
use crate::commands::persist;
use crate::config::FanControlSettings;
use crate::domain::{parse_point, parse_strict, CurveEncoding, PersistedCurve};
use crate::editor::{DragSession, NoCapture, PixelPoint, Surface, Viewport};
use crate::error::Result;
use crate::uci::{ConfigStore, UciStore};

use std::path::Path;

/// What a curve command produced
#[derive(Debug)]
pub enum CurveOutcome {
    Curve(CurveReport),
    Drag(DragReport),
    Eval(EvalReport),
    Message(Message),
}

/// Execute the curve command
pub fn run_curve(
    args: &CurveArgs,
    format: OutputFormat,
    config_dir: &Path,
    dry_run: bool,
) -> Result<()> {
    let mut store = UciStore::new(config_dir);
    match execute(&args.command, &mut store, dry_run)? {
        CurveOutcome::Curve(report) => print_output(&report, format)?,
        CurveOutcome::Drag(report) => print_output(&report, format)?,
        CurveOutcome::Eval(report) => print_output(&report, format)?,
        CurveOutcome::Message(msg) => print_output(&msg, format)?,
    }
    Ok(())
}

/// Run a curve subcommand against a store
pub fn execute<S: ConfigStore + ?Sized>(
    command: &CurveCommands,
    store: &mut S,
    dry_run: bool,
) -> Result<CurveOutcome> {
    let mut settings = FanControlSettings::load(store)?;

    match command {
        CurveCommands::Show => {
            if FanControlSettings::has_legacy_curve(&*store) {
                log::info!("Legacy curve_point list present; 'fancontrol curve migrate' rewrites it");
            }
            Ok(CurveOutcome::Curve(CurveReport::from(&settings.curve)))
        }

        CurveCommands::Set { value } => {
            settings.curve = parse_strict(value)?;
            persist(store, &settings, dry_run)?;
            Ok(CurveOutcome::Curve(CurveReport::from(&settings.curve)))
        }

        CurveCommands::Drag {
            index,
            x,
            y,
            rendered,
        } => {
            let surface = Surface::default();
            let viewport = match rendered {
                Some((w, h)) => Viewport::new(surface, *w, *h),
                None => Viewport::unscaled(surface),
            };
            let pointer = PixelPoint::new(*x, *y);
            let requested = viewport.to_domain(pointer);

            let mut session = DragSession::begin(&mut settings.curve, *index, viewport, NoCapture)?;
            let applied = session.pointer_move(pointer)?;
            let curve_data = match session.finish(CurveEncoding::Pairs) {
                PersistedCurve::Scalar(s) => s,
                PersistedCurve::List(items) => items.join(","),
            };

            persist(store, &settings, dry_run)?;
            Ok(CurveOutcome::Drag(DragReport {
                index: *index,
                requested,
                applied,
                curve_data,
            }))
        }

        CurveCommands::Add { point } => {
            let point = parse_point(point)?;
            let index = settings.curve.insert_point(point)?;
            log::debug!("Inserted {} at index {}", point, index);
            persist(store, &settings, dry_run)?;
            Ok(CurveOutcome::Curve(CurveReport::from(&settings.curve)))
        }

        CurveCommands::Remove { index } => {
            let removed = settings.curve.remove_point(*index)?;
            log::debug!("Removed {}", removed);
            persist(store, &settings, dry_run)?;
            Ok(CurveOutcome::Curve(CurveReport::from(&settings.curve)))
        }

        CurveCommands::Migrate => {
            if !FanControlSettings::has_legacy_curve(&*store) {
                return Ok(CurveOutcome::Message(Message::ok(
                    "No legacy curve_point list to migrate",
                )));
            }
            persist(store, &settings, dry_run)?;
            Ok(CurveOutcome::Message(Message::ok(format!(
                "Migrated curve_point to curve_data '{}'",
                settings.curve
            ))))
        }

        CurveCommands::Eval { temperature } => Ok(CurveOutcome::Eval(EvalReport {
            temperature: *temperature,
            pwm: settings.curve.speed_for_temperature(*temperature),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CONFIG_NAME, SECTION_NAME};
    use crate::domain::ControlPoint;
    use crate::error::{AppError, DomainError};
    use crate::mock::MemoryStore;
    use crate::uci::UciValue;

    fn store(curve: &str) -> MemoryStore {
        MemoryStore::new()
            .with_config(
                CONFIG_NAME,
                &format!("config fancontrol 'settings'\n\toption curve_data '{}'\n", curve),
            )
            .unwrap()
    }

    fn stored_curve(store: &MemoryStore) -> Option<UciValue> {
        store
            .committed(CONFIG_NAME)
            .and_then(|doc| doc.get(SECTION_NAME, "curve_data").cloned())
    }

    #[test]
    fn test_drag_clamps_against_neighbour_and_saves() {
        let mut store = store("35:0,45:36,60:90");
        let target = Surface::default().to_pixel(ControlPoint::new(70, 36).unwrap());
        let command = CurveCommands::Drag {
            index: 1,
            x: target.x,
            y: target.y,
            rendered: None,
        };

        let CurveOutcome::Drag(report) = execute(&command, &mut store, false).unwrap() else {
            panic!("Expected drag outcome");
        };
        assert_eq!(report.requested.temperature, 70);
        assert_eq!(report.applied, ControlPoint::new(59, 36).unwrap());
        assert_eq!(
            stored_curve(&store),
            Some(UciValue::Scalar("35:0,59:36,60:90".to_string()))
        );
    }

    #[test]
    fn test_drag_on_half_size_surface() {
        let mut store = store("35:0,85:255");
        let full = Surface::default().to_pixel(ControlPoint::new(50, 100).unwrap());
        let command = CurveCommands::Drag {
            index: 0,
            x: full.x / 2.0,
            y: full.y / 2.0,
            rendered: Some((300.0, 150.0)),
        };

        let CurveOutcome::Drag(report) = execute(&command, &mut store, false).unwrap() else {
            panic!("Expected drag outcome");
        };
        assert_eq!(report.applied, ControlPoint::new(50, 100).unwrap());
    }

    #[test]
    fn test_dry_run_does_not_commit() {
        let mut store = store("35:0,85:255");
        let command = CurveCommands::Set {
            value: "30:0,90:255".to_string(),
        };
        execute(&command, &mut store, true).unwrap();
        assert_eq!(store.commit_count(), 0);
    }

    #[test]
    fn test_set_rejects_bad_text() {
        let mut store = store("35:0,85:255");
        let command = CurveCommands::Set {
            value: "35:0,abc".to_string(),
        };
        let err = execute(&command, &mut store, false).unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::InvalidToken(ref t)) if t == "abc"
        ));
        assert_eq!(store.commit_count(), 0);
    }

    #[test]
    fn test_add_and_remove() {
        let mut store = store("35:0,85:255");
        execute(
            &CurveCommands::Add {
                point: "60:90".to_string(),
            },
            &mut store,
            false,
        )
        .unwrap();
        assert_eq!(
            stored_curve(&store),
            Some(UciValue::Scalar("35:0,60:90,85:255".to_string()))
        );

        execute(&CurveCommands::Remove { index: 0 }, &mut store, false).unwrap();
        assert_eq!(
            stored_curve(&store),
            Some(UciValue::Scalar("60:90,85:255".to_string()))
        );

        let err = execute(&CurveCommands::Remove { index: 0 }, &mut store, false).unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::TooFewPoints(1))));
    }

    #[test]
    fn test_migrate_legacy_list() {
        let mut store = MemoryStore::new()
            .with_config(
                CONFIG_NAME,
                "config fancontrol 'settings'\n\tlist curve_point '30 0'\n\tlist curve_point '80 255'\n",
            )
            .unwrap();
        let outcome = execute(&CurveCommands::Migrate, &mut store, false).unwrap();
        assert!(matches!(outcome, CurveOutcome::Message(ref m) if m.success));

        let doc = store.committed(CONFIG_NAME).unwrap();
        assert_eq!(doc.get(SECTION_NAME, "curve_point"), None);
        assert_eq!(
            doc.get(SECTION_NAME, "curve_data"),
            Some(&UciValue::Scalar("30:0,80:255".to_string()))
        );

        // Nothing left to do the second time
        execute(&CurveCommands::Migrate, &mut store, false).unwrap();
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn test_eval() {
        let mut store = store("35:0,45:36,60:90,85:255");
        let CurveOutcome::Eval(report) =
            execute(&CurveCommands::Eval { temperature: 50 }, &mut store, false).unwrap()
        else {
            panic!("Expected eval outcome");
        };
        assert_eq!(report.pwm, 54);
    }
}
