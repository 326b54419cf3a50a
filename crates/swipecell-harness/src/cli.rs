#![forbid(unsafe_code)]

//! Command-line replay of a single scripted swipe.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use swipecell_core::{Color, Result, SwipeCell, SwipeConfig, SwipeError, SwipeMode, SwipeState};
use tracing::info;

use crate::driver::AnimationDriver;
use crate::recording_host::RecordingHost;
use crate::script::GestureScript;

#[derive(Debug, Parser)]
#[command(
    name = "swipecell-harness",
    about = "Replay a scripted swipe against a recording host and print the host command log as JSONL",
    version
)]
pub struct Cli {
    /// Row width in pixels.
    #[arg(long, default_value_t = 320.0)]
    pub width: f64,

    /// Row height in pixels.
    #[arg(long, default_value_t = 44.0)]
    pub height: f64,

    /// Total horizontal drag in pixels (negative drags left).
    #[arg(long, allow_hyphen_values = true)]
    pub drag: f64,

    /// Number of movement samples the drag is split into.
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub steps: u16,

    /// Horizontal velocity at release, in pixels per second.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub velocity: f64,

    /// TOML file with cell tunables.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Slot layout to install before the swipe.
    #[arg(long, value_enum, default_value_t = Preset::Mixed)]
    pub preset: Preset,

    /// Deliver the gesture even if the cell would refuse to begin.
    #[arg(long)]
    pub force: bool,
}

/// Slot layouts taken from a typical list of swipeable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Check/cross on the right (cross exits), clock/list on the left.
    Mixed,
    /// All four slots spring back.
    Switch,
    /// Only rightward slots; State2 exits.
    ExitRight,
}

type CompletionLog = Rc<RefCell<Vec<CompletionRecord>>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRecord {
    pub state: String,
    pub mode: String,
}

/// Final line of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub recognized: bool,
    pub completions: Vec<CompletionRecord>,
    pub animations: usize,
    pub final_offset: Option<f64>,
    pub exited: bool,
    pub row_removals: usize,
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    summary: &'a ReplayReport,
}

impl Preset {
    /// Install this layout on `cell`, logging every completion into `log`.
    pub fn install(self, cell: &mut SwipeCell<RecordingHost>, log: &CompletionLog) {
        let slots: &[(SwipeState, &str, Color, SwipeMode)] = match self {
            Self::Mixed => &[
                (SwipeState::State1, "check", Color::GREEN, SwipeMode::Switch),
                (SwipeState::State2, "cross", Color::RED, SwipeMode::Exit),
                (SwipeState::State3, "clock", Color::YELLOW, SwipeMode::Switch),
                (SwipeState::State4, "list", Color::BROWN, SwipeMode::Switch),
            ],
            Self::Switch => &[
                (SwipeState::State1, "check", Color::GREEN, SwipeMode::Switch),
                (SwipeState::State2, "cross", Color::RED, SwipeMode::Switch),
                (SwipeState::State3, "clock", Color::YELLOW, SwipeMode::Switch),
                (SwipeState::State4, "list", Color::BROWN, SwipeMode::Switch),
            ],
            Self::ExitRight => &[
                (SwipeState::State1, "check", Color::GREEN, SwipeMode::Switch),
                (SwipeState::State2, "cross", Color::RED, SwipeMode::Exit),
            ],
        };
        for &(state, view, color, mode) in slots {
            let log = Rc::clone(log);
            cell.set_swipe_gesture(
                view.to_string(),
                color,
                mode,
                state,
                move |_: &mut SwipeCell<RecordingHost>, state, mode| {
                    log.borrow_mut().push(CompletionRecord {
                        state: format!("{state:?}"),
                        mode: format!("{mode:?}"),
                    });
                },
            );
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(&cli, stdout.lock())?;
    Ok(())
}

/// Replay the swipe described by `cli`, writing JSONL to `out`.
pub fn run<W: Write>(cli: &Cli, mut out: W) -> Result<ReplayReport> {
    let config = match &cli.config {
        Some(path) => SwipeConfig::from_toml_file(path)?.checked()?,
        None => SwipeConfig::default(),
    };

    let host = RecordingHost::new(cli.width, cli.height);
    let mut cell = SwipeCell::with_config(host, config);
    let log = CompletionLog::default();
    cli.preset.install(&mut cell, &log);

    let script = GestureScript::swipe(cli.drag, usize::from(cli.steps), cli.velocity);
    let recognized = if cli.force {
        script.force(&mut cell);
        true
    } else {
        script.play(&mut cell)
    };
    info!(
        message = "harness.replay",
        drag = cli.drag,
        velocity = cli.velocity,
        preset = ?cli.preset,
        recognized
    );

    let playbacks = AnimationDriver::default().settle(&mut cell);
    cell.host().write_jsonl(&mut out)?;

    let report = ReplayReport {
        recognized,
        completions: log.borrow().clone(),
        animations: playbacks.len(),
        final_offset: cell.host().overlay().map(|o| o.snapshot_offset),
        exited: cell.is_exited(),
        row_removals: cell.host().row_removals(),
    };
    serde_json::to_writer(&mut out, &SummaryLine { summary: &report })
        .map_err(SwipeError::ConfigJson)?;
    out.write_all(b"\n")?;
    Ok(report)
}

/// Process exit code for a failed replay.
pub fn exit_code(error: &SwipeError) -> i32 {
    match error {
        SwipeError::InvalidConfig { .. } => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(drag: f64) -> Cli {
        Cli {
            width: 320.0,
            height: 44.0,
            drag,
            steps: 8,
            velocity: 0.0,
            config: None,
            preset: Preset::Mixed,
            force: false,
        }
    }

    #[test]
    fn parses_negative_drag() {
        let parsed = Cli::try_parse_from(["swipecell-harness", "--drag", "-120", "--velocity", "-300"])
            .unwrap();
        assert_eq!(parsed.drag, -120.0);
        assert_eq!(parsed.velocity, -300.0);
        assert_eq!(parsed.preset, Preset::Mixed);
    }

    #[test]
    fn parses_preset_names() {
        let parsed =
            Cli::try_parse_from(["swipecell-harness", "--drag", "10", "--preset", "exit-right"]).unwrap();
        assert_eq!(parsed.preset, Preset::ExitRight);
    }

    #[test]
    fn zero_steps_rejected() {
        assert!(Cli::try_parse_from(["swipecell-harness", "--drag", "10", "--steps", "0"]).is_err());
    }

    #[test]
    fn replay_writes_jsonl_and_summary() {
        let mut out = Vec::new();
        let report = run(&cli(64.0), &mut out).unwrap();
        assert!(report.recognized);
        assert_eq!(report.animations, 1);
        assert_eq!(report.completions.len(), 1);
        assert_eq!(report.completions[0].state, "State1");

        let text = String::from_utf8(out).unwrap();
        let last = text.lines().last().unwrap();
        let summary: serde_json::Value = serde_json::from_str(last).unwrap();
        assert_eq!(summary["summary"]["exited"], false);
        assert!(text.lines().next().unwrap().contains("capture_snapshot"));
    }

    #[test]
    fn bad_config_maps_to_exit_code_two() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "first_trigger = 2.0\n").unwrap();

        let mut args = cli(10.0);
        args.config = Some(path);
        let err = run(&args, Vec::new()).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }
}
