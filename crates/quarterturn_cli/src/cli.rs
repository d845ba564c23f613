use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use itertools::Itertools;
use quarterturn::quartermath::Float;
use quarterturn::{Axis, Duration, Instant, Piece, Preferences, PuzzleState, Selection, Tick};
use rand::Rng;
use serde::Serialize;

/// Quarter-turn puzzle engine command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to load.
    ///
    /// If omitted, the user preferences file is loaded if it exists.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Scramble a puzzle and print its pieces as JSON.
    Scramble {
        /// Number of layers along each axis.
        #[arg(short, long)]
        size: Option<u32>,
        /// Number of random layer turns.
        #[arg(short, long)]
        moves: Option<usize>,
        /// Random seed, for reproducible scrambles.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Turn one layer of a solved puzzle frame by frame and print the
    /// animation as JSON.
    Animate {
        /// Number of layers along each axis.
        #[arg(short, long)]
        size: Option<u32>,
        /// Axis to turn around (`x`, `y`, or `z`).
        #[arg(short, long, default_value = "x")]
        axis: Axis,
        /// Layer to turn; negative numbers count from the end.
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        layer: isize,
        /// Number of quarter turns to queue.
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=MAX_ANIMATE_TURNS))]
        turns: u32,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
        fps: u32,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Print the path of the user preferences file instead.
        #[arg(long)]
        path: bool,
    },
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let mut prefs = load_prefs(args.prefs.as_deref())?;

    match args.subcommand {
        Subcommand::Scramble { size, moves, seed } => {
            if let Some(size) = size {
                prefs.lattice_size = size;
            }
            let moves = moves.unwrap_or(prefs.scramble_length);
            let seed = seed.unwrap_or_else(|| rand::rng().random());

            let mut puzzle = PuzzleState::with_prefs(&prefs)?;
            puzzle.scramble_seeded(moves, seed);

            write_json_output(&ScrambleOutput {
                size: puzzle.size(),
                moves,
                seed,
                solved: puzzle.is_solved(),
                pieces: puzzle.pieces(),
            })
        }

        Subcommand::Animate {
            size,
            axis,
            layer,
            turns,
            fps,
        } => {
            if let Some(size) = size {
                prefs.lattice_size = size;
            }
            let mut puzzle = PuzzleState::with_prefs(&prefs)?;
            puzzle.set_axis(axis);
            puzzle.set_layer(layer);

            let start = Instant::now();
            for _ in 0..turns {
                puzzle.enqueue_turn(start);
            }
            let active_pieces = puzzle.active_pieces().count();

            let frames = simulate_frames(&mut puzzle, start, fps)?;

            write_json_output(&AnimateOutput {
                selection: puzzle.selection(),
                quarter_turns: turns,
                active_pieces,
                frames,
                moved_pieces: puzzle
                    .pieces()
                    .iter()
                    .filter(|p| p.coords() != p.home())
                    .map(|p| p.home())
                    .collect_vec(),
                solved: puzzle.is_solved(),
            })
        }

        Subcommand::Prefs { path } => {
            if path {
                println!("{}", Preferences::user_prefs_path()?.display());
            } else {
                print!("{}", serde_norway::to_string(&prefs)?);
            }
            Ok(())
        }
    }
}

/// Maximum number of quarter turns that `animate` can queue.
const MAX_ANIMATE_TURNS: i64 = 1024;
/// Maximum number of frames that `animate` will record.
const MAX_ANIMATE_FRAMES: usize = 100_000;

/// Ticks the puzzle at a fixed frame rate, starting at `start`, until the
/// pending turns are committed. Returns every frame of the animation.
fn simulate_frames(puzzle: &mut PuzzleState, start: Instant, fps: u32) -> Result<Vec<Frame>> {
    let frame_time = Duration::from_secs(1) / fps.max(1);
    let mut frames = vec![];
    let mut now = start;
    loop {
        match puzzle.tick_detailed(now) {
            Tick::Idle => break,
            Tick::Animating { angle } => {
                if frames.len() >= MAX_ANIMATE_FRAMES {
                    eyre::bail!(
                        "animation is longer than {MAX_ANIMATE_FRAMES} frames; \
                         use fewer turns, a lower frame rate, or a shorter turn duration"
                    );
                }
                frames.push(Frame {
                    time_ms: (now - start).as_secs_f64() * 1000.0,
                    angle,
                });
            }
            Tick::Committed { quarter_turns } => {
                log::info!("committed {quarter_turns} quarter turn(s) after {} frames", frames.len());
                break;
            }
        }
        now += frame_time;
    }
    Ok(frames)
}

fn load_prefs(path: Option<&Path>) -> Result<Preferences> {
    match path {
        Some(path) => Preferences::load(Some(path))
            .wrap_err_with(|| format!("error loading preferences from {}", path.display())),
        None => {
            let user_path = Preferences::user_prefs_path()
                .inspect_err(|e| log::warn!("{e}"))
                .ok()
                .filter(|p| p.exists());
            Ok(Preferences::load_or_default(user_path.as_deref()))
        }
    }
}

#[derive(Serialize, Debug)]
struct ScrambleOutput<'a> {
    size: u32,
    moves: usize,
    seed: u64,
    solved: bool,
    pieces: &'a [Piece],
}

#[derive(Serialize, Debug)]
struct AnimateOutput {
    selection: Selection,
    quarter_turns: u32,
    active_pieces: usize,
    frames: Vec<Frame>,
    moved_pieces: Vec<[u32; 3]>,
    solved: bool,
}

#[derive(Serialize, Debug)]
struct Frame {
    time_ms: f64,
    angle: Float,
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
