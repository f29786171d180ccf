//! Driver shared by the `stepstar` binary.
//!
//! Plays the part of the interactive shell around the engine: it sets the
//! board up from command-line flags, calls `step` on a fixed cadence, then
//! reveals the found route one cell per tick, printing a frame each time.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use rand::{RngExt, SeedableRng};
use stepstar_core::{GridModel, Layout, Metric, Point};
use stepstar_engine::{Engine, EngineConfig, Error, RevealTick, StepOutcome};

/// Built-in wall arrangements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// No walls.
    Open,
    /// A vertical wall through the middle with a gap on the last row.
    Wall,
    /// End boxed in on every side.
    Enclosed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    Manhattan,
    Chebyshev,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Manhattan => Metric::Manhattan,
            MetricArg::Chebyshev => Metric::Chebyshev,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "stepstar")]
#[command(about = "Watch A* search a grid one expansion at a time")]
pub struct Args {
    /// Board width in cells.
    #[arg(long, default_value_t = 13)]
    pub width: i32,

    /// Board height in cells.
    #[arg(long, default_value_t = 13)]
    pub height: i32,

    /// Start cell as `x,y`.
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    pub start: Point,

    /// End cell as `x,y`.
    #[arg(long, value_parser = parse_point, default_value = "10,0")]
    pub end: Point,

    /// Step cost and heuristic.
    #[arg(long, value_enum, default_value_t = MetricArg::Manhattan)]
    pub metric: MetricArg,

    /// Wall arrangement to start from.
    #[arg(long, value_enum, default_value_t = Preset::Open)]
    pub preset: Preset,

    /// Extra walls, each `x,y`.
    #[arg(long, value_parser = parse_point, num_args = 1..)]
    pub walls: Vec<Point>,

    /// Probability in [0, 1] that an Unexplored cell becomes a wall.
    #[arg(long, default_value_t = 0.0)]
    pub scatter: f64,

    /// Seed for `--scatter`.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Pause between steps and between reveal ticks.
    #[arg(long = "cadence-ms", default_value_t = 50)]
    pub cadence_ms: u64,

    /// Give up after this many steps.
    #[arg(long = "max-steps", default_value_t = 10_000)]
    pub max_steps: usize,

    /// Print only the final frame.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }
}

/// Parse `x,y` into a [`Point`].
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

/// Wall cells of `preset` on `grid`. May include marker cells, which
/// `set_wall` leaves alone.
pub fn preset_walls(preset: Preset, grid: &GridModel) -> Vec<Point> {
    match preset {
        Preset::Open => Vec::new(),
        Preset::Wall => {
            let x = grid.width() / 2;
            (0..grid.height() - 1).map(|y| Point::new(x, y)).collect()
        }
        Preset::Enclosed => grid
            .end()
            .neighbors_8()
            .into_iter()
            .filter(|&p| grid.contains(p))
            .collect(),
    }
}

/// Turn each Unexplored cell into a wall with probability `density`.
/// Returns the number of walls placed.
pub fn scatter_walls(engine: &mut Engine, density: f64, seed: u64) -> Result<usize, Error> {
    let density = density.clamp(0.0, 1.0);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut placed = 0;
    for p in engine.grid().bounds() {
        let r: f64 = rng.random();
        if r < density && engine.set_wall(p)? {
            placed += 1;
        }
    }
    Ok(placed)
}

/// Build the board described by `args`.
pub fn build_engine(args: &Args) -> Result<Engine, Error> {
    let mut engine = Engine::new(EngineConfig {
        width: args.width,
        height: args.height,
        start: args.start,
        end: args.end,
        metric: args.metric.into(),
    })?;
    for p in preset_walls(args.preset, engine.grid()) {
        engine.set_wall(p)?;
    }
    for &p in &args.walls {
        engine.set_wall(p)?;
    }
    if args.scatter > 0.0 {
        let n = scatter_walls(&mut engine, args.scatter, args.seed)?;
        log::info!("scattered {n} walls (seed {})", args.seed);
    }
    Ok(engine)
}

/// Paced run loop that writes ASCII frames to `out`.
pub struct Runner<W: Write> {
    out: W,
    cadence: Duration,
    quiet: bool,
    max_steps: usize,
}

impl<W: Write> Runner<W> {
    pub fn new(out: W, cadence: Duration, quiet: bool, max_steps: usize) -> Self {
        Self {
            out,
            cadence,
            quiet,
            max_steps,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Step until a terminal outcome or the step limit, then reveal the
    /// route if one was found.
    pub fn run(&mut self, engine: &mut Engine) -> io::Result<StepOutcome> {
        let mut outcome = StepOutcome::Continuing;
        let mut taken = 0;
        while outcome == StepOutcome::Continuing && taken < self.max_steps {
            outcome = engine.step();
            taken += 1;
            self.tick(engine, &format!("step {taken}"))?;
        }

        if outcome == StepOutcome::GoalFound {
            let mut reveal = engine.reveal().map_err(io::Error::other)?;
            while let RevealTick::Revealed(p) = engine.reveal_tick(&mut reveal) {
                self.tick(engine, &format!("reveal {p}"))?;
            }
        }

        let stats = engine.stats();
        let summary = match outcome {
            StepOutcome::GoalFound => {
                let len = engine.path().map_or(0, |p| p.len());
                format!("goal found: path of {len} cells, {} expansions", stats.expansions)
            }
            StepOutcome::NoPathExists => {
                format!("no path exists: {} expansions", stats.expansions)
            }
            StepOutcome::Continuing => format!("stopped after {taken} steps"),
        };
        log::info!(
            "{summary} (opened {}, improved {})",
            stats.opened,
            stats.improved
        );
        self.frame(engine, &summary)?;
        self.out.flush()?;
        Ok(outcome)
    }

    fn tick(&mut self, engine: &Engine, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.frame(engine, title)?;
        self.out.flush()?;
        if !self.cadence.is_zero() {
            thread::sleep(self.cadence);
        }
        Ok(())
    }

    fn frame(&mut self, engine: &Engine, title: &str) -> io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", Layout::render(engine.grid()))?;
        writeln!(self.out)
    }
}
