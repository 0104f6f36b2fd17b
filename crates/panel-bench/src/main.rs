use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use term_codepad::layout::floating::ResizeEdge;
use term_codepad::window::geometry::min_size;
use term_codepad::window::{FloatRect, FloatingPanel, GestureKind, PanelMetrics, Position, Viewport};

#[derive(Parser, Debug)]
#[command(
    name = "panel-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replays random gestures against the floating panel and checks its invariants"
)]
struct BenchCli {
    /// How long to keep generating gestures.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Seed for the gesture generator. Taken from the clock when omitted.
    #[arg(short = 's', long = "seed", value_name = "SEED")]
    seed: Option<u64>,

    /// Initial viewport width in units.
    #[arg(long = "width", value_name = "UNITS", default_value_t = 1280)]
    width: i32,

    /// Initial viewport height in units.
    #[arg(long = "height", value_name = "UNITS", default_value_t = 800)]
    height: i32,
}

struct BenchConfig {
    duration: Duration,
    seed: u64,
    viewport: Viewport,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.1..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.1 and 600 seconds".to_string());
        }
        if !(200..=10_000).contains(&cli.width) || !(200..=10_000).contains(&cli.height) {
            return Err("viewport sides must be between 200 and 10000 units".to_string());
        }
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            seed: cli.seed.unwrap_or_else(seed_from_clock),
            viewport: Viewport::new(cli.width, cli.height),
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config);
    println!("{}", stats.final_report(&config));

    if stats.violations.is_empty() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "{} invariant violation(s)",
            stats.violations.len()
        )))
    }
}

#[derive(Copy, Clone, Debug)]
enum Op {
    TabClick,
    TabDrag,
    Move,
    Resize,
    Viewport,
    MoveAcrossViewportChange,
    Reset,
    Close,
}

impl Op {
    const ALL: [Op; 8] = [
        Op::TabClick,
        Op::TabDrag,
        Op::Move,
        Op::Resize,
        Op::Viewport,
        Op::MoveAcrossViewportChange,
        Op::Reset,
        Op::Close,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            Op::TabClick => "tab click",
            Op::TabDrag => "tab drag",
            Op::Move => "header move",
            Op::Resize => "edge resize",
            Op::Viewport => "viewport change",
            Op::MoveAcrossViewportChange => "move across viewport change",
            Op::Reset => "reset",
            Op::Close => "close",
        }
    }
}

fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let mut stats = BenchStats::new();
    let mut rng = Rng::new(config.seed);
    let mut panel = FloatingPanel::new(config.viewport);
    let metrics = panel.metrics();

    while stats.elapsed() < config.duration {
        let op = Op::ALL[rng.next() as usize % Op::ALL.len()];
        let before = panel.rect();
        let viewport = panel.viewport();
        apply(&mut panel, op, &mut rng);
        stats.record(op);
        if let Err(message) = check(&panel, op, before, viewport, metrics) {
            stats.violations.push(format!("step {}: {}: {message}", stats.steps, op.label()));
            stats.exit_reason = ExitReason::Violation;
            break;
        }
    }

    stats.mark_completed();
    stats
}

fn apply(panel: &mut FloatingPanel, op: Op, rng: &mut Rng) {
    let viewport = panel.viewport();
    let rect = panel.rect();
    let tab = Position::new(viewport.width / 2, 8);
    match op {
        Op::TabClick => {
            panel.press_tab(tab);
            panel.pointer_move(Position::new(tab.x + rng.range(-40, 40), tab.y + rng.range(-30, 30)));
            panel.pointer_up(true);
        }
        Op::TabDrag => {
            panel.press_tab(tab);
            for _ in 0..rng.range(1, 6) {
                panel.pointer_move(Position::new(tab.x, tab.y + rng.range(-200, 200)));
            }
            panel.pointer_up(rng.next() % 2 == 0);
        }
        Op::Move => {
            let grab = Position::new(rect.x + 30, rect.y + 8);
            if panel.press_header(grab) {
                for _ in 0..rng.range(1, 4) {
                    panel.pointer_move(Position::new(
                        grab.x + rng.range(-3000, 3000),
                        grab.y + rng.range(-2000, 2000),
                    ));
                }
                panel.pointer_up(false);
            }
        }
        Op::Resize => {
            let edge = ResizeEdge::ALL[rng.next() as usize % ResizeEdge::ALL.len()];
            let grab = Position::new(rect.x, rect.y);
            if panel.press_resize(edge, grab) {
                panel.pointer_move(Position::new(
                    grab.x + rng.range(-3000, 3000),
                    grab.y + rng.range(-2000, 2000),
                ));
                panel.pointer_up(false);
            }
        }
        Op::Viewport => {
            panel.set_viewport(random_viewport(rng));
        }
        Op::MoveAcrossViewportChange => {
            let grab = Position::new(rect.x + 30, rect.y + 8);
            if panel.press_header(grab) {
                panel.pointer_move(Position::new(grab.x + rng.range(-500, 500), grab.y));
                panel.set_viewport(random_viewport(rng));
                panel.pointer_move(Position::new(grab.x, grab.y + rng.range(-500, 500)));
                panel.pointer_up(false);
            } else {
                panel.set_viewport(random_viewport(rng));
            }
        }
        Op::Reset => {
            panel.press_reset();
        }
        Op::Close => {
            panel.press_close();
        }
    }
}

fn random_viewport(rng: &mut Rng) -> Viewport {
    Viewport::new(rng.range(320, 2560), rng.range(240, 1600))
}

fn far_edge_ok(origin: i32, extent: i32, viewport: i32, margin: i32) -> bool {
    extent + 2 * margin > viewport || origin + extent <= viewport - margin
}

fn check(
    panel: &FloatingPanel,
    op: Op,
    before: FloatRect,
    before_viewport: Viewport,
    metrics: PanelMetrics,
) -> Result<(), String> {
    let rect = panel.rect();
    let viewport = panel.viewport();

    if panel.gesture() != GestureKind::Idle {
        return Err(format!("gesture {:?} left active", panel.gesture()));
    }
    if panel.global_pointer().listener_count() != 0 {
        return Err(format!(
            "{} pointer listener(s) leaked",
            panel.global_pointer().listener_count()
        ));
    }
    if rect.x < metrics.bounds_margin || rect.y < metrics.bounds_margin {
        return Err(format!("origin ({}, {}) inside the margin", rect.x, rect.y));
    }
    if rect.width <= 0 || rect.height <= 0 {
        return Err(format!("degenerate size {}x{}", rect.width, rect.height));
    }
    if !panel.visible() {
        return Ok(());
    }

    let margin = match op {
        Op::Move => metrics.gesture_margin,
        Op::Viewport | Op::MoveAcrossViewportChange => metrics.bounds_margin,
        _ => return check_resize(op, rect, before, before_viewport, metrics),
    };
    if !far_edge_ok(rect.x, rect.width, viewport.width, margin)
        || !far_edge_ok(rect.y, rect.height, viewport.height, margin)
    {
        return Err(format!(
            "{rect:?} crosses the far edge of {}x{} (margin {margin})",
            viewport.width, viewport.height
        ));
    }
    Ok(())
}

fn check_resize(
    op: Op,
    rect: FloatRect,
    before: FloatRect,
    viewport: Viewport,
    metrics: PanelMetrics,
) -> Result<(), String> {
    if !matches!(op, Op::Resize) || rect == before {
        return Ok(());
    }
    let margin = metrics.gesture_margin;
    let min = min_size(viewport);
    let width_ok = rect.width >= min.width
        || rect.right() == viewport.width - margin
        || rect.x == margin;
    let height_ok = rect.height >= min.height
        || rect.bottom() == viewport.height - margin
        || rect.y == margin;
    if rect.width != before.width && !width_ok {
        return Err(format!("width {} below minimum {}", rect.width, min.width));
    }
    if rect.height != before.height && !height_ok {
        return Err(format!("height {} below minimum {}", rect.height, min.height));
    }
    if rect.right() != before.right() && rect.right() > viewport.width - margin {
        return Err(format!("right edge {} past {}", rect.right(), viewport.width - margin));
    }
    if rect.bottom() != before.bottom() && rect.bottom() > viewport.height - margin {
        return Err(format!("bottom edge {} past {}", rect.bottom(), viewport.height - margin));
    }
    Ok(())
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    steps: u64,
    per_op: [u64; Op::ALL.len()],
    violations: Vec<String>,
    exit_reason: ExitReason,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            steps: 0,
            per_op: [0; Op::ALL.len()],
            violations: Vec::new(),
            exit_reason: ExitReason::Completed,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record(&mut self, op: Op) {
        self.steps = self.steps.saturating_add(1);
        self.per_op[op.index()] = self.per_op[op.index()].saturating_add(1);
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let steps_per_second = if elapsed > 0.0 {
            self.steps as f64 / elapsed
        } else {
            0.0
        };
        let breakdown = Op::ALL
            .iter()
            .map(|op| format!("  {:<28} {:>10}", op.label(), self.per_op[op.index()]))
            .collect::<Vec<_>>()
            .join("\n");
        let violations = if self.violations.is_empty() {
            "none".to_string()
        } else {
            self.violations.join("\n  ")
        };

        indoc::formatdoc!(
            r#"
            Panel bench {status}.
            Seed: {seed} | Start viewport: {width}x{height}
            Duration: {elapsed:.2}s (target {target:.2}s)
            Steps: {steps} (~{rate:.0}/s)
            {breakdown}
            Violations: {violations}
            "#,
            status = self.exit_reason.describe(),
            seed = config.seed,
            width = config.viewport.width,
            height = config.viewport.height,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            steps = self.steps,
            rate = steps_per_second,
            breakdown = breakdown,
            violations = violations,
        )
    }
}

#[derive(Copy, Clone)]
enum ExitReason {
    Completed,
    Violation,
}

impl ExitReason {
    fn describe(self) -> &'static str {
        match self {
            ExitReason::Completed => "completed full duration",
            ExitReason::Violation => "stopped on an invariant violation",
        }
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
        ^ 0xA5A5_A5A5_1234_5678
}

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next() % (hi - lo + 1) as u32) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> BenchConfig {
        BenchConfig {
            duration: Duration::from_millis(50),
            seed,
            viewport: Viewport::new(1280, 800),
        }
    }

    #[test]
    fn short_run_reports_no_violations() {
        for seed in [1, 7, 42] {
            let stats = run_benchmark(&config(seed));
            assert!(stats.violations.is_empty(), "{:?}", stats.violations);
            assert!(stats.steps > 0);
        }
    }

    #[test]
    fn rejects_tiny_viewport() {
        let cli = BenchCli::parse_from(["panel-bench", "--width", "10"]);
        assert!(BenchConfig::try_from(&cli).is_err());
    }

    #[test]
    fn report_lists_every_operation() {
        let config = config(3);
        let stats = run_benchmark(&config);
        let report = stats.final_report(&config);
        for op in Op::ALL {
            assert!(report.contains(op.label()));
        }
        assert!(report.contains("Seed: 3"));
    }
}
