//! RollEngine: number ownership, run lifecycle and per-frame column sampling.
//!
//! Two ways to drive a run:
//! - `update(dt_ms)`: the engine owns one monotonic clock and derives every
//!   column's eased progress from its [`ColumnTiming`].
//! - `on_tick` / `on_column_end` / `end_frame`: an external per-column driver
//!   supplies eased progress itself. Every call carries the [`RunId`] it was
//!   issued for; calls for a superseded run are discarded.
//!
//! Either way, a redraw is requested at most once per frame, after all columns
//! for that frame have been sampled.

use log::{debug, trace, warn};

use crate::config::{Config, Sampling};
use crate::digits::{digits_to_string, Digit, NumberInput};
use crate::error::RollError;
use crate::ids::{RunAllocator, RunId};
use crate::outputs::{ColumnState, Outputs, RollEvent};
use crate::plan::{ColumnPlan, DigitPair, GRID_STEPS};
use crate::timing::{settle_ms, ColumnTiming};

/// One decimal position of the padded number pair, fixed for a run.
#[derive(Clone, Debug)]
pub struct Column {
    pub index: usize,
    pub plan: ColumnPlan,
    /// Present in `from` but not in the shorter `to`.
    pub is_vanishing: bool,
    pub timing: ColumnTiming,
    finished: bool,
}

impl Column {
    #[inline]
    pub fn start_digit(&self) -> Digit {
        self.plan.start()
    }

    #[inline]
    pub fn end_digit(&self) -> Digit {
        self.plan.end()
    }

    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.plan.total_steps()
    }

    /// Neither rolls nor fades; holds its digit for the whole run.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.plan.is_static() && !self.is_vanishing
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Everything fixed when a run starts, plus its clock and join counter.
#[derive(Clone, Debug)]
pub struct RunState {
    pub id: RunId,
    pub from_padded: String,
    pub to_padded: String,
    pub columns: Vec<Column>,
    pub elapsed_ms: f32,
    final_digits: Vec<Digit>,
    remaining: usize,
}

impl RunState {
    fn new(id: RunId, from: &NumberInput, to: &NumberInput, cfg: &Config) -> Self {
        let width = from.len().max(to.len());
        let from_digits = from.padded(width);
        let to_digits = to.padded(width);
        let vanishing = from.len().saturating_sub(to.len());

        let columns: Vec<Column> = from_digits
            .iter()
            .zip(&to_digits)
            .enumerate()
            .map(|(index, (&start, &end))| {
                let plan = ColumnPlan::new(start, end);
                let is_vanishing = index < vanishing;
                Column {
                    index,
                    plan,
                    is_vanishing,
                    timing: ColumnTiming::for_column(cfg, index),
                    finished: plan.is_static() && !is_vanishing,
                }
            })
            .collect();
        let remaining = columns.iter().filter(|c| !c.finished).count();

        Self {
            id,
            from_padded: digits_to_string(&from_digits),
            to_padded: digits_to_string(&to_digits),
            columns,
            elapsed_ms: 0.0,
            final_digits: to.digits(),
            remaining,
        }
    }

    /// Columns still waiting for their driver to finish.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Run-clock time at which every active column has finished.
    pub fn settle_ms(&self) -> f32 {
        settle_ms(
            self.columns
                .iter()
                .filter(|c| !c.is_inert())
                .map(|c| &c.timing),
        )
    }

    fn finish_column(&mut self, index: usize) {
        if let Some(col) = self.columns.get_mut(index) {
            if !col.finished {
                col.finished = true;
                self.remaining = self.remaining.saturating_sub(1);
            }
        }
    }
}

/// Sample one column at eased `progress`.
pub(crate) fn sample_column(cfg: &Config, col: &Column, progress: f32) -> ColumnState {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let plan = &col.plan;

    let (pair, sub_offset) = if plan.is_static() {
        (DigitPair::settled(plan.start()), 0.0)
    } else {
        let (pair, landed, scaled) = match cfg.sampling {
            Sampling::Grid => {
                let scaled = progress * cfg.sample_resolution as f32;
                let step = grid_step(scaled.floor() as u32, cfg.sample_resolution);
                (plan.grid_value_at(step), plan.grid_landed_at(step), scaled)
            }
            Sampling::PerColumn => {
                let scaled = progress * plan.total_steps() as f32;
                let step = scaled.floor() as u32;
                (plan.value_at(step), plan.landed_at(step), scaled)
            }
        };
        let sub_offset = if landed { 0.0 } else { scaled - scaled.floor() };
        (pair, sub_offset)
    };

    let visibility = if col.is_vanishing {
        1.0 - (progress * cfg.vanish_fade_multiplier).min(1.0)
    } else {
        1.0
    };

    ColumnState {
        current_digit: pair.current,
        next_digit: pair.next,
        sub_offset,
        visibility,
    }
}

/// Map a sample index onto the 10-step grid so `resolution` samples always
/// end on the landing step.
#[inline]
fn grid_step(sample: u32, resolution: u32) -> u32 {
    let scaled = u64::from(sample) * u64::from(GRID_STEPS) / u64::from(resolution.max(1));
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

fn parse_optional(input: &str) -> Result<Option<NumberInput>, RollError> {
    if input.is_empty() {
        Ok(None)
    } else {
        NumberInput::parse(input).map(Some)
    }
}

#[derive(Debug)]
pub struct RollEngine {
    cfg: Config,
    runs: RunAllocator,

    // Numbers as given to set_numbers (unpadded); None = unset.
    from: Option<NumberInput>,
    to: Option<NumberInput>,

    states: Vec<ColumnState>,
    run: Option<RunState>,

    clock_ms: f64,
    last_redraw_ms: Option<f64>,
    dirty: bool,

    pending: Vec<RollEvent>,
    outputs: Outputs,
}

impl Default for RollEngine {
    fn default() -> Self {
        Self::with_valid_config(Config::default())
    }
}

impl RollEngine {
    /// Create an engine; the config is validated first.
    pub fn new(cfg: Config) -> Result<Self, RollError> {
        cfg.validate()?;
        Ok(Self::with_valid_config(cfg))
    }

    fn with_valid_config(cfg: Config) -> Self {
        Self {
            cfg,
            runs: RunAllocator::new(),
            from: None,
            to: None,
            states: Vec::new(),
            run: None,
            clock_ms: 0.0,
            last_redraw_ms: None,
            dirty: false,
            pending: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Replace the pending number pair.
    ///
    /// Rejects non-digit input and leaves all state untouched. An empty string
    /// is accepted as "unset"; a later `start_animation` is then a no-op.
    pub fn set_numbers(&mut self, from: &str, to: &str) -> Result<(), RollError> {
        let parsed = parse_optional(from).and_then(|f| parse_optional(to).map(|t| (f, t)));
        let (from, to) = match parsed {
            Ok(pair) => pair,
            Err(err) => {
                warn!("set_numbers rejected ({}): {err}", err.category());
                return Err(err);
            }
        };

        self.cancel_run();
        debug!(
            "set_numbers from={:?} to={:?}",
            from.as_ref().map(NumberInput::as_str),
            to.as_ref().map(NumberInput::as_str)
        );
        self.states = from
            .as_ref()
            .map(|f| f.digits().into_iter().map(ColumnState::resting).collect())
            .unwrap_or_default();
        self.from = from;
        self.to = to;
        self.dirty = false;
        self.pending.push(RollEvent::Invalidate);
        Ok(())
    }

    /// Begin a run from the stored numbers. Returns `None` (and does nothing)
    /// when either number is unset.
    pub fn start_animation(&mut self) -> Option<RunId> {
        let (Some(from), Some(to)) = (self.from.as_ref(), self.to.as_ref()) else {
            debug!("start_animation ignored: numbers unset");
            return None;
        };

        let id = self.runs.alloc();
        let run = RunState::new(id, from, to, &self.cfg);
        self.cancel_run();

        self.states = run
            .columns
            .iter()
            .map(|c| ColumnState::resting(c.start_digit()))
            .collect();
        debug!(
            "run {:?} started: {} -> {} ({} columns, {} active, settles at {}ms)",
            id,
            run.from_padded,
            run.to_padded,
            run.columns.len(),
            run.remaining,
            run.settle_ms()
        );
        self.pending.push(RollEvent::AnimationStarted {
            run: id,
            columns: run.columns.len(),
        });
        self.pending.push(RollEvent::Invalidate);
        self.dirty = false;
        self.last_redraw_ms = None;
        self.run = Some(run);
        Some(id)
    }

    /// Cancel the active run, keeping the last sampled digits as a static
    /// display. No-op while idle.
    pub fn stop_animation(&mut self) {
        if self.cancel_run().is_some() {
            self.pending.push(RollEvent::Invalidate);
        }
    }

    fn cancel_run(&mut self) -> Option<RunId> {
        let run = self.run.take()?;
        for s in &mut self.states {
            s.next_digit = s.current_digit;
            s.sub_offset = 0.0;
        }
        self.dirty = false;
        debug!("run {:?} cancelled at {}ms", run.id, run.elapsed_ms);
        self.pending.push(RollEvent::AnimationStopped { run: run.id });
        Some(run.id)
    }

    fn is_current(&self, run: RunId, index: usize) -> bool {
        match &self.run {
            Some(r) if r.id == run && index < r.columns.len() => true,
            _ => {
                trace!("discarding tick for run {run:?} column {index}");
                false
            }
        }
    }

    /// Apply eased `progress` for one column of `run`. Returns false for stale
    /// runs or out-of-range columns, in which case nothing changes.
    pub fn on_tick(&mut self, run: RunId, index: usize, progress: f32) -> bool {
        if !self.is_current(run, index) {
            return false;
        }
        if let Some(r) = &self.run {
            self.states[index] = sample_column(&self.cfg, &r.columns[index], progress);
            self.dirty = true;
        }
        true
    }

    /// Report that the driver for one column has finished.
    pub fn on_column_end(&mut self, run: RunId, index: usize) -> bool {
        if !self.is_current(run, index) {
            return false;
        }
        if let Some(r) = &mut self.run {
            if !r.columns[index].is_inert() {
                self.states[index] = sample_column(&self.cfg, &r.columns[index], 1.0);
                self.dirty = true;
            }
            r.finish_column(index);
        }
        true
    }

    /// Close a frame: complete the run if every column has finished, otherwise
    /// issue the frame's redraw unless one went out less than
    /// `min_redraw_interval_ms` ago.
    pub fn end_frame(&mut self, now_ms: f64) {
        if self.run.as_ref().is_some_and(|r| r.remaining == 0) {
            self.finish_run(now_ms);
            return;
        }
        if !self.dirty {
            return;
        }
        let min = f64::from(self.cfg.min_redraw_interval_ms);
        if let Some(last) = self.last_redraw_ms {
            if now_ms - last < min {
                return;
            }
        }
        self.last_redraw_ms = Some(now_ms);
        self.dirty = false;
        self.pending.push(RollEvent::Invalidate);
    }

    fn finish_run(&mut self, now_ms: f64) {
        let Some(run) = self.run.take() else {
            return;
        };
        self.states = run
            .final_digits
            .iter()
            .map(|&d| ColumnState::resting(d))
            .collect();
        debug!(
            "run {:?} ended after {}ms: {}",
            run.id,
            run.elapsed_ms,
            self.display_text()
        );
        self.dirty = false;
        self.last_redraw_ms = Some(now_ms);
        self.pending.push(RollEvent::Invalidate);
        self.pending.push(RollEvent::AnimationEnd { run: run.id });
    }

    /// Advance the engine clock by `dt_ms` and sample every active column.
    pub fn update(&mut self, dt_ms: f32) -> &Outputs {
        self.outputs.clear();
        let dt = if dt_ms.is_finite() && dt_ms > 0.0 {
            dt_ms
        } else {
            0.0
        };
        self.clock_ms += f64::from(dt);

        if let Some(run) = self.run.as_mut() {
            run.elapsed_ms += dt;
            let elapsed = run.elapsed_ms;
            for index in 0..run.columns.len() {
                let col = &run.columns[index];
                if col.finished {
                    continue;
                }
                let progress = self.cfg.easing.apply(col.timing.linear_progress(elapsed));
                self.states[index] = sample_column(&self.cfg, col, progress);
                self.dirty = true;
                if col.timing.is_finished(elapsed) {
                    run.finish_column(index);
                }
            }
        }

        self.end_frame(self.clock_ms);
        self.outputs.events.append(&mut self.pending);
        self.outputs.animating = self.is_animating();
        &self.outputs
    }

    /// Drain events emitted outside `update` (for external drivers).
    pub fn take_events(&mut self) -> Vec<RollEvent> {
        std::mem::take(&mut self.pending)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    #[inline]
    pub fn current_run(&self) -> Option<RunId> {
        self.run.as_ref().map(|r| r.id)
    }

    #[inline]
    pub fn run_state(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    /// Most recent snapshot, most significant column first.
    #[inline]
    pub fn column_states(&self) -> &[ColumnState] {
        &self.states
    }

    pub fn visible_column_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_visible()).count()
    }

    /// Foreground digits of the visible columns.
    pub fn display_text(&self) -> String {
        self.states
            .iter()
            .filter(|s| s.is_visible())
            .map(|s| s.current_digit.as_char())
            .collect()
    }

    pub fn numbers(&self) -> (Option<&NumberInput>, Option<&NumberInput>) {
        (self.from.as_ref(), self.to.as_ref())
    }
}
