// File: crates/diverging-core/src/diverging.rs
// Summary: Reshapes bar/column series into a two-sided (diverging) form around zero.
// Notes:
// - Stack-grouped: first distinct stack goes left (<= 0), second goes right (>= 0),
//   every other record is dropped. Positional: first record left, second right.
// - `transform` never touches its input. `transform_owned` consumes the input and
//   reuses its buffers.

use tracing::{debug, trace};

use crate::options::{ChartOptionValidator, StackedOptionPredicate};
use crate::series::{SeriesCollection, SeriesRecord};

/// A diverging chart has exactly two sides.
const MAX_SIDES: usize = 2;

/// Side of the zero axis a series is projected onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Negative side; values become <= 0.
    Left,
    /// Positive side; values become >= 0.
    Right,
}

impl Side {
    /// Project a single value onto this side.
    ///
    /// Negative inputs are zeroed on both sides, so a value that is already
    /// negative is never flipped to positive on the left. A zero input always
    /// yields `+0.0`, never `-0.0`.
    #[inline]
    pub fn project(self, v: f64) -> f64 {
        match self {
            Side::Left => minus_value(v),
            Side::Right => plus_value(v),
        }
    }

    /// Whether `v` satisfies this side's sign constraint.
    #[inline]
    pub fn contains(self, v: f64) -> bool {
        match self {
            Side::Left => v <= 0.0,
            Side::Right => v >= 0.0,
        }
    }
}

/// Strategy picked from the stacked option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    StackGrouped,
    Positional,
}

/// Stateless transformer; the predicate is the only thing it holds.
#[derive(Clone, Debug, Default)]
pub struct DivergingTransformer<P = ChartOptionValidator> {
    predicate: P,
}

impl DivergingTransformer {
    pub fn new() -> Self {
        Self { predicate: ChartOptionValidator }
    }
}

impl<P: StackedOptionPredicate> DivergingTransformer<P> {
    pub fn with_predicate(predicate: P) -> Self {
        Self { predicate }
    }

    pub fn strategy(&self, stacked: Option<&str>) -> Strategy {
        if self.predicate.is_valid_stacked_option(stacked) {
            Strategy::StackGrouped
        } else {
            Strategy::Positional
        }
    }

    /// Side assigned to each input record, index-aligned with `raw`.
    /// `None` marks a record the transform drops.
    pub fn assign_sides(&self, raw: &[SeriesRecord], stacked: Option<&str>) -> Vec<Option<Side>> {
        let strategy = self.strategy(stacked);
        let sides = match strategy {
            Strategy::StackGrouped => stacked_sides(raw),
            Strategy::Positional => positional_sides(raw.len()),
        };
        debug!(
            ?strategy,
            input = raw.len(),
            kept = sides.iter().flatten().count(),
            "assigned diverging sides"
        );
        sides
    }

    /// Diverging copy of `raw`; the input is left unmodified.
    pub fn transform(&self, raw: &[SeriesRecord], stacked: Option<&str>) -> SeriesCollection {
        let sides = self.assign_sides(raw, stacked);
        raw.iter()
            .zip(sides)
            .enumerate()
            .filter_map(|(i, (record, side))| match side {
                Some(side) => Some(SeriesRecord {
                    data: project_values(&record.data, side),
                    stack: record.stack.clone(),
                    attrs: record.attrs.clone(),
                }),
                None => {
                    trace!(index = i, stack = ?record.stack, "dropping series");
                    None
                }
            })
            .collect()
    }

    /// Same result as [`transform`](Self::transform), reusing the input's buffers.
    pub fn transform_owned(&self, raw: SeriesCollection, stacked: Option<&str>) -> SeriesCollection {
        let sides = self.assign_sides(&raw, stacked);
        apply_sides(raw, &sides)
    }
}

/// Project `raw` onto sides computed by [`DivergingTransformer::assign_sides`],
/// dropping records whose side is `None`. Buffers of kept records are reused.
pub fn apply_sides(raw: SeriesCollection, sides: &[Option<Side>]) -> SeriesCollection {
    raw.into_iter()
        .zip(sides.iter().copied())
        .enumerate()
        .filter_map(|(i, (mut record, side))| match side {
            Some(side) => {
                project_in_place(&mut record.data, side);
                Some(record)
            }
            None => {
                trace!(index = i, stack = ?record.stack, "dropping series");
                None
            }
        })
        .collect()
}

/// Diverging copy of `raw` using the default chart-option rule.
pub fn make_diverging(raw: &[SeriesRecord], stacked: Option<&str>) -> SeriesCollection {
    DivergingTransformer::new().transform(raw, stacked)
}

// ---- helpers ----------------------------------------------------------------

/// Distinct non-empty stacks in first-seen order, capped at two.
fn pick_stacks(raw: &[SeriesRecord]) -> Vec<&str> {
    let mut stacks: Vec<&str> = Vec::with_capacity(MAX_SIDES);
    for stack in raw.iter().filter_map(SeriesRecord::stack_id) {
        if stacks.contains(&stack) {
            continue;
        }
        if stacks.len() == MAX_SIDES {
            trace!(stack, "ignoring stack beyond the two diverging sides");
            continue;
        }
        stacks.push(stack);
    }
    stacks
}

fn stacked_sides(raw: &[SeriesRecord]) -> Vec<Option<Side>> {
    let stacks = pick_stacks(raw);
    let left = stacks.first().copied();
    let right = stacks.get(1).copied();
    raw.iter()
        .map(|record| match record.stack_id() {
            Some(id) if Some(id) == left => Some(Side::Left),
            Some(id) if Some(id) == right => Some(Side::Right),
            _ => None,
        })
        .collect()
}

fn positional_sides(len: usize) -> Vec<Option<Side>> {
    (0..len)
        .map(|i| match i {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        })
        .collect()
}

#[inline]
fn minus_value(v: f64) -> f64 {
    // `+ 0.0` turns -0.0 into 0.0
    if v < 0.0 { 0.0 } else { -v + 0.0 }
}

#[inline]
fn plus_value(v: f64) -> f64 {
    if v < 0.0 { 0.0 } else { v + 0.0 }
}

fn project_values(data: &[f64], side: Side) -> Vec<f64> {
    data.iter().map(|&v| side.project(v)).collect()
}

fn project_in_place(data: &mut [f64], side: Side) {
    for v in data.iter_mut() {
        *v = side.project(*v);
    }
}
