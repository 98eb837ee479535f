//! Postfix equation shapes for the numbers round.
//!
//! A shape (an [`EquationTemplate`]) tells the numbers search in which order to
//! push tiles onto an evaluation stack and when to apply an operator. With six
//! tiles the possible operator positions are:
//!
//! ```text
//!     1 2 . 3 .. 4 ... 5 .... 6 .....
//!         ^   ^    ^     ^      ^
//!       slot0 |  slot2   |    slot4
//!           slot1      slot3
//! ```
//!
//! Every expression pushes two tiles first, then alternates "push one more tile"
//! with "apply zero or more operators". Slot `i` can hold at most `i + 1`
//! operators, and the whole expression always has one operator fewer than tiles.
//!
//! For four tiles the five shapes are:
//!
//! ```text
//!     operator counts     template
//!     0 0 3           =>  4 0 0 0
//!     0 1 2           =>  3 0 1 0 0
//!     0 2 1           =>  3 0 0 1 0
//!     1 0 2           =>  2 0 2 0 0
//!     1 1 1           =>  2 0 1 0 1 0
//! ```
//!
//! A positive template entry means "push that many tiles", a zero means "apply
//! one operator". The number of shapes per tile count is a Catalan number.

use std::fmt;
use std::sync::LazyLock;

use log::debug;

use crate::errors::CountdownError;

/// Smallest tile count that needs an operator.
pub const MIN_TILES: usize = 2;
/// Largest tile count dealt in a numbers round.
pub const MAX_TILES: usize = 6;

static GLOBAL: LazyLock<ShapeTable> = LazyLock::new(ShapeTable::new);

/// One evaluation step of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Push this many tiles onto the stack.
    Push(usize),
    /// Pop two values, apply an operator, push the result.
    Apply,
}

/// A push/operator pattern describing a valid postfix evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EquationTemplate {
    entries: Vec<u8>,
}

impl EquationTemplate {
    /// Raw template entries: positive = push that many tiles, zero = apply an operator.
    #[must_use]
    pub fn entries(&self) -> &[u8] {
        &self.entries
    }

    /// Iterate over the template as typed steps.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.entries.iter().map(|&e| match e {
            0 => Step::Apply,
            n => Step::Push(usize::from(n)),
        })
    }

    /// Number of tiles the template consumes.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.entries.iter().map(|&e| usize::from(e)).sum()
    }

    /// Number of operators the template applies.
    #[must_use]
    pub fn operator_count(&self) -> usize {
        self.entries.iter().filter(|&&e| e == 0).count()
    }
}

impl fmt::Display for EquationTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

/// Every valid [`EquationTemplate`] for each tile count from [`MIN_TILES`] to [`MAX_TILES`].
///
/// Build one with [`ShapeTable::new`] and pass it around, or use the
/// process-wide [`ShapeTable::global`] handle, which is built on first access
/// and never changes afterwards.
#[derive(Debug, Clone)]
pub struct ShapeTable {
    // index 0 holds the shapes for MIN_TILES
    by_tile_count: Vec<Vec<EquationTemplate>>,
}

impl ShapeTable {
    /// Enumerate all shapes. Within each tile count, shapes are ordered
    /// lexicographically by their per-slot operator counts.
    #[must_use]
    pub fn new() -> Self {
        let mut by_tile_count = vec![Vec::new(); MAX_TILES - MIN_TILES + 1];
        let mut slots = Vec::with_capacity(MAX_TILES - 1);
        extend_slots(&mut slots, &mut by_tile_count);

        for (i, shapes) in by_tile_count.iter().enumerate() {
            debug!("{} tiles: {} equation shapes", i + MIN_TILES, shapes.len());
        }

        ShapeTable { by_tile_count }
    }

    /// The shared, lazily built table.
    #[must_use]
    pub fn global() -> &'static ShapeTable {
        &GLOBAL
    }

    /// Shapes for `tile_count` tiles.
    ///
    /// # Errors
    ///
    /// Returns [`CountdownError::InvalidTileCount`] if `tile_count` is outside
    /// `MIN_TILES..=MAX_TILES`.
    pub fn lookup(&self, tile_count: usize) -> Result<&[EquationTemplate], CountdownError> {
        if !(MIN_TILES..=MAX_TILES).contains(&tile_count) {
            return Err(CountdownError::InvalidTileCount { tile_count });
        }
        Ok(&self.by_tile_count[tile_count - MIN_TILES])
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Choose the operator count for the next slot, depth first.
///
/// `slots.len()` is the slot being filled. A tuple ending at slot `i` is
/// complete for `i + 2` tiles, and its last value is forced: it is whatever
/// brings the operator total to one less than the tile count.
fn extend_slots(slots: &mut Vec<usize>, tables: &mut [Vec<EquationTemplate>]) {
    let slot = slots.len();
    let tile_count = slot + MIN_TILES;
    let so_far: usize = slots.iter().sum();

    for count in 0..=slot + 1 {
        let total = so_far + count;
        if total == tile_count - 1 {
            slots.push(count);
            if let Some(template) = materialize(slots) {
                tables[slot].push(template);
            }
            slots.pop();
        }
        // a longer tuple still needs at least one operator in its final slot
        if tile_count < MAX_TILES && total < MAX_TILES - 1 {
            slots.push(count);
            extend_slots(slots, tables);
            slots.pop();
        }
    }
}

/// Turn per-slot operator counts into a template, or `None` if some prefix
/// would pop more values than have been pushed.
fn materialize(slots: &[usize]) -> Option<EquationTemplate> {
    let mut pending = 2;
    let mut pushed = 0;
    let mut applied = 0;
    let mut entries = Vec::with_capacity(slots.len() * 2 + 1);

    for &count in slots {
        if count == 0 {
            pending += 1;
            continue;
        }
        pushed += pending;
        applied += count;
        if applied >= pushed {
            return None;
        }
        entries.push(u8::try_from(pending).ok()?);
        entries.extend(std::iter::repeat(0).take(count));
        pending = 1;
    }

    Some(EquationTemplate { entries })
}
