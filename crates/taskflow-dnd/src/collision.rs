//! Drop-target detection.
//!
//! Task cards sit inside column tracks, so a pointer over a card is also over
//! the card's column. Among all regions containing the pointer the one whose
//! corners are nearest wins; this picks the card over the track it lives in,
//! and the track when the pointer is in the empty area below its cards.

use serde::{Deserialize, Serialize};

use crate::event::DragItem;
use crate::geometry::{Point, Rect};

/// A rendered region that can receive a drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub target: DragItem,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(target: DragItem, rect: Rect) -> Self {
        Self { target, rect }
    }

    /// Whether `dragged` may be dropped here. Columns only land on other
    /// columns. Tasks land on tasks or columns, including their own card,
    /// which resolves to the slot they already occupy.
    pub fn accepts(&self, dragged: &DragItem) -> bool {
        match dragged {
            DragItem::Column(_) => self.target.is_column() && &self.target != dragged,
            DragItem::Task(_) => true,
        }
    }
}

/// Nearest-corner collision detection.
///
/// Returns `None` when the pointer is outside every accepting region. Ties
/// go to the region registered first.
pub fn closest_corners<'a>(
    droppables: &'a [Droppable],
    dragged: &DragItem,
    pointer: Point,
) -> Option<&'a Droppable> {
    let mut best: Option<(&Droppable, f64)> = None;
    for droppable in droppables
        .iter()
        .filter(|d| d.accepts(dragged) && d.rect.contains(pointer))
    {
        let distance = droppable.rect.corner_distance(pointer);
        match best {
            Some((_, current)) if current <= distance => {}
            _ => best = Some((droppable, distance)),
        }
    }
    best.map(|(droppable, _)| droppable)
}
