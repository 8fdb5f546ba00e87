use super::state::Position;

/// Whether two cell-sized boxes overlap.
///
/// Positions are always aligned to the cell size, so overlap reduces to
/// equality.
pub fn cells_overlap(a: Position, b: Position) -> bool {
    a == b
}

/// First segment at index 2 or beyond that overlaps the head.
///
/// Segments 0 and 1 are skipped: segment 1 trails the head by one cell
/// during the shift-then-move order.
pub fn self_collision_index(segments: &[Position]) -> Option<usize> {
    let head = *segments.first()?;
    segments
        .iter()
        .enumerate()
        .skip(2)
        .find(|(_, seg)| cells_overlap(head, **seg))
        .map(|(i, _)| i)
}
