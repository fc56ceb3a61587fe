//! Time-slot computation.
//!
//! Each dubbed clip may occupy the window between its segment's start and
//! the next segment's start, minus a safety buffer that keeps neighbouring
//! clips from touching. The floor guarantees a usable window even when two
//! segments start almost simultaneously; the final segment simply gets its
//! own recognised duration.

use crate::segment::Segment;

/// Slot for segment `index`, in seconds.
pub fn compute_slot(
    segments: &[Segment],
    index: usize,
    floor_secs: f64,
    buffer_secs: f64,
) -> f64 {
    let seg = &segments[index];
    match segments.get(index + 1) {
        Some(next) => (next.start - seg.start - buffer_secs).max(floor_secs),
        None => seg.end - seg.start,
    }
}

/// Slots for the whole list in one read-only pass. Workers index into the
/// result instead of reading neighbouring segments.
pub fn compute_slots(segments: &[Segment], floor_secs: f64, buffer_secs: f64) -> Vec<f64> {
    (0..segments.len())
        .map(|i| compute_slot(segments, i, floor_secs, buffer_secs))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: f64 = 0.5;
    const BUFFER: f64 = 0.1;

    fn seg(id: i64, start: f64, end: f64) -> Segment {
        Segment {
            id,
            start,
            end,
            text: format!("segment {id}"),
            translation: None,
            audio_path: None,
        }
    }

    #[test]
    fn slot_is_gap_to_next_start_minus_buffer() {
        let segments = vec![seg(1, 0.0, 2.0), seg(2, 3.0, 5.0)];
        let slot = compute_slot(&segments, 0, FLOOR, BUFFER);
        assert!((slot - 2.9).abs() < 1e-9);
    }

    #[test]
    fn final_segment_gets_its_own_duration() {
        let segments = vec![seg(1, 0.0, 2.0), seg(2, 3.0, 5.5)];
        let slot = compute_slot(&segments, 1, FLOOR, BUFFER);
        assert!((slot - 2.5).abs() < 1e-9);
    }

    /// Two segments starting 0.05s apart must still yield the floor, never
    /// a negative or near-zero window.
    #[test]
    fn crowded_neighbours_hit_the_floor() {
        let segments = vec![seg(1, 10.0, 12.0), seg(2, 10.05, 13.0)];
        let slot = compute_slot(&segments, 0, FLOOR, BUFFER);
        assert_eq!(slot, FLOOR);
        assert!(slot > 0.0);
    }

    #[test]
    fn compute_slots_covers_every_segment() {
        let segments = vec![seg(1, 0.0, 1.0), seg(2, 1.2, 2.0), seg(3, 8.0, 9.5)];
        let slots = compute_slots(&segments, FLOOR, BUFFER);
        assert_eq!(slots.len(), 3);
        assert!((slots[0] - 1.1).abs() < 1e-9);
        assert!((slots[1] - 6.7).abs() < 1e-9);
        assert!((slots[2] - 1.5).abs() < 1e-9);
    }
}
