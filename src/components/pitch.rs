use statsbomb_api::{PITCH_LENGTH, PITCH_WIDTH};
use std::f64::consts::PI;
use tui::layout::Rect;

/// Terminal cells are roughly twice as tall as they are wide, so a
/// 120 x 80 pitch looks right at three columns per row.
const COLS_PER_ROW: u16 = 3;
/// Segments per full circle when approximating arcs.
const ARC_STEPS: usize = 36;

const PENALTY_BOX_DEPTH: f64 = 18.0;
const PENALTY_BOX_TOP: f64 = 18.0;
const PENALTY_BOX_BOTTOM: f64 = 62.0;
const SIX_YARD_DEPTH: f64 = 6.0;
const SIX_YARD_TOP: f64 = 30.0;
const SIX_YARD_BOTTOM: f64 = 50.0;
const PENALTY_SPOT: f64 = 12.0;
const CIRCLE_RADIUS: f64 = 10.0;

/// A straight marking in StatsBomb pitch units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }
}

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> [Segment; 4] {
    [
        Segment::new(x1, y1, x2, y1),
        Segment::new(x2, y1, x2, y2),
        Segment::new(x2, y2, x1, y2),
        Segment::new(x1, y2, x1, y1),
    ]
}

/// Polyline approximation of the arc from `from` to `to` radians.
fn arc(cx: f64, cy: f64, r: f64, from: f64, to: f64) -> Vec<Segment> {
    let steps = (((to - from).abs() / (2.0 * PI)) * ARC_STEPS as f64).ceil().max(1.0) as usize;
    let point = |i: usize| {
        let t = from + (to - from) * i as f64 / steps as f64;
        (cx + r * t.cos(), cy + r * t.sin())
    };
    (0..steps)
        .map(|i| {
            let (x1, y1) = point(i);
            let (x2, y2) = point(i + 1);
            Segment::new(x1, y1, x2, y2)
        })
        .collect()
}

/// Every line of a StatsBomb pitch. The layout is symmetric top to bottom,
/// so it needs no flipping between screen and canvas orientation.
pub fn markings() -> Vec<Segment> {
    let mut out = Vec::with_capacity(64);
    let (l, w) = (PITCH_LENGTH, PITCH_WIDTH);

    out.extend(rect(0.0, 0.0, l, w));
    out.push(Segment::new(l / 2.0, 0.0, l / 2.0, w));

    out.extend(rect(0.0, PENALTY_BOX_TOP, PENALTY_BOX_DEPTH, PENALTY_BOX_BOTTOM));
    out.extend(rect(l - PENALTY_BOX_DEPTH, PENALTY_BOX_TOP, l, PENALTY_BOX_BOTTOM));
    out.extend(rect(0.0, SIX_YARD_TOP, SIX_YARD_DEPTH, SIX_YARD_BOTTOM));
    out.extend(rect(l - SIX_YARD_DEPTH, SIX_YARD_TOP, l, SIX_YARD_BOTTOM));

    out.extend(arc(l / 2.0, w / 2.0, CIRCLE_RADIUS, 0.0, 2.0 * PI));

    // Penalty arcs: the part of the spot circle outside the box.
    let half = ((PENALTY_BOX_DEPTH - PENALTY_SPOT) / CIRCLE_RADIUS).acos();
    out.extend(arc(PENALTY_SPOT, w / 2.0, CIRCLE_RADIUS, -half, half));
    out.extend(arc(l - PENALTY_SPOT, w / 2.0, CIRCLE_RADIUS, PI - half, PI + half));
    out
}

pub fn penalty_spots() -> [(f64, f64); 3] {
    [
        (PENALTY_SPOT, PITCH_WIDTH / 2.0),
        (PITCH_LENGTH / 2.0, PITCH_WIDTH / 2.0),
        (PITCH_LENGTH - PENALTY_SPOT, PITCH_WIDTH / 2.0),
    ]
}

/// Canvas y grows upwards, StatsBomb y grows downwards.
pub fn to_canvas(x: f64, y: f64) -> (f64, f64) {
    (x, PITCH_WIDTH - y)
}

/// Largest centred sub-area with the pitch's aspect ratio.
pub fn fit_area(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(COLS_PER_ROW));
    let height = (width / COLS_PER_ROW).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Terminal cell (column, row) that contains a pitch point, clamped to `area`.
pub fn cell_of(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let col = ((x / PITCH_LENGTH) * area.width as f64).floor();
    let row = ((y / PITCH_WIDTH) * area.height as f64).floor();
    let col = col.clamp(0.0, (area.width - 1) as f64) as u16;
    let row = row.clamp(0.0, (area.height - 1) as f64) as u16;
    Some((area.x + col, area.y + row))
}

/// Pitch point at the centre of a cell, relative to `area`.
pub fn cell_center(area: Rect, col: u16, row: u16) -> (f64, f64) {
    (
        (col as f64 + 0.5) / area.width as f64 * PITCH_LENGTH,
        (row as f64 + 0.5) / area.height as f64 * PITCH_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markings_stay_on_the_pitch() {
        for s in markings() {
            for (x, y) in [(s.x1, s.y1), (s.x2, s.y2)] {
                assert!((-1e-9..=PITCH_LENGTH + 1e-9).contains(&x), "{s:?}");
                assert!((-1e-9..=PITCH_WIDTH + 1e-9).contains(&y), "{s:?}");
            }
        }
    }

    #[test]
    fn penalty_arc_starts_on_the_box_edge() {
        let segments = markings();
        let left_arc: Vec<&Segment> = segments
            .iter()
            .filter(|s| !s.is_horizontal() && !s.is_vertical() && s.x1 < 30.0)
            .collect();
        assert!(!left_arc.is_empty());
        assert!((left_arc[0].x1 - PENALTY_BOX_DEPTH).abs() < 1e-9);
        assert!(left_arc.iter().all(|s| s.x1 >= PENALTY_BOX_DEPTH - 1e-9));
    }

    #[test]
    fn canvas_flip_is_an_involution() {
        let (x, y) = to_canvas(100.0, 10.0);
        assert_eq!((x, y), (100.0, 70.0));
        assert_eq!(to_canvas(x, y), (100.0, 10.0));
    }

    #[test]
    fn fit_area_keeps_three_columns_per_row() {
        let fitted = fit_area(Rect::new(0, 0, 200, 20));
        assert_eq!((fitted.width, fitted.height), (60, 20));
        assert_eq!(fitted.x, 70);

        let fitted = fit_area(Rect::new(5, 5, 30, 40));
        assert_eq!((fitted.width, fitted.height), (30, 10));
        assert_eq!(fitted.y, 5 + 15);
    }

    #[test]
    fn cell_mapping_clamps_the_far_touchline() {
        let area = Rect::new(2, 3, 60, 20);
        assert_eq!(cell_of(area, 0.0, 0.0), Some((2, 3)));
        assert_eq!(cell_of(area, PITCH_LENGTH, PITCH_WIDTH), Some((61, 22)));
        assert_eq!(cell_of(Rect::new(0, 0, 0, 5), 1.0, 1.0), None);
        let (x, y) = cell_center(Rect::new(0, 0, 60, 20), 0, 0);
        assert!((x - 1.0).abs() < 1e-9 && (y - 2.0).abs() < 1e-9);
    }
}
