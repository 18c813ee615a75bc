use crate::components::pitch::{self, Segment};
use crate::state::analysis::ActionPoint;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::widgets::Widget;

pub const PITCH_COLOR: (u8, u8, u8) = (0x22, 0x31, 0x2b);
pub const LINE_COLOR: Color = Color::Rgb(0xc7, 0xd5, 0xcc);

/// Densities below this fraction of the peak are left unpainted.
const THRESHOLD: f64 = 0.05;
const ALPHA: f64 = 0.6;
/// Floor for the kernel bandwidth, in pitch units. Keeps one action, or a
/// row of actions on the same line, from collapsing into a single cell.
const MIN_BANDWIDTH: f64 = 2.0;

/// Perceptually ordered dark-to-bright ramp (inferno stops).
const INFERNO: [(u8, u8, u8); 8] = [
    (0, 0, 4),
    (40, 11, 84),
    (101, 21, 110),
    (159, 42, 99),
    (212, 72, 66),
    (245, 125, 21),
    (250, 193, 39),
    (252, 255, 164),
];

/// Scott's rule: sample standard deviation scaled by n^(-1/6) for 2-D data.
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return MIN_BANDWIDTH;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (var.sqrt() * (n as f64).powf(-1.0 / 6.0)).max(MIN_BANDWIDTH)
}

/// Gaussian kernel density per cell, normalised so the peak is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    pub cols: u16,
    pub rows: u16,
    pub values: Vec<f64>,
}

impl DensityGrid {
    pub fn compute(points: &[ActionPoint], cols: u16, rows: u16) -> Self {
        let mut values = vec![0.0; cols as usize * rows as usize];
        if points.is_empty() || values.is_empty() {
            return Self { cols, rows, values };
        }

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let (bx, by) = (scott_bandwidth(&xs), scott_bandwidth(&ys));
        let grid = Rect::new(0, 0, cols, rows);

        for row in 0..rows {
            for col in 0..cols {
                let (cx, cy) = pitch::cell_center(grid, col, row);
                values[row as usize * cols as usize + col as usize] = points
                    .iter()
                    .map(|p| {
                        let dx = (cx - p.x) / bx;
                        let dy = (cy - p.y) / by;
                        (-0.5 * (dx * dx + dy * dy)).exp()
                    })
                    .sum();
            }
        }

        let peak = values.iter().cloned().fold(0.0, f64::max);
        if peak > 0.0 {
            values.iter_mut().for_each(|v| *v /= peak);
        }
        Self { cols, rows, values }
    }

    pub fn get(&self, col: u16, row: u16) -> f64 {
        self.values
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Colour of a normalised density over the pitch, or None below threshold.
pub fn shade(density: f64) -> Option<Color> {
    if density < THRESHOLD {
        return None;
    }
    let t = ((density - THRESHOLD) / (1.0 - THRESHOLD)).clamp(0.0, 1.0);
    let scaled = t * (INFERNO.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(INFERNO.len() - 2);
    let frac = scaled - i as f64;
    let lerp = |a: u8, b: u8| a as f64 + (b as f64 - a as f64) * frac;
    let (lo, hi) = (INFERNO[i], INFERNO[i + 1]);
    let blend = |c: f64, bg: u8| (c * ALPHA + bg as f64 * (1.0 - ALPHA)).round() as u8;
    Some(Color::Rgb(
        blend(lerp(lo.0, hi.0), PITCH_COLOR.0),
        blend(lerp(lo.1, hi.1), PITCH_COLOR.1),
        blend(lerp(lo.2, hi.2), PITCH_COLOR.2),
    ))
}

/// Action density painted as cell backgrounds on a dark pitch, with the
/// markings drawn over it at cell resolution.
pub struct Heatmap<'a> {
    pub points: &'a [ActionPoint],
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = pitch::fit_area(area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (r, g, b) = PITCH_COLOR;
        buf.set_style(area, Style::default().bg(Color::Rgb(r, g, b)));

        let grid = DensityGrid::compute(self.points, area.width, area.height);
        for row in 0..area.height {
            for col in 0..area.width {
                if let Some(color) = shade(grid.get(col, row))
                    && let Some(cell) = buf.cell_mut((area.x + col, area.y + row))
                {
                    cell.set_bg(color);
                }
            }
        }

        for segment in pitch::markings() {
            draw_segment(buf, area, &segment);
        }
    }
}

fn draw_segment(buf: &mut Buffer, area: Rect, s: &Segment) {
    let ch = if s.is_horizontal() {
        '─'
    } else if s.is_vertical() {
        '│'
    } else {
        '·'
    };
    // Two samples per cell along the longer axis is enough to leave no gaps.
    let span_cols = (s.x2 - s.x1).abs() / statsbomb_api::PITCH_LENGTH * area.width as f64;
    let span_rows = (s.y2 - s.y1).abs() / statsbomb_api::PITCH_WIDTH * area.height as f64;
    let steps = ((span_cols.max(span_rows) * 2.0).ceil() as usize).max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = s.x1 + (s.x2 - s.x1) * t;
        let y = s.y1 + (s.y2 - s.y1) * t;
        if let Some(pos) = pitch::cell_of(area, x, y)
            && let Some(cell) = buf.cell_mut(pos)
        {
            cell.set_char(ch);
            cell.set_fg(LINE_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_has_a_floor_for_degenerate_samples() {
        assert_eq!(scott_bandwidth(&[]), MIN_BANDWIDTH);
        assert_eq!(scott_bandwidth(&[50.0]), MIN_BANDWIDTH);
        assert_eq!(scott_bandwidth(&[50.0, 50.0, 50.0]), MIN_BANDWIDTH);
    }

    #[test]
    fn bandwidth_follows_scotts_rule() {
        // Sample std of [0, 40, 80, 120] is 51.64; n^(-1/6) for n=4 is 0.7937.
        let bw = scott_bandwidth(&[0.0, 40.0, 80.0, 120.0]);
        assert!((bw - 51.6398 * 0.7937).abs() < 0.01, "{bw}");
    }

    #[test]
    fn density_peaks_at_the_cluster() {
        let points: Vec<ActionPoint> =
            (0..10).map(|i| ActionPoint { x: 100.0 + i as f64 * 0.1, y: 20.0 }).collect();
        let grid = DensityGrid::compute(&points, 12, 8);
        let max = grid.values.iter().cloned().fold(0.0, f64::max);
        assert!((max - 1.0).abs() < 1e-9);
        // x 100 -> column 10 of 12, y 20 -> row 2 of 8.
        assert!(grid.get(10, 2) > 0.9);
        assert!(grid.get(0, 7) < THRESHOLD);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let grid = DensityGrid::compute(&[], 6, 4);
        assert_eq!(grid.values.len(), 24);
        assert!(grid.values.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn shade_skips_faint_density_and_brightens_with_value() {
        assert_eq!(shade(0.0), None);
        assert_eq!(shade(THRESHOLD / 2.0), None);
        let Some(Color::Rgb(r_lo, ..)) = shade(0.1) else { panic!() };
        let Some(Color::Rgb(r_hi, g_hi, _)) = shade(1.0) else { panic!() };
        assert!(r_hi > r_lo);
        // Brightest inferno stop blended at 60% over the pitch.
        assert_eq!((r_hi, g_hi), (165, 173));
    }

    #[test]
    fn render_paints_lines_and_density() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let points = [ActionPoint { x: 60.0, y: 40.0 }];
        Heatmap { points: &points }.render(area, &mut buf);

        // Outline corners live on the top row.
        assert_eq!(buf[(5, 0)].symbol(), "─");
        assert_eq!(buf[(0, 5)].symbol(), "│");
        // Density around the centre spot is painted brighter than the grass.
        assert_ne!(buf[(29, 9)].bg, Color::Rgb(PITCH_COLOR.0, PITCH_COLOR.1, PITCH_COLOR.2));
        assert_eq!(buf[(2, 2)].bg, Color::Rgb(PITCH_COLOR.0, PITCH_COLOR.1, PITCH_COLOR.2));
    }
}
