use crate::components::pitch;
use crate::state::analysis::ShotPoint;
use statsbomb_api::{PITCH_LENGTH, PITCH_WIDTH};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Color;
use tui::symbols::Marker;
use tui::widgets::Widget;
use tui::widgets::canvas::{Canvas, Circle, Line, Points};

pub const GRASS: Color = Color::Rgb(0xaa, 0xbb, 0x97);
/// Canvas radius per square root of marker size. Marker size is an area, so
/// the radius grows with its root.
const RADIUS_PER_ROOT_SIZE: f64 = 0.12;
/// Gap between the concentric rings that fill a marker.
const FILL_STEP: f64 = 0.35;

pub fn marker_radius(size: f64) -> f64 {
    size.max(0.0).sqrt() * RADIUS_PER_ROOT_SIZE
}

/// Shots on a StatsBomb pitch, one filled disc per shot sized by xG. Goals
/// are yellow, everything else red.
pub struct ShotMap<'a> {
    pub shots: &'a [ShotPoint],
}

impl Widget for ShotMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = pitch::fit_area(area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(GRASS)
            .x_bounds([0.0, PITCH_LENGTH])
            .y_bounds([0.0, PITCH_WIDTH])
            .paint(|ctx| {
                for s in pitch::markings() {
                    let (x1, y1) = pitch::to_canvas(s.x1, s.y1);
                    let (x2, y2) = pitch::to_canvas(s.x2, s.y2);
                    ctx.draw(&Line { x1, y1, x2, y2, color: Color::White });
                }
                ctx.draw(&Points { coords: &pitch::penalty_spots(), color: Color::White });
                ctx.layer();

                for shot in self.shots {
                    let (x, y) = pitch::to_canvas(shot.x, shot.y);
                    let radius = marker_radius(shot.size);
                    let fill = if shot.is_goal { Color::Yellow } else { Color::Red };
                    let mut r = radius - FILL_STEP;
                    while r > 0.0 {
                        ctx.draw(&Circle { x, y, radius: r, color: fill });
                        r -= FILL_STEP;
                    }
                    ctx.draw(&Circle { x, y, radius, color: fill });
                    ctx.draw(&Points { coords: &[(x, y)], color: fill });
                }
            })
            .render(area, buf);
    }
}
