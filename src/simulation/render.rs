//! Read-only renderers
//!
//! A renderer draws a snapshot of the tick; nothing it does feeds back into
//! simulation state.

use super::car::SimCar;
use super::geometry::Geometry;
use super::queues::QueueStore;
use super::types::{Direction, LaneSlot, LightState, Vec2};

/// Half-width of the road surface in world units
const ROAD_HALF_WIDTH: f32 = 2.0;

/// Read-only view of one tick handed to renderers
pub struct RenderFrame<'a> {
    pub tick: u64,
    pub light: LightState,
    pub allowed: [Direction; 2],
    pub active: &'a [SimCar],
    pub queues: &'a QueueStore,
    pub geometry: &'a Geometry,
}

/// Consumes per-tick snapshots; no return value feeds the engine
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>);
}

/// Terminal map of the intersection
pub struct AsciiRenderer {
    /// Character cells per world unit
    pub scale: f32,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { scale: 3.0 }
    }

    /// Draw the frame into a string, top row at the north edge
    pub fn draw(&self, frame: &RenderFrame<'_>) -> String {
        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for direction in Direction::ALL {
            for lane in LaneSlot::ALL {
                let position = frame.geometry.position(direction, lane);
                min_x = min_x.min(position.x);
                max_x = max_x.max(position.x);
                min_y = min_y.min(position.y);
                max_y = max_y.max(position.y);
            }
        }
        min_x -= 1.0;
        max_x += 1.0;
        min_y -= 1.0;
        max_y += 1.0;

        let width = ((max_x - min_x) * self.scale).round() as usize + 1;
        let height = ((max_y - min_y) * self.scale).round() as usize + 1;
        let mut grid = vec![vec![' '; width]; height];

        // Road surface
        for (row, cells) in grid.iter_mut().enumerate() {
            let y = max_y - row as f32 / self.scale;
            for (col, cell) in cells.iter_mut().enumerate() {
                let x = min_x + col as f32 / self.scale;
                if x.abs() <= ROAD_HALF_WIDTH || y.abs() <= ROAD_HALF_WIDTH {
                    *cell = '.';
                }
            }
        }

        let to_grid = |position: &Vec2| -> (usize, usize) {
            let col = ((position.x - min_x) * self.scale).round() as usize;
            let row = ((max_y - position.y) * self.scale).round() as usize;
            (row.min(height - 1), col.min(width - 1))
        };

        // Lane anchor points
        for direction in Direction::ALL {
            for lane in LaneSlot::ALL {
                let (row, col) = to_grid(&frame.geometry.position(direction, lane));
                grid[row][col] = '+';
            }
        }

        // Cars, drawn as their travel heading
        for car in frame.active {
            let (row, col) = to_grid(&car.position);
            grid[row][col] = car.travel_direction.label().chars().next().unwrap_or('?');
        }

        let mut out = String::new();
        out.push_str(&format!(
            "tick {} | light {} | green: {} {}\n",
            frame.tick,
            frame.light,
            frame.allowed[0].label(),
            frame.allowed[1].label()
        ));
        for direction in Direction::ALL {
            let left = frame.queues.lane_len(direction, LaneSlot::Left);
            let straight = frame.queues.lane_len(direction, LaneSlot::StraightForward)
                + frame.queues.lane_len(direction, LaneSlot::Right);
            out.push_str(&format!(
                "{} left:{} straight:{}  ",
                direction.label(),
                left,
                straight
            ));
        }
        out.push('\n');
        for row in &grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        println!("{}", self.draw(frame));
    }
}
