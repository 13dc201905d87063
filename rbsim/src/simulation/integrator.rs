//! Semi-implicit Euler integration and wall collisions
//!
//! Velocity is advanced first from the acceleration, position is then
//! advanced with the new velocity. Each runs in its own phase so every body
//! sees a fully updated neighbour set.

use super::states::{Body, Boundary, NVec2};

impl Body {
    /// v_n+1 = v_n + a * dt
    pub fn update_velocity(&mut self, acc: NVec2, dt: f64) {
        self.v += acc * dt;
    }

    /// x_n+1 = x_n + v_n+1 * dt
    pub fn update_position(&mut self, dt: f64) {
        self.x += self.v * dt;
    }

    /// Clamp onto any crossed edge and reflect the perpendicular velocity
    /// Each edge is checked independently, so a corner crossing reflects both axes
    pub fn resolve_boundary_collision(&mut self, boundary: &Boundary) {
        if boundary.crossed_right(&self.x) {
            self.x.x = boundary.x1();
            self.v.x = -self.v.x;
        } else if boundary.crossed_left(&self.x) {
            self.x.x = boundary.x0();
            self.v.x = -self.v.x;
        }

        if boundary.crossed_top(&self.x) {
            self.x.y = boundary.y1();
            self.v.y = -self.v.y;
        } else if boundary.crossed_bottom(&self.x) {
            self.x.y = boundary.y0();
            self.v.y = -self.v.y;
        }
    }
}
