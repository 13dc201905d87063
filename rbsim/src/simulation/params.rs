//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size `dt`,
//! - repulsion constant and the separation floor used against blow-ups,
//! - friction constant (0 disables drag)

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,              // step size
    pub repulsive_const: f64, // k in k * m1 * m2 / d^2
    pub friction_const: f64,  // drag coefficient
    pub min_distance: f64,    // separation floor
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 0.001,
            repulsive_const: 0.01,
            friction_const: 1.0,
            min_distance: 0.01,
        }
    }
}
