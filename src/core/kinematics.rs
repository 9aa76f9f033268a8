use crate::domain::model::Velocity;

/// 速度分量的歐氏範數，單位與分量相同
pub fn speed(x_vel: f64, y_vel: f64, z_vel: f64) -> f64 {
    (x_vel * x_vel + y_vel * y_vel + z_vel * z_vel).sqrt()
}

pub fn velocity_speed(velocity: &Velocity) -> f64 {
    speed(velocity.x_dot, velocity.y_dot, velocity.z_dot)
}
