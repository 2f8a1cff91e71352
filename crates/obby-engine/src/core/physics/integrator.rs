use super::body::Kinematics;

/// Semi-implicit Euler on the vertical axis.
/// Records `previous_y` first so the landing resolver can see where the
/// body came from.
pub fn integrate_vertical(body: &mut Kinematics, gravity: f32, dt: f32) {
    body.previous_y = body.position.y;
    body.vertical_velocity += gravity * dt;
    body.position.y += body.vertical_velocity * dt;
}
