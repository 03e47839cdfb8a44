//! Virtual joystick: turns a pointer offset from the pad centre into a
//! velocity and a separately clamped on-screen handle position.

use crate::config::JoystickConfig;
use crate::motion::Velocity;

/// Maps an offset from the joystick centre to a velocity.
///
/// The offset length is clamped to `max_magnitude`, the dead zone is
/// subtracted and the remainder normalised to `[0, 1]`, then scaled by
/// `speed_scale` along the offset direction.
pub fn map_input(offset: (f64, f64), dead_zone: f64, max_magnitude: f64, speed_scale: f64) -> Velocity {
    let (dx, dy) = offset;
    let distance = dx.hypot(dy);
    let clamped = distance.min(max_magnitude);
    if clamped <= dead_zone {
        return Velocity::ZERO;
    }
    let force = (clamped - dead_zone) / (max_magnitude - dead_zone);
    let angle = dy.atan2(dx);
    Velocity {
        dx: angle.cos() * speed_scale * force,
        dy: angle.sin() * speed_scale * force,
    }
}

/// Handle displacement for display, clamped to `visual_radius`. Has no say
/// in the velocity, whose range is usually shorter.
pub fn handle_offset(offset: (f64, f64), visual_radius: f64) -> (f64, f64) {
    let (dx, dy) = offset;
    let distance = dx.hypot(dy).min(visual_radius);
    let angle = dy.atan2(dx);
    (angle.cos() * distance, angle.sin() * distance)
}

/// Pointer state of the on-screen pad. Coordinates are joystick-local pixels.
#[derive(Clone, Debug)]
pub struct Joystick {
    config: JoystickConfig,
    speed: f64,
    active: bool,
    handle: (f64, f64),
}

impl Joystick {
    pub fn new(config: JoystickConfig, speed: f64) -> Self {
        let handle = (config.center_x, config.center_y);
        Self {
            config,
            speed,
            active: false,
            handle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle centre in joystick-local pixels.
    pub fn handle(&self) -> (f64, f64) {
        self.handle
    }

    pub fn press(&mut self, x: f64, y: f64) -> Velocity {
        self.active = true;
        self.track(x, y)
    }

    /// Pointer moved; `None` while the pad is not held.
    pub fn drag(&mut self, x: f64, y: f64) -> Option<Velocity> {
        self.active.then(|| self.track(x, y))
    }

    pub fn release(&mut self) {
        self.active = false;
        self.handle = (self.config.center_x, self.config.center_y);
    }

    fn track(&mut self, x: f64, y: f64) -> Velocity {
        let cfg = &self.config;
        let offset = (x - cfg.center_x, y - cfg.center_y);
        let (hx, hy) = handle_offset(offset, cfg.visual_radius);
        self.handle = (cfg.center_x + hx, cfg.center_y + hy);
        map_input(offset, cfg.dead_zone, cfg.max_distance, self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn inside_dead_zone_is_exactly_still() {
        assert_eq!(map_input((0.0, 0.0), 10.0, 40.0, 4.0), Velocity::ZERO);
        assert_eq!(map_input((6.0, 8.0), 10.0, 40.0, 4.0), Velocity::ZERO);
        assert_eq!(map_input((-3.0, 2.0), 10.0, 40.0, 4.0), Velocity::ZERO);
    }

    #[test]
    fn max_magnitude_gives_full_force() {
        let v = map_input((24.0, 32.0), 10.0, 40.0, 4.0);
        assert!((v.dx - 0.6 * 4.0).abs() < EPS);
        assert!((v.dy - 0.8 * 4.0).abs() < EPS);
        assert!((v.speed() - 4.0).abs() < EPS);
    }

    #[test]
    fn force_is_linear_between_dead_zone_and_max() {
        let v = map_input((25.0, 0.0), 10.0, 40.0, 4.0);
        assert!((v.dx - 2.0).abs() < EPS);
        assert!(v.dy.abs() < EPS);
    }

    #[test]
    fn beyond_max_is_clamped() {
        let v = map_input((0.0, -400.0), 10.0, 40.0, 4.0);
        assert!(v.dx.abs() < EPS);
        assert!((v.dy + 4.0).abs() < EPS);
    }

    #[test]
    fn handle_uses_its_own_clamp() {
        let (hx, hy) = handle_offset((55.0, 0.0), 70.0);
        assert!((hx - 55.0).abs() < EPS && hy.abs() < EPS);
        let (hx, _) = handle_offset((100.0, 0.0), 70.0);
        assert!((hx - 70.0).abs() < EPS);
    }

    #[test]
    fn joystick_tracks_only_while_pressed() {
        let mut stick = Joystick::new(JoystickConfig::default(), 4.0);
        assert_eq!(stick.drag(100.0, 60.0), None);
        assert_eq!(stick.handle(), (60.0, 60.0));

        let v = stick.press(100.0, 60.0);
        assert!(stick.is_active());
        assert!((v.dx - 4.0).abs() < EPS);
        assert!((stick.handle().0 - 100.0).abs() < EPS);

        let v = stick.drag(200.0, 60.0).expect("pad is held");
        assert!((v.dx - 4.0).abs() < EPS);
        assert!((stick.handle().0 - 130.0).abs() < EPS);

        stick.release();
        assert!(!stick.is_active());
        assert_eq!(stick.handle(), (60.0, 60.0));
    }
}
