/// Per-frame displacement in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0.0, dy: 0.0 };

    pub fn speed(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// The player's circular body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Actor {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Actor {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Moves `actor` by `velocity` one axis at a time.
///
/// X is tried first at the current Y, then Y at the (possibly updated) X. A
/// blocked axis keeps its coordinate and has its velocity component zeroed,
/// while the other axis still moves, so diagonal input slides along walls.
pub fn step<F>(actor: &mut Actor, velocity: &mut Velocity, collision_test: F)
where
    F: Fn(f64, f64) -> bool,
{
    let new_x = actor.x + velocity.dx;
    let new_y = actor.y + velocity.dy;

    if collision_test(new_x, actor.y) {
        velocity.dx = 0.0;
    } else {
        actor.x = new_x;
    }

    if collision_test(actor.x, new_y) {
        velocity.dy = 0.0;
    } else {
        actor.y = new_y;
    }
}
