//! Round orchestration: sizing, maze generation with a bounded retry loop,
//! spawn placement, the per-frame tick and win detection.
//!
//! A `GameSession` lives for the whole page. Every start (first load, restart
//! button, window resize) throws away the previous `Round` and builds a new
//! one from scratch; nothing from the old maze is reused.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::geometry::{self, Bounds, Obstacle};
use crate::input::Joystick;
use crate::maze::{self, Grid};
use crate::motion::{self, Actor, Velocity};
use crate::render::{FrameView, RenderSink};

pub const WIN_MESSAGE: &str = "Even if I could gather every word from every language in the universe, it still wouldn't be enough to express the depth of my love for you.\n\nWill you be my Valentine's Date? ❤️";

/// Pixel sizing derived from the configured grid and the available width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: f64,
    pub wall_thickness: f64,
    pub area_width: f64,
    pub area_height: f64,
    pub player_radius: f64,
    pub goal_radius: f64,
}

impl Layout {
    pub fn new(config: &GameConfig, available_width: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        let cell_size = (available_width / config.grid_width as f64).floor();
        if !(cell_size.is_finite() && cell_size >= 1.0) {
            return Err(ConfigError::PlayAreaTooSmall {
                area_width: available_width,
                grid_width: config.grid_width,
            });
        }
        let player_radius = config.player_radius_ratio * cell_size;
        if !corridor_fits(config, cell_size) {
            return Err(ConfigError::CorridorTooNarrow {
                cell_size,
                wall_thickness: config.wall_thickness,
                player_radius,
            });
        }
        Ok(Self {
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            cell_size,
            wall_thickness: config.wall_thickness,
            area_width: config.grid_width as f64 * cell_size,
            area_height: config.grid_height as f64 * cell_size,
            player_radius,
            goal_radius: config.goal_radius_ratio * cell_size,
        })
    }

    /// Narrowest play area `new` accepts for `config`: the grid width times
    /// the smallest whole cell whose corridor still fits the player.
    pub fn min_area_width(config: &GameConfig) -> Result<f64, ConfigError> {
        config.validate()?;
        let free = 1.0 - 2.0 * config.player_radius_ratio;
        let mut cell = (2.0 * config.wall_thickness / free).floor().max(1.0);
        while !corridor_fits(config, cell) {
            cell += 1.0;
        }
        while cell > 1.0 && corridor_fits(config, cell - 1.0) {
            cell -= 1.0;
        }
        Ok(config.grid_width as f64 * cell)
    }

    pub fn cell_center(&self, x: usize, y: usize) -> (f64, f64) {
        let half = self.cell_size / 2.0;
        (
            x as f64 * self.cell_size + half,
            y as f64 * self.cell_size + half,
        )
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.area_width,
            height: self.area_height,
        }
    }
}

/// Room left between the inset walls of a cell must exceed the player's diameter.
fn corridor_fits(config: &GameConfig, cell_size: f64) -> bool {
    cell_size - 2.0 * config.wall_thickness > 2.0 * config.player_radius_ratio * cell_size
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Goal {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Everything that belongs to one maze: replaced wholesale on every start.
#[derive(Clone, Debug)]
pub struct Round {
    grid: Grid,
    obstacles: Vec<Obstacle>,
    actor: Actor,
    goal: Goal,
    velocity: Velocity,
    won: bool,
    attempts: u32,
}

/// Carves passages into a fully walled grid.
type Carver = fn(&mut Grid, &mut StdRng);

impl Round {
    fn generate(config: &GameConfig, layout: &Layout, rng: &mut StdRng, carve: Carver) -> Self {
        let mut attempts = 0;
        let grid = loop {
            attempts += 1;
            let mut grid = Grid::new(config.grid_width, config.grid_height);
            carve(&mut grid, rng);
            if maze::is_solvable(&grid, grid.entry(), grid.exit()) {
                break grid;
            }
            if attempts >= config.max_generation_attempts {
                warn!(
                    "no solvable maze after {} attempts, keeping the last one",
                    attempts
                );
                break grid;
            }
        };

        let obstacles = geometry::build_obstacles(&grid, layout.cell_size, layout.wall_thickness);
        let (ex, ey) = grid.entry();
        let (sx, sy) = layout.cell_center(ex, ey);
        let (gx, gy) = grid.exit();
        let (goal_x, goal_y) = layout.cell_center(gx, gy);

        info!(
            "maze {}x{} ready after {} attempt(s): {} wall segments, cell {}px",
            grid.width(),
            grid.height(),
            attempts,
            obstacles.len(),
            layout.cell_size
        );

        Self {
            grid,
            obstacles,
            actor: Actor {
                x: sx,
                y: sy,
                radius: layout.player_radius,
            },
            goal: Goal {
                x: goal_x,
                y: goal_y,
                radius: layout.goal_radius,
            },
            velocity: Velocity::ZERO,
            won: false,
            attempts,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn won(&self) -> bool {
        self.won
    }

    /// Generation attempts spent on this maze.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// True when the actor overlaps the goal disc.
    pub fn goal_in_reach(&self) -> bool {
        self.actor.distance_to(self.goal.x, self.goal.y) < self.actor.radius + self.goal.radius
    }
}

pub struct GameSession {
    config: GameConfig,
    layout: Layout,
    rng: StdRng,
    joystick: Joystick,
    round: Round,
    // Set by `start`; the next tick pushes the new maze to the sink.
    maze_dirty: bool,
}

impl GameSession {
    /// Validates `config`, sizes the play area and builds the first round.
    /// `seed` makes the maze sequence reproducible; `None` draws from OS entropy.
    pub fn new(
        config: GameConfig,
        available_width: f64,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let layout = Layout::new(&config, available_width)?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let round = Round::generate(&config, &layout, &mut rng, maze::generate::<StdRng>);
        let joystick = Joystick::new(config.joystick.clone(), config.player_speed);
        Ok(Self {
            config,
            layout,
            rng,
            joystick,
            round,
            maze_dirty: true,
        })
    }

    /// Builds a fresh round and resets the joystick.
    pub fn start(&mut self) {
        self.round = Round::generate(
            &self.config,
            &self.layout,
            &mut self.rng,
            maze::generate::<StdRng>,
        );
        self.joystick.release();
        self.maze_dirty = true;
    }

    pub fn restart(&mut self) {
        debug!("restart requested");
        self.start();
    }

    /// Re-derives sizing for the new width and regenerates the maze. On error
    /// the current round is kept untouched.
    pub fn resize(&mut self, available_width: f64) -> Result<(), ConfigError> {
        let layout = Layout::new(&self.config, available_width)?;
        debug!(
            "resized to {}px wide, cell {}px",
            available_width, layout.cell_size
        );
        self.layout = layout;
        self.start();
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn won(&self) -> bool {
        self.round.won
    }

    /// Current maze geometry as JSON, for renderers living outside the crate.
    #[cfg(feature = "serde_json")]
    pub fn layout_json(&self) -> serde_json::Result<String> {
        let layout = &self.layout;
        serde_json::to_string(&serde_json::json!({
            "cellSize": layout.cell_size,
            "width": layout.area_width,
            "height": layout.area_height,
            "playerRadius": layout.player_radius,
            "goal": { "x": self.round.goal.x, "y": self.round.goal.y, "radius": self.round.goal.radius },
            "start": { "x": self.round.actor.x, "y": self.round.actor.y },
            "walls": self.round.obstacles,
        }))
    }

    // --- Input -------------------------------------------------------------

    /// Pointer pressed on the pad at joystick-local (x, y).
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.round.won {
            return;
        }
        self.round.velocity = self.joystick.press(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.round.won {
            return;
        }
        if let Some(v) = self.joystick.drag(x, y) {
            self.round.velocity = v;
        }
    }

    pub fn pointer_up(&mut self) {
        self.release_joystick();
    }

    /// Pointer left the pad; only a held pad is released.
    pub fn pointer_leave(&mut self) {
        if self.joystick.is_active() {
            self.release_joystick();
        }
    }

    fn release_joystick(&mut self) {
        self.joystick.release();
        self.round.velocity = Velocity::ZERO;
    }

    // --- Frame -------------------------------------------------------------

    /// One motion step for the held pad, using the round's obstacles.
    fn step_actor(&mut self) {
        let Round {
            obstacles,
            actor,
            velocity,
            ..
        } = &mut self.round;
        let obstacles = obstacles.as_slice();
        let radius = actor.radius;
        let bounds = self.layout.bounds();
        motion::step(actor, velocity, |x, y| {
            geometry::collides(x, y, radius, obstacles, bounds.width, bounds.height)
        });
    }

    /// Marks the round won the first time the actor reaches the goal.
    /// Returns true only on that transition, so callers can fire one-shot
    /// effects without guarding themselves.
    pub fn check_goal_reached(&mut self) -> bool {
        if self.round.won || !self.round.goal_in_reach() {
            return false;
        }
        self.round.won = true;
        self.release_joystick();
        debug!(
            "goal reached at ({:.1}, {:.1})",
            self.round.actor.x, self.round.actor.y
        );
        true
    }

    /// Single frame: move (while the pad is held), check the goal, render.
    pub fn tick<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        if self.maze_dirty {
            sink.hide_win();
            sink.draw_maze(&self.layout, &self.round.obstacles);
            self.maze_dirty = false;
        }
        if self.joystick.is_active() && !self.round.won {
            self.step_actor();
        }
        if self.check_goal_reached() {
            sink.show_win(WIN_MESSAGE);
        }
        sink.draw_frame(&FrameView {
            actor: self.round.actor,
            goal: self.round.goal,
            handle: self.joystick.handle(),
            won: self.round.won,
        });
    }
}
