// End-to-end tests driving a `GameSession` through its public API, the same
// way the browser adapter does: pointer events in, ticks, render sink out.

use std::collections::{HashMap, VecDeque};

use love_maze::geometry::Obstacle;
use love_maze::maze::{Grid, Side};
use love_maze::{ConfigError, FrameView, GameConfig, GameSession, Layout, RenderSink, WIN_MESSAGE};

#[derive(Default)]
struct RecordingSink {
    mazes: usize,
    wins: Vec<String>,
    hides: usize,
    last_frame: Option<FrameView>,
}

impl RenderSink for RecordingSink {
    fn draw_maze(&mut self, _layout: &Layout, _obstacles: &[Obstacle]) {
        self.mazes += 1;
    }
    fn draw_frame(&mut self, frame: &FrameView) {
        self.last_frame = Some(*frame);
    }
    fn show_win(&mut self, message: &str) {
        self.wins.push(message.to_string());
    }
    fn hide_win(&mut self) {
        self.hides += 1;
    }
}

fn shortest_path(grid: &Grid) -> Vec<(usize, usize)> {
    let (entry, exit) = (grid.entry(), grid.exit());
    let mut came_from = HashMap::from([(entry, entry)]);
    let mut queue = VecDeque::from([entry]);
    while let Some(cur) = queue.pop_front() {
        if cur == exit {
            break;
        }
        for next in grid.open_neighbors(cur.0, cur.1) {
            if !came_from.contains_key(&next) {
                came_from.insert(next, cur);
                queue.push_back(next);
            }
        }
    }
    let mut path = vec![exit];
    let mut cur = exit;
    while cur != entry {
        cur = came_from[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}

/// Joystick-local pointer position pushing at full force toward (dx, dy).
fn push(dx: isize, dy: isize) -> (f64, f64) {
    (60.0 + dx as f64 * 50.0, 60.0 + dy as f64 * 50.0)
}

fn walk_to_goal(session: &mut GameSession, sink: &mut RecordingSink) {
    let path = shortest_path(session.round().grid());
    assert_eq!(path.first(), Some(&(0, 0)));
    assert_eq!(path.last(), Some(&(19, 11)));

    let cell = session.layout().cell_size;
    let ticks_per_cell = (cell / session.config().player_speed) as usize;

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let (x, y) = push(
            to.0 as isize - from.0 as isize,
            to.1 as isize - from.1 as isize,
        );
        if session.joystick().is_active() {
            session.pointer_move(x, y);
        } else {
            session.pointer_down(x, y);
        }
        for _ in 0..ticks_per_cell {
            session.tick(sink);
        }
        if session.won() {
            return;
        }
        let (tx, ty) = session.layout().cell_center(to.0, to.1);
        let actor = session.round().actor();
        assert!(
            (actor.x - tx).abs() < 1e-6 && (actor.y - ty).abs() < 1e-6,
            "stuck at ({}, {}) heading for {:?}",
            actor.x,
            actor.y,
            to
        );
    }
}

#[test]
fn reference_layout_places_start_and_goal() {
    let session = GameSession::new(GameConfig::default(), 800.0, Some(1)).expect("valid");
    let layout = session.layout();
    assert_eq!(layout.cell_size, 40.0);
    assert_eq!((layout.area_width, layout.area_height), (800.0, 480.0));
    let round = session.round();
    assert_eq!((round.actor().x, round.actor().y), (20.0, 20.0));
    assert_eq!((round.goal().x, round.goal().y), (780.0, 460.0));
    assert!((round.actor().radius + round.goal().radius - 28.0).abs() < 1e-9);
}

#[test]
fn walking_the_maze_reaches_the_goal_once() {
    let mut session = GameSession::new(GameConfig::default(), 800.0, Some(77)).expect("valid");
    let mut sink = RecordingSink::default();
    walk_to_goal(&mut session, &mut sink);

    assert!(session.won());
    assert_eq!(sink.wins, vec![WIN_MESSAGE.to_string()]);
    let actor = *session.round().actor();
    assert!(actor.distance_to(780.0, 460.0) < 28.0);
    assert!(session.round().velocity().is_zero());
    assert!(!session.joystick().is_active());

    // Further ticks and input neither move the actor nor repeat the message.
    session.pointer_down(110.0, 60.0);
    for _ in 0..20 {
        session.tick(&mut sink);
    }
    assert_eq!(sink.wins.len(), 1);
    assert_eq!(*session.round().actor(), actor);
    assert!(sink.last_frame.expect("frames were drawn").won);
}

#[test]
fn restart_after_win_builds_a_fresh_round() {
    let mut session = GameSession::new(GameConfig::default(), 800.0, Some(5)).expect("valid");
    let mut sink = RecordingSink::default();
    walk_to_goal(&mut session, &mut sink);
    assert!(session.won());
    let old_grid = session.round().grid().clone();

    session.restart();
    assert!(!session.won());
    assert_eq!(
        (session.round().actor().x, session.round().actor().y),
        (20.0, 20.0)
    );
    assert_ne!(session.round().grid(), &old_grid);
    assert_eq!(session.round().grid().removed_wall_count(), 20 * 12 - 1);

    let mazes_before = sink.mazes;
    let hides_before = sink.hides;
    session.tick(&mut sink);
    assert_eq!(sink.mazes, mazes_before + 1);
    assert_eq!(sink.hides, hides_before + 1);
    assert!(!sink.last_frame.expect("frame drawn").won);
}

#[test]
fn seeded_sessions_are_reproducible() {
    let a = GameSession::new(GameConfig::default(), 800.0, Some(314)).expect("valid");
    let b = GameSession::new(GameConfig::default(), 800.0, Some(314)).expect("valid");
    assert_eq!(a.round().grid(), b.round().grid());
    assert_eq!(a.round().obstacles(), b.round().obstacles());
}

#[test]
fn diagonal_push_against_the_outer_wall_slides_along_it() {
    let mut session = GameSession::new(GameConfig::default(), 800.0, Some(9)).expect("valid");
    let mut sink = RecordingSink::default();
    // The entry cell is walled above and to the left; at least one of its
    // right/bottom edges is open. Push diagonally into the outer wall along
    // the open corridor.
    let right_open = !session.round().grid().has_wall(0, 0, Side::Right);
    let (px, py) = if right_open { push(1, -1) } else { push(-1, 1) };
    session.pointer_down(px, py);
    for _ in 0..10 {
        session.tick(&mut sink);
    }
    let actor = *session.round().actor();
    let v = session.round().velocity();
    if right_open {
        assert_eq!(v.dy, 0.0);
        assert!(v.dx > 0.0);
        assert!(actor.y >= 16.0 && actor.y < 20.0);
        assert!(actor.x > 40.0);
    } else {
        assert_eq!(v.dx, 0.0);
        assert!(v.dy > 0.0);
        assert!(actor.x >= 16.0 && actor.x < 20.0);
        assert!(actor.y > 40.0);
    }
}

#[test]
fn invalid_configuration_refuses_to_start() {
    let zero = GameConfig {
        grid_width: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        GameSession::new(zero, 800.0, Some(1)),
        Err(ConfigError::ZeroGridDimension { .. })
    ));
    assert!(matches!(
        GameSession::new(GameConfig::default(), 0.0, Some(1)),
        Err(ConfigError::PlayAreaTooSmall { .. })
    ));
    assert!(matches!(
        GameSession::new(GameConfig::default(), -40.0, Some(1)),
        Err(ConfigError::PlayAreaTooSmall { .. })
    ));
}

#[test]
fn resize_regenerates_at_the_new_scale() {
    let mut session = GameSession::new(GameConfig::default(), 800.0, Some(3)).expect("valid");
    session.pointer_down(110.0, 60.0);
    session.resize(1200.0).expect("wider area is fine");
    assert_eq!(session.layout().cell_size, 60.0);
    assert_eq!(
        (session.round().actor().x, session.round().actor().y),
        (30.0, 30.0)
    );
    assert!(!session.joystick().is_active());
    assert!(session.round().velocity().is_zero());
}
