//! Browser adapter: DOM lookup, canvas rendering, pointer/resize/restart
//! wiring and the `requestAnimationFrame` loop. The only module touching
//! `web_sys`; everything it does funnels into `GameSession`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, PointerEvent, window,
};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::geometry::Obstacle;
use crate::render::{FrameView, RenderSink};
use crate::session::{GameSession, Layout};

const HANDLE_SIZE: f64 = 50.0;

/// Page state for the latest launch. `session` stays `None` while the game
/// area is too narrow for `config`; each resize tries again.
struct WebGame {
    config: GameConfig,
    session: Option<GameSession>,
    renderer: CanvasRenderer,
}

impl WebGame {
    /// Fits the session to the current game-area width, creating it if needed.
    fn fit_to_area(&mut self) -> Result<(), ConfigError> {
        let width = self.renderer.game_area.offset_width() as f64;
        match self.session.as_mut() {
            Some(session) => session.resize(width),
            None => {
                self.session = Some(GameSession::new(self.config.clone(), width, None)?);
                Ok(())
            }
        }
    }
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
    static LOOP_STARTED: Cell<bool> = const { Cell::new(false) };
    static RESIZE_TIMER: Cell<Option<i32>> = const { Cell::new(None) };
}

fn js_err(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

// --- Canvas renderer ---------------------------------------------------------

struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game_area: HtmlElement,
    message: HtmlElement,
    restart: HtmlElement,
    pad: HtmlElement,
    handle: HtmlElement,
    layout: Option<Layout>,
    obstacles: Vec<Obstacle>,
}

impl CanvasRenderer {
    fn draw_walls(&self) {
        self.ctx.set_fill_style_str("#ff4d6d");
        for o in &self.obstacles {
            self.ctx.fill_rect(o.x, o.y, o.width, o.height);
        }
    }

    fn disc(&self, x: f64, y: f64, r: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        if self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn draw_maze(&mut self, layout: &Layout, obstacles: &[Obstacle]) {
        self.canvas.set_width(layout.area_width as u32);
        self.canvas.set_height(layout.area_height as u32);
        self.game_area
            .style()
            .set_property("height", &format!("{}px", layout.area_height))
            .ok();
        self.layout = Some(*layout);
        self.obstacles = obstacles.to_vec();
    }

    fn draw_frame(&mut self, frame: &FrameView) {
        let Some(layout) = self.layout else {
            return;
        };
        self.ctx.set_fill_style_str("#fff0f3");
        self.ctx
            .fill_rect(0.0, 0.0, layout.area_width, layout.area_height);
        self.draw_walls();

        // Goal glow first so the player sits on top once they overlap.
        self.disc(frame.goal.x, frame.goal.y, frame.goal.radius, "#ff8fab");
        self.ctx.set_font(&format!("{}px serif", (layout.cell_size * 0.6).floor()));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text("❤", frame.goal.x, frame.goal.y).ok();
        self.disc(frame.actor.x, frame.actor.y, frame.actor.radius, "#c9184a");

        let (hx, hy) = frame.handle;
        let style = self.handle.style();
        style
            .set_property("left", &format!("{}px", hx - HANDLE_SIZE / 2.0))
            .ok();
        style
            .set_property("top", &format!("{}px", hy - HANDLE_SIZE / 2.0))
            .ok();
    }

    fn show_win(&mut self, message: &str) {
        self.message.set_text_content(Some(message));
        self.message.style().set_property("opacity", "1").ok();
        let style = self.restart.style();
        style.set_property("opacity", "1").ok();
        style.set_property("pointer-events", "all").ok();
    }

    fn hide_win(&mut self) {
        self.message.style().set_property("opacity", "0").ok();
        let style = self.restart.style();
        style.set_property("opacity", "0").ok();
        style.set_property("pointer-events", "none").ok();
    }
}

// --- DOM setup ---------------------------------------------------------------

/// Returns the element with `id`, creating it under `parent` when absent.
fn find_or_create(
    doc: &Document,
    parent: &HtmlElement,
    tag: &str,
    id: &str,
    style: &str,
) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el.dyn_into()?);
    }
    let el: HtmlElement = doc.create_element(tag)?.dyn_into()?;
    el.set_id(id);
    el.set_attribute("style", style)?;
    parent.append_child(&el)?;
    Ok(el)
}

fn build_renderer(doc: &Document) -> Result<CanvasRenderer, JsValue> {
    let body = doc.body().ok_or_else(|| js_err("no body"))?;
    let game_area = find_or_create(
        doc,
        &body,
        "div",
        "game-area",
        "position:relative; width:min(92vw, 800px); margin:24px auto;",
    )?;
    let canvas: HtmlCanvasElement = find_or_create(
        doc,
        &game_area,
        "canvas",
        "maze-canvas",
        "display:block; border-radius:8px; box-shadow:0 0 24px rgba(201,24,74,0.25);",
    )?
    .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| js_err("no 2d context"))?
        .dyn_into()?;
    let message = find_or_create(
        doc,
        &game_area,
        "div",
        "message",
        "position:absolute; left:50%; top:40%; transform:translate(-50%,-50%); width:80%; padding:16px; text-align:center; white-space:pre-line; background:rgba(255,255,255,0.92); border-radius:12px; color:#c9184a; font-size:18px; opacity:0; transition:opacity 0.6s; pointer-events:none;",
    )?;
    let restart = find_or_create(
        doc,
        &game_area,
        "button",
        "restart",
        "position:absolute; left:50%; top:75%; transform:translateX(-50%); padding:8px 20px; opacity:0; pointer-events:none; transition:opacity 0.6s;",
    )?;
    if restart.text_content().unwrap_or_default().is_empty() {
        restart.set_text_content(Some("Play again"));
    }
    let pad = find_or_create(
        doc,
        &body,
        "div",
        "joystick",
        "position:relative; margin:12px auto; border-radius:50%; background:rgba(201,24,74,0.15); touch-action:none;",
    )?;
    let handle = find_or_create(
        doc,
        &pad,
        "div",
        "joystick-handle",
        &format!(
            "position:absolute; width:{0}px; height:{0}px; border-radius:50%; background:#c9184a; pointer-events:none;",
            HANDLE_SIZE
        ),
    )?;

    Ok(CanvasRenderer {
        canvas,
        ctx,
        game_area,
        message,
        restart,
        pad,
        handle,
        layout: None,
        obstacles: Vec::new(),
    })
}

/// Applies the per-launch sizes: the game area never shrinks below the
/// narrowest playable width and the pad is centred on the joystick centre.
fn size_to_config(renderer: &CanvasRenderer, config: &GameConfig) -> Result<(), JsValue> {
    let min_width = Layout::min_area_width(config).map_err(|e| js_err(&e.to_string()))?;
    renderer
        .game_area
        .style()
        .set_property("min-width", &format!("{}px", min_width))?;
    let (w, h) = config.joystick.pad_size();
    let style = renderer.pad.style();
    style.set_property("width", &format!("{}px", w))?;
    style.set_property("height", &format!("{}px", h))?;
    Ok(())
}

// --- Event wiring ------------------------------------------------------------

fn with_game(f: impl FnOnce(&mut WebGame)) {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            f(game);
        }
    });
}

fn with_session(f: impl FnOnce(&mut GameSession)) {
    with_game(|g| {
        if let Some(session) = g.session.as_mut() {
            f(session);
        }
    });
}

fn listen_pointer(
    target: &HtmlElement,
    event: &str,
    mut handler: impl FnMut(PointerEvent) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: PointerEvent| handler(evt)) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_joystick(doc: &Document) -> Result<(), JsValue> {
    let base: HtmlElement = doc
        .get_element_by_id("joystick")
        .ok_or_else(|| js_err("no joystick"))?
        .dyn_into()?;

    // Joystick-local coordinates relative to the pad's bounding box.
    let local = {
        let base = base.clone();
        move |evt: &PointerEvent| {
            let rect = base.get_bounding_client_rect();
            (
                evt.client_x() as f64 - rect.left(),
                evt.client_y() as f64 - rect.top(),
            )
        }
    };

    {
        let local = local.clone();
        let base_capture = base.clone();
        listen_pointer(&base, "pointerdown", move |evt| {
            base_capture.set_pointer_capture(evt.pointer_id()).ok();
            let (x, y) = local(&evt);
            with_session(|s| s.pointer_down(x, y));
        })?;
    }
    listen_pointer(&base, "pointermove", move |evt| {
        let (x, y) = local(&evt);
        with_session(|s| s.pointer_move(x, y));
    })?;
    listen_pointer(&base, "pointerup", |_| with_session(|s| s.pointer_up()))?;
    listen_pointer(&base, "pointerleave", |_| with_session(|s| s.pointer_leave()))?;
    Ok(())
}

fn wire_restart(doc: &Document) -> Result<(), JsValue> {
    let button = doc
        .get_element_by_id("restart")
        .ok_or_else(|| js_err("no restart button"))?;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        with_session(|s| s.restart());
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn apply_resize() {
    with_game(|g| {
        if let Err(e) = g.fit_to_area() {
            error!("resize ignored: {}", e);
        }
    });
}

/// Debounce of the latest launch; read per event so a relaunch takes effect.
fn resize_debounce_ms() -> i32 {
    GAME.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(GameConfig::default().resize_debounce_ms, |g| {
                g.config.resize_debounce_ms
            })
    })
}

fn wire_resize() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| js_err("no window"))?;
    let settle: Rc<Closure<dyn FnMut()>> = Rc::new(Closure::wrap(Box::new(|| {
        RESIZE_TIMER.with(|t| t.set(None));
        apply_resize();
    }) as Box<dyn FnMut()>));

    let win_inner = win.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(pending) = RESIZE_TIMER.with(|t| t.take()) {
            win_inner.clear_timeout_with_handle(pending);
        }
        let settle_fn: &JsValue = (*settle).as_ref();
        match win_inner.set_timeout_with_callback_and_timeout_and_arguments_0(
            settle_fn.unchecked_ref(),
            resize_debounce_ms(),
        ) {
            Ok(handle) => RESIZE_TIMER.with(|t| t.set(Some(handle))),
            Err(_) => apply_resize(),
        }
    }) as Box<dyn FnMut()>);
    win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- Frame loop --------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    if LOOP_STARTED.with(|s| s.replace(true)) {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        with_game(|game| {
            if let Some(session) = game.session.as_mut() {
                session.tick(&mut game.renderer);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Builds (or rebuilds) the page and starts playing with `config`.
///
/// An invalid config leaves any running game alone. A valid config that does
/// not fit the current width still installs the page and its listeners and
/// returns the sizing error; the next resize that fits starts the game.
pub fn launch(config: GameConfig) -> Result<(), JsValue> {
    config.validate().map_err(|e| js_err(&e.to_string()))?;
    let win = window().ok_or_else(|| js_err("no window"))?;
    let doc = win.document().ok_or_else(|| js_err("no document"))?;

    let first_launch = GAME.with(|cell| cell.borrow().is_none());
    let renderer = build_renderer(&doc)?;
    size_to_config(&renderer, &config)?;
    GAME.with(|cell| {
        *cell.borrow_mut() = Some(WebGame {
            config,
            session: None,
            renderer,
        })
    });

    if first_launch {
        wire_joystick(&doc)?;
        wire_restart(&doc)?;
        wire_resize()?;
    }
    start_frame_loop();

    let mut started = Ok(());
    with_game(|g| started = g.fit_to_area());
    started.map_err(|e| {
        error!("waiting for a wider play area: {}", e);
        js_err(&e.to_string())
    })
}

pub fn restart() {
    with_session(|s| s.restart());
}

#[cfg(feature = "serde_json")]
pub fn layout_json() -> Result<String, JsValue> {
    GAME.with(|cell| {
        let cell = cell.borrow();
        let session = cell
            .as_ref()
            .and_then(|g| g.session.as_ref())
            .ok_or_else(|| js_err("game not started"))?;
        session.layout_json().map_err(|e| js_err(&e.to_string()))
    })
}
