//! Bouncefield entry point
//!
//! Wires the page (canvas, buttons, sliders) to the simulation and runs the
//! frame loop. Natively it runs a short headless simulation instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, MouseEvent};

    use bouncefield::renderer::CanvasRenderer;
    use bouncefield::sim::{SimConfig, SimState, TickReport, tick};
    use bouncefield::ui::{Controls, mode_label};
    use bouncefield::{Settings, fit_canvas_side};

    /// Page instance holding all state
    struct Game {
        sim: SimState,
        controls: Controls,
        settings: Settings,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        report: TickReport,
    }

    impl Game {
        /// Advance one frame and draw it
        fn frame(&mut self) {
            self.report = tick(&mut self.sim, js_sys::Date::now());
            let draft = self.controls.draft_segment(&self.sim);
            if let Err(e) = self.renderer.render(&self.sim, draft) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.report.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("wallCount") {
                el.set_text_content(Some(&self.report.wall_count.to_string()));
            }
        }

        fn update_mode_display(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("currentMode") {
                let label = mode_label(
                    self.controls.tool,
                    self.sim.is_running(),
                    self.sim.has_gravity(),
                );
                el.set_text_content(Some(&label));
            }
            toggle_button_active("addWallBtn", self.controls.is_drawing());
            toggle_button_active("eraseWallBtn", self.controls.is_erasing());
            toggle_button_active("gravityBtn", self.sim.has_gravity());
            toggle_button_active("freezeBtn", !self.sim.is_running());
        }

        /// Fit the canvas to the window and hand the new size to the simulation
        fn fit_to_window(&mut self) {
            let side = window_canvas_side();
            self.canvas.set_width(side as u32);
            self.canvas.set_height(side as u32);
            self.sim.configure(side.floor(), side.floor());
            log::info!("Canvas resized to {}", side as u32);
        }

        /// Pointer position relative to the canvas
        fn pointer_pos(&self, event: &MouseEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new(
                event.client_x() as f32 - rect.left() as f32,
                event.client_y() as f32 - rect.top() as f32,
            )
        }
    }

    fn window_canvas_side() -> f32 {
        let Some(window) = web_sys::window() else {
            return bouncefield::consts::DEFAULT_CANVAS_SIZE;
        };
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        fit_canvas_side(w, h).floor()
    }

    fn toggle_button_active(id: &str, active: bool) {
        let button = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(button) = button {
            let _ = button.class_list().toggle_with_force("active", active);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Bouncefield starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("ballCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let side = window_canvas_side();
        canvas.set_width(side as u32);
        canvas.set_height(side as u32);

        let seed = js_sys::Date::now() as u64;
        let mut sim = SimState::new(SimConfig {
            width: side,
            height: side,
            seed,
            ..Default::default()
        });

        let settings = Settings::load();
        sim.apply_settings(&settings);
        log::info!("Simulation initialized with seed: {}", seed);

        let renderer = CanvasRenderer::new(&canvas)?;
        let game = Rc::new(RefCell::new(Game {
            sim,
            controls: Controls::new(),
            settings,
            renderer,
            canvas: canvas.clone(),
            report: TickReport::default(),
        }));

        sync_sliders(&game.borrow().settings);
        game.borrow().update_mode_display();

        setup_pointer_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_sliders(game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Bouncefield running!");
        Ok(())
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.pointer_pos(&event);
                let Game { sim, controls, .. } = &mut *g;
                controls.pointer_move(sim, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.pointer_pos(&event);
                let Game { sim, controls, .. } = &mut *g;
                controls.pointer_down(sim, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.pointer_pos(&event);
                let Game { sim, controls, .. } = &mut *g;
                controls.pointer_up(sim, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Attach a click handler to a button by id
    fn on_click<F>(id: &str, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        let button = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        let Some(button) = button else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("addWallBtn", move || {
                let mut g = game.borrow_mut();
                let Game { sim, controls, .. } = &mut *g;
                controls.toggle_draw(sim);
                g.update_mode_display();
            });
        }

        {
            let game = game.clone();
            on_click("eraseWallBtn", move || {
                let mut g = game.borrow_mut();
                let Game { sim, controls, .. } = &mut *g;
                controls.toggle_erase(sim);
                g.update_mode_display();
            });
        }

        {
            let game = game.clone();
            on_click("clearWallsBtn", move || {
                game.borrow_mut().sim.clear_walls();
                log::info!("Walls cleared");
            });
        }

        {
            let game = game.clone();
            on_click("explosionBtn", move || {
                game.borrow_mut().sim.explode_all();
            });
        }

        {
            let game = game.clone();
            on_click("gravityBtn", move || {
                let mut g = game.borrow_mut();
                let gravity = !g.sim.has_gravity();
                g.sim.set_gravity(gravity);
                g.settings.gravity = gravity;
                g.settings.save();
                g.update_mode_display();
            });
        }

        on_click("freezeBtn", move || {
            let mut g = game.borrow_mut();
            let running = !g.sim.is_running();
            g.sim.set_running(running);
            log::info!("{}", if running { "Resumed" } else { "Frozen" });
            g.update_mode_display();
        });
    }

    fn slider(id: &str) -> Option<HtmlInputElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    /// Push stored settings into the slider widgets
    fn sync_sliders(settings: &Settings) {
        if let Some(input) = slider("speedSlider") {
            input.set_value(&settings.speed_multiplier.to_string());
        }
        if let Some(input) = slider("sizeSlider") {
            input.set_value(&settings.size_multiplier.to_string());
        }
    }

    fn setup_sliders(game: Rc<RefCell<Game>>) {
        if let Some(input) = slider("speedSlider") {
            let game = game.clone();
            let source = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(value) = source.value().parse::<f32>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.settings.speed_multiplier = value;
                g.settings = g.settings.clone().sanitized();
                let speed = g.settings.speed_multiplier;
                g.sim.set_speed_multiplier(speed);
                g.settings.save();
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(input) = slider("sizeSlider") {
            let source = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(value) = source.value().parse::<f32>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.settings.size_multiplier = value;
                g.settings = g.settings.clone().sanitized();
                let size = g.settings.size_multiplier;
                g.sim.set_size_multiplier(size);
                g.settings.save();
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bouncefield::sim::{SimConfig, SimState, tick};

    env_logger::init();
    log::info!("Bouncefield (native) starting...");
    log::info!("The page runs in the browser - use `trunk serve` for the web version");

    let ticks: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);

    // Headless run: a slanted wall, gravity, and one explosion halfway
    let mut sim = SimState::new(SimConfig {
        seed: 42,
        ..Default::default()
    });
    let bounds = sim.bounds();
    sim.begin_wall_draw(bounds.x * 0.2, bounds.y * 0.6);
    sim.end_wall_draw(bounds.x * 0.8, bounds.y * 0.4);
    sim.set_gravity(true);

    let frame_ms = 1000.0 / 60.0;
    for t in 0..ticks {
        if t == ticks / 2 {
            sim.explode_all();
        }
        let report = tick(&mut sim, t as f64 * frame_ms);
        if t % 120 == 0 || t + 1 == ticks {
            log::info!(
                "tick {:>5}: score {} walls {}",
                t,
                report.score,
                report.wall_count
            );
        }
    }

    println!("Ran {} ticks, final score {}", sim.ticks(), sim.score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
