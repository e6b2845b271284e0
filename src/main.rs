//! Tile Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

    use tile_dash::Session;
    use tile_dash::renderer::{RenderState, build_scene};
    use tile_dash::sim::levels::DEFAULT_BACKGROUND;
    use tile_dash::sim::{level_count, level_info};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        /// A frame callback is queued
        running: bool,
    }

    impl Game {
        fn new() -> Self {
            Self {
                session: Session::load(),
                render_state: None,
                running: false,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let state = &self.session.state;
            let vertices = build_scene(state, &self.session.settings);
            let background = level_info(state.level_index)
                .map(|info| info.background)
                .unwrap_or(DEFAULT_BACKGROUND);

            match render_state.render(&vertices, background) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.session.hud();
            let settings = &self.session.settings;

            if let Some(el) = document.get_element_by_id("attempt-count") {
                el.set_text_content(Some(&hud.attempts.to_string()));
            }

            if let Some(el) = element::<HtmlElement>(document, "mode-display") {
                el.set_text_content(Some(hud.mode));
                set_display(&el, settings.show_mode, "block");
            }

            if let Some(el) = element::<HtmlElement>(document, "progress-bar") {
                set_display(&el, settings.show_progress, "block");
            }
            if let Some(el) = element::<HtmlElement>(document, "progress-fill") {
                let _ = el
                    .style()
                    .set_property("width", &format!("{}%", hud.progress_percent));
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_display(el: &HtmlElement, visible: bool, shown: &str) {
        let _ = el
            .style()
            .set_property("display", if visible { shown } else { "none" });
    }

    /// Toggle between the level menu and the in-run HUD
    fn show_menu(game: &Game, visible: bool) {
        let Some(document) = document() else {
            return;
        };
        if let Some(menu) = element::<HtmlElement>(&document, "main-menu") {
            set_display(&menu, visible, "flex");
        }
        if let Some(hud) = element::<HtmlElement>(&document, "hud") {
            set_display(&hud, !visible, "block");
        }
        if visible {
            refresh_level_buttons(game, &document);
        }
    }

    /// Level button label with the best progress so far
    fn level_label(game: &Game, index: usize) -> String {
        let name = level_info(index).map(|info| info.name).unwrap_or("?");
        match game.session.records.get(index) {
            Some(record) if record.completed => format!("{}. {} ✓", index + 1, name),
            Some(record) => format!("{}. {} ({}%)", index + 1, name, record.best_percent),
            None => format!("{}. {}", index + 1, name),
        }
    }

    fn refresh_level_buttons(game: &Game, document: &Document) {
        for index in 0..level_count() {
            if let Some(btn) = document.get_element_by_id(&format!("level-{}", index)) {
                btn.set_text_content(Some(&level_label(game, index)));
            }
        }
    }

    fn start_level(game: &Rc<RefCell<Game>>, index: usize) {
        {
            let mut g = game.borrow_mut();
            if let Err(e) = g.session.start_run(index) {
                log::error!("Can't start level {}: {}", index + 1, e);
                return;
            }
            show_menu(&g, false);
        }

        let already_running = std::mem::replace(&mut game.borrow_mut().running, true);
        if !already_running {
            request_animation_frame(game.clone());
        }
    }

    fn exit_to_menu(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.session.exit_run();
        show_menu(&g, true);
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Tile Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new()));

        // The game stays playable (HUD, records) without a GPU surface
        match init_renderer(canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::warn!("Rendering disabled: {}", e),
        }

        build_level_menu(&document, &game)?;
        setup_input_handlers(game.clone())?;
        setup_auto_release(game.clone())?;

        show_menu(&game.borrow(), true);
        game.borrow_mut().render();

        log::info!("Tile Dash ready with {} levels", level_count());
        Ok(())
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| e.to_string())
    }

    /// One button per built-in level under `#level-list`
    fn build_level_menu(document: &Document, game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(list) = document.get_element_by_id("level-list") else {
            log::warn!("No #level-list element, menu unavailable");
            return Ok(());
        };

        for index in 0..level_count() {
            let btn = document.create_element("button")?;
            btn.set_id(&format!("level-{}", index));
            btn.set_class_name("level-btn");
            btn.set_text_content(Some(&level_label(&game.borrow(), index)));

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_level(&game, index);
            });
            btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();

            list.append_child(&btn)?;
        }
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.press();
            });
            window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.release();
            });
            window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch; non-passive so the page doesn't scroll mid-run
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if g.session.is_playing() {
                    event.prevent_default();
                }
                g.session.press();
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().session.release();
            });
            window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        let mut g = game.borrow_mut();
                        if g.session.is_playing() {
                            event.prevent_default();
                        }
                        g.session.press();
                    }
                    "Escape" => exit_to_menu(&game),
                    // Debug: hitbox overlay
                    "KeyH" => {
                        let shown = game.borrow_mut().session.settings.toggle_hitboxes();
                        log::info!("Hitboxes {}", if shown { "on" } else { "off" });
                    }
                    _ => {}
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.code().as_str(), "Space" | "ArrowUp") {
                    game.borrow_mut().session.release();
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Drop the held input when the page loses focus, since the matching
    /// release event will never arrive
    fn setup_auto_release(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().session.release();
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.release();
            });
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            let keep_running = g.session.frame(time);
            g.render();
            if let Some(document) = document() {
                g.update_hud(&document);
            }
            if !keep_running {
                // Completed, or exited since the last frame
                g.running = false;
                show_menu(&g, true);
            }
            keep_running
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Headless run of every built-in level with no input, reporting how far
/// the player gets before the first crash
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), tile_dash::SessionError> {
    use tile_dash::Session;
    use tile_dash::sim::{level_count, level_info};

    env_logger::init();
    log::info!("Tile Dash (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    for index in 0..level_count() {
        let mut session = Session::default();
        session.start_run(index)?;

        let mut now = 0.0;
        session.frame(now);
        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            session.frame(now);
            if session.state.player.dead || !session.is_playing() {
                break;
            }
        }

        let hud = session.hud();
        let name = level_info(index).map(|info| info.name).unwrap_or("?");
        let outcome = if session.state.player.dead {
            "crashed"
        } else {
            "finished"
        };
        println!(
            "{:>2}. {:<20} {} at {:>3}% in {} mode",
            index + 1,
            name,
            outcome,
            hud.progress_percent,
            hud.mode
        );
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
