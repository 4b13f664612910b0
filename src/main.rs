//! Birthday Arcade entry point
//!
//! The browser build binds the page's DOM to the tracker, the runner and
//! the guestbook. The native build runs a short headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement,
    };

    use birthday_arcade::audio::{AudioManager, CuePlayer, SoundEffect};
    use birthday_arcade::consts::*;
    use birthday_arcade::gallery::{self, GalleryCursor};
    use birthday_arcade::gateway::{Gateway, GatewayConfig, GatewayStatus};
    use birthday_arcade::platform::{LocalStorageStore, SystemClock};
    use birthday_arcade::progression::{Notification, PowerUpKind, ProgressionTracker};
    use birthday_arcade::renderer::{CanvasRenderer, SpriteSheet, build_frame, load_sprites};
    use birthday_arcade::runner::{RunnerEvent, RunnerPhase, RunnerState, TickInput, frame};
    use birthday_arcade::schedule::{AnimationLoop, LoopControl};
    use birthday_arcade::{Settings, format_score};

    type SharedAudio = Rc<RefCell<AudioManager>>;
    type SharedTracker = Rc<RefCell<ProgressionTracker>>;

    const TOAST_MS: i32 = 3000;

    fn page_document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Returns the timeout handle
    fn set_timeout(delay_ms: i32, callback: impl FnOnce() + 'static) -> Option<i32> {
        let window = web_sys::window()?;
        let closure = Closure::once(callback);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            )
            .ok();
        closure.forget();
        handle
    }

    // ---- Progression tracker ----

    fn update_tracker_hud(tracker: &ProgressionTracker) {
        let document = page_document();
        let state = tracker.state();

        set_text(&document, "hud-score", &format_score(state.score));
        set_text(&document, "hud-level", &state.level.to_string());
        set_text(&document, "hud-coins", &state.coins.to_string());
        set_text(&document, "hud-stars", &state.stars.to_string());
        set_text(
            &document,
            "achievement-count",
            &format!("{}/{}", state.unlocked_count(), state.achievements.len()),
        );
        if let Some(bar) = document.get_element_by_id("xp-bar") {
            let _ = bar.set_attribute("style", &format!("width: {:.1}%", tracker.xp_percentage()));
        }

        let badges: String = state.active_power_ups.iter().map(|k| k.badge()).collect();
        set_visible(&document, "power-ups", !badges.is_empty());
        set_text(&document, "power-up-badges", &badges);

        for achievement in &state.achievements {
            let id = format!("achievement-{}", achievement.id);
            if let Some(el) = document.get_element_by_id(&id) {
                let class = if achievement.unlocked {
                    "achievement unlocked"
                } else {
                    "achievement"
                };
                let _ = el.set_attribute("class", class);
            }
        }

        set_text(
            &document,
            "sound-btn",
            if tracker.sound_enabled() { "🔊" } else { "🔇" },
        );
    }

    fn show_notifications(tracker: &mut ProgressionTracker) {
        let document = page_document();
        for notification in tracker.drain_notifications() {
            if let Notification::AchievementUnlocked(achievement) = &notification {
                set_text(&document, "popup-icon", &achievement.icon);
                set_text(&document, "popup-title", &achievement.title);
                set_text(&document, "popup-description", &achievement.description);
                set_visible(&document, "achievement-popup", true);
            }

            let (title, body) = notification.text();
            set_text(&document, "toast-title", &title);
            set_text(&document, "toast-body", &body);
            set_visible(&document, "toast", true);
            let _ = set_timeout(TOAST_MS, || set_visible(&page_document(), "toast", false));
        }
    }

    fn refresh_tracker(tracker: &SharedTracker) {
        let mut t = tracker.borrow_mut();
        show_notifications(&mut t);
        update_tracker_hud(&t);
    }

    /// The single pending timeout for the tracker's earliest power-up expiry
    #[derive(Clone, Default)]
    struct ExpiryTimer {
        handle: Rc<Cell<Option<i32>>>,
    }

    impl ExpiryTimer {
        /// Replace any pending timeout with one for the next due expiry
        ///
        /// The callback re-arms itself, so a timeout that fires before the
        /// wall-clock due time just waits out the remainder.
        fn rearm(&self, tracker: &SharedTracker) {
            if let Some(handle) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(handle);
                }
            }
            let Some(delay) = tracker.borrow().expiry_delay_ms() else {
                return;
            };

            let timer = self.clone();
            let tracker = tracker.clone();
            let handle = set_timeout(delay.ceil() as i32, move || {
                timer.handle.set(None);
                let fired = tracker.borrow_mut().advance_timers();
                if fired > 0 {
                    refresh_tracker(&tracker);
                }
                timer.rearm(&tracker);
            });
            self.handle.set(handle);
        }
    }

    fn setup_tracker(document: &Document, tracker: SharedTracker) {
        let expiry = ExpiryTimer::default();

        {
            let tracker = tracker.clone();
            on_click(document, "coin-btn", move || {
                tracker.borrow_mut().collect_coin();
                refresh_tracker(&tracker);
            });
        }

        for (id, kind) in [
            ("star-btn", PowerUpKind::Star),
            ("heart-btn", PowerUpKind::Heart),
            ("gift-btn", PowerUpKind::Gift),
        ] {
            let tracker = tracker.clone();
            let expiry = expiry.clone();
            on_click(document, id, move || {
                tracker.borrow_mut().activate_power_up(kind.clone());
                refresh_tracker(&tracker);
                expiry.rearm(&tracker);
            });
        }

        {
            let tracker = tracker.clone();
            let expiry = expiry.clone();
            on_click(document, "reset-btn", move || {
                tracker.borrow_mut().reset();
                refresh_tracker(&tracker);
                expiry.rearm(&tracker);
            });
        }

        {
            let tracker = tracker.clone();
            on_click(document, "sound-btn", move || {
                let enabled = tracker.borrow_mut().toggle_sound();
                log::info!("Sound {}", if enabled { "on" } else { "off" });
                update_tracker_hud(&tracker.borrow());
            });
        }

        on_click(document, "popup-close", || {
            set_visible(&page_document(), "achievement-popup", false);
        });

        refresh_tracker(&tracker);
        // Power-ups restored from the snapshot
        expiry.rearm(&tracker);
    }

    // ---- Runner ----

    struct Runner {
        state: RunnerState,
        input: TickInput,
        sprites: Rc<RefCell<SpriteSheet>>,
        renderer: CanvasRenderer,
    }

    impl Runner {
        fn draw(&self) {
            let sprites = self.sprites.borrow();
            let commands = build_frame(&self.state, |s| sprites.is_ready(s));
            self.renderer.draw(&commands, &sprites);
        }

        fn update_panels(&self) {
            let document = page_document();
            let phase = self.state.phase;
            set_visible(&document, "runner-start-screen", phase == RunnerPhase::Idle);
            set_visible(&document, "runner-game-over", phase == RunnerPhase::GameOver);
            set_visible(&document, "game-canvas", phase != RunnerPhase::Idle);
            if phase == RunnerPhase::GameOver {
                set_text(&document, "runner-final-score", &self.state.score.to_string());
            }
        }
    }

    fn play_runner_cues(events: &[RunnerEvent], audio: &SharedAudio, tracker: &SharedTracker) {
        if !tracker.borrow().sound_enabled() {
            return;
        }
        for event in events {
            match event {
                RunnerEvent::Jumped => audio.play(SoundEffect::Jump),
                RunnerEvent::Collected { .. } => audio.play(SoundEffect::Collect),
                RunnerEvent::GameOver { .. } => audio.play(SoundEffect::GameOver),
                _ => {}
            }
        }
    }

    fn start_runner(
        runner: &Rc<RefCell<Runner>>,
        frame_loop: &AnimationLoop,
        audio: SharedAudio,
        tracker: SharedTracker,
    ) {
        {
            let mut r = runner.borrow_mut();
            r.state.start(js_sys::Date::now());
            r.input = TickInput::default();
            r.update_panels();
        }

        let runner = runner.clone();
        frame_loop.start(move |_time| {
            let mut r = runner.borrow_mut();
            let settled = r.sprites.borrow().all_settled();
            let input = std::mem::take(&mut r.input);
            let step = frame(&mut r.state, &input, js_sys::Date::now(), settled);
            if settled {
                r.draw();
            }
            play_runner_cues(&step.events, &audio, &tracker);
            if step.control == LoopControl::Stop {
                r.update_panels();
            }
            step.control
        });
    }

    fn setup_runner(document: &Document, audio: SharedAudio, tracker: SharedTracker) {
        let Some(canvas) = document
            .get_element_by_id("game-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No game canvas on the page, runner disabled");
            return;
        };
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);

        let Some(renderer) = CanvasRenderer::new(&canvas) else {
            log::warn!("Canvas 2D context unavailable, runner disabled");
            return;
        };

        let runner = Rc::new(RefCell::new(Runner {
            state: RunnerState::new(js_sys::Date::now() as u64),
            input: TickInput::default(),
            sprites: load_sprites(),
            renderer,
        }));
        let frame_loop = AnimationLoop::new();
        runner.borrow().update_panels();

        for id in ["runner-start", "runner-restart"] {
            let runner = runner.clone();
            let frame_loop = frame_loop.clone();
            let audio = audio.clone();
            let tracker = tracker.clone();
            on_click(document, id, move || {
                start_runner(&runner, &frame_loop, audio.clone(), tracker.clone());
            });
        }

        {
            let runner = runner.clone();
            let frame_loop = frame_loop.clone();
            on_click(document, "runner-quit", move || {
                frame_loop.cancel();
                let mut r = runner.borrow_mut();
                r.state.quit();
                r.update_panels();
            });
        }

        // Space / up arrow
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "ArrowUp") {
                    let mut r = runner.borrow_mut();
                    if r.state.is_running() {
                        event.prevent_default();
                        r.input.jump = true;
                    }
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Tap / click on the canvas
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                runner.borrow_mut().input.jump = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // ---- Guestbook and gallery ----

    fn render_messages(gateway: &Gateway) {
        let document = page_document();
        let Some(list) = document.get_element_by_id("message-list") else {
            return;
        };
        list.set_text_content(None);

        let entries = gateway.fetch_entries();
        set_visible(&document, "no-messages", entries.is_empty());
        for entry in entries {
            let Ok(item) = document.create_element("div") else {
                continue;
            };
            let _ = item.set_attribute("class", "message");
            if let Ok(name) = document.create_element("strong") {
                name.set_text_content(Some(&entry.name));
                let _ = item.append_child(&name);
            }
            if let Ok(text) = document.create_element("p") {
                text.set_text_content(Some(&entry.message));
                let _ = item.append_child(&text);
            }
            let _ = list.append_child(&item);
        }
    }

    fn setup_guestbook(document: &Document, gateway: Rc<RefCell<Gateway>>) {
        let status = match gateway.borrow().status() {
            GatewayStatus::Connected => "DATABASE CONNECTED!",
            GatewayStatus::DemoMode => "DEMO MODE",
        };
        set_text(document, "db-status", status);
        render_messages(&gateway.borrow());

        let Some(form) = document.get_element_by_id("message-form") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let document = page_document();
            let name_input = document
                .get_element_by_id("message-name")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
            let text_input = document
                .get_element_by_id("message-text")
                .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok());
            let (Some(name_input), Some(text_input)) = (name_input, text_input) else {
                return;
            };

            let result = gateway
                .borrow_mut()
                .submit_entry(&name_input.value(), &text_input.value());
            match result {
                Ok(()) => {
                    name_input.set_value("");
                    text_input.set_value("");
                    set_visible(&document, "message-error", false);
                    render_messages(&gateway.borrow());
                }
                Err(e) => {
                    set_text(&document, "message-error", &e.to_string());
                    set_visible(&document, "message-error", true);
                }
            }
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn update_gallery(cursor: &GalleryCursor) {
        let document = page_document();
        set_visible(&document, "gallery-empty", cursor.is_empty());
        set_visible(&document, "gallery", !cursor.is_empty());
        set_visible(&document, "gallery-prev", cursor.has_navigation());
        set_visible(&document, "gallery-next", cursor.has_navigation());
        set_visible(&document, "gallery-modal", cursor.is_fullscreen());

        let Some(photo) = cursor.current() else {
            return;
        };
        for id in ["gallery-image", "gallery-modal-image"] {
            if let Some(img) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            {
                img.set_src(gallery::image_src(photo));
                img.set_alt(&photo.title);
            }
        }
        set_text(&document, "gallery-title", &photo.title);
        set_text(
            &document,
            "gallery-description",
            photo.description.as_deref().unwrap_or(""),
        );
        set_text(&document, "gallery-counter", &cursor.counter_label());

        if let Some(strip) = document.get_element_by_id("gallery-thumbnails") {
            let thumbs = strip.children();
            for i in 0..thumbs.length() {
                if let Some(thumb) = thumbs.item(i) {
                    let class = if i as usize == cursor.index() {
                        "thumbnail active"
                    } else {
                        "thumbnail"
                    };
                    let _ = thumb.set_attribute("class", class);
                }
            }
        }
    }

    /// One clickable thumbnail per photo; hidden with a single photo
    fn build_thumbnails(document: &Document, cursor: &Rc<RefCell<GalleryCursor>>) {
        let Some(strip) = document.get_element_by_id("gallery-thumbnails") else {
            return;
        };
        strip.set_text_content(None);
        set_visible(document, "gallery-thumbnails", cursor.borrow().has_navigation());

        let photos = cursor.borrow().photos().to_vec();
        for (index, photo) in photos.iter().enumerate() {
            let Some(img) = document
                .create_element("img")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            else {
                continue;
            };
            img.set_src(gallery::image_src(photo));
            img.set_alt(&photo.title);

            let target = img.clone();
            let on_error = Closure::<dyn FnMut()>::new(move || {
                if !target.src().ends_with(gallery::THUMBNAIL_FALLBACK_URL) {
                    target.set_src(gallery::THUMBNAIL_FALLBACK_URL);
                }
            });
            img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            on_error.forget();

            let cursor = cursor.clone();
            let on_select = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut c = cursor.borrow_mut();
                c.select(index);
                update_gallery(&c);
            });
            let _ =
                img.add_event_listener_with_callback("click", on_select.as_ref().unchecked_ref());
            on_select.forget();

            let _ = strip.append_child(&img);
        }
    }

    fn setup_gallery(document: &Document, gateway: &Gateway) {
        let cursor = Rc::new(RefCell::new(GalleryCursor::new(gateway.fetch_photos())));

        let actions: [(&str, fn(&mut GalleryCursor)); 4] = [
            ("gallery-prev", GalleryCursor::prev),
            ("gallery-next", GalleryCursor::next),
            ("gallery-fullscreen", GalleryCursor::open_fullscreen),
            ("gallery-close", GalleryCursor::close_fullscreen),
        ];
        for (id, action) in actions {
            let cursor = cursor.clone();
            on_click(document, id, move || {
                let mut c = cursor.borrow_mut();
                action(&mut c);
                update_gallery(&c);
            });
        }

        // Broken image URLs fall back to the placeholder
        if let Some(img) = document
            .get_element_by_id("gallery-image")
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        {
            let target = img.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                if !target.src().ends_with(gallery::FALLBACK_IMAGE_URL) {
                    log::warn!("Photo failed to load: {}", target.src());
                    target.set_src(gallery::FALLBACK_IMAGE_URL);
                }
            });
            img.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        build_thumbnails(document, &cursor);
        update_gallery(&cursor.borrow());
    }

    // ---- Page ----

    fn setup_mute_on_blur(audio: SharedAudio) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for (event, muted) in [("blur", true), ("focus", false)] {
            let audio = audio.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                audio.borrow_mut().set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Birthday Arcade starting...");

        let document = page_document();
        set_visible(&document, "loading", false);

        let settings = Settings::load(&LocalStorageStore);
        // Write back so fields added since the last visit are filled in
        settings.save(&LocalStorageStore);
        let audio: SharedAudio = Rc::new(RefCell::new(AudioManager::from_settings(&settings)));
        if settings.mute_on_blur {
            setup_mute_on_blur(audio.clone());
        }

        let tracker: SharedTracker = Rc::new(RefCell::new(
            ProgressionTracker::new(
                Box::new(LocalStorageStore),
                Box::new(audio.clone()),
                Box::new(SystemClock),
            )
            .with_sound(settings.sound_enabled),
        ));
        setup_tracker(&document, tracker.clone());
        setup_runner(&document, audio, tracker);

        let gateway = Gateway::new(&GatewayConfig::from_env(), Box::new(SystemClock));
        setup_gallery(&document, &gateway);
        setup_guestbook(&document, Rc::new(RefCell::new(gateway)));

        log::info!("Birthday Arcade initialized");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_page::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Birthday Arcade (native) starting...");
    log::info!("The page runs in the browser - build for wasm32 and serve with `trunk serve`");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session against in-memory ports
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use birthday_arcade::audio::SilentCues;
    use birthday_arcade::consts::*;
    use birthday_arcade::gateway::{Gateway, GatewayConfig};
    use birthday_arcade::platform::{ManualClock, MemoryStore, SystemClock};
    use birthday_arcade::progression::{PowerUpKind, ProgressionTracker};
    use birthday_arcade::runner::{RunnerEvent, RunnerState, TickInput, tick};
    use birthday_arcade::{Settings, format_score};

    pub fn run() {
        let store = MemoryStore::new();
        let settings = Settings::load(&store);
        let clock = ManualClock::new(0.0);

        let mut tracker = ProgressionTracker::new(
            Box::new(store.clone()),
            Box::new(SilentCues),
            Box::new(clock.clone()),
        )
        .with_sound(settings.sound_enabled);
        for _ in 0..5 {
            tracker.collect_coin();
        }
        tracker.activate_power_up(PowerUpKind::Star);
        clock.advance(POWER_UP_DURATION_MS);
        tracker.advance_timers();
        for notification in tracker.drain_notifications() {
            let (title, body) = notification.text();
            println!("{} {}", title, body);
        }
        let state = tracker.state();
        println!(
            "Tracker: score {}, level {}, achievements {}/{}",
            format_score(state.score),
            state.level,
            state.unlocked_count(),
            state.achievements.len()
        );

        // Jump whenever possible until something ends the run
        let mut runner = RunnerState::new(7);
        runner.start(0.0);
        let mut now = 0.0;
        let mut frames = 0;
        while runner.is_running() && frames < 10_000 {
            now += 1000.0 / 60.0;
            frames += 1;
            let input = TickInput {
                jump: runner.player.is_grounded(),
            };
            for event in tick(&mut runner, &input, now) {
                if let RunnerEvent::GameOver { score } = event {
                    println!("Runner: game over after {} frames, score {}", frames, score);
                }
            }
        }
        if runner.is_running() {
            println!("Runner: still running after {} frames, score {}", frames, runner.score);
        }

        let gateway = Gateway::new(&GatewayConfig::from_env(), Box::new(SystemClock));
        for entry in gateway.fetch_entries() {
            println!("{}: {}", entry.name, entry.message);
        }
    }
}
