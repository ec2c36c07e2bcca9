//! Boost Lander entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use boost_lander::Settings;
    use boost_lander::audio::AudioManager;
    use boost_lander::consts::*;
    use boost_lander::host::{ParticleEmitter, SceneDirectory};
    use boost_lander::scene::{SceneRequest, SceneRoster, resolve_target};
    use boost_lander::sim::{
        CollisionOutcome, ControlInput, CraftPhase, Level, OutcomeHooks, PilotControl, World,
    };
    use boost_lander::timer::DelayQueue;

    /// Particle effect backed by a DOM overlay element; `play` kicks its CSS
    /// animation by swapping the class
    struct DomEmitter {
        element_id: &'static str,
    }

    impl ParticleEmitter for DomEmitter {
        fn play(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id(self.element_id) {
                let _ = el.set_attribute("class", "effect hidden");
                let _ = el.set_attribute("class", "effect playing");
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        settings: Settings,
        seed: u64,
        world: World,
        pilot: PilotControl,
        outcome: CollisionOutcome,
        transitions: DelayQueue<SceneRequest>,
        roster: SceneRoster,
        audio: AudioManager,
        crash_fx: DomEmitter,
        success_fx: DomEmitter,
        input: ControlInput,
        last_time: f64,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                world: World::new(Level::generate(0, seed)),
                pilot: PilotControl::new(settings.rotate_speed, settings.thrust_force),
                outcome: CollisionOutcome::new(settings.reload_delay, settings.next_level_delay),
                transitions: DelayQueue::new(),
                roster: SceneRoster::new(LEVEL_COUNT),
                audio,
                crash_fx: DomEmitter {
                    element_id: "crash-effect",
                },
                success_fx: DomEmitter {
                    element_id: "success-effect",
                },
                input: ControlInput::default(),
                settings,
                seed,
                last_time: 0.0,
            }
        }

        /// Rebuild the world and both handler components for a scene load.
        /// Dropping the old transition queue discards any pending timers.
        fn load_level(&mut self, index: usize) {
            self.world = World::new(Level::generate(index, self.seed));
            self.pilot =
                PilotControl::new(self.settings.rotate_speed, self.settings.thrust_force);
            self.outcome = CollisionOutcome::new(
                self.settings.reload_delay,
                self.settings.next_level_delay,
            );
            self.transitions = DelayQueue::new();
            log::info!("level {} loaded", index + 1);
        }

        /// One frame of game logic
        fn update(&mut self, dt: f32) {
            let input = self.input;
            self.pilot
                .tick(&input, dt, &mut self.world.craft, &mut self.audio);

            for kind in self.world.step(dt) {
                let mut hooks = OutcomeHooks {
                    control: &mut self.pilot,
                    audio: &mut self.audio,
                    crash_particles: &mut self.crash_fx,
                    success_particles: &mut self.success_fx,
                    transitions: &mut self.transitions,
                };
                self.outcome.on_collision(kind, &mut hooks);
            }

            // Wall-clock timers, unscaled
            for request in self.transitions.advance(dt) {
                let target = resolve_target(request, &self.roster);
                self.roster.load(target);
            }
            if let Some(index) = self.roster.take_pending() {
                self.load_level(index);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-level") {
                el.set_text_content(Some(&(self.roster.active_index() + 1).to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fuel") {
                el.set_text_content(Some(&self.outcome.refuel_count().to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-status") {
                let status = match self.outcome.phase() {
                    CraftPhase::Active => "FLYING",
                    CraftPhase::Transitioning => "TRANSITION",
                };
                el.set_text_content(Some(status));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Boost Lander starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_blur_mute(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Boost Lander running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "a" | "A" | "ArrowLeft" => g.input.rotate_left = true,
                    "d" | "D" | "ArrowRight" => g.input.rotate_right = true,
                    " " | "w" | "W" | "ArrowUp" => {
                        g.input.thrust = true;
                        // First gesture unlocks the audio context
                        g.audio.resume();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "a" | "A" | "ArrowLeft" => g.input.rotate_left = false,
                    "d" | "D" | "ArrowRight" => g.input.rotate_right = false,
                    " " | "w" | "W" | "ArrowUp" => g.input.thrust = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        if !game.borrow().settings.mute_on_blur {
            return;
        }
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(true);
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time, clamped so a backgrounded tab doesn't
            // warp the craft on return
            let dt = if g.last_time > 0.0 {
                (((time - g.last_time) / 1000.0) as f32).min(0.1)
            } else {
                1.0 / 60.0
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Boost Lander (native) starting...");
    demo_flight();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless scripted flight: lift off, cut the engine, crash, and ride the
/// reload timer back to the same level. Exercises the whole loop without a
/// browser.
#[cfg(not(target_arch = "wasm32"))]
fn demo_flight() {
    use boost_lander::Settings;
    use boost_lander::consts::LEVEL_COUNT;
    use boost_lander::host::{AudioChannel, ParticleEmitter, SceneDirectory, SoundCue};
    use boost_lander::scene::{SceneRoster, resolve_target};
    use boost_lander::sim::{
        CollisionOutcome, ControlInput, Level, OutcomeHooks, PilotControl, World,
    };
    use boost_lander::timer::DelayQueue;

    /// Logs cues instead of producing sound
    #[derive(Default)]
    struct LogChannel {
        looping: bool,
    }

    impl AudioChannel for LogChannel {
        fn play_loop(&mut self, cue: SoundCue) {
            log::info!("audio loop: {:?}", cue);
            self.looping = true;
        }
        fn play_one_shot(&mut self, cue: SoundCue) {
            log::info!("audio one-shot: {:?}", cue);
        }
        fn is_playing(&self) -> bool {
            self.looping
        }
        fn stop(&mut self) {
            self.looping = false;
        }
    }

    struct LogEmitter(&'static str);

    impl ParticleEmitter for LogEmitter {
        fn play(&mut self) {
            log::info!("particles: {}", self.0);
        }
    }

    let settings = Settings::load();
    let seed = 7;
    let dt = 1.0 / 60.0;

    let mut roster = SceneRoster::new(LEVEL_COUNT);
    let mut world = World::new(Level::generate(0, seed));
    let mut pilot = PilotControl::new(settings.rotate_speed, settings.thrust_force);
    let mut outcome = CollisionOutcome::new(settings.reload_delay, settings.next_level_delay);
    let mut transitions = DelayQueue::new();
    let mut audio = LogChannel::default();
    let mut crash_fx = LogEmitter("crash");
    let mut success_fx = LogEmitter("success");

    let mut reloaded = false;
    for frame in 0..3600 {
        // Burn for two seconds, then let it drop onto the terrain
        let input = ControlInput {
            thrust: frame < 120,
            rotate_right: (40..80).contains(&frame),
            ..Default::default()
        };

        pilot.tick(&input, dt, &mut world.craft, &mut audio);

        for kind in world.step(dt) {
            let mut hooks = OutcomeHooks {
                control: &mut pilot,
                audio: &mut audio,
                crash_particles: &mut crash_fx,
                success_particles: &mut success_fx,
                transitions: &mut transitions,
            };
            outcome.on_collision(kind, &mut hooks);
        }

        for request in transitions.advance(dt) {
            let target = resolve_target(request, &roster);
            roster.load(target);
        }
        if let Some(index) = roster.take_pending() {
            // Scene teardown: fresh world, pending timers dropped with the queue
            world = World::new(Level::generate(index, seed));
            reloaded = true;
            break;
        }
    }

    assert!(reloaded, "demo flight should crash and reload");
    log::info!(
        "demo complete: back on level {} at {:?}",
        roster.active_index() + 1,
        world.craft.pos
    );
}
