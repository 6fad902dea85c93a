//! Window and main loop
//!
//! [`Game`] is the loop body without a window: key handling, ticking and
//! sound dispatch. [`App`] drives it from winit events and draws each frame.

use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use rand::rngs::ThreadRng;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::audio::{self, SoundSink};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::StartupError;
use crate::input::{InputState, Key, map_key, menu_command};
use crate::renderer::{Frame, RenderState, SceneBuilder};
use crate::scheduler::FrameScheduler;
use crate::settings::Settings;
use crate::sim::{GameState, MenuOutcome, Mode, handle_menu, tick};

pub const WINDOW_TITLE: &str = "Pong Goal";

/// Game loop state, independent of the window
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    scheduler: Box<dyn FrameScheduler>,
    scene: SceneBuilder,
    sound: Box<dyn SoundSink>,
    particles: bool,
}

impl Game {
    pub fn new(
        state: GameState,
        scheduler: Box<dyn FrameScheduler>,
        sound: Box<dyn SoundSink>,
        particles: bool,
    ) -> Self {
        Self {
            state,
            input: InputState::new(),
            scheduler,
            scene: SceneBuilder::new(),
            sound,
            particles,
        }
    }

    /// Record a key press or release.
    ///
    /// Fresh presses in the menu become menu commands; repeats are ignored
    /// there so holding a key does not flicker the selection.
    pub fn key(&mut self, key: Key, pressed: bool, repeat: bool) -> MenuOutcome {
        if !pressed {
            self.input.key_up(key);
            return MenuOutcome::Stay;
        }
        self.input.key_down(key);

        if self.state.mode != Mode::Menu || repeat {
            return MenuOutcome::Stay;
        }
        match menu_command(key) {
            Some(command) => handle_menu(&mut self.state, command),
            None => MenuOutcome::Stay,
        }
    }

    /// Run the ticks due at `now` and play their sounds; returns the tick count
    pub fn advance(&mut self, now: Instant) -> u32 {
        let steps = self.scheduler.begin_frame(now);
        if steps > 1 {
            log::debug!("Catching up: {} ticks this frame", steps);
        }

        let input = self.input.tick_input();
        for _ in 0..steps {
            tick(&mut self.state, &input);
        }

        let events = self.state.drain_events();
        audio::dispatch(&events, self.sound.as_ref());
        steps
    }

    pub fn next_frame_at(&self) -> Instant {
        self.scheduler.next_frame_at()
    }

    pub fn frame<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Frame {
        self.scene.build(&self.state, self.particles, rng)
    }
}

struct Graphics {
    window: Arc<Window>,
    render: RenderState,
}

impl Graphics {
    fn create(event_loop: &ActiveEventLoop) -> Result<Self, StartupError> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);
        let render = pollster::block_on(RenderState::new(window.clone()))?;
        Ok(Self { window, render })
    }
}

/// winit application: owns the window, renderer and game
pub struct App {
    game: Game,
    rng: ThreadRng,
    gfx: Option<Graphics>,
    error: Option<StartupError>,
}

impl App {
    pub fn new(settings: &Settings, state: GameState, sound: Box<dyn SoundSink>) -> Self {
        let scheduler = settings.frame_pacing.scheduler(Instant::now());
        Self {
            game: Game::new(state, scheduler, sound, settings.particles),
            rng: rand::rng(),
            gfx: None,
            error: None,
        }
    }

    /// Startup failure that ended the event loop, if any
    pub fn take_error(&mut self) -> Option<StartupError> {
        self.error.take()
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.game.advance(Instant::now());
        let frame = self.game.frame(&mut self.rng);

        let Some(gfx) = self.gfx.as_mut() else {
            return;
        };
        match gfx.render.render(&frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.render.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn keyboard(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(key) = map_key(code) else {
            return;
        };

        let pressed = event.state == ElementState::Pressed;
        if self.game.key(key, pressed, event.repeat) == MenuOutcome::Quit {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        match Graphics::create(event_loop) {
            Ok(gfx) => {
                log::info!("Window ready ({}x{})", gfx.render.size.0, gfx.render.size.1);
                gfx.window.request_redraw();
                self.gfx = Some(gfx);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.keyboard(event_loop, event),
            WindowEvent::Focused(false) => self.game.input.clear(),
            WindowEvent::Resized(size) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.render.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gfx) = self.gfx.as_ref() else {
            return;
        };
        let next = self.game.next_frame_at();
        if Instant::now() >= next {
            gfx.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(next));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!(
            "Exiting, final score {} - {}",
            self.game.state.scores.left,
            self.game.state.scores.right
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::scheduler::FixedDelay;
    use crate::sim::{MenuOption, Side};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default, Clone)]
    struct SharedSink(Rc<RefCell<Vec<SoundEffect>>>);

    impl SoundSink for SharedSink {
        fn play(&self, effect: SoundEffect) {
            self.0.borrow_mut().push(effect);
        }
    }

    fn game() -> (Game, SharedSink) {
        let sink = SharedSink::default();
        let scheduler = Box::new(FixedDelay::new(Duration::from_millis(10), Instant::now()));
        let game = Game::new(GameState::new(3), scheduler, Box::new(sink.clone()), false);
        (game, sink)
    }

    #[test]
    fn test_enter_starts_game() {
        let (mut game, _) = game();
        assert_eq!(game.key(Key::Enter, true, false), MenuOutcome::Started);
        assert_eq!(game.state.mode, Mode::Playing);
    }

    #[test]
    fn test_repeat_does_not_toggle_menu() {
        let (mut game, _) = game();
        game.key(Key::Down, true, false);
        game.key(Key::Down, true, true);
        game.key(Key::Down, true, true);
        assert_eq!(game.state.menu, MenuOption::Quit);
        assert_eq!(game.key(Key::Enter, true, false), MenuOutcome::Quit);
    }

    #[test]
    fn test_arrows_in_play_move_paddle_not_menu() {
        let (mut game, _) = game();
        game.key(Key::Enter, true, false);
        game.state.serve_pause_ticks = 0;

        let before = game.state.right_paddle.y;
        assert_eq!(game.key(Key::Down, true, false), MenuOutcome::Stay);
        game.advance(Instant::now());
        assert_eq!(game.state.right_paddle.y, before + crate::consts::PADDLE_SPEED);
        assert_eq!(game.state.menu, MenuOption::Start);

        game.key(Key::Down, false, false);
        game.advance(Instant::now());
        assert_eq!(game.state.right_paddle.y, before + crate::consts::PADDLE_SPEED);
    }

    #[test]
    fn test_advance_plays_tick_sounds() {
        let (mut game, sink) = game();
        game.key(Key::Enter, true, false);
        game.state.serve_pause_ticks = 0;
        // Next tick crosses the top wall
        game.state.ball.pos.y = 2.0;
        game.state.ball.vel.y = -8.0;

        game.advance(Instant::now());
        assert_eq!(*sink.0.borrow(), vec![SoundEffect::Wall]);
        assert!(game.state.events.is_empty());
    }

    #[test]
    fn test_goal_sound_and_score() {
        let (mut game, sink) = game();
        game.key(Key::Enter, true, false);
        game.state.serve_pause_ticks = 0;
        game.state.ball.pos = glam::Vec2::new(775.0, 290.0);
        game.state.ball.vel = glam::Vec2::new(8.0, 0.0);

        game.advance(Instant::now());
        assert_eq!(game.state.scores.get(Side::Left), 1);
        assert!(sink.0.borrow().contains(&SoundEffect::Goal));
    }

    #[test]
    fn test_frame_follows_mode() {
        let (mut game, _) = game();
        let mut rng = rand::rng();
        let menu = game.frame(&mut rng);
        game.key(Key::Enter, true, false);
        let play = game.frame(&mut rng);
        assert_ne!(menu.clear, play.clear);
    }
}
