//! Scene building
//!
//! Turns a `GameState` into a flat list of pixel-space triangles plus a
//! clear color. Nothing here touches the GPU, so frames can be inspected in
//! tests.

use glam::Vec2;
use rand::Rng;

use super::shapes;
use super::text::TextCache;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GameState, MenuOption, Mode, Rect, Side};

/// Thickness of the playfield border
const BORDER: i32 = 10;
const CENTER_SPOT: i32 = 10;
const HALFWAY_WIDTH: i32 = 2;
const PENALTY_DEPTH: i32 = 150;
const CENTER_CIRCLE_RADIUS: f32 = 80.0;
const CIRCLE_SEGMENTS: u32 = 96;

const PARTICLE_COUNT: usize = 20;
const BALL_SPOKES: u32 = 12;
const SPOKE_WIDTH: f32 = 1.5;

/// Score digits, in pixels per glyph cell
const SCORE_SCALE: f32 = 5.0;
const SCORE_MARGIN: f32 = 50.0;

const TITLE_SCALE: f32 = 8.0;
const TITLE_Y: f32 = 120.0;
const MENU_ITEM_SCALE: f32 = 6.0;
/// Gap between menu items and the window edge
const MENU_PADDING: f32 = 20.0;
/// Gap between the highlight outline and its label
const HIGHLIGHT_MARGIN: f32 = 6.0;
const HIGHLIGHT_WIDTH: f32 = 2.0;

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear: [f32; 4],
    /// Pixel coordinates, y down
    pub vertices: Vec<Vertex>,
}

/// Builds frames and owns the text cache that survives between them
#[derive(Debug, Default)]
pub struct SceneBuilder {
    text: TextCache,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the frame for the current mode.
    ///
    /// `rng` drives the cosmetic ball particles only; it never touches the
    /// simulation's own generator.
    pub fn build<R: Rng + ?Sized>(
        &mut self,
        state: &GameState,
        particles: bool,
        rng: &mut R,
    ) -> Frame {
        match state.mode {
            Mode::Menu => self.menu(state.menu),
            Mode::Playing => self.game(state, particles, rng),
        }
    }

    /// Text layouts performed so far
    pub fn text_builds(&self) -> usize {
        self.text.builds()
    }

    fn game<R: Rng + ?Sized>(&mut self, state: &GameState, particles: bool, rng: &mut R) -> Frame {
        let mut vertices = Vec::with_capacity(4096);

        field_markings(&mut vertices, colors::LINE);
        for side in [Side::Left, Side::Right] {
            vertices.extend(shapes::rect(state.goal(side), colors::GOAL));
        }
        for side in [Side::Left, Side::Right] {
            vertices.extend(shapes::rect(&state.paddle(side).rect(), colors::PADDLE));
        }

        if particles {
            ball_particles(&mut vertices, state, rng);
        }

        let ball = &state.ball;
        let r = ball.radius as f32;
        let center = Vec2::new(ball.pos.x.trunc() + r, ball.pos.y.trunc() + r);
        vertices.extend(shapes::spokes(
            center,
            r,
            ball.angle,
            BALL_SPOKES,
            SPOKE_WIDTH,
            colors::BALL,
        ));

        let left = self.text.get(
            &state.scores.left.to_string(),
            SCORE_SCALE,
            colors::TEXT,
        );
        vertices.extend(left.placed(SCORE_MARGIN, SCORE_MARGIN));

        let right = self.text.get(
            &state.scores.right.to_string(),
            SCORE_SCALE,
            colors::TEXT,
        );
        let x = SCREEN_WIDTH as f32 - SCORE_MARGIN - right.width;
        vertices.extend(right.placed(x, SCORE_MARGIN));

        Frame {
            clear: colors::FIELD,
            vertices,
        }
    }

    fn menu(&mut self, selected: MenuOption) -> Frame {
        let mut vertices = Vec::with_capacity(2048);
        let (w, h) = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);

        // Faint pitch behind the title
        field_markings(&mut vertices, colors::MENU_LINE);

        let title = self.text.get("PONG GOAL", TITLE_SCALE, colors::TEXT);
        vertices.extend(title.placed((w - title.width) / 2.0, TITLE_Y));

        let quit = self.text.get("QUIT", MENU_ITEM_SCALE, colors::TEXT);
        let quit_pos = Vec2::new(w - quit.width - MENU_PADDING, h - quit.height - MENU_PADDING);
        let quit_size = Vec2::new(quit.width, quit.height);
        vertices.extend(quit.placed(quit_pos.x, quit_pos.y));

        let start = self.text.get("START", MENU_ITEM_SCALE, colors::TEXT);
        let start_pos = Vec2::new(
            w - start.width - MENU_PADDING,
            quit_pos.y - start.height - MENU_PADDING,
        );
        let start_size = Vec2::new(start.width, start.height);
        vertices.extend(start.placed(start_pos.x, start_pos.y));

        let (pos, size) = match selected {
            MenuOption::Start => (start_pos, start_size),
            MenuOption::Quit => (quit_pos, quit_size),
        };
        let outline = Rect::new(
            (pos.x - HIGHLIGHT_MARGIN) as i32,
            (pos.y - HIGHLIGHT_MARGIN) as i32,
            (size.x + 2.0 * HIGHLIGHT_MARGIN) as i32,
            (size.y + 2.0 * HIGHLIGHT_MARGIN) as i32,
        );
        vertices.extend(shapes::rect_outline(
            &outline,
            HIGHLIGHT_WIDTH,
            colors::HIGHLIGHT,
        ));

        Frame {
            clear: colors::MENU_BACKGROUND,
            vertices,
        }
    }
}

/// Borders, center spot, halfway line, penalty boxes and center circle
fn field_markings(vertices: &mut Vec<Vertex>, color: [f32; 4]) {
    let (w, h) = (SCREEN_WIDTH, SCREEN_HEIGHT);

    for border in [
        Rect::new(0, 0, w, BORDER),
        Rect::new(0, h - BORDER, w, BORDER),
        Rect::new(0, 0, BORDER, h),
        Rect::new(w - BORDER, 0, BORDER, h),
    ] {
        vertices.extend(shapes::rect(&border, color));
    }

    let spot = Rect::new(
        w / 2 - CENTER_SPOT / 2,
        h / 2 - CENTER_SPOT / 2,
        CENTER_SPOT,
        CENTER_SPOT,
    );
    vertices.extend(shapes::rect(&spot, color));

    let halfway = Rect::new(w / 2 - HALFWAY_WIDTH / 2, 0, HALFWAY_WIDTH, h);
    vertices.extend(shapes::rect(&halfway, color));

    for x in [0, w - PENALTY_DEPTH] {
        let penalty = Rect::new(x, h / 4, PENALTY_DEPTH, h / 2);
        vertices.extend(shapes::rect_outline(&penalty, 1.0, color));
    }

    let center = Vec2::new((w / 2) as f32, (h / 2) as f32);
    vertices.extend(shapes::ring(
        center,
        CENTER_CIRCLE_RADIUS - 0.5,
        CENTER_CIRCLE_RADIUS + 0.5,
        color,
        CIRCLE_SEGMENTS,
    ));
}

/// Jittered squares trailing the ball, redrawn every frame
fn ball_particles<R: Rng + ?Sized>(vertices: &mut Vec<Vertex>, state: &GameState, rng: &mut R) {
    let origin = state.ball.pos.trunc();
    for _ in 0..PARTICLE_COUNT {
        let radius: i32 = rng.random_range(5..15);
        let dx: i32 = rng.random_range(-radius..radius);
        let dy: i32 = rng.random_range(-radius..radius);
        let green: u8 = rng.random();
        let alpha: u8 = rng.random();

        vertices.extend(shapes::quad(
            origin.x + dx as f32,
            origin.y + dy as f32,
            (radius * 2) as f32,
            (radius * 2) as f32,
            [1.0, green as f32 / 255.0, 0.0, alpha as f32 / 255.0],
        ));
    }
}
