//! Fixed timestep simulation tick
//!
//! One call to [`tick`] moves the paddles from the sampled input, advances the
//! ball, resolves walls, goals, and paddles, and queues events for sound.

use glam::Vec2;
use rand::Rng;

use super::collision::{Rect, check_collision};
use super::state::{Ball, GameEvent, GameState, Mode, Paddle, ServeStyle, Side};
use crate::consts::*;

/// Held movement keys for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Input commands for a single tick, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: PaddleInput,
    pub right: PaddleInput,
}

/// Advance the game by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.mode != Mode::Playing {
        return;
    }

    // Frozen after a serve
    if state.serve_pause_ticks > 0 {
        state.serve_pause_ticks -= 1;
        return;
    }

    move_paddle(&mut state.left_paddle, input.left);
    move_paddle(&mut state.right_paddle, input.right);
    update(state);
    state.time_ticks += 1;
}

/// Move a paddle by its held keys, clamped to the screen
pub fn move_paddle(paddle: &mut Paddle, input: PaddleInput) {
    if input.up && paddle.y > 0 {
        paddle.y = (paddle.y - PADDLE_SPEED).max(0);
    }
    if input.down && paddle.y < paddle.max_y() {
        paddle.y = (paddle.y + PADDLE_SPEED).min(paddle.max_y());
    }
}

/// Advance the ball and resolve every collision for this tick
pub fn update(state: &mut GameState) {
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    let ball_rect = ball.rect();
    let diameter = ball.diameter() as f32;

    // Top and bottom walls
    if ball.pos.y <= 0.0 || ball.pos.y + diameter >= SCREEN_HEIGHT as f32 {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallHit);
    }

    // Side walls outside the goal mouths
    if ball.pos.x <= 0.0 || ball.pos.x + diameter >= SCREEN_WIDTH as f32 {
        ball.vel.x = -ball.vel.x;
        state.events.push(GameEvent::WallHit);
    }

    if let Some(scorer) = goal_scored(state) {
        state.scores.award(scorer);
        state.events.push(GameEvent::Goal { scorer });
        log::info!(
            "Goal for {:?}: {} - {}",
            scorer,
            state.scores.left,
            state.scores.right
        );
        reset_ball(state, scorer);
        return;
    }

    for side in [Side::Left, Side::Right] {
        let zones = state.paddle(side).rect().thirds();
        // First zone hit wins; the deflection depends on which third was struck
        let deflection = [-BALL_SPEED_Y, 0.0, BALL_SPEED_Y];
        if let Some(i) = zones.iter().position(|zone| check_collision(&ball_rect, zone)) {
            let ball = &mut state.ball;
            ball.vel.x = -ball.vel.x;
            ball.vel.y = deflection[i];
            state.events.push(GameEvent::PaddleHit { side });
            log::debug!("{:?} paddle hit in zone {}", side, i);
        }
    }

    state.ball.angle += BALL_SPIN_PER_TICK;
}

/// Side that scores this tick, if the ball sits in a goal mouth
fn goal_scored(state: &GameState) -> Option<Side> {
    let ball = &state.ball;
    let radius = ball.radius as f32;
    let diameter = ball.diameter() as f32;
    let spans = |goal: &Rect| {
        ball.pos.y + radius >= goal.y as f32 && ball.pos.y <= goal.bottom() as f32
    };

    let left = &state.left_goal;
    let right = &state.right_goal;
    if ball.pos.x <= left.right() as f32 {
        spans(left).then_some(Side::Right)
    } else if ball.pos.x + diameter >= right.x as f32 {
        spans(right).then_some(Side::Left)
    } else {
        None
    }
}

/// Put the ball back on the center spot and launch it from `server`'s side.
///
/// Starts the serve pause; the ball stays put until it runs out.
pub fn reset_ball(state: &mut GameState, server: Side) {
    let dy = match state.serve_style {
        ServeStyle::Straight => 0.0,
        ServeStyle::Randomized => {
            let speed = BALL_SPEED_Y as i32;
            state.rng.random_range(-speed..=speed) as f32
        }
    };

    state.ball = Ball {
        vel: Vec2::new(BALL_SPEED_X * server.serve_direction(), dy),
        ..Ball::default()
    };
    state.serving = server;
    state.serve_pause_ticks = SERVE_PAUSE_TICKS;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Scores;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345);
        state.mode = Mode::Playing;
        state
    }

    /// Place the ball so that it lands on `landing` after one tick
    fn aim(state: &mut GameState, landing: Vec2, vel: Vec2) {
        state.ball.pos = landing - vel;
        state.ball.vel = vel;
    }

    #[test]
    fn test_tick_ignored_in_menu() {
        let mut state = GameState::new(1);
        state.ball.vel = Vec2::new(8.0, 0.0);
        let before = state.ball;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_ball_integrates_velocity() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(300.0, 200.0);
        state.ball.vel = Vec2::new(8.0, -8.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, Vec2::new(308.0, 192.0));
        assert!((state.ball.angle - BALL_SPIN_PER_TICK).abs() < 1e-6);
        assert_eq!(state.time_ticks, 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_top_wall_bounce_emits_event() {
        let mut state = playing_state();
        aim(&mut state, Vec2::new(300.0, -2.0), Vec2::new(8.0, -8.0));
        update(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(8.0, 8.0));
        assert_eq!(state.events, vec![GameEvent::WallHit]);
    }

    #[test]
    fn test_side_wall_outside_goal_bounces() {
        let mut state = playing_state();
        // Above the left goal mouth (goal starts at y = 150)
        aim(&mut state, Vec2::new(-1.0, 60.0), Vec2::new(-8.0, 0.0));
        update(&mut state);
        assert_eq!(state.ball.vel.x, 8.0);
        assert_eq!(state.scores, Scores::default());
        assert_eq!(state.events, vec![GameEvent::WallHit]);
    }

    #[test]
    fn test_left_goal_scores_for_right() {
        let mut state = playing_state();
        aim(&mut state, Vec2::new(6.0, 280.0), Vec2::new(-8.0, 0.0));
        update(&mut state);
        assert_eq!(state.scores, Scores { left: 0, right: 1 });
        assert_eq!(state.ball.pos, Ball::center());
        assert_eq!(state.ball.vel, Vec2::new(-BALL_SPEED_X, 0.0));
        assert_eq!(state.serving, Side::Right);
        assert_eq!(state.serve_pause_ticks, SERVE_PAUSE_TICKS);
        assert_eq!(state.events, vec![GameEvent::Goal { scorer: Side::Right }]);
    }

    #[test]
    fn test_right_goal_scores_for_left() {
        let mut state = playing_state();
        aim(&mut state, Vec2::new(775.0, 300.0), Vec2::new(8.0, 0.0));
        update(&mut state);
        assert_eq!(state.scores, Scores { left: 1, right: 0 });
        assert_eq!(state.ball.vel.x, BALL_SPEED_X);
        assert_eq!(state.serving, Side::Left);
    }

    #[test]
    fn test_goal_needs_vertical_overlap() {
        let mut state = playing_state();
        // Ball top at 460 is below the goal's bottom edge (450)
        aim(&mut state, Vec2::new(5.0, 460.0), Vec2::new(-8.0, 0.0));
        update(&mut state);
        assert_eq!(state.scores, Scores::default());
    }

    #[test]
    fn test_paddle_top_third_deflects_up() {
        let mut state = playing_state();
        // Left paddle spans y 250..350; top third is 250..283
        aim(&mut state, Vec2::new(35.0, 245.0), Vec2::new(-8.0, 8.0));
        update(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(8.0, -BALL_SPEED_Y));
        assert_eq!(state.events, vec![GameEvent::PaddleHit { side: Side::Left }]);
    }

    #[test]
    fn test_paddle_middle_third_flattens() {
        let mut state = playing_state();
        aim(&mut state, Vec2::new(765.0, 295.0), Vec2::new(8.0, -8.0));
        update(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(-8.0, 0.0));
        assert_eq!(state.events, vec![GameEvent::PaddleHit { side: Side::Right }]);
    }

    #[test]
    fn test_paddle_bottom_third_deflects_down() {
        let mut state = playing_state();
        aim(&mut state, Vec2::new(35.0, 330.0), Vec2::new(-8.0, 0.0));
        update(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(8.0, BALL_SPEED_Y));
    }

    #[test]
    fn test_straddling_two_thirds_uses_upper() {
        let mut state = playing_state();
        // Ball spans 275..295, touching both top and middle thirds
        aim(&mut state, Vec2::new(35.0, 275.0), Vec2::new(-8.0, 0.0));
        update(&mut state);
        assert_eq!(state.ball.vel.y, -BALL_SPEED_Y);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_reset_ball_straight() {
        let mut state = playing_state();
        reset_ball(&mut state, Side::Left);
        assert_eq!(state.ball.vel, Vec2::new(BALL_SPEED_X, 0.0));
        reset_ball(&mut state, Side::Right);
        assert_eq!(state.ball.vel, Vec2::new(-BALL_SPEED_X, 0.0));
        assert_eq!(state.ball.radius, BALL_RADIUS);
        assert_eq!(state.ball.angle, 0.0);
    }

    #[test]
    fn test_reset_ball_randomized_stays_in_range() {
        let mut state = playing_state().with_serve_style(ServeStyle::Randomized);
        for _ in 0..200 {
            reset_ball(&mut state, Side::Left);
            let dy = state.ball.vel.y;
            assert!((-BALL_SPEED_Y..=BALL_SPEED_Y).contains(&dy));
            assert_eq!(dy, dy.trunc());
        }
    }

    #[test]
    fn test_serve_pause_freezes_ball_and_paddles() {
        let mut state = playing_state();
        reset_ball(&mut state, Side::Left);
        let input = TickInput {
            left: PaddleInput { up: true, down: false },
            ..Default::default()
        };
        let paddle_y = state.left_paddle.y;
        for _ in 0..SERVE_PAUSE_TICKS {
            tick(&mut state, &input);
            assert_eq!(state.ball.pos, Ball::center());
            assert_eq!(state.left_paddle.y, paddle_y);
        }
        assert!(!state.is_serve_paused());
        tick(&mut state, &input);
        assert_eq!(state.ball.pos.x, Ball::center().x + BALL_SPEED_X);
        assert_eq!(state.left_paddle.y, paddle_y - PADDLE_SPEED);
    }

    #[test]
    fn test_paddle_clamped_at_top() {
        let mut paddle = Paddle::for_side(Side::Left);
        paddle.y = 0;
        move_paddle(&mut paddle, PaddleInput { up: true, down: false });
        assert_eq!(paddle.y, 0);
        paddle.y = 3;
        move_paddle(&mut paddle, PaddleInput { up: true, down: false });
        assert_eq!(paddle.y, 0);
    }

    #[test]
    fn test_paddle_clamped_at_bottom() {
        let mut paddle = Paddle::for_side(Side::Right);
        paddle.y = paddle.max_y();
        move_paddle(&mut paddle, PaddleInput { up: false, down: true });
        assert_eq!(paddle.y, paddle.max_y());
    }

    #[test]
    fn test_both_keys_cancel() {
        let mut paddle = Paddle::for_side(Side::Left);
        let y = paddle.y;
        move_paddle(&mut paddle, PaddleInput { up: true, down: true });
        assert_eq!(paddle.y, y);
    }

    proptest! {
        #[test]
        fn top_wall_inverts_dy_only(
            x in 100.0f32..600.0,
            landing_y in -7i32..=0,
            dy in -8i32..=-1,
            dx in prop::sample::select(vec![-8.0f32, 8.0]),
        ) {
            let mut state = playing_state();
            aim(&mut state, Vec2::new(x, landing_y as f32), Vec2::new(dx, dy as f32));
            update(&mut state);
            prop_assert_eq!(state.ball.vel.y, -(dy as f32));
            prop_assert_eq!(state.ball.vel.x, dx);
        }

        #[test]
        fn bottom_wall_inverts_dy_only(
            x in 100.0f32..600.0,
            landing_y in 580i32..=587,
            dy in 1i32..=8,
            dx in prop::sample::select(vec![-8.0f32, 8.0]),
        ) {
            let mut state = playing_state();
            aim(&mut state, Vec2::new(x, landing_y as f32), Vec2::new(dx, dy as f32));
            update(&mut state);
            prop_assert_eq!(state.ball.vel.y, -(dy as f32));
            prop_assert_eq!(state.ball.vel.x, dx);
        }

        #[test]
        fn left_goal_awards_right_exactly_once(
            landing_x in -7i32..=10,
            landing_y in 140i32..=450,
        ) {
            let mut state = playing_state();
            aim(&mut state, Vec2::new(landing_x as f32, landing_y as f32), Vec2::new(-8.0, 0.0));
            update(&mut state);
            prop_assert_eq!(state.scores, Scores { left: 0, right: 1 });
            prop_assert_eq!(state.ball.pos, Ball::center());
        }

        #[test]
        fn right_goal_awards_left_exactly_once(
            landing_x in 770i32..=787,
            landing_y in 140i32..=450,
        ) {
            let mut state = playing_state();
            aim(&mut state, Vec2::new(landing_x as f32, landing_y as f32), Vec2::new(8.0, 0.0));
            update(&mut state);
            prop_assert_eq!(state.scores, Scores { left: 1, right: 0 });
            prop_assert_eq!(state.ball.pos, Ball::center());
        }

        #[test]
        fn top_third_always_deflects_up(
            landing_x in 11i32..=40,
            landing_y in 230i32..=283,
            prior_dy in -8i32..=8,
        ) {
            let mut state = playing_state();
            aim(&mut state, Vec2::new(landing_x as f32, landing_y as f32), Vec2::new(-8.0, prior_dy as f32));
            update(&mut state);
            prop_assert_eq!(state.ball.vel.y, -BALL_SPEED_Y);
            prop_assert_eq!(state.ball.vel.x, 8.0);
        }
    }
}
