//! Vector-style renderer.
//!
//! The game ships with no sprite assets; everything is drawn each frame
//! with SDL2_gfx primitives. Entities are drawn in world space offset by
//! the camera, with simple parallax on the background layers.

use bevy_ecs::{
    query::{With, Without},
    system::{NonSendMut, Query, Res},
};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::constants::{animation, body, mechanics, GROUND_Y, SCREEN_SIZE};
use crate::systems::components::{
    AnimalKind, Bobbing, BoostKind, BoostTimers, Camera, CurrentLevel, EntityKind, Facing,
    FruitColor, Grounded, PlayerControlled, PlayerLives, Position, ScoreResource, WalkCycle,
};
use crate::systems::stage::GameStage;

const SKY: Color = Color::RGB(135, 206, 235);
const GRASS: Color = Color::RGB(34, 139, 34);
const DARK_GRASS: Color = Color::RGB(0, 100, 0);
const TRUNK: Color = Color::RGB(101, 67, 33);
const CANOPY: Color = Color::RGB(0, 128, 0);
const ROCK: Color = Color::RGB(105, 105, 105);
const HUD_TEXT: Color = Color::WHITE;

fn fruit_color(color: FruitColor) -> Color {
    match color {
        FruitColor::Red => Color::RGB(220, 20, 60),
        FruitColor::Orange => Color::RGB(255, 140, 0),
        FruitColor::Pink => Color::RGB(255, 105, 180),
        FruitColor::Yellow => Color::RGB(255, 215, 0),
    }
}

fn boost_color(boost: BoostKind) -> Color {
    match boost {
        BoostKind::Speed => Color::RGB(0, 255, 255),
        BoostKind::Jump => Color::RGB(0, 255, 0),
        BoostKind::ExtraLife => Color::RGB(255, 0, 255),
        BoostKind::Invulnerability => Color::RGB(255, 255, 0),
    }
}

fn boost_symbol(boost: BoostKind) -> &'static str {
    match boost {
        BoostKind::Speed => "S",
        BoostKind::Jump => "J",
        BoostKind::ExtraLife => "+",
        BoostKind::Invulnerability => "I",
    }
}

fn animal_color(species: AnimalKind) -> Color {
    match species {
        AnimalKind::Fox => Color::RGB(255, 165, 0),
        AnimalKind::Bear => Color::RGB(139, 69, 19),
        AnimalKind::Wolf => Color::RGB(128, 128, 128),
        AnimalKind::Pig => Color::RGB(255, 192, 203),
    }
}

/// Whether a world-space entity is anywhere near the viewport.
fn on_screen(screen_x: i32, width: i32) -> bool {
    screen_x > -width && screen_x < SCREEN_SIZE.x as i32 + width
}

#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    stage: Res<GameStage>,
    camera: Res<Camera>,
    score: Res<ScoreResource>,
    level: Res<CurrentLevel>,
    lives: Res<PlayerLives>,
    entities: Query<
        (&Position, &EntityKind, Option<&Facing>, Option<&WalkCycle>, Option<&Bobbing>),
        Without<PlayerControlled>,
    >,
    player: Query<
        (&Position, &Facing, &WalkCycle, &BoostTimers, &Grounded),
        With<PlayerControlled>,
    >,
) {
    let canvas = &mut **canvas;
    let camera_x = camera.x as i32;

    draw_background(canvas, camera_x);

    // Trees sit behind everything else.
    for (position, kind, ..) in entities.iter() {
        if matches!(kind, EntityKind::Tree) {
            let screen_x = position.0.x as i32 - camera_x;
            if on_screen(screen_x, body::TREE.x as i32) {
                draw_tree(canvas, screen_x, position.0.y as i32);
            }
        }
    }

    draw_ground(canvas, camera_x);

    for (position, kind, facing, walk, bobbing) in entities.iter() {
        let screen_x = position.0.x as i32 - camera_x;
        let y = position.0.y as i32;

        match kind {
            EntityKind::Tree => {}
            EntityKind::Fruit(color) => {
                if on_screen(screen_x, body::FRUIT.x as i32) {
                    draw_fruit(canvas, screen_x, y, fruit_color(*color));
                }
            }
            EntityKind::PowerUp(boost) => {
                if on_screen(screen_x, body::POWER_UP.x as i32) {
                    let offset = bobbing.map(|b| b.offset).unwrap_or(0);
                    draw_power_up(canvas, screen_x, y + offset, *boost);
                }
            }
            EntityKind::Obstacle => {
                if on_screen(screen_x, body::OBSTACLE.x as i32) {
                    draw_obstacle(canvas, screen_x, y);
                }
            }
            EntityKind::Animal(species) => {
                if on_screen(screen_x, body::ANIMAL.x as i32) {
                    let facing = facing.copied().unwrap_or(Facing::Right);
                    let frame = walk.map(|w| w.frame).unwrap_or(0);
                    draw_animal(canvas, screen_x, y, *species, facing, frame);
                }
            }
            EntityKind::Player => {}
        }
    }

    let mut active_boosts = None;
    if let Ok((position, facing, walk, boosts, grounded)) = player.single() {
        let screen_x = position.0.x as i32 - camera_x;
        draw_player(canvas, screen_x, position.0.y as i32, *facing, walk.frame, boosts, grounded.0);
        active_boosts = Some(*boosts);
    }

    let fruits_remaining = entities
        .iter()
        .filter(|(_, kind, ..)| matches!(kind, EntityKind::Fruit(_)))
        .count();
    draw_hud(canvas, score.0, level.0, lives.0, active_boosts, fruits_remaining);

    match *stage {
        GameStage::NotStarted => draw_title_screen(canvas),
        GameStage::GameOver => draw_game_over_screen(canvas, score.0, level.0),
        GameStage::Running => {}
    }

    canvas.present();
}

fn draw_background(canvas: &mut Canvas<Window>, camera_x: i32) {
    canvas.set_draw_color(SKY);
    canvas.clear();

    // Clouds drift at a quarter of the camera speed.
    let parallax = camera_x / 4;
    for i in 0..4 {
        let x = (i * 300 - parallax.rem_euclid(300)) as i16;
        let _ = canvas.filled_ellipse(x, 80, 45, 18, Color::WHITE);
        let _ = canvas.filled_ellipse(x + 30, 70, 35, 15, Color::WHITE);
    }
}

fn draw_ground(canvas: &mut Canvas<Window>, camera_x: i32) {
    let ground = GROUND_Y as i32;
    canvas.set_draw_color(GRASS);
    let _ = canvas.fill_rect(Rect::new(
        0,
        ground,
        SCREEN_SIZE.x,
        SCREEN_SIZE.y - ground as u32,
    ));

    for i in (0..SCREEN_SIZE.x as i32).step_by(10) {
        let _ = canvas.line(i as i16, ground as i16, i as i16, (ground + 5) as i16, DARK_GRASS);
    }

    // Flowers scroll at half camera speed.
    for i in (0..SCREEN_SIZE.x as i32 + 50).step_by(50) {
        let flower_x = i - (camera_x / 2).rem_euclid(50);
        if flower_x > -10 && flower_x < SCREEN_SIZE.x as i32 + 10 {
            let _ = canvas.filled_circle(flower_x as i16, (ground + 13) as i16, 3, Color::YELLOW);
        }
    }
}

fn draw_tree(canvas: &mut Canvas<Window>, x: i32, y: i32) {
    let width = body::TREE.x as i32;
    let height = body::TREE.y as i32;
    canvas.set_draw_color(TRUNK);
    let _ = canvas.fill_rect(Rect::new(x + width / 2 - 6, y + height / 2, 12, (height / 2) as u32));
    let _ = canvas.filled_circle((x + width / 2) as i16, (y + height / 3) as i16, (width / 2 + 6) as i16, CANOPY);
}

fn draw_fruit(canvas: &mut Canvas<Window>, x: i32, y: i32, color: Color) {
    let radius = (body::FRUIT.x / 2.0) as i16;
    let center_x = x as i16 + radius;
    let center_y = y as i16 + radius;
    let _ = canvas.filled_circle(center_x, center_y, radius, color);
    let _ = canvas.filled_circle(center_x - 3, center_y - 3, 2, Color::WHITE);
    let _ = canvas.line(center_x, center_y - radius, center_x + 3, center_y - radius - 4, DARK_GRASS);
}

fn draw_power_up(canvas: &mut Canvas<Window>, x: i32, y: i32, boost: BoostKind) {
    let size = body::POWER_UP.x as i16;
    let center_x = x as i16 + size / 2;
    let center_y = y as i16 + size / 2;
    let color = boost_color(boost);

    let glow = Color::RGBA(color.r, color.g, color.b, 50);
    let _ = canvas.filled_circle(center_x, center_y, size / 2 + 5, glow);
    let _ = canvas.filled_circle(center_x, center_y, size / 2, color);
    let _ = canvas.filled_circle(center_x, center_y, size / 2 - 5, Color::WHITE);
    let _ = canvas.filled_circle(center_x, center_y, size / 2 - 8, color);
    let _ = canvas.string(center_x - 4, center_y - 4, boost_symbol(boost), Color::WHITE);
}

fn draw_obstacle(canvas: &mut Canvas<Window>, x: i32, y: i32) {
    let width = body::OBSTACLE.x as u32;
    let height = body::OBSTACLE.y as u32;
    canvas.set_draw_color(ROCK);
    let _ = canvas.fill_rect(Rect::new(x, y, width, height));
    let _ = canvas.filled_ellipse(
        (x + width as i32 / 2) as i16,
        y as i16,
        (width / 2) as i16,
        8,
        ROCK,
    );
    let _ = canvas.line(
        (x + 5) as i16,
        (y + 10) as i16,
        (x + width as i32 - 8) as i16,
        (y + height as i32 - 6) as i16,
        Color::RGB(80, 80, 80),
    );
}

fn draw_animal(
    canvas: &mut Canvas<Window>,
    x: i32,
    y: i32,
    species: AnimalKind,
    facing: Facing,
    frame: u8,
) {
    let width = body::ANIMAL.x as i32;
    let height = body::ANIMAL.y as i32;
    let color = animal_color(species);

    canvas.set_draw_color(color);
    let _ = canvas.fill_rect(Rect::new(x, y + 8, width as u32, (height - 16) as u32));

    // Head leads in the walking direction.
    let head_x = if facing == Facing::Right { x + width - 12 } else { x - 2 };
    let _ = canvas.fill_rect(Rect::new(head_x, y, 14, 14));
    let eye_x = if facing == Facing::Right { head_x + 9 } else { head_x + 2 };
    let _ = canvas.filled_circle((eye_x + 2) as i16, (y + 5) as i16, 2, Color::BLACK);

    // Legs alternate with the walk cycle.
    let stride = if frame % 2 == 0 { 0 } else { 3 };
    let _ = canvas.fill_rect(Rect::new(x + 4 + stride, y + height - 8, 6, 8));
    let _ = canvas.fill_rect(Rect::new(x + width - 10 - stride, y + height - 8, 6, 8));
}

fn draw_player(
    canvas: &mut Canvas<Window>,
    x: i32,
    y: i32,
    facing: Facing,
    frame: u8,
    boosts: &BoostTimers,
    grounded: bool,
) {
    // Blink while the shield from a recent hit is active.
    if boosts.is_shielded() && (boosts.invulnerability / animation::BLINK_DIVISOR) % 2 != 0 {
        return;
    }

    let width = body::PLAYER.x as i32;
    let height = body::PLAYER.y as i32;

    let body_color = if boosts.speed > 0 {
        Color::RGB(0, 255, 255)
    } else if boosts.jump > 0 {
        Color::RGB(0, 255, 0)
    } else {
        Color::RGB(30, 80, 220)
    };

    canvas.set_draw_color(body_color);
    let _ = canvas.fill_rect(Rect::new(x, y, width as u32, height as u32));

    let eye_offset = if facing == Facing::Right { 10 } else { width - 30 };
    let _ = canvas.filled_circle((x + eye_offset + 4) as i16, (y + 14) as i16, 4, Color::WHITE);
    let _ = canvas.filled_circle((x + eye_offset + 16) as i16, (y + 14) as i16, 4, Color::WHITE);
    let _ = canvas.filled_circle((x + eye_offset + 5) as i16, (y + 15) as i16, 2, Color::BLACK);
    let _ = canvas.filled_circle((x + eye_offset + 17) as i16, (y + 15) as i16, 2, Color::BLACK);

    let stride_a = if frame % 2 == 0 { 0 } else { 2 };
    let stride_b = if frame % 2 == 0 { 2 } else { 0 };
    let _ = canvas.fill_rect(Rect::new(x + 8 + stride_a, y + height - 10, 8, 10));
    let _ = canvas.fill_rect(Rect::new(x + 24 + stride_b, y + height - 10, 8, 10));
    let _ = canvas.fill_rect(Rect::new(x - 5, y + 20, 10, 6));
    let _ = canvas.fill_rect(Rect::new(x + width - 5, y + 20, 10, 6));

    // Active boost effects.
    if boosts.speed > 0 {
        let trail = Color::RGBA(0, 255, 255, 100);
        for i in 1..=5i32 {
            let _ = canvas.line(
                (x - i * 10) as i16,
                (y + height / 2) as i16,
                (x - i * 5) as i16,
                (y + height / 2) as i16,
                trail,
            );
        }
    }

    if boosts.jump > 0 && !grounded {
        let mid = (x + width / 2) as i16;
        let _ = canvas.filled_trigon(
            mid,
            (y - 10) as i16,
            mid - 5,
            (y - 5) as i16,
            mid + 5,
            (y - 5) as i16,
            Color::RGBA(0, 255, 0, 150),
        );
    }

    if boosts.invulnerability > mechanics::DAMAGE_SHIELD_TICKS {
        let _ = canvas.ellipse(
            (x + width / 2) as i16,
            (y + height / 2) as i16,
            (width / 2 + 8) as i16,
            (height / 2 + 8) as i16,
            Color::RGBA(255, 255, 0, 150),
        );
    }
}

/// Width of the filled part of the level-progress bar, out of
/// `PROGRESS_BAR_WIDTH` pixels.
fn progress_width(level: u32, fruits_remaining: usize) -> i16 {
    let total = (10 + level * 3) as usize;
    let collected = total.saturating_sub(fruits_remaining);
    (PROGRESS_BAR_WIDTH as f64 * collected as f64 / total as f64) as i16
}

const PROGRESS_BAR_WIDTH: i16 = 150;

fn draw_hud(
    canvas: &mut Canvas<Window>,
    score: u32,
    level: u32,
    lives: u8,
    boosts: Option<BoostTimers>,
    fruits_remaining: usize,
) {
    let _ = canvas.string(10, 10, &format!("SCORE {score}"), HUD_TEXT);
    let _ = canvas.string(10, 24, &format!("LEVEL {level}"), HUD_TEXT);
    let _ = canvas.string(10, 38, "LIVES", HUD_TEXT);
    for i in 0..lives as i16 {
        let _ = canvas.filled_circle(62 + i * 14, 42, 5, Color::RGB(220, 20, 60));
    }

    if let Some(boosts) = boosts {
        if boosts.speed > 0 {
            let _ = canvas.string(10, 52, "SPEED BOOST!", Color::RGB(0, 255, 255));
        }
        if boosts.jump > 0 {
            let _ = canvas.string(10, 62, "JUMP BOOST!", Color::RGB(0, 255, 0));
        }
    }

    // Fruit collection progress for the current level, top-right.
    let bar_x = SCREEN_SIZE.x as i16 - PROGRESS_BAR_WIDTH - 10;
    let filled = progress_width(level, fruits_remaining);
    let _ = canvas.box_(bar_x, 10, bar_x + PROGRESS_BAR_WIDTH, 25, Color::GRAY);
    if filled > 0 {
        let _ = canvas.box_(bar_x, 10, bar_x + filled, 25, Color::GREEN);
    }
    let _ = canvas.string(bar_x, 30, "LEVEL PROGRESS", HUD_TEXT);
}

fn draw_title_screen(canvas: &mut Canvas<Window>) {
    let center = (SCREEN_SIZE.x / 2) as i16;
    let _ = canvas.box_(
        0,
        0,
        SCREEN_SIZE.x as i16,
        SCREEN_SIZE.y as i16,
        Color::RGBA(0, 0, 0, 120),
    );
    let _ = canvas.string(center - 52, 200, "FOREST RUNNER", Color::RGB(0, 255, 128));
    let _ = canvas.string(center - 88, 260, "PRESS SPACE TO START", HUD_TEXT);
    let _ = canvas.string(center - 116, 300, "ARROWS OR WASD MOVE, UP JUMPS", HUD_TEXT);
    let _ = canvas.string(center - 96, 320, "M MUTES, ESCAPE QUITS", HUD_TEXT);
}

fn draw_game_over_screen(canvas: &mut Canvas<Window>, score: u32, level: u32) {
    let center = (SCREEN_SIZE.x / 2) as i16;
    let _ = canvas.box_(
        0,
        0,
        SCREEN_SIZE.x as i16,
        SCREEN_SIZE.y as i16,
        Color::RGBA(0, 0, 0, 160),
    );
    let _ = canvas.string(center - 36, 220, "GAME OVER", Color::RGB(220, 20, 60));
    let _ = canvas.string(center - 56, 260, &format!("FINAL SCORE {score}"), HUD_TEXT);
    let _ = canvas.string(center - 60, 280, &format!("LEVEL REACHED {level}"), HUD_TEXT);
    let _ = canvas.string(center - 92, 320, "PRESS SPACE TO RESTART", HUD_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_empty_at_level_start() {
        // Level 1 starts with all 13 fruits in the world.
        assert_eq!(progress_width(1, 13), 0);
    }

    #[test]
    fn test_progress_bar_full_when_no_fruit_remains() {
        assert_eq!(progress_width(1, 0), PROGRESS_BAR_WIDTH);
        assert_eq!(progress_width(4, 0), PROGRESS_BAR_WIDTH);
    }

    #[test]
    fn test_progress_bar_grows_with_collection() {
        let total = 13;
        let mut previous = progress_width(1, total);
        for remaining in (0..total).rev() {
            let width = progress_width(1, remaining);
            assert!(width >= previous);
            previous = width;
        }
        assert!(progress_width(1, 6) > 0);
        assert!(progress_width(1, 6) < PROGRESS_BAR_WIDTH);
    }
}
