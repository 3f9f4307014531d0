//! Headless demo: an archer walks toward a tower while the camera follows,
//! shakes on the bump and stays clamped to the level.
//!
//! Usage: `spritecore [settings.json]`

use glam::Vec2;
use spritecore::{FollowAxis, FrameContext, Scene, Settings, Sprite};

const LEVEL_WIDTH: f32 = 1600.0;
const LEVEL_HEIGHT: f32 = 900.0;
const FRAME_SECS: f32 = 1.0 / 60.0;
const WALK_SPEED: f32 = 120.0;

fn main() {
    env_logger::init();
    log::info!("spritecore demo starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut ctx = FrameContext::from_settings(&settings);
    let mut scene = Scene::with_settings(800.0, 600.0, &settings);

    let archer = scene.add_sprite(
        Sprite::new(Vec2::new(48.0, 64.0), Vec2::new(100.0, 700.0))
            .with_sphere(14.0, 0.0, 0.0)
            .with_sphere(8.0, 20.0, 0.0),
    );
    let tower = scene.add_sprite(
        Sprite::new(Vec2::new(128.0, 256.0), Vec2::new(900.0, 560.0))
            .with_sphere(60.0, 0.0, 0.0)
            .with_sphere(60.0, 80.0, std::f32::consts::FRAC_PI_2),
    );
    scene.follow(archer, FollowAxis::Both);

    let mut blocked_at = None;
    for _ in 0..600 {
        let dt = scene.update(&mut ctx, FRAME_SECS);
        scene.camera.clamp_to_area(0.0, 0.0, LEVEL_WIDTH, LEVEL_HEIGHT);

        if blocked_at.is_some() {
            continue;
        }
        if !scene.try_move(archer, Vec2::new(WALK_SPEED * dt, 0.0), 0.0) {
            blocked_at = Some(ctx.frame);
            scene.camera.shake(0.5, 8.0);
            log::info!("Archer bumped into the tower {tower:?} at frame {}", ctx.frame);
        }
    }

    let camera = &scene.camera;
    log::info!(
        "Finished {} frames: camera at {:?}, scale {:.3}, shaking {}",
        ctx.frame,
        camera.position(),
        camera.scale(),
        camera.is_shaking()
    );
    if let Some(archer) = scene.sprite(archer) {
        log::info!(
            "Archer at {:?} (screen {:?})",
            archer.position,
            camera.world_to_screen(archer.center())
        );
    }
}
