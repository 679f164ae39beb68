//! Interactive Mode7 viewer.
//!
//! Controls  ↑/↓ = move ←/→ = turn  Q/A = near ± W/S = far ± Z/X = fov ±
//!           P = toggle per-fragment path  Esc = quit
//!
//! ```bash
//! cargo run --release --bin view_sw -- --ground assets/track.png
//! ```

use std::time::{Duration, Instant};

use clap::Parser;
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use mode7_rs::{
    config::ViewArgs,
    engine::Projector,
    renderer::{Nearest, Software, fragment},
};

const MOVE_SPEED: f32 = 0.2; // texture units / s
const TURN_SPEED: f32 = 1.0; // rad / s
const TUNE_SPEED: f32 = 0.1; // near / far units, fov rad per s

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    #[command(flatten)]
    view: ViewArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let (screen, mut camera) = opts.view.view_config().build()?;
    let (ground, sky) = opts.view.textures()?;

    let mut renderer = Software::default();
    let mut fragments = vec![0; screen.w * screen.h];
    let mut use_fragments = false;

    let mut win = Window::new(
        "Mode7 Software Render",
        screen.w,
        screen.h,
        WindowOptions {
            scale: Scale::X2,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we reported last
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();

        /* --------------- input mutates the camera between frames ------------ */
        if win.is_key_down(Key::Up) {
            camera.step(MOVE_SPEED * dt);
        }
        if win.is_key_down(Key::Down) {
            camera.step(-MOVE_SPEED * dt);
        }
        if win.is_key_down(Key::Left) {
            camera.turn(-TURN_SPEED * dt);
        }
        if win.is_key_down(Key::Right) {
            camera.turn(TURN_SPEED * dt);
        }
        if win.is_key_down(Key::Q) {
            camera.adjust_near(TUNE_SPEED * dt);
        }
        if win.is_key_down(Key::A) {
            camera.adjust_near(-TUNE_SPEED * dt);
        }
        if win.is_key_down(Key::W) {
            camera.adjust_far(TUNE_SPEED * dt);
        }
        if win.is_key_down(Key::S) {
            camera.adjust_far(-TUNE_SPEED * dt);
        }
        if win.is_key_down(Key::Z) {
            camera.widen(TUNE_SPEED * dt);
        }
        if win.is_key_down(Key::X) {
            camera.widen(-TUNE_SPEED * dt);
        }
        if win.is_key_pressed(Key::P, KeyRepeat::No) {
            use_fragments = !use_fragments;
            tracing::info!(use_fragments, "render path switched");
        }

        /* draw from a snapshot: the projector copies what it needs */
        let t0 = Instant::now(); // ┌─ frame timer start
        let projector = Projector::new(&camera, screen);

        if use_fragments {
            fragment::render_fragments(&projector, &ground, &sky, &mut fragments);
            acc_time += t0.elapsed();
            win.update_with_buffer(&fragments, screen.w, screen.h)?;
        } else {
            let mut shown = Ok(());
            renderer.render_par(
                &projector,
                &Nearest::repeat(&ground),
                &Nearest::repeat(&sky),
                |fb, w, h| {
                    acc_time += t0.elapsed();
                    shown = win.update_with_buffer(fb, w, h);
                },
            );
            shown?;
        }
        acc_frames += 1;

        // ─────────── report every ~3 s ────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            tracing::info!(
                avg_ms = format_args!("{avg_ms:.2}"),
                fps = format_args!("{:.1}", 1000.0 / avg_ms),
                pos = ?camera.pos(),
                heading = camera.heading(),
                "avg render"
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
