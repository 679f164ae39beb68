//! Console Mode7: prints a few glyph frames, turning the camera a little
//! between them.
//!
//! ```bash
//! cargo run --bin mode7_term -- --width 120 --height 40 --frames 3
//! ```

use std::io::{self, Write};

use clap::Parser;

use mode7_rs::{
    config::ViewArgs,
    engine::Projector,
    renderer::{GlyphSampler, RendererExt, Terminal, terminal::write_ansi},
    world::Wrap,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    #[command(flatten)]
    view: ViewArgs,

    /// Number of frames to print
    #[arg(long, default_value_t = 1)]
    frames: usize,

    /// Heading change between frames (radians)
    #[arg(long, default_value_t = 0.05, allow_hyphen_values = true)]
    turn: f32,

    /// Leave cells outside the unit texture square empty instead of tiling
    #[arg(long)]
    blank: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let opts = Opts::parse();

    let (screen, mut camera) = opts.view.view_config().build()?;
    let (ground, sky) = opts.view.textures()?;
    let wrap = if opts.blank { Wrap::Blank } else { Wrap::Repeat };
    let ground = GlyphSampler {
        texture: &ground,
        wrap,
    };
    let sky = GlyphSampler {
        texture: &sky,
        wrap,
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut term = Terminal::default();

    for frame in 0..opts.frames {
        let projector = Projector::new(&camera, screen);
        let mut written = Ok(());
        term.draw_frame(&projector, &ground, &sky, |cells, w, _| {
            written = write_ansi(&mut out, cells, w);
        });
        written?;
        writeln!(out)?;
        tracing::debug!(frame, heading = camera.heading(), "frame written");

        camera.turn(opts.turn);
    }
    out.flush()?;
    Ok(())
}
