use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use netportrait::{
    animate::{AnimationOptions, AnimationOutput, Animator},
    load::load_graph,
    npy,
    portrait::{PortraitBuilder, PortraitOptions, ShellBound, TrimMode},
    render::{self, Colormap, RenderOptions},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "netportrait",
    about = "Network portraits: shell-size distributions of graphs, drawn and animated",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the portrait of one graph and save it as a matrix or a picture
    Draw {
        /// Graph file, the format follows the extension
        graph: PathBuf,
        /// Output path; `.npy` or `.png` is appended when missing
        output: PathBuf,
        #[arg(value_enum)]
        mode: DrawMode,
        #[command(flatten)]
        portrait: PortraitArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Animate the portraits of a directory of numbered graph files
    Animate {
        /// Directory holding `1.<ext>`, `2.<ext>`, ...
        dir: PathBuf,
        /// Frames per second
        fps: u32,
        /// Write a directory of PNG frames instead of a GIF
        #[arg(long, default_value_t = false)]
        frames: bool,
        /// Output path, `<DIR>.gif` or `<DIR>_animated` by default
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        #[command(flatten)]
        portrait: PortraitArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DrawMode {
    /// NumPy `.npy` matrix
    Matrix,
    /// Rendered picture
    Picture,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Trim {
    Argmax,
    Populated,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColormapArg {
    Viridis,
    Gray,
}

#[derive(Args, Debug)]
struct PortraitArgs {
    /// How trailing distance rows are trimmed
    #[arg(long, value_enum, default_value_t = Trim::Argmax)]
    trim: Trim,
    /// Record shells at the diameter itself
    #[arg(long, default_value_t = false)]
    include_diameter: bool,
    /// Worker threads for the shell computation
    #[arg(long, value_name = "N", default_value_t = 1)]
    threads: usize,
}

impl PortraitArgs {
    fn options(&self) -> PortraitOptions {
        PortraitOptions::default()
            .trim(match self.trim {
                Trim::Argmax => TrimMode::Argmax,
                Trim::Populated => TrimMode::Populated,
            })
            .shell_bound(if self.include_diameter {
                ShellBound::Inclusive
            } else {
                ShellBound::Exclusive
            })
            .num_threads(self.threads)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long, value_enum, default_value_t = ColormapArg::Viridis)]
    colormap: ColormapArg,
    /// Pixels per matrix cell
    #[arg(long, value_name = "N", default_value_t = 4)]
    scale: u32,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions::default()
            .colormap(match self.colormap {
                ColormapArg::Viridis => Colormap::Viridis,
                ColormapArg::Gray => Colormap::Gray,
            })
            .scale(self.scale)
    }
}

fn draw(
    graph: PathBuf,
    output: PathBuf,
    mode: DrawMode,
    portrait: &PortraitArgs,
    render: &RenderArgs,
) -> anyhow::Result<()> {
    let adjacency = load_graph(&graph)?.adjacency_list();
    let matrix = PortraitBuilder::new(portrait.options())
        .build(&adjacency)
        .with_context(|| format!("failed to compute the portrait of {}", graph.display()))?;

    let written = match mode {
        DrawMode::Matrix => npy::save_matrix(&matrix, &output)?,
        DrawMode::Picture => render::save_picture(&matrix, &output, &render.options())?,
    };
    println!("{}", written.display());

    Ok(())
}

fn animate(
    dir: PathBuf,
    fps: u32,
    frames: bool,
    output: Option<PathBuf>,
    portrait: &PortraitArgs,
    render: &RenderArgs,
) -> anyhow::Result<()> {
    let output = match (frames, output) {
        (false, Some(path)) => AnimationOutput::Gif(path),
        (true, Some(path)) => AnimationOutput::Frames(path),
        (false, None) => AnimationOutput::gif_for(&dir),
        (true, None) => AnimationOutput::frames_for(&dir),
    };

    let options = AnimationOptions::default()
        .portrait(portrait.options())
        .render(render.options())
        .fps(fps);
    let written = Animator::new(options)
        .run(&dir, &output)
        .with_context(|| format!("failed to animate {}", dir.display()))?;
    println!("{}", written.display());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Draw {
            graph,
            output,
            mode,
            portrait,
            render,
        } => draw(graph, output, mode, &portrait, &render),
        Command::Animate {
            dir,
            fps,
            frames,
            output,
            portrait,
            render,
        } => animate(dir, fps, frames, output, &portrait, &render),
    }
}
