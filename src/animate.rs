//! Animating the portraits of a sequence of graphs.
//!
//! A directory of numbered graph files (`1.gml`, `2.gml`, ..., `10.gml`) is read in numeric
//! order, every graph gets its portrait, the portraits are cropped to a common shape and the
//! frames are rendered on one shared colour scale, so intensities compare across frames.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, DynamicImage, Frame, ImageFormat, RgbImage,
};
use itertools::Itertools;

use crate::{
    batch,
    error::{Error, Result},
    graph::AdjacencyList,
    load::{load_graph, GRAPH_EXTENSIONS},
    portrait::{Portrait, PortraitOptions},
    render::{self, RenderOptions},
};

/// Returns whether a file with this extension is taken as an animation frame: any graph
/// extension except the plain `txt` one, which `draw` still reads as an edge list.
fn is_frame_extension(extension: &str) -> bool {
    let extension = extension.to_ascii_lowercase();
    extension != "txt" && GRAPH_EXTENSIONS.contains(&extension.as_str())
}

/// Lists the graph files of `dir` (not recursing) sorted by the integer before the first `.` of
/// their names.
///
/// Files with other extensions (`.txt` included) are skipped, a graph file whose name doesn't
/// start with an integer is an error.
pub fn discover(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut numbered = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| Error::load(dir.display(), e))? {
        let path = entry?.path();
        let is_graph = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(is_frame_extension)
            .unwrap_or(false);
        if !path.is_file() {
            continue;
        }
        if !is_graph {
            tracing::warn!(path = %path.display(), "skipping file that isn't a graph");
            continue;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let prefix = name.split('.').next().unwrap_or_default();
        let number: u64 = prefix
            .parse()
            .map_err(|_| Error::load(path.display(), "file name must start with a frame number"))?;

        numbered.push((number, path));
    }

    Ok(numbered
        .into_iter()
        .sorted_by_key(|(number, _)| *number)
        .map(|(_, path)| path)
        .collect())
}

/// Parameters of an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationOptions {
    pub portrait: PortraitOptions,
    /// An explicit `range` here overrides the one computed over the batch.
    pub render: RenderOptions,
    /// Frames per second, must be positive.
    pub fps: u32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            portrait: PortraitOptions::default(),
            render: RenderOptions::default(),
            fps: 10,
        }
    }
}

impl AnimationOptions {
    pub fn portrait(mut self, portrait: PortraitOptions) -> Self {
        self.portrait = portrait;
        self
    }

    pub fn render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }
}

/// Where the frames of an animation go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnimationOutput {
    /// A single infinitely looping GIF.
    Gif(PathBuf),
    /// A directory of PNG frames named after the graph files.
    Frames(PathBuf),
}

impl AnimationOutput {
    /// `<dir>.gif`, next to the input directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use netportrait::animate::AnimationOutput;
    ///
    /// assert_eq!(
    ///     AnimationOutput::gif_for("runs/epidemic/"),
    ///     AnimationOutput::Gif(PathBuf::from("runs/epidemic.gif"))
    /// );
    /// ```
    pub fn gif_for(dir: impl AsRef<Path>) -> Self {
        Self::Gif(sibling(dir.as_ref(), ".gif"))
    }

    /// `<dir>_animated`, next to the input directory.
    pub fn frames_for(dir: impl AsRef<Path>) -> Self {
        Self::Frames(sibling(dir.as_ref(), "_animated"))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Gif(path) | Self::Frames(path) => path,
        }
    }
}

fn sibling(dir: &Path, suffix: &str) -> PathBuf {
    // Collecting the components drops a trailing separator.
    let dir: PathBuf = dir.components().collect();
    let mut name = dir
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("portraits"));
    name.push(suffix);

    dir.with_file_name(name)
}

/// Turns a directory of graphs into an animation of their portraits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Animator {
    options: AnimationOptions,
}

impl Animator {
    pub fn new(options: AnimationOptions) -> Self {
        Self { options }
    }

    /// Renders the frames of the graphs found in `dir` and writes them to `output`, returning the
    /// path written.
    pub fn run(&self, dir: impl AsRef<Path>, output: &AnimationOutput) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if self.options.fps == 0 {
            return Err(Error::render("frames per second must be positive"));
        }

        let files = discover(dir)?;
        if files.is_empty() {
            return Err(Error::load(dir.display(), "no graph files found"));
        }

        let frames = self.frames(&files)?;

        match output {
            AnimationOutput::Gif(path) => write_gif(frames, path, self.options.fps)?,
            AnimationOutput::Frames(out) => write_frames(frames, &files, out)?,
        }
        tracing::info!(path = %output.path().display(), frames = files.len(), "animation written");

        Ok(output.path().to_path_buf())
    }

    /// Computes, aligns and colours one frame per graph file.
    fn frames(&self, files: &[PathBuf]) -> Result<Vec<RgbImage>> {
        let graphs = files
            .iter()
            .map(|path| load_graph(path).map(|mut graph| graph.adjacency_list()))
            .collect::<Result<Vec<AdjacencyList>>>()?;

        let mut portraits: Vec<_> = graphs
            .iter()
            .map(|graph| Portrait::with_options(graph, self.options.portrait))
            .collect();

        let total = portraits.len();
        for (i, (portrait, path)) in portraits.iter_mut().zip(files).enumerate() {
            portrait.compute()?;
            tracing::info!(frame = i + 1, total, path = %path.display(), "portrait computed");
        }

        let grids = batch::crop(&mut portraits)?
            .iter()
            .filter_map(|portrait| portrait.matrix())
            .map(render::to_image)
            .collect::<Result<Vec<_>>>()?;

        // One scale for the whole batch.
        let range = self.options.render.range.or_else(|| {
            grids
                .iter()
                .filter_map(render::intensity_range)
                .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
        });
        let options = self.options.render.range(range);

        grids
            .iter()
            .map(|grid| render::to_rgb(grid, &options))
            .collect()
    }
}

fn write_gif(frames: Vec<RgbImage>, path: &Path, fps: u32) -> Result<()> {
    let mut encoder = GifEncoder::new(BufWriter::new(File::create(path)?));
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(1000, fps);
    for frame in frames {
        let rgba = DynamicImage::ImageRgb8(frame).into_rgba8();
        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
    }

    Ok(())
}

fn write_frames(frames: Vec<RgbImage>, files: &[PathBuf], out: &Path) -> Result<()> {
    fs::create_dir_all(out)?;

    for (frame, file) in frames.into_iter().zip(files) {
        let mut name = file.file_stem().map(OsString::from).unwrap_or_default();
        name.push(".png");

        let path = out.join(name);
        frame.save_with_format(&path, ImageFormat::Png)?;
        tracing::debug!(path = %path.display(), "frame written");
    }

    Ok(())
}
