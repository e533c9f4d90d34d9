use std::collections::HashMap;
use std::sync::{Arc, mpsc};

use rayon::prelude::*;

use crate::assets::paths::resolve_static_file;
use crate::composition::settings::CompositionSettings;
use crate::composition::timeline::Timeline;
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{StoryreelError, StoryreelResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;
use crate::render::fonts::FontSet;
use crate::scene::SceneCtx;
use crate::scene::compose::compose_frame;
use crate::scene::display::DisplayList;
use crate::storyboard::model::InputProps;

const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;
const SINK_CLOSED: &str = "sink thread is not accepting frames";

/// Options controlling [`RenderSession::render_range`].
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Render frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames handed to the pool at a time; also bounds the reorder buffer.
    pub chunk_size: usize,
    /// Worker thread count. `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Bounded channel capacity between renderers and the sink thread.
    pub channel_capacity: usize,
    /// Pass the narration file (`audioSrc`) to the sink.
    pub enable_audio: bool,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            channel_capacity: 4,
            enable_audio: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub chunks: u64,
}

/// Validated props + settings with resolved fonts, ready to render frames.
pub struct RenderSession {
    props: InputProps,
    settings: CompositionSettings,
    timeline: Timeline,
    fonts: Arc<FontSet>,
    opts: RenderSessionOpts,
    backend: Option<CpuBackend>,
}

impl RenderSession {
    /// Validate inputs and discover fonts from `settings.fonts_dir` and the system.
    #[tracing::instrument(level = "debug", skip_all, fields(title = %props.storyboard.title))]
    pub fn new(
        props: InputProps,
        settings: CompositionSettings,
        opts: RenderSessionOpts,
    ) -> StoryreelResult<Self> {
        let fonts = FontSet::discover(settings.fonts_dir.as_deref());
        Self::with_fonts(props, settings, opts, Arc::new(fonts))
    }

    pub fn with_fonts(
        props: InputProps,
        settings: CompositionSettings,
        opts: RenderSessionOpts,
        fonts: Arc<FontSet>,
    ) -> StoryreelResult<Self> {
        props.validate()?;
        settings.validate()?;
        let timeline = Timeline::new(&settings, props.storyboard.segments.len())?;
        if timeline.total_frames() > timeline.duration {
            tracing::warn!(
                needed = timeline.total_frames(),
                duration = timeline.duration,
                "composition is shorter than the storyboard; later segments are cut"
            );
        }
        Ok(Self {
            props,
            settings,
            timeline,
            fonts,
            opts,
            backend: None,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Evaluate one frame without rasterizing it.
    pub fn display_list(&self, frame: FrameIndex) -> StoryreelResult<DisplayList> {
        let ctx = SceneCtx::from_settings(&self.settings)?;
        compose_frame(&ctx, &self.props.storyboard, &self.timeline, frame)
    }

    pub fn render_frame(&mut self, frame: FrameIndex) -> StoryreelResult<FrameRGBA> {
        let list = self.display_list(frame)?;
        let backend = match self.backend.as_mut() {
            Some(b) => b,
            None => self
                .backend
                .insert(CpuBackend::new(self.settings.canvas(), &self.fonts)?),
        };
        backend.render(&list)
    }

    /// Narration input for `range`, if enabled and the file exists under `public_dir`.
    pub fn audio_input(&self, range: FrameRange) -> StoryreelResult<Option<AudioInputConfig>> {
        if !self.opts.enable_audio {
            return Ok(None);
        }
        let Some(src) = self.props.audio_src.as_deref() else {
            return Ok(None);
        };
        let path = resolve_static_file(&self.settings.public_dir, src)?;
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "narration audio not found; rendering silent");
            return Ok(None);
        }
        Ok(Some(AudioInputConfig {
            path,
            duration_secs: self.timeline.fps.frames_to_secs(range.len_frames()),
        }))
    }

    /// Render `range` and stream it into `sink` in strictly increasing frame order.
    #[tracing::instrument(level = "info", skip(self, sink), fields(parallel = self.opts.parallel))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> StoryreelResult<RenderStats> {
        if range.is_empty() {
            return Err(StoryreelError::validation(
                "render_range range must be non-empty",
            ));
        }
        if range.end.0 > self.timeline.duration {
            return Err(StoryreelError::validation(
                "render_range range must be within composition duration",
            ));
        }

        let canvas = self.settings.canvas();
        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.timeline.fps,
            audio: self.audio_input(range)?,
        };

        let cap = self.opts.channel_capacity.max(1);
        let bytes_per_frame = u64::from(cfg.width)
            .saturating_mul(u64::from(cfg.height))
            .saturating_mul(4)
            .max(1);
        let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);
        let chunk_size = (self.opts.chunk_size.max(1) as u64)
            .min(max_chunk_by_mem)
            .min(range.len_frames());

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };

        let scene = SceneCtx::from_settings(&self.settings)?;
        let job = FrameJob {
            scene,
            props: &self.props,
            timeline: &self.timeline,
            fonts: &self.fonts,
        };
        let sequential_backend = &mut self.backend;

        std::thread::scope(|scope| -> StoryreelResult<RenderStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
            let range_start = range.start.0;
            let range_end = range.end.0;
            let sink_ref: &mut dyn FrameSink = sink;

            // Sink thread: reorders completed frames so the sink sees them in timeline order.
            let enc = scope.spawn(move || -> StoryreelResult<()> {
                sink_ref.begin(cfg)?;

                let mut next = range_start;
                let mut pending = HashMap::<u64, FrameRGBA>::new();
                while next < range_end {
                    if let Some(frame) = pending.remove(&next) {
                        sink_ref.push_frame(FrameIndex(next), &frame)?;
                        next += 1;
                        continue;
                    }
                    let msg = rx.recv().map_err(|_| {
                        StoryreelError::evaluation("frame channel disconnected unexpectedly")
                    })?;
                    pending.insert(msg.idx.0, msg.frame);
                }

                sink_ref.end()
            });

            let mut stats = RenderStats::default();
            let mut produce = || -> StoryreelResult<()> {
                let mut chunk_start = range_start;
                while chunk_start < range_end {
                    let chunk_end = (chunk_start + chunk_size).min(range_end);
                    match pool.as_ref() {
                        Some(pool) => {
                            render_chunk_parallel(&job, pool, &tx, chunk_start, chunk_end)?;
                        }
                        None => {
                            let backend = match sequential_backend.as_mut() {
                                Some(b) => b,
                                None => sequential_backend.insert(job.backend()?),
                            };
                            for f in chunk_start..chunk_end {
                                let frame = job.render(backend, FrameIndex(f))?;
                                send(&tx, FrameIndex(f), frame)?;
                            }
                        }
                    }
                    stats.frames_total += chunk_end - chunk_start;
                    stats.chunks += 1;
                    chunk_start = chunk_end;
                }
                Ok(())
            };
            let produce_res = produce();

            drop(tx);
            let enc_res = enc
                .join()
                .map_err(|_| StoryreelError::evaluation("sink thread panicked"))?;

            if let Err(e) = produce_res {
                // Renderers only see a closed channel when the sink itself failed.
                return Err(match enc_res {
                    Err(sink_err) if is_sink_closed(&e) => sink_err,
                    _ => e,
                });
            }
            enc_res?;
            tracing::debug!(frames = stats.frames_total, chunks = stats.chunks, "range rendered");
            Ok(stats)
        })
    }
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: FrameRGBA,
}

fn send(
    tx: &mpsc::SyncSender<FrameMsg>,
    idx: FrameIndex,
    frame: FrameRGBA,
) -> StoryreelResult<()> {
    tx.send(FrameMsg { idx, frame })
        .map_err(|_| StoryreelError::evaluation(SINK_CLOSED))
}

fn is_sink_closed(e: &StoryreelError) -> bool {
    matches!(e, StoryreelError::Evaluation(msg) if msg == SINK_CLOSED)
}

/// Borrowed inputs shared by every worker rendering a range.
#[derive(Clone, Copy)]
struct FrameJob<'a> {
    scene: SceneCtx<'a>,
    props: &'a InputProps,
    timeline: &'a Timeline,
    fonts: &'a FontSet,
}

impl FrameJob<'_> {
    fn backend(&self) -> StoryreelResult<CpuBackend> {
        CpuBackend::new(self.scene.canvas, self.fonts)
    }

    fn render(&self, backend: &mut CpuBackend, frame: FrameIndex) -> StoryreelResult<FrameRGBA> {
        let list = compose_frame(&self.scene, &self.props.storyboard, self.timeline, frame)?;
        backend.render(&list)
    }
}

fn render_chunk_parallel(
    job: &FrameJob<'_>,
    pool: &rayon::ThreadPool,
    tx: &mpsc::SyncSender<FrameMsg>,
    start: u64,
    end: u64,
) -> StoryreelResult<()> {
    let tx = tx.clone();
    pool.install(|| {
        (start..end).into_par_iter().try_for_each_init(
            || job.backend(),
            move |backend, f| -> StoryreelResult<()> {
                let backend = backend
                    .as_mut()
                    .map_err(|e| StoryreelError::render(e.to_string()))?;
                let frame = job.render(backend, FrameIndex(f))?;
                send(&tx, FrameIndex(f), frame)
            },
        )
    })
}

fn build_thread_pool(threads: Option<usize>) -> StoryreelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(StoryreelError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StoryreelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
