use std::{collections::HashMap, time::Duration};

use rayon::prelude::*;

use crate::{
    effects::timeline::{DissolveSample, DissolveTimeline},
    foundation::{
        core::{Fps, FrameIndex, FrameRange},
        error::{RevealError, RevealResult},
    },
    render::{
        frame::FrameRGBA,
        sink::{FrameSink, SinkConfig},
        svg::DissolveFrameRenderer,
    },
};

/// Sample the timeline at `at` and rasterize it.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
#[tracing::instrument(level = "trace", skip(renderer, timeline))]
pub fn render_dissolve_frame(
    renderer: &DissolveFrameRenderer,
    timeline: &DissolveTimeline,
    at: Duration,
) -> RevealResult<FrameRGBA> {
    renderer.render(&timeline.sample(at))
}

#[derive(Clone, Debug)]
pub struct RenderOpts {
    pub fps: Fps,
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
    pub static_frame_elision: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            fps: Fps { num: 30, den: 1 },
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub frames_elided: u64,
}

/// Frame range covering the whole activation, settle delay included, at `fps`.
pub fn full_range(timeline: &DissolveTimeline, fps: Fps) -> FrameRange {
    FrameRange {
        start: FrameIndex(0),
        end: FrameIndex(fps.frames_covering(timeline.total_duration())),
    }
}

/// Render `range` of the dissolve timeline into `sink`, in frame order.
///
/// Frames whose samples are identical (the settling tail, for instance) are rendered once per
/// chunk when `static_frame_elision` is on.
#[tracing::instrument(skip(renderer, timeline, sink), fields(frames = range.len_frames()))]
pub fn render_dissolve_frames(
    renderer: &DissolveFrameRenderer,
    timeline: &DissolveTimeline,
    range: FrameRange,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> RevealResult<RenderStats> {
    if range.is_empty() {
        return Err(RevealError::validation("render range must be non-empty"));
    }

    let canvas = renderer.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: opts.fps,
    })?;

    let pool = if opts.parallel {
        Some(build_thread_pool(opts.threads)?)
    } else {
        None
    };
    let chunk_size = normalized_chunk_size(opts.chunk_size);
    let mut stats = RenderStats::default();

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| RevealError::render(format!("invalid chunk range: {e}")))?;

        let (frames, chunk_stats) = render_chunk(renderer, timeline, chunk, opts, pool.as_ref())?;
        for (idx, frame) in chunk.iter().zip(frames) {
            sink.push_frame(idx, &frame)?;
        }

        stats.frames_total += chunk_stats.frames_total;
        stats.frames_rendered += chunk_stats.frames_rendered;
        stats.frames_elided += chunk_stats.frames_elided;
        chunk_start = chunk_end;
    }

    sink.end()?;
    tracing::debug!(?stats, "dissolve frames rendered");
    Ok(stats)
}

type SampleFingerprint = [u64; 4];

fn fingerprint(sample: &DissolveSample) -> SampleFingerprint {
    [
        sample.phase as u64,
        sample.element.scale.to_bits(),
        sample.element.opacity.to_bits(),
        sample.displacement.to_bits(),
    ]
}

fn render_chunk(
    renderer: &DissolveFrameRenderer,
    timeline: &DissolveTimeline,
    range: FrameRange,
    opts: &RenderOpts,
    pool: Option<&rayon::ThreadPool>,
) -> RevealResult<(Vec<FrameRGBA>, RenderStats)> {
    let samples: Vec<DissolveSample> = range
        .iter()
        .map(|idx| timeline.sample(opts.fps.frame_time(idx)))
        .collect();

    let mut unique = Vec::<usize>::with_capacity(samples.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(samples.len());
    if opts.static_frame_elision {
        let mut first = HashMap::<SampleFingerprint, usize>::new();
        for (idx, sample) in samples.iter().enumerate() {
            let slot = *first.entry(fingerprint(sample)).or_insert_with(|| {
                unique.push(idx);
                unique.len() - 1
            });
            frame_to_unique.push(slot);
        }
    } else {
        unique.extend(0..samples.len());
        frame_to_unique.extend(0..samples.len());
    }

    let rendered: Vec<RevealResult<FrameRGBA>> = match pool {
        Some(pool) => pool.install(|| {
            unique
                .par_iter()
                .map(|&i| renderer.render(&samples[i]))
                .collect()
        }),
        None => unique.iter().map(|&i| renderer.render(&samples[i])).collect(),
    };
    let unique_frames = rendered.into_iter().collect::<RevealResult<Vec<_>>>()?;

    let out = frame_to_unique
        .into_iter()
        .map(|u| unique_frames[u].clone())
        .collect::<Vec<_>>();

    let total = samples.len() as u64;
    let rendered_count = unique_frames.len() as u64;
    Ok((
        out,
        RenderStats {
            frames_total: total,
            frames_rendered: rendered_count,
            frames_elided: total.saturating_sub(rendered_count),
        },
    ))
}

fn build_thread_pool(threads: Option<usize>) -> RevealResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RevealError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RevealError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
