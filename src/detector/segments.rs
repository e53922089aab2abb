//! Hough-driven segment extraction.
//!
//! Standard Hough lines above the vote threshold are ranked by how many edge
//! pixels lie along them and taken strongest first. Each one is walked
//! across the edge map, one sample per pixel along its dominant axis, looking
//! for unused edge pixels within one pixel of the line. Hits are chained into
//! runs; a run ends once more than `max_gap` consecutive samples miss. Runs at
//! least `min_length` long become segments and their pixels are marked used so
//! weaker lines cannot claim them again.
use super::hough::{standard_lines, theta_rad, PolarLine};
use super::{DetectParams, LineDetector};
use crate::geometry::LineSegment;
use crate::image::MaskU8;
use log::debug;

/// Probabilistic-style detector returning finite segments.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoughSegmentDetector;

impl LineDetector for HoughSegmentDetector {
    fn detect(&self, edges: &MaskU8, params: &DetectParams) -> Vec<LineSegment> {
        let lines = standard_lines(&edges.to_gray_image(), params.vote_threshold);
        let mut walker = LineWalker::new(edges, params);
        let mut ranked: Vec<(usize, &PolarLine)> =
            lines.iter().map(|l| (walker.support(l), l)).collect();
        // Stable sort keeps scan order among equal support.
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, line) in ranked {
            walker.walk(line);
        }
        debug!(
            "HoughSegmentDetector vote>{} peaks={} segments={}",
            params.vote_threshold,
            lines.len(),
            walker.segments.len()
        );
        walker.segments
    }
}

struct Run {
    start: [i32; 2],
    end: [i32; 2],
    pixels: Vec<usize>,
    gap: u32,
}

struct LineWalker<'a> {
    edges: &'a MaskU8,
    used: Vec<bool>,
    min_length: f64,
    max_gap: u32,
    segments: Vec<LineSegment>,
}

impl<'a> LineWalker<'a> {
    fn new(edges: &'a MaskU8, params: &DetectParams) -> Self {
        Self {
            edges,
            used: vec![false; edges.w * edges.h],
            min_length: params.min_length,
            max_gap: params.max_gap,
            segments: Vec::new(),
        }
    }

    /// One sample per pixel along the dominant axis of `line`: mostly
    /// horizontal lines per column, the rest per row.
    fn samples(&self, line: &PolarLine) -> impl Iterator<Item = (i64, i64, bool)> {
        let (sin_t, cos_t) = theta_rad(line).sin_cos();
        let rho = line.r as f64;
        let along_x = sin_t.abs() >= cos_t.abs();
        let (w, h) = (self.edges.w as i64, self.edges.h as i64);
        let steps = if along_x { w } else { h };
        (0..steps).map(move |s| {
            if along_x {
                let y = ((rho - s as f64 * cos_t) / sin_t).round() as i64;
                (s, y, true)
            } else {
                let x = ((rho - s as f64 * sin_t) / cos_t).round() as i64;
                (x, s, false)
            }
        })
    }

    /// Number of samples of `line` with an unused edge pixel next to them.
    fn support(&self, line: &PolarLine) -> usize {
        self.samples(line)
            .filter(|&(x, y, minor_is_y)| self.hit_near(x, y, minor_is_y).is_some())
            .count()
    }

    fn walk(&mut self, line: &PolarLine) {
        let samples: Vec<_> = self.samples(line).collect();
        let mut run: Option<Run> = None;
        for (x, y, minor_is_y) in samples {
            match self.hit_near(x, y, minor_is_y) {
                Some((px, py, idx)) => {
                    let extend = matches!(&run, Some(r) if r.gap <= self.max_gap);
                    if extend {
                        if let Some(r) = run.as_mut() {
                            r.end = [px, py];
                            r.pixels.push(idx);
                            r.gap = 0;
                        }
                    } else {
                        if let Some(done) = run.take() {
                            self.finish(done);
                        }
                        run = Some(Run {
                            start: [px, py],
                            end: [px, py],
                            pixels: vec![idx],
                            gap: 0,
                        });
                    }
                }
                None => {
                    if let Some(r) = run.as_mut() {
                        r.gap += 1;
                    }
                }
            }
        }
        if let Some(done) = run.take() {
            self.finish(done);
        }
    }

    /// First unused edge pixel at the sample or one pixel off it across the line.
    fn hit_near(&self, x: i64, y: i64, minor_is_y: bool) -> Option<(i32, i32, usize)> {
        for off in [0i64, -1, 1] {
            let (cx, cy) = if minor_is_y { (x, y + off) } else { (x + off, y) };
            if cx < 0 || cy < 0 || cx as usize >= self.edges.w || cy as usize >= self.edges.h {
                continue;
            }
            let idx = self.edges.idx(cx as usize, cy as usize);
            if self.edges.data[idx] != 0 && !self.used[idx] {
                return Some((cx as i32, cy as i32, idx));
            }
        }
        None
    }

    fn finish(&mut self, run: Run) {
        let segment = LineSegment::new(run.start, run.end);
        if segment.length() < self.min_length {
            return;
        }
        for idx in run.pixels {
            self.used[idx] = true;
        }
        self.segments.push(segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw_segment;

    fn params(vote_threshold: u32, min_length: f64, max_gap: u32) -> DetectParams {
        DetectParams {
            vote_threshold,
            min_length,
            max_gap,
        }
    }

    #[test]
    fn finds_a_single_drawn_segment() {
        let mut edges = MaskU8::new(200, 120);
        draw_segment(&mut edges, &LineSegment::from_coords(20, 100, 180, 20), 1);
        let segs = HoughSegmentDetector.detect(&edges, &params(60, 100.0, 5));
        assert_eq!(segs.len(), 1, "{segs:?}");
        let s = segs[0];
        assert!(s.length() > 140.0, "too short: {s:?}");
        let (upper, lower) = s.oriented();
        assert!((upper[0] - 180).abs() <= 20 && (upper[1] - 20).abs() <= 10, "{s:?}");
        assert!((lower[0] - 20).abs() <= 20 && (lower[1] - 100).abs() <= 10, "{s:?}");
    }

    #[test]
    fn short_runs_are_dropped() {
        let mut edges = MaskU8::new(100, 100);
        draw_segment(&mut edges, &LineSegment::from_coords(10, 50, 50, 50), 1);
        let segs = HoughSegmentDetector.detect(&edges, &params(20, 60.0, 3));
        assert!(segs.is_empty(), "{segs:?}");
    }

    #[test]
    fn gaps_up_to_the_limit_are_bridged() {
        let mut edges = MaskU8::new(120, 40);
        draw_segment(&mut edges, &LineSegment::from_coords(0, 20, 49, 20), 1);
        draw_segment(&mut edges, &LineSegment::from_coords(60, 20, 119, 20), 1);

        let bridged = HoughSegmentDetector.detect(&edges, &params(50, 100.0, 10));
        assert_eq!(bridged.len(), 1, "{bridged:?}");
        assert!(bridged[0].length() >= 119.0);

        let split = HoughSegmentDetector.detect(&edges, &params(50, 40.0, 5));
        assert_eq!(split.len(), 2, "{split:?}");
    }

    #[test]
    fn empty_edges_yield_nothing() {
        let edges = MaskU8::new(64, 64);
        assert!(HoughSegmentDetector
            .detect(&edges, &params(1, 0.0, 0))
            .is_empty());
    }
}
