// CPU-side 2D primitives appended into triangle-list / line-list vertex streams.
use crate::renderer::vertex::{Color, Vertex};
use glam::Vec2;
use std::f32::consts::TAU;

/// Filled circle as a triangle fan flattened into a triangle list.
pub fn push_disc(out: &mut Vec<Vertex>, center: Vec2, radius: f32, segments: u32, color: Color) {
    push_radial_gradient(out, center, radius, segments, color, color);
}

/// Disc whose colour blends from `inner` at the centre to `outer` at the rim.
pub fn push_radial_gradient(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    segments: u32,
    inner: Color,
    outer: Color,
) {
    let segments = segments.max(3);
    out.reserve(segments as usize * 3);
    for i in 0..segments {
        let a0 = i as f32 * TAU / segments as f32;
        let a1 = (i + 1) as f32 * TAU / segments as f32;
        out.push(Vertex::new(center, inner));
        out.push(Vertex::new(center + Vec2::from_angle(a0) * radius, outer));
        out.push(Vertex::new(center + Vec2::from_angle(a1) * radius, outer));
    }
}

pub fn push_segment(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, color: Color) {
    out.push(Vertex::new(from, color));
    out.push(Vertex::new(to, color));
}

/// Consecutive points joined as independent line-list segments.
pub fn push_polyline<I>(out: &mut Vec<Vertex>, points: I, color: Color)
where
    I: IntoIterator<Item = Vec2>,
{
    let mut points = points.into_iter();
    let Some(mut previous) = points.next() else {
        return;
    };
    for point in points {
        push_segment(out, previous, point, color);
        previous = point;
    }
}

/// Straight dashed line: `dash` units drawn, then `gap` units skipped.
pub fn push_dashed_line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, dash: f32, gap: f32, color: Color) {
    let length = from.distance(to);
    if length <= 0.0 || dash <= 0.0 {
        return;
    }
    let dir = (to - from) / length;
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        push_segment(out, from + dir * start, from + dir * end, color);
        start += dash + gap.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color([1.0, 0.0, 0.0, 1.0]);

    #[test]
    fn disc_emits_three_vertices_per_segment_within_radius() {
        let mut out = Vec::new();
        push_disc(&mut out, Vec2::new(10.0, 10.0), 4.0, 12, RED);
        assert_eq!(out.len(), 36);
        for v in &out {
            let p = Vec2::from_array(v.position);
            assert!(p.distance(Vec2::new(10.0, 10.0)) <= 4.0 + 1e-4);
        }
    }

    #[test]
    fn polyline_emits_one_segment_per_gap() {
        let mut out = Vec::new();
        let points = [Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0)];
        push_polyline(&mut out, points, RED);
        assert_eq!(out.len(), 6);

        let mut single = Vec::new();
        push_polyline(&mut single, [Vec2::ZERO], RED);
        assert!(single.is_empty());
    }

    #[test]
    fn dashed_line_alternates_dash_and_gap() {
        let mut out = Vec::new();
        push_dashed_line(&mut out, Vec2::ZERO, Vec2::new(0.0, 40.0), 5.0, 15.0, RED);
        // dashes start at 0 and 20
        assert_eq!(out.len(), 4);
        assert_eq!(out[2].position, [0.0, 20.0]);
        assert_eq!(out[3].position, [0.0, 25.0]);
    }
}
