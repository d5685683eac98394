//! Render adapter: turns a [`FrameView`] into flat vertex streams.
//!
//! Nothing here touches the GPU, so the geometry rules are testable on their own.

use crate::constants::MAX_VISIBLE_NUCLEONS;
use crate::physics::nucleus::{NucleonLayout, NucleonLayoutBuilder, NucleusModel};
use crate::physics::particle::Particle;
use crate::renderer::mesh::{push_dashed_line, push_disc, push_polyline, push_radial_gradient, push_segment};
use crate::renderer::vertex::{Color, Vertex};
use crate::simulation::engine::FrameView;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;
use std::ops::Range;

pub const PARTICLE_RADIUS: f32 = 4.0;
const NUCLEON_RADIUS: f32 = 3.0;
const ELECTRON_COUNT: usize = 40;
const FOIL_TICK: f32 = 50.0;

pub struct Palette {
    pub foil: Color,
    pub nucleus: Color,
    pub proton: Color,
    pub neutron: Color,
    pub cloud_inner: Color,
    pub cloud_outer: Color,
    pub electron: Color,
    pub trace: Color,
    pub particle: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foil: Color::from_hex(0xffd700, 0.2),
            nucleus: Color::from_hex(0xff6600, 1.0),
            proton: Color::from_hex(0xff3333, 1.0),
            neutron: Color::from_hex(0xbbbbbb, 1.0),
            cloud_inner: Color::from_hex(0xff6464, 0.3),
            cloud_outer: Color::from_hex(0xff6464, 0.05),
            electron: Color::from_hex(0x0066ff, 1.0),
            trace: Color::from_hex(0xff00ff, 0.5),
            particle: Color::from_hex(0xff0066, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Lines,
    Triangles,
}

/// Geometry for one frame. The foil and the nucleus or cloud form the
/// backdrop; traces and particle bodies are layered over it.
#[derive(Default)]
pub struct SceneGeometry {
    pub triangles: Vec<Vertex>,
    pub lines: Vec<Vertex>,
    backdrop_lines: u32,
    backdrop_triangles: u32,
}

impl SceneGeometry {
    /// Vertex ranges in paint order: foil, nucleus or cloud, traces, bodies.
    pub fn draw_order(&self) -> [(Primitive, Range<u32>); 4] {
        let lines = self.lines.len() as u32;
        let triangles = self.triangles.len() as u32;
        [
            (Primitive::Lines, 0..self.backdrop_lines),
            (Primitive::Triangles, 0..self.backdrop_triangles),
            (Primitive::Lines, self.backdrop_lines..lines),
            (Primitive::Triangles, self.backdrop_triangles..triangles),
        ]
    }

    fn clear(&mut self) {
        self.triangles.clear();
        self.lines.clear();
        self.backdrop_lines = 0;
        self.backdrop_triangles = 0;
    }

    fn close_backdrop(&mut self) {
        self.backdrop_lines = self.lines.len() as u32;
        self.backdrop_triangles = self.triangles.len() as u32;
    }
}

pub struct SceneBuilder {
    palette: Palette,
    layout: NucleonLayout,
    layout_key: Option<(usize, usize)>,
    electrons: Vec<Vec2>,
    geometry: SceneGeometry,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::with_palette(Palette::default())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            layout: NucleonLayout::default(),
            layout_key: None,
            electrons: electron_ring(ELECTRON_COUNT, 7),
            geometry: SceneGeometry::default(),
        }
    }

    pub fn build(&mut self, frame: &FrameView<'_>) -> &SceneGeometry {
        self.geometry.clear();
        self.push_foil(frame);
        match frame.nucleus.model {
            NucleusModel::Concentrated => self.push_concentrated_nucleus(frame),
            NucleusModel::Diffuse => self.push_diffuse_atom(frame),
        }
        self.geometry.close_backdrop();
        self.push_particles(frame);
        &self.geometry
    }

    fn push_foil(&mut self, frame: &FrameView<'_>) {
        let x = frame.config.nucleus_position.x;
        let height = frame.config.canvas_height;
        let lines = &mut self.geometry.lines;
        let color = self.palette.foil;

        push_segment(lines, Vec2::new(x, 0.0), Vec2::new(x, FOIL_TICK), color);
        push_segment(lines, Vec2::new(x, height), Vec2::new(x, height - FOIL_TICK), color);
        push_dashed_line(lines, Vec2::new(x, 0.0), Vec2::new(x, height), 5.0, 15.0, color);
    }

    fn push_concentrated_nucleus(&mut self, frame: &FrameView<'_>) {
        let center = frame.nucleus.position;
        let radius = frame.config.nucleus_radius;
        let key = (
            (frame.params.protons as usize).min(MAX_VISIBLE_NUCLEONS),
            (frame.params.neutrons as usize).min(MAX_VISIBLE_NUCLEONS),
        );
        if self.layout_key != Some(key) {
            self.layout = NucleonLayoutBuilder::new(key.0, key.1, (radius - 2.0).max(0.0)).build();
            self.layout_key = Some(key);
        }

        let triangles = &mut self.geometry.triangles;
        push_disc(triangles, center, radius, 32, self.palette.nucleus);
        for offset in &self.layout.protons {
            push_disc(triangles, center + *offset, NUCLEON_RADIUS, 8, self.palette.proton);
        }
        for offset in &self.layout.neutrons {
            push_disc(triangles, center + *offset, NUCLEON_RADIUS, 8, self.palette.neutron);
        }
    }

    fn push_diffuse_atom(&mut self, frame: &FrameView<'_>) {
        let center = frame.nucleus.position;
        let triangles = &mut self.geometry.triangles;
        push_radial_gradient(
            triangles,
            center,
            frame.config.diffuse_radius,
            64,
            self.palette.cloud_inner,
            self.palette.cloud_outer,
        );
        for offset in &self.electrons {
            push_disc(triangles, center + *offset, NUCLEON_RADIUS, 8, self.palette.electron);
        }
    }

    fn push_particles(&mut self, frame: &FrameView<'_>) {
        for particle in frame.particles.iter().filter(|p| p.is_active()) {
            if frame.params.show_traces && particle.trajectory().len() > 1 {
                push_polyline(&mut self.geometry.lines, particle.trajectory().iter(), self.palette.trace);
            }
            push_disc(
                &mut self.geometry.triangles,
                particle.position(),
                PARTICLE_RADIUS,
                12,
                self.palette.particle,
            );
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Electrons evenly spaced in angle at random radii in 25..105.
fn electron_ring(count: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            let radius = 25.0 + rng.gen_range(0.0f32..80.0);
            Vec2::from_angle(angle) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::SimulationConfig;
    use crate::simulation::engine::SimulationEngine;

    fn engine_with_particles(count: usize) -> SimulationEngine {
        let mut engine = SimulationEngine::with_seed(SimulationConfig::default(), 11);
        for _ in 0..count {
            engine.spawn_particle();
        }
        engine.advance();
        engine
    }

    fn foil_vertices() -> usize {
        let engine = engine_with_particles(0);
        SceneBuilder::new().build(&engine.frame()).lines.len()
    }

    #[test]
    fn traces_follow_toggle() {
        let mut engine = engine_with_particles(3);
        let foil = foil_vertices();
        let mut builder = SceneBuilder::new();

        let with_traces = builder.build(&engine.frame()).lines.len();
        // three particles with two points each -> one segment each
        assert_eq!(with_traces, foil + 3 * 2);

        engine.set_show_traces(false);
        let without = builder.build(&engine.frame()).lines.len();
        assert_eq!(without, foil);
    }

    #[test]
    fn fresh_particle_has_body_but_no_trace() {
        let mut engine = SimulationEngine::with_seed(SimulationConfig::default(), 5);
        engine.spawn_particle();
        let foil = foil_vertices();
        let mut builder = SceneBuilder::new();
        let scene = builder.build(&engine.frame());
        assert_eq!(scene.lines.len(), foil);
        let body = scene
            .triangles
            .iter()
            .filter(|v| v.color == Palette::default().particle.0)
            .count();
        assert_eq!(body, 12 * 3);
    }

    #[test]
    fn concentrated_nucleus_caps_visible_nucleons() {
        let mut engine = engine_with_particles(0);
        engine.set_protons(100);
        engine.set_neutrons(150);
        let mut builder = SceneBuilder::new();
        let scene = builder.build(&engine.frame());
        let per_nucleon = 8 * 3;
        let nucleus = 32 * 3;
        assert_eq!(scene.triangles.len(), nucleus + 2 * MAX_VISIBLE_NUCLEONS * per_nucleon);
    }

    #[test]
    fn diffuse_model_draws_cloud_and_electrons() {
        let mut engine = engine_with_particles(0);
        engine.set_model(NucleusModel::Diffuse);
        let mut builder = SceneBuilder::new();
        let scene = builder.build(&engine.frame());
        assert_eq!(scene.triangles.len(), 64 * 3 + ELECTRON_COUNT * 8 * 3);

        let center = engine.nucleus().position;
        for v in &scene.triangles {
            assert!(Vec2::from_array(v.position).distance(center) <= 120.0 + 1e-3);
        }
    }

    #[test]
    fn traces_paint_after_nucleus_and_foil_before_it() {
        let engine = engine_with_particles(2);
        let foil = foil_vertices() as u32;
        let mut builder = SceneBuilder::new();
        let scene = builder.build(&engine.frame());
        let [foil_pass, nucleus_pass, trace_pass, body_pass] = scene.draw_order();

        assert_eq!(foil_pass, (Primitive::Lines, 0..foil));
        assert_eq!(nucleus_pass.0, Primitive::Triangles);
        assert_eq!(nucleus_pass.1.start, 0);
        assert_eq!(trace_pass, (Primitive::Lines, foil..scene.lines.len() as u32));
        assert_eq!(body_pass.0, Primitive::Triangles);
        assert_eq!(body_pass.1.start, nucleus_pass.1.end);
        assert_eq!(body_pass.1.end, scene.triangles.len() as u32);

        let palette = Palette::default();
        for v in &scene.triangles[..nucleus_pass.1.end as usize] {
            assert_ne!(v.color, palette.particle.0);
        }
        for v in &scene.lines[trace_pass.1.start as usize..] {
            assert_eq!(v.color, palette.trace.0);
        }
        for v in &scene.triangles[body_pass.1.start as usize..] {
            assert_eq!(v.color, palette.particle.0);
        }
    }

    #[test]
    fn electrons_sit_in_ring_band() {
        for e in electron_ring(ELECTRON_COUNT, 7) {
            let r = e.length();
            assert!((25.0..105.0 + 1e-3).contains(&r));
        }
    }
}
