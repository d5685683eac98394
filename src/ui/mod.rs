use crate::physics::nucleus::NucleusModel;
use crate::simulation::config::{ENERGY_RANGE, NEUTRON_RANGE, PROTON_RANGE, SimulationParams};
use std::ops::RangeInclusive;

/// Control-surface state. Every setter clamps into the allowed ranges before
/// the values reach the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub playing: bool,
    pub energy: u32,
    pub protons: u32,
    pub neutrons: u32,
    pub show_traces: bool,
    pub model: NucleusModel,
    reset_requested: bool,
}

impl UiState {
    pub fn from_params(params: &SimulationParams) -> Self {
        let mut state = Self {
            playing: params.playing,
            energy: params.energy,
            protons: params.protons,
            neutrons: params.neutrons,
            show_traces: params.show_traces,
            model: params.model,
            reset_requested: false,
        };
        state.sync_ranges();
        state
    }

    pub fn set_energy(&mut self, energy: i64) {
        self.energy = clamp_into(energy, &ENERGY_RANGE);
    }

    pub fn set_protons(&mut self, protons: i64) {
        self.protons = clamp_into(protons, &PROTON_RANGE);
    }

    pub fn set_neutrons(&mut self, neutrons: i64) {
        self.neutrons = clamp_into(neutrons, &NEUTRON_RANGE);
    }

    /// +/- buttons: saturate at the range ends.
    pub fn step_protons(&mut self, delta: i64) {
        self.set_protons(i64::from(self.protons) + delta);
    }

    pub fn step_neutrons(&mut self, delta: i64) {
        self.set_neutrons(i64::from(self.neutrons) + delta);
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    pub fn take_reset_request(&mut self) -> bool {
        let requested = self.reset_requested;
        self.reset_requested = false;
        requested
    }

    pub fn sync_ranges(&mut self) {
        self.energy = clamp_into(i64::from(self.energy), &ENERGY_RANGE);
        self.protons = clamp_into(i64::from(self.protons), &PROTON_RANGE);
        self.neutrons = clamp_into(i64::from(self.neutrons), &NEUTRON_RANGE);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_params(&SimulationParams::default())
    }
}

fn clamp_into(value: i64, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

#[cfg(not(target_arch = "wasm32"))]
pub mod desktop {
    use egui::{ClippedPrimitive, TexturesDelta};
    use egui_wgpu::ScreenDescriptor;
    use egui_winit::State as EguiWinitState;
    use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
    use winit::{event::WindowEvent, window::Window};

    /// Tessellated egui output waiting to be painted over the scene.
    pub struct UiFrame {
        shapes: Vec<ClippedPrimitive>,
        textures_delta: TexturesDelta,
        screen: ScreenDescriptor,
    }

    /// egui overlay drawn on top of the simulation in the same encoder.
    pub struct UiLayer {
        ctx: egui::Context,
        input: EguiWinitState,
        painter: egui_wgpu::Renderer,
    }

    impl UiLayer {
        pub fn new(window: &Window, device: &Device, surface_format: TextureFormat) -> Self {
            let ctx = egui::Context::default();
            let input = EguiWinitState::new(
                ctx.clone(),
                egui::ViewportId::ROOT,
                window,
                Some(window.scale_factor() as f32),
                None,
            );
            let painter = egui_wgpu::Renderer::new(device, surface_format, None, 1);
            Self { ctx, input, painter }
        }

        /// Returns true when egui consumed the event.
        pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
            let response = self.input.on_window_event(window, event);
            if response.repaint {
                window.request_redraw();
            }
            response.consumed
        }

        pub fn prepare<F>(&mut self, window: &Window, build_ui: F) -> UiFrame
        where
            F: FnMut(&egui::Context),
        {
            let raw_input = self.input.take_egui_input(window);
            let output = self.ctx.run(raw_input, build_ui);
            self.input.handle_platform_output(window, output.platform_output);

            let size = window.inner_size();
            let screen = ScreenDescriptor {
                size_in_pixels: [size.width.max(1), size.height.max(1)],
                pixels_per_point: output.pixels_per_point,
            };

            UiFrame {
                shapes: self.ctx.tessellate(output.shapes, output.pixels_per_point),
                textures_delta: output.textures_delta,
                screen,
            }
        }

        pub fn paint(
            &mut self,
            device: &Device,
            queue: &Queue,
            encoder: &mut CommandEncoder,
            view: &TextureView,
            frame: UiFrame,
        ) {
            let UiFrame {
                shapes,
                textures_delta,
                screen,
            } = frame;

            for (id, delta) in &textures_delta.set {
                self.painter.update_texture(device, queue, *id, delta);
            }

            let extra = self
                .painter
                .update_buffers(device, queue, encoder, &shapes, &screen);
            if !extra.is_empty() {
                queue.submit(extra);
            }

            {
                // Load, not clear: the scene is already in the target.
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Overlay Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                self.painter.render(&mut pass, &shapes, &screen);
            }

            for id in &textures_delta.free {
                self.painter.free_texture(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn defaults_mirror_engine_params() {
        let state = UiState::default();
        assert_eq!(state.protons, DEFAULT_PROTONS);
        assert_eq!(state.neutrons, DEFAULT_NEUTRONS);
        assert_eq!(state.energy, DEFAULT_ENERGY);
        assert!(state.show_traces);
        assert!(!state.playing);
        assert_eq!(state.model, NucleusModel::Concentrated);
    }

    #[test]
    fn setters_clamp_into_ranges() {
        let mut state = UiState::default();
        state.set_energy(250);
        assert_eq!(state.energy, ENERGY_MAX);
        state.set_energy(-5);
        assert_eq!(state.energy, ENERGY_MIN);

        state.set_protons(0);
        assert_eq!(state.protons, PROTONS_MIN);
        state.set_protons(1_000);
        assert_eq!(state.protons, PROTONS_MAX);

        state.set_neutrons(3);
        assert_eq!(state.neutrons, NEUTRONS_MIN);
        state.set_neutrons(151);
        assert_eq!(state.neutrons, NEUTRONS_MAX);
    }

    #[test]
    fn steps_saturate_at_bounds() {
        let mut state = UiState::default();
        state.set_protons(i64::from(PROTONS_MAX));
        state.step_protons(1);
        assert_eq!(state.protons, PROTONS_MAX);
        state.step_protons(-1);
        assert_eq!(state.protons, PROTONS_MAX - 1);

        state.set_neutrons(i64::from(NEUTRONS_MIN));
        state.step_neutrons(-1);
        assert_eq!(state.neutrons, NEUTRONS_MIN);
    }

    #[test]
    fn sync_ranges_repairs_direct_writes() {
        let mut state = UiState::default();
        state.protons = 3;
        state.neutrons = 999;
        state.energy = 101;
        state.sync_ranges();
        assert_eq!(state.protons, PROTONS_MIN);
        assert_eq!(state.neutrons, NEUTRONS_MAX);
        assert_eq!(state.energy, ENERGY_MAX);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn overlay_layer_builds_from_window_device_and_format() {
        // Type-level check: no GPU or window needed.
        let _build: fn(&winit::window::Window, &wgpu::Device, wgpu::TextureFormat) -> desktop::UiLayer =
            desktop::UiLayer::new;
    }

    #[test]
    fn reset_request_is_taken_once() {
        let mut state = UiState::default();
        assert!(!state.take_reset_request());
        state.request_reset();
        assert!(state.take_reset_request());
        assert!(!state.take_reset_request());
    }
}
