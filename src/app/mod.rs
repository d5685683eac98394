use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::renderer::renderer::Renderer;
use crate::renderer::scene::SceneBuilder;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::SimulationEngine;
use crate::ui::UiState;
use winit::dpi::PhysicalSize;

pub type AppError = Box<dyn std::error::Error + Send + Sync>;
pub type AppResult<T> = Result<T, AppError>;

#[cfg(not(target_arch = "wasm32"))]
use crate::ui::desktop::{UiFrame, UiLayer};
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use winit::{event::WindowEvent, window::Window};

pub struct App {
    renderer: Renderer,
    engine: SimulationEngine,
    scene: SceneBuilder,
    ui_state: UiState,
    #[cfg(not(target_arch = "wasm32"))]
    ui_layer: UiLayer,
}

impl App {
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn initialize(window: &Arc<Window>) -> AppResult<Self> {
        let renderer = Renderer::new(window, CANVAS_WIDTH, CANVAS_HEIGHT).await?;
        let surface_format = renderer.surface_config().format;
        let ui_layer = UiLayer::new(window, renderer.device(), surface_format);
        Ok(Self::assemble(renderer, ui_layer))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn assemble(renderer: Renderer, ui_layer: UiLayer) -> Self {
        let engine = SimulationEngine::new(SimulationConfig::default());
        let ui_state = UiState::from_params(engine.params());
        Self {
            renderer,
            engine,
            scene: SceneBuilder::new(),
            ui_state,
            ui_layer,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn initialize(canvas: &web_sys::HtmlCanvasElement) -> AppResult<Self> {
        let renderer = Renderer::new(canvas, CANVAS_WIDTH, CANVAS_HEIGHT).await?;
        let engine = SimulationEngine::new(SimulationConfig::default());
        let ui_state = UiState::from_params(engine.params());
        Ok(Self {
            renderer,
            engine,
            scene: SceneBuilder::new(),
            ui_state,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.renderer.resize(new_size);
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.renderer.size()
    }

    pub fn ui_state_mut(&mut self) -> &mut UiState {
        &mut self.ui_state
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.ui_layer.handle_event(window, event)
    }

    /// Controls, physics step, scene build, draw with the egui overlay.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn frame(&mut self, window: &Window, timestamp_ms: f64) -> Result<(), wgpu::SurfaceError> {
        let ui_frame: UiFrame = {
            let (ui_layer, ui_state, engine) = (&mut self.ui_layer, &mut self.ui_state, &self.engine);
            ui_layer.prepare(window, |ctx| controls::build(ctx, ui_state, engine))
        };

        apply_ui_changes(&mut self.ui_state, &mut self.engine);
        self.engine.tick(timestamp_ms);

        let scene = self.scene.build(&self.engine.frame());
        let mut pending = Some(ui_frame);
        let ui_layer = &mut self.ui_layer;
        self.renderer.render_with_ui(scene, |device, queue, encoder, view| {
            if let Some(frame) = pending.take() {
                ui_layer.paint(device, queue, encoder, view, frame);
            }
        })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<(), wgpu::SurfaceError> {
        apply_ui_changes(&mut self.ui_state, &mut self.engine);
        self.engine.tick(timestamp_ms);
        let scene = self.scene.build(&self.engine.frame());
        self.renderer.render(scene)
    }
}

/// Pushes whatever the control surface changed since the last frame into the engine.
fn apply_ui_changes(ui_state: &mut UiState, engine: &mut SimulationEngine) {
    ui_state.sync_ranges();

    if ui_state.model != engine.params().model {
        engine.set_model(ui_state.model);
    }

    if ui_state.take_reset_request() {
        engine.reset();
        ui_state.playing = engine.params().playing;
    }

    let params = engine.params().clone();
    if ui_state.playing != params.playing {
        engine.set_playing(ui_state.playing);
    }
    if ui_state.energy != params.energy {
        engine.set_energy(ui_state.energy);
    }
    if ui_state.protons != params.protons {
        engine.set_protons(ui_state.protons);
    }
    if ui_state.neutrons != params.neutrons {
        engine.set_neutrons(ui_state.neutrons);
    }
    if ui_state.show_traces != params.show_traces {
        engine.set_show_traces(ui_state.show_traces);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod controls {
    use crate::physics::elements::{Element, nuclide_label};
    use crate::physics::nucleus::NucleusModel;
    use crate::simulation::config::{ENERGY_RANGE, NEUTRON_RANGE, PROTON_RANGE};
    use crate::simulation::engine::SimulationEngine;
    use crate::ui::UiState;
    use egui::Slider;

    pub fn build(ctx: &egui::Context, ui_state: &mut UiState, engine: &SimulationEngine) {
        egui::Window::new("Rutherford Scattering")
            .default_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let label = if ui_state.playing { "Pause" } else { "Play" };
                    if ui.button(label).clicked() {
                        ui_state.toggle_playing();
                    }
                    if ui.button("Reset").clicked() {
                        ui_state.request_reset();
                    }
                });

                ui.separator();

                ui.label("Atomic model");
                ui.horizontal(|ui| {
                    for model in NucleusModel::ALL {
                        ui.selectable_value(&mut ui_state.model, model, model.label());
                    }
                });

                ui.separator();

                ui.add(Slider::new(&mut ui_state.energy, ENERGY_RANGE).text("Alpha energy"));

                ui.horizontal(|ui| {
                    if ui.small_button("-").clicked() {
                        ui_state.step_protons(-1);
                    }
                    ui.add(Slider::new(&mut ui_state.protons, PROTON_RANGE).text("Protons"));
                    if ui.small_button("+").clicked() {
                        ui_state.step_protons(1);
                    }
                });

                ui.horizontal(|ui| {
                    if ui.small_button("-").clicked() {
                        ui_state.step_neutrons(-1);
                    }
                    ui.add(Slider::new(&mut ui_state.neutrons, NEUTRON_RANGE).text("Neutrons"));
                    if ui.small_button("+").clicked() {
                        ui_state.step_neutrons(1);
                    }
                });

                let element = Element::by_atomic_number(ui_state.protons)
                    .map(|element| element.name())
                    .unwrap_or("Unknown");
                ui.label(format!(
                    "{} ({})",
                    nuclide_label(ui_state.protons, ui_state.neutrons),
                    element
                ));

                ui.checkbox(&mut ui_state.show_traces, "Show traces");

                ui.separator();

                let stats = engine.stats();
                ui.label(format!("Alphas fired: {}", stats.spawned));
                ui.label(format!(
                    "Back-scattered: {} of {} ({:.2}%)",
                    stats.backscattered,
                    stats.exited,
                    stats.backscatter_fraction() * 100.0
                ));
                if ui_state.model == NucleusModel::Concentrated {
                    ui.small("Most of the atom is empty space: only close passes deflect.");
                } else {
                    ui.small("Spread-out charge: no alpha is deflected.");
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::nucleus::NucleusModel;

    fn engine() -> SimulationEngine {
        SimulationEngine::with_seed(SimulationConfig::default(), 3)
    }

    #[test]
    fn ui_changes_reach_engine_params() {
        let mut engine = engine();
        let mut ui = UiState::from_params(engine.params());
        ui.set_energy(20);
        ui.set_protons(40);
        ui.set_neutrons(60);
        ui.show_traces = false;
        ui.playing = true;

        apply_ui_changes(&mut ui, &mut engine);

        let params = engine.params();
        assert_eq!(params.energy, 20);
        assert_eq!(params.protons, 40);
        assert_eq!(params.neutrons, 60);
        assert!(!params.show_traces);
        assert!(params.playing);
    }

    #[test]
    fn model_switch_clears_particles() {
        let mut engine = engine();
        engine.spawn_particle();
        let mut ui = UiState::from_params(engine.params());
        ui.model = NucleusModel::Diffuse;

        apply_ui_changes(&mut ui, &mut engine);

        assert_eq!(engine.params().model, NucleusModel::Diffuse);
        assert!(engine.particles().is_empty());
    }

    #[test]
    fn reset_pauses_and_clears() {
        let mut engine = engine();
        let mut ui = UiState::from_params(engine.params());
        ui.playing = true;
        apply_ui_changes(&mut ui, &mut engine);
        engine.spawn_particle();

        ui.request_reset();
        apply_ui_changes(&mut ui, &mut engine);

        assert!(engine.particles().is_empty());
        assert!(!engine.params().playing);
        assert!(!ui.playing);
    }

    #[test]
    fn out_of_range_writes_are_clamped_before_the_engine() {
        let mut engine = engine();
        let mut ui = UiState::from_params(engine.params());
        ui.protons = 5;
        apply_ui_changes(&mut ui, &mut engine);
        assert_eq!(engine.params().protons, crate::constants::PROTONS_MIN);
    }
}
