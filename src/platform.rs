use crate::app::AppResult;
use wgpu::{Instance, Surface};
use winit::dpi::PhysicalSize;

/// 플랫폼별 Surface 생성을 추상화하는 트레이트
pub trait SurfaceProvider {
    fn create_surface(&self, instance: &Instance) -> AppResult<(Surface<'static>, PhysicalSize<u32>)>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::start;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::SurfaceProvider;
    use crate::app::{App, AppResult};
    use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use std::sync::Arc;
    use std::time::Instant;
    use wgpu::{Instance, Surface};
    use winit::dpi::{LogicalSize, PhysicalSize};
    use winit::event::{Event, WindowEvent};
    use winit::event_loop::EventLoop;
    use winit::window::{Window, WindowBuilder};

    impl SurfaceProvider for Arc<Window> {
        fn create_surface(&self, instance: &Instance) -> AppResult<(Surface<'static>, PhysicalSize<u32>)> {
            // The Arc keeps the window alive as long as the surface.
            let surface = instance.create_surface(Arc::clone(self))?;
            Ok((surface, self.inner_size()))
        }
    }

    pub fn start() -> AppResult<()> {
        env_logger::init();

        let event_loop = EventLoop::new().map_err(|e| e.to_string())?;
        let window = WindowBuilder::new()
            .with_title("Rutherford Scattering")
            .with_inner_size(LogicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT))
            .build(&event_loop)
            .map_err(|e| e.to_string())?;
        let window = Arc::new(window);

        let mut app = pollster::block_on(App::initialize(&window))?;
        log::info!("window {}x{} ready", app.size().width, app.size().height);

        // Frame timestamps are milliseconds since startup, like the browser's rAF clock.
        let clock = Instant::now();

        event_loop
            .run(move |event, target| match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => {
                    if app.handle_event(&window, &event) {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(new_size) => app.resize(new_size),
                        WindowEvent::RedrawRequested => {
                            let timestamp_ms = clock.elapsed().as_secs_f64() * 1000.0;
                            match app.frame(&window, timestamp_ms) {
                                Ok(()) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.size()),
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    log::error!("surface out of memory, exiting");
                                    target.exit();
                                }
                                Err(e) => log::warn!("render error: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => window.request_redraw(),
                _ => {}
            })
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{ScatteringControls, launch};

#[cfg(target_arch = "wasm32")]
mod web {
    use super::SurfaceProvider;
    use crate::app::{App, AppResult};
    use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::physics::elements::nuclide_label;
    use crate::physics::nucleus::NucleusModel;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wgpu::{Instance, Surface};
    use winit::dpi::PhysicalSize;

    /// 웹 캔버스용 SurfaceProvider 구현
    impl SurfaceProvider for web_sys::HtmlCanvasElement {
        fn create_surface(&self, instance: &Instance) -> AppResult<(Surface<'static>, PhysicalSize<u32>)> {
            let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(self.clone()))?;
            Ok((surface, PhysicalSize::new(self.width(), self.height())))
        }
    }

    #[wasm_bindgen(start)]
    pub fn init() {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }
        console_error_panic_hook::set_once();
    }

    /// Attaches the simulation to `<canvas id=canvas_id>` and starts the
    /// animation loop. The returned handle is the only way to drive it.
    #[wasm_bindgen]
    pub async fn launch(canvas_id: String) -> Result<ScatteringControls, JsValue> {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&canvas_id))
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("`{canvas_id}` is not a canvas")))?;

        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let app = App::initialize(&canvas)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("renderer created on #{canvas_id}");

        let app = Rc::new(RefCell::new(app));
        start_animation_loop(Rc::clone(&app))?;
        Ok(ScatteringControls { app })
    }

    type FrameCallback = Closure<dyn FnMut(f64)>;

    fn start_animation_loop(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let next = Rc::clone(&callback);

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
            {
                let mut app = app.borrow_mut();
                match app.frame(timestamp_ms) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let size = app.size();
                        app.resize(size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory, stopping animation");
                        return;
                    }
                    Err(e) => log::warn!("render error: {e:?}"),
                }
            }
            if let Some(callback) = next.borrow().as_ref() {
                if let Err(e) = request_animation_frame(callback) {
                    log::error!("requestAnimationFrame failed: {e:?}");
                }
            }
        }) as Box<dyn FnMut(f64)>));

        match callback.borrow().as_ref() {
            Some(first) => request_animation_frame(first).map(|_| ()),
            None => Ok(()),
        }
    }

    fn request_animation_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
        web_sys::window()
            .ok_or_else(|| JsValue::from_str("no global window"))?
            .request_animation_frame(callback.as_ref().unchecked_ref())
    }

    /// JS-facing control surface. Numeric inputs are rounded and clamped here.
    #[wasm_bindgen]
    pub struct ScatteringControls {
        app: Rc<RefCell<App>>,
    }

    #[wasm_bindgen]
    impl ScatteringControls {
        pub fn play(&self) {
            self.app.borrow_mut().ui_state_mut().playing = true;
        }

        pub fn pause(&self) {
            self.app.borrow_mut().ui_state_mut().playing = false;
        }

        pub fn reset(&self) {
            self.app.borrow_mut().ui_state_mut().request_reset();
        }

        pub fn set_energy(&self, value: f64) {
            self.app.borrow_mut().ui_state_mut().set_energy(to_integer(value));
        }

        pub fn set_protons(&self, value: f64) {
            self.app.borrow_mut().ui_state_mut().set_protons(to_integer(value));
        }

        pub fn set_neutrons(&self, value: f64) {
            self.app.borrow_mut().ui_state_mut().set_neutrons(to_integer(value));
        }

        pub fn set_traces(&self, show: bool) {
            self.app.borrow_mut().ui_state_mut().show_traces = show;
        }

        pub fn set_model(&self, name: &str) {
            match name.parse::<NucleusModel>() {
                Ok(model) => self.app.borrow_mut().ui_state_mut().model = model,
                Err(e) => log::warn!("{e}"),
            }
        }

        pub fn nuclide(&self) -> String {
            let app = self.app.borrow();
            let params = app.engine().params();
            nuclide_label(params.protons, params.neutrons)
        }

        pub fn spawned(&self) -> f64 {
            self.app.borrow().engine().stats().spawned as f64
        }

        pub fn backscattered(&self) -> f64 {
            self.app.borrow().engine().stats().backscattered as f64
        }
    }

    // NaN maps to 0 through `as`.
    fn to_integer(value: f64) -> i64 {
        value.round() as i64
    }
}
