//! Desktop viewer for the PCR animation.

use std::path::Path;
use std::sync::Arc;

use pcrviz::engine::PcrRenderEngine;
use pcrviz::options::Options;
use pcrviz::util::FrameTiming;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Default options file loaded from the working directory when present.
const OPTIONS_PATH: &str = "pcrviz.toml";

struct PcrApp {
    window: Option<Arc<Window>>,
    engine: Option<PcrRenderEngine>,
    last_mouse_pos: (f32, f32),
    timing: FrameTiming,
    options: Options,
}

impl PcrApp {
    fn new(options: Options) -> Self {
        Self {
            window: None,
            engine: None,
            last_mouse_pos: (0.0, 0.0),
            timing: FrameTiming::new(),
            options,
        }
    }
}

impl ApplicationHandler for PcrApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes()
                .with_title("PCR Visualizer")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
            let window = match event_loop.create_window(attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("window creation failed: {e}");
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            let engine = match pollster::block_on(PcrRenderEngine::new(
                window.clone(),
                (size.width, size.height),
                self.options.clone(),
            )) {
                Ok(engine) => engine,
                Err(e) => {
                    log::error!("engine initialization failed: {e}");
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.window = Some(window);
            self.engine = Some(engine);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    let dt = self.timing.tick();
                    engine.advance(dt);
                    window.set_title(&format!(
                        "PCR Visualizer \u{2014} {}",
                        engine.status().headline()
                    ));

                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            engine.resize(inner.width, inner.height);
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(engine) = &mut self.engine {
                    if button == winit::event::MouseButton::Left {
                        engine.camera.mouse_pressed =
                            state == ElementState::Pressed;
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let delta_x = position.x as f32 - self.last_mouse_pos.0;
                let delta_y = position.y as f32 - self.last_mouse_pos.1;
                self.last_mouse_pos =
                    (position.x as f32, position.y as f32);

                if let Some(engine) = &mut self.engine {
                    if engine.camera.mouse_pressed {
                        engine.orbit_camera(delta_x, delta_y);
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    match delta {
                        MouseScrollDelta::LineDelta(_, y) => {
                            engine.zoom_camera(y);
                        }
                        MouseScrollDelta::PixelDelta(pos) => {
                            engine.zoom_camera(pos.y as f32 * 0.01);
                        }
                    }
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.camera.shift_pressed =
                        modifiers.state().shift_key();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let Some(engine) = &mut self.engine {
                        use winit::keyboard::{KeyCode, PhysicalKey};
                        if let PhysicalKey::Code(code) = event.physical_key {
                            if code == KeyCode::Escape {
                                event_loop.exit();
                                return;
                            }
                            let key_str = format!("{code:?}");
                            if let Some(action) =
                                engine.keybindings().lookup(&key_str)
                            {
                                engine.apply_action(action);
                            }
                        }
                    }
                }
            }

            _ => (),
        }
    }
}

fn main() {
    env_logger::init();

    let options_path = Path::new(OPTIONS_PATH);
    let options = if options_path.exists() {
        match Options::load(options_path) {
            Ok(options) => {
                log::info!("loaded options from {OPTIONS_PATH}");
                options
            }
            Err(e) => {
                log::error!("failed to load {OPTIONS_PATH}: {e}");
                std::process::exit(1);
            }
        }
    } else {
        Options::default()
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("event loop creation failed: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PcrApp::new(options);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {e}");
        std::process::exit(1);
    }
}
