//! The render engine: owns the clock, stage, camera, and renderers, and
//! drives one frame of the animation per call.
//!
//! Frame order is fixed: advance the clock, resolve the cycle state,
//! choreograph the stage, then upload camera/lighting/instances and record
//! the two render passes (lit meshes, then labels on top).

use crate::animation::{choreography, AnimationClock, CycleState};
use crate::camera::CameraController;
use crate::error::PcrVizError;
use crate::geometry::StageGeometry;
use crate::gpu::{DepthTarget, RenderContext};
use crate::input::KeyAction;
use crate::options::Options;
use crate::renderer::{LabelRenderer, Lighting, StageRenderer};
use crate::stage::Stage;
use crate::ui::{self, StatusReadout};

/// Top-level engine for the PCR animation.
pub struct PcrRenderEngine {
    context: RenderContext,
    /// Orbit camera, exposed for viewer mouse handling.
    pub camera: CameraController,
    lighting: Lighting,
    depth: DepthTarget,
    stage_renderer: StageRenderer,
    label_renderer: LabelRenderer,
    stage: Stage,
    clock: AnimationClock,
    state: CycleState,
    status: StatusReadout,
    options: Options,
    background: wgpu::Color,
}

impl PcrRenderEngine {
    /// Initialize the GPU context and build the whole scene.
    ///
    /// # Errors
    ///
    /// Returns [`PcrVizError::Gpu`] if GPU initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: Options,
    ) -> Result<Self, PcrVizError> {
        let context = RenderContext::new(window, initial_size).await?;
        let camera = CameraController::new(&context, &options.camera);
        let lighting = Lighting::new(&context, &options.lighting);
        let depth = DepthTarget::new(
            &context.device,
            context.config.width,
            context.config.height,
        );

        let geometry =
            StageGeometry::build(&mut rand::rng(), &options.colors);
        let stage_renderer = StageRenderer::new(
            &context,
            &geometry,
            &camera.layout,
            &lighting.layout,
        );
        let label_renderer = LabelRenderer::new(&context, &camera.layout);

        let mut stage = Stage::new(&geometry.pool);
        stage.labels_enabled = options.display.show_labels;

        let clock = AnimationClock::new();
        let state = CycleState::initial();
        choreography::apply(&state, &mut stage);

        let mut status = StatusReadout::default();
        ui::project(&state, clock.is_playing(), &mut status);

        let [r, g, b] = options.colors.background;
        let background = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };

        log::info!(
            "engine ready: pool of {} nucleotides, surface {}x{}",
            stage.pool.len(),
            context.config.width,
            context.config.height
        );

        Ok(Self {
            context,
            camera,
            lighting,
            depth,
            stage_renderer,
            label_renderer,
            stage,
            clock,
            state,
            status,
            options,
            background,
        })
    }

    /// Advance the animation by `delta_seconds` of wall time.
    ///
    /// While paused, the clock and stage hold still but the status text is
    /// still projected so the play label tracks the toggle.
    pub fn advance(&mut self, delta_seconds: f32) {
        self.clock.tick(delta_seconds);
        if self.clock.is_playing() {
            if self.options.display.auto_spin {
                self.stage.spin();
            }
            self.state = CycleState::at(self.clock.elapsed_seconds());
            choreography::apply(&self.state, &mut self.stage);
        }
        ui::project(&self.state, self.clock.is_playing(), &mut self.status);
    }

    /// Render one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture could not be
    /// acquired; the caller decides whether to reconfigure or bail.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let forward =
            (self.camera.camera.target - self.camera.camera.eye).normalize();
        let right = forward.cross(self.camera.camera.up).normalize();
        let up = right.cross(forward);
        self.lighting.update_headlamp(right, up, forward);
        self.lighting.update_gpu(&self.context.queue);
        self.camera.update_gpu(&self.context.queue);

        self.stage_renderer.update(&self.context, &self.stage);
        self.label_renderer.update(&self.context, &self.stage);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Stage Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.background),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_bind_group(0, &self.camera.bind_group, &[]);
            pass.set_bind_group(1, &self.lighting.bind_group, &[]);
            self.stage_renderer.draw(&mut pass);
        }

        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Label Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_bind_group(0, &self.camera.bind_group, &[]);
            self.label_renderer.draw(&mut pass);
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Track a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.resize(width, height);
        self.depth =
            DepthTarget::new(&self.context.device, width.max(1), height.max(1));
    }

    /// Reconfigure the surface at its current size (after a lost frame).
    pub fn reconfigure_surface(&mut self) {
        let (w, h) = (self.context.config.width, self.context.config.height);
        self.context.resize(w, h);
    }

    /// Flip the play/pause flag.
    pub fn toggle_play(&mut self) {
        self.clock.toggle_play();
        log::debug!(
            "playback {}",
            if self.clock.is_playing() { "resumed" } else { "paused" }
        );
    }

    /// Rewind to cycle 1, denaturation, progress 0, and force the stage
    /// back to its pre-animation look even while paused.
    pub fn restart(&mut self) {
        self.clock.reset();
        self.stage.reset_visual();
        self.state = CycleState::initial();
        choreography::apply(&self.state, &mut self.stage);
        ui::project(&self.state, self.clock.is_playing(), &mut self.status);
        log::debug!("animation restarted");
    }

    /// Dispatch a bound key action.
    pub fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::TogglePlayback => self.toggle_play(),
            KeyAction::Restart => self.restart(),
            KeyAction::RecenterCamera => self.camera.reset_view(),
            KeyAction::ToggleLabels => {
                self.stage.labels_enabled = !self.stage.labels_enabled;
                self.options.display.show_labels = self.stage.labels_enabled;
            }
            KeyAction::ToggleSpin => {
                self.options.display.auto_spin =
                    !self.options.display.auto_spin;
            }
        }
    }

    /// Orbit the camera by a mouse-drag delta.
    pub fn orbit_camera(&mut self, dx: f32, dy: f32) {
        if self.camera.shift_pressed {
            self.camera.pan(glam::Vec2::new(dx, dy));
        } else {
            self.camera.rotate(glam::Vec2::new(dx, dy));
        }
    }

    /// Zoom the camera by a scroll delta.
    pub fn zoom_camera(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    /// The latest projected status text.
    #[must_use]
    pub fn status(&self) -> &StatusReadout {
        &self.status
    }

    /// Whether the clock is currently running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// The keybinding table from the loaded options.
    #[must_use]
    pub fn keybindings(&self) -> &crate::options::KeybindingOptions {
        &self.options.keybindings
    }
}
