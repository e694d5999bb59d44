//! Window flow and the application event loop.
//!
//! The [`App`] owns the window, the GPU [`Context`] and the [`Viewer`]. winit
//! delivers events through callbacks; input events are translated and queued,
//! and everything else happens once per redraw:
//!
//! 1. Read the clock and drain the queued input into the viewer
//! 2. Apply held keys, mouse and scroll to the camera
//! 3. Stop if a close was requested
//! 4. Upload view and projection, draw the model
//! 5. Present the frame and request the next redraw

use std::{collections::VecDeque, iter, sync::Arc};

use instant::Instant;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    config::ViewerConfig,
    context::Context,
    data_structures::instance::Instance,
    frame::{Frame, Viewer},
    input::InputEvent,
    render::Instanced,
    resources::load_model_obj,
};

/// Everything that exists once the window is up.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    pub viewer: Viewer,
    subject: Instanced,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &ViewerConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config.clear_colour).await?;

        let model_file = config.model_file();
        let model = load_model_obj(&model_file, &ctx.device, &ctx.queue)
            .await
            .with_context(|| format!("Could not load model {}", model_file.display()))?;
        let placement = Instance::placed(config.model_translation, config.model_scale);
        let subject = Instanced::new(&ctx.device, model, vec![placement]);

        let mut viewer = Viewer::new(config);
        viewer.resize(ctx.config.width, ctx.config.height);

        Ok(Self {
            ctx,
            viewer,
            subject,
            is_surface_configured: true,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.is_surface_configured = self.ctx.resize(width, height);
        if self.is_surface_configured {
            self.viewer.resize(width, height);
        }
    }

    fn render(&mut self, frame: &Frame) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.ctx
            .camera
            .write(&self.ctx.queue, frame.eye, frame.view, frame.projection);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.ctx.pipeline);
            self.subject
                .draw(&mut render_pass, &self.ctx.camera.bind_group);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        self.ctx.window.pre_present_notify();
        output.present();
        Ok(())
    }
}

pub struct App {
    config: ViewerConfig,
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    // Filled by window callbacks, drained once per frame.
    pending_input: VecDeque<InputEvent>,
    init_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("Could not start the async runtime")?;
        Ok(Self {
            config,
            async_runtime,
            state: None,
            pending_input: VecDeque::new(),
            init_error: None,
        })
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Could not create the window")?,
        );
        grab_cursor(&window);

        self.async_runtime
            .block_on(AppState::new(window, &self.config))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let frame = state
            .viewer
            .advance(Instant::now(), self.pending_input.drain(..));

        if state.viewer.should_close() {
            log::info!("Close requested, leaving the render loop");
            event_loop.exit();
            return;
        }

        match state.render(&frame) {
            Ok(()) => {}
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Unable to render: out of memory");
                event_loop.exit();
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("App initialization failed: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => match InputEvent::from_window_event(&other) {
                // a grabbed cursor stops at the window edge, look follows raw
                // motion from `device_event` instead
                Some(InputEvent::CursorMoved { .. }) | None => {}
                Some(input) => self.pending_input.push_back(input),
            },
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if self.state.is_none() {
            return;
        }
        if let Some(input) = InputEvent::from_device_event(&event) {
            self.pending_input.push_back(input);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.ctx.window.request_redraw();
        }
    }
}

fn grab_cursor(window: &Window) {
    // X11 and Windows support confinement, macOS only locking
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(e) = grabbed {
        log::warn!("Cursor could not be grabbed: {}", e);
    }
    window.set_cursor_visible(false);
}

/// Open the window and run the viewer until it is closed.
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
