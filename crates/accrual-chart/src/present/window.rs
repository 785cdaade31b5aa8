// File: crates/accrual-chart/src/present/window.rs
// Summary: Interactive window presenter; renders chart-core to RGBA and blits it via winit + softbuffer.
// Controls: drag to pan, wheel to zoom at the cursor, R/Home resets the view, Esc/Q or close exits.

use std::num::NonZeroU32;

use anyhow::anyhow;
use chart_core::{Chart, RenderOptions, ViewState};
use log::debug;
use winit::dpi::LogicalSize;
use winit::event::{
    ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent,
};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

use super::Present;
use crate::error::Result;
use crate::transform::AXIS_MARGIN;

/// Blocks until the user closes the window.
#[derive(Clone, Debug)]
pub struct Window {
    title: String,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl Default for Window {
    fn default() -> Self { Self::new("Accrual runs") }
}

impl Present for Window {
    fn present(&mut self, chart: &Chart, opts: &RenderOptions) -> Result<()> {
        let mut event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(opts.width as f64, opts.height as f64))
            .build(&event_loop)
            .map_err(|e| anyhow!("failed to open window: {e}"))?;

        let context = unsafe { softbuffer::Context::new(&window) }
            .map_err(|e| anyhow!("softbuffer context: {e}"))?;
        let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
            .map_err(|e| anyhow!("softbuffer surface: {e}"))?;

        let home = ViewState::from_chart(chart, AXIS_MARGIN);
        let mut view = home;
        let mut frame_chart = chart.clone();
        let mut frame_opts = opts.clone();
        let mut cursor: Option<(f64, f64)> = None;
        let mut dragging = false;
        let mut failure: Option<anyhow::Error> = None;

        event_loop.run_return(|event, _, control_flow| {
            control_flow.set_wait();
            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                        ..
                    } => match key {
                        VirtualKeyCode::Escape | VirtualKeyCode::Q => control_flow.set_exit(),
                        VirtualKeyCode::R | VirtualKeyCode::Home => {
                            view = home;
                            window.request_redraw();
                        }
                        _ => {}
                    },
                    WindowEvent::Resized(_) => window.request_redraw(),
                    WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                        dragging = state == ElementState::Pressed;
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        if let (true, Some((px, py))) = (dragging, cursor) {
                            let size = window.inner_size();
                            view.pan_by_pixels(
                                position.x - px,
                                position.y - py,
                                size.width as i32,
                                size.height as i32,
                                &frame_opts.insets,
                            );
                            window.request_redraw();
                        }
                        cursor = Some((position.x, position.y));
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        if let Some((cx, cy)) = cursor {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => y as f64 * 0.1,
                                MouseScrollDelta::PixelDelta(p) => p.y / 240.0,
                            };
                            let size = window.inner_size();
                            view.zoom_at_pixel(scroll, cx, cy, size.width as i32, size.height as i32, &frame_opts.insets);
                            window.request_redraw();
                        }
                    }
                    _ => {}
                },
                Event::RedrawRequested(id) if id == window.id() => {
                    let size = window.inner_size();
                    // minimized
                    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
                        return;
                    };
                    frame_opts.width = size.width as i32;
                    frame_opts.height = size.height as i32;
                    view.apply_to_chart(&mut frame_chart);
                    if let Err(e) = blit(&mut surface, &frame_chart, &frame_opts, w, h) {
                        failure = Some(e);
                        control_flow.set_exit();
                    }
                }
                _ => {}
            }
        });

        debug!("window closed");
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

fn blit(
    surface: &mut softbuffer::Surface,
    chart: &Chart,
    opts: &RenderOptions,
    width: NonZeroU32,
    height: NonZeroU32,
) -> anyhow::Result<()> {
    surface.resize(width, height).map_err(|e| anyhow!("resize surface: {e}"))?;
    let (rgba, _, _, _) = chart.render_to_rgba8(opts)?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("acquire frame: {e}"))?;
    // softbuffer pixels are 0RGB
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
    }
    frame.present().map_err(|e| anyhow!("present frame: {e}"))?;
    Ok(())
}
