//! The rendering seam.
//!
//! Drawing is an external collaborator: the scheduler hands a [`ViewFrame`]
//! to whatever [`Renderer`] it was built with and moves on. The default
//! [`TraceRenderer`] only emits log events, which keeps the binary useful
//! against a live server without a display attached.

use gridview_types::WorldState;
use tracing::{debug, trace};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewFrame<'a> {
    /// The world state to draw. Opaque to the scheduler.
    pub world: &'a WorldState,
    /// The simulation tick the state belongs to.
    pub tick: u64,
    /// World grid dimensions as `[width, height]`.
    pub grid_size: [u32; 2],
    /// True when this frame carries a freshly fetched state, so the
    /// renderer may play tick-boundary effects.
    pub new_tick: bool,
}

/// Consumes frames, produces pixels.
///
/// Implementations decide what a frame looks like; the scheduler only
/// guarantees it calls [`draw`](Self::draw) once per loop iteration outside
/// the failure-delay window.
pub trait Renderer {
    /// Draw one frame.
    fn draw(&mut self, frame: &ViewFrame<'_>);
}

/// Renderer that only emits structured log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceRenderer;

impl Renderer for TraceRenderer {
    fn draw(&mut self, frame: &ViewFrame<'_>) {
        if frame.new_tick {
            debug!(
                tick = frame.tick,
                objects = frame.world.len(),
                grid_size = ?frame.grid_size,
                "drawing new tick"
            );
        } else {
            trace!(tick = frame.tick, "redraw");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_renderer_accepts_frames() {
        let world = WorldState::new();
        let mut renderer = TraceRenderer;
        renderer.draw(&ViewFrame {
            world: &world,
            tick: 0,
            grid_size: [1, 1],
            new_tick: false,
        });
        renderer.draw(&ViewFrame {
            world: &world,
            tick: 1,
            grid_size: [1, 1],
            new_tick: true,
        });
    }
}
