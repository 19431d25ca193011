use crate::clock::Clock;
use crate::update::advance;
use shoreline_scene::Scene;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Weight of the newest frame in the smoothed frame rate.
const FPS_SMOOTHING: f32 = 0.1;

/// Cancellation token checked at the top of every frame.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The host side of one frame: everything that happens after the scene is posed.
pub trait FrameHost {
    /// Poll camera controls so damping sees the latest pointer input.
    fn update_controls(&mut self);

    /// Draw the current scene once, synchronously.
    fn draw(&mut self, scene: &Scene);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule the next frame.
    Continue,
    /// The stop signal was raised; nothing was drawn.
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames completed so far.
    pub frame: u64,
    /// Clock reading used by the last frame.
    pub elapsed: f32,
    /// Seconds between the last two frames.
    pub delta: f32,
    /// Exponentially smoothed frame rate; zero until two frames have run.
    pub fps: f32,
}

/// Drives the animation one frame at a time.
///
/// Each frame: check the stop signal, read the clock, pose the scene, poll the
/// controls, draw. The caller owns scheduling between frames (a redraw request
/// in the desktop shell, a plain loop headless).
pub struct FrameLoop<C: Clock> {
    clock: C,
    stop: StopSignal,
    stats: FrameStats,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            stop: StopSignal::new(),
            stats: FrameStats::default(),
        }
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Run one iteration.
    pub fn run_frame<H: FrameHost + ?Sized>(
        &mut self,
        scene: &mut Scene,
        host: &mut H,
    ) -> FrameOutcome {
        if self.stop.is_stopped() {
            return FrameOutcome::Stopped;
        }

        let t = self.clock.elapsed();
        let delta = if self.stats.frame == 0 {
            0.0
        } else {
            (t - self.stats.elapsed).max(0.0)
        };

        advance(scene, t);
        host.update_controls();
        host.draw(scene);

        let fps = match (delta > 0.0, self.stats.fps > 0.0) {
            (false, _) => self.stats.fps,
            (true, false) => 1.0 / delta,
            (true, true) => self.stats.fps + FPS_SMOOTHING * (1.0 / delta - self.stats.fps),
        };
        self.stats = FrameStats {
            frame: self.stats.frame + 1,
            elapsed: t,
            delta,
            fps,
        };
        FrameOutcome::Continue
    }

    /// Loop until the stop signal is raised. `between` runs after every frame
    /// and is the only place the loop yields. Returns the number of frames run.
    pub fn run<H, F>(&mut self, scene: &mut Scene, host: &mut H, mut between: F) -> u64
    where
        H: FrameHost + ?Sized,
        F: FnMut(&mut C, &StopSignal),
    {
        let start = self.stats.frame;
        let _span = tracing::debug_span!("frame_loop").entered();
        while self.run_frame(scene, host) == FrameOutcome::Continue {
            between(&mut self.clock, &self.stop);
        }
        let ran = self.stats.frame - start;
        tracing::debug!(frames = ran, "frame loop stopped");
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use approx::assert_relative_eq;
    use shoreline_compose::assemble_seeded;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        water_heights: Vec<f32>,
    }

    impl FrameHost for Recorder {
        fn update_controls(&mut self) {
            self.calls.push("controls");
        }

        fn draw(&mut self, scene: &Scene) {
            self.calls.push("draw");
            let water = scene.graph.get(scene.handles.water).unwrap();
            self.water_heights.push(water.transform().position.y);
        }
    }

    #[test]
    fn frame_polls_controls_before_drawing() {
        let mut scene = assemble_seeded(1);
        let mut frames = FrameLoop::new(ManualClock::new());
        let mut host = Recorder::default();

        assert_eq!(frames.run_frame(&mut scene, &mut host), FrameOutcome::Continue);
        assert_eq!(host.calls, ["controls", "draw"]);
        assert_eq!(frames.stats().frame, 1);
    }

    #[test]
    fn draw_sees_this_frames_pose() {
        let mut scene = assemble_seeded(1);
        let mut frames = FrameLoop::new(ManualClock::new());
        let mut host = Recorder::default();

        frames.clock_mut().set(3.0);
        frames.run_frame(&mut scene, &mut host);
        assert_eq!(host.water_heights, [crate::motion::WATER_BOB.at(3.0)]);
    }

    #[test]
    fn stop_signal_halts_before_drawing() {
        let mut scene = assemble_seeded(1);
        let mut frames = FrameLoop::new(ManualClock::new());
        let mut host = Recorder::default();

        frames.stop_signal().stop();
        assert_eq!(frames.run_frame(&mut scene, &mut host), FrameOutcome::Stopped);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn run_loops_until_stopped() {
        let mut scene = assemble_seeded(1);
        let mut frames = FrameLoop::new(ManualClock::new());
        let mut host = Recorder::default();

        let ran = frames.run(&mut scene, &mut host, |clock, stop| {
            clock.advance_by(1.0 / 60.0);
            if clock.elapsed() >= 1.0 - 1e-4 {
                stop.stop();
            }
        });
        assert_eq!(ran, 60);
        assert_eq!(host.water_heights.len(), 60);
        assert!(frames.stats().delta > 0.0);
        assert!(frames.stats().fps > 59.0 && frames.stats().fps < 61.0);
    }

    #[test]
    fn fps_is_smoothed_across_frames() {
        let mut scene = assemble_seeded(1);
        let mut frames = FrameLoop::new(ManualClock::new());
        let mut host = Recorder::default();

        frames.run_frame(&mut scene, &mut host);
        assert_eq!(frames.stats().fps, 0.0);

        frames.clock_mut().set(0.1);
        frames.run_frame(&mut scene, &mut host);
        assert_relative_eq!(frames.stats().fps, 10.0, epsilon = 1e-3);

        // A single fast frame only nudges the rate.
        frames.clock_mut().set(0.15);
        frames.run_frame(&mut scene, &mut host);
        assert_relative_eq!(frames.stats().fps, 11.0, epsilon = 1e-3);
    }
}
