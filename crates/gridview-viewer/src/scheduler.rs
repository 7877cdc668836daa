//! The render/update scheduling loop.
//!
//! One cooperative task decouples the redraw rate from the simulation tick
//! rate: every frame redraws, and a state fetch is issued only when a full
//! tick of wall-clock time has elapsed since the previous fetch was issued
//! and no fetch is outstanding. The update gate in
//! [`SchedulerState::try_begin_update`] is the sole owner of that
//! single-outstanding-request invariant; everything else trusts it.
//!
//! Failure policy: a failed fetch pauses the whole loop for a fixed delay
//! before the next frame. Rendering freezes for that window -- the one
//! deliberate exception to "always redraw" -- because an unreachable server
//! must not induce a tight retry storm.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval, sleep};
use tracing::{debug, info, trace, warn};

use gridview_types::{SessionConfig, ViewIdentity, WorldState};

use crate::api::ApiClient;
use crate::render::{Renderer, ViewFrame};

/// Book-keeping for the scheduling loop.
///
/// Owned exclusively by the [`Scheduler`]; mutated only within the loop
/// body, never from another task.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerState {
    /// When the current loop iteration started.
    last_render: Instant,
    /// When the most recent state fetch was issued (not when it completed).
    last_update: Instant,
    /// True for exactly the span between issuing a fetch and its resolution.
    update_in_flight: bool,
    /// True once the session handshake has completed.
    initialized: bool,
}

impl SchedulerState {
    /// Fresh state stamped at `now`: no fetch outstanding, session not ready.
    pub const fn new(now: Instant) -> Self {
        Self {
            last_render: now,
            last_update: now,
            update_in_flight: false,
            initialized: false,
        }
    }

    /// The update gate: decide whether a fetch may be issued at `now`.
    ///
    /// Opens iff a full tick has elapsed since the previous fetch was
    /// *issued* and no fetch is outstanding. On opening, `last_update` is
    /// stamped at issue time -- not completion time -- so slow responses
    /// cannot cause request storms, and the in-flight flag is raised.
    /// This is the only place allowed to raise the flag.
    pub fn try_begin_update(&mut self, now: Instant, tick_duration: Duration) -> bool {
        if self.update_in_flight || now.duration_since(self.last_update) <= tick_duration {
            return false;
        }
        self.last_update = now;
        self.update_in_flight = true;
        true
    }

    /// Resolve the outstanding fetch, success or failure.
    pub fn finish_update(&mut self) {
        self.update_in_flight = false;
    }

    /// True while a fetch is outstanding.
    pub const fn update_in_flight(&self) -> bool {
        self.update_in_flight
    }

    /// True once the session handshake has completed.
    pub const fn initialized(&self) -> bool {
        self.initialized
    }
}

/// Perform the session handshake, retrying until the server answers.
///
/// Never surfaces failure to the caller: the expected deployment race is
/// "viewer started before the simulation", so transport errors, non-2xx
/// answers, and malformed bodies are all logged and retried after
/// `retry_delay`, indefinitely.
pub async fn initialize(api: &ApiClient, retry_delay: Duration) -> SessionConfig {
    loop {
        match api.session_info().await {
            Ok(info) => match SessionConfig::try_from(info) {
                Ok(config) => {
                    info!(
                        tick_duration_ms = config.tick_duration.as_millis(),
                        tick = config.current_tick,
                        grid_size = ?config.grid_size,
                        ticks_per_second = config.ticks_per_second,
                        "fetched simulation settings"
                    );
                    return config;
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        retry_ms = retry_delay.as_millis(),
                        "simulation settings unusable, retrying"
                    );
                    sleep(retry_delay).await;
                }
            },
            Err(e) => {
                warn!(
                    error = %e,
                    retry_ms = retry_delay.as_millis(),
                    "could not connect to simulation server, retrying"
                );
                sleep(retry_delay).await;
            }
        }
    }
}

/// The render/update scheduler.
///
/// Owns the session parameters, the scheduling state, the current world
/// state, and the renderer. One instance runs one view for the lifetime of
/// the process.
pub struct Scheduler<R> {
    api: ApiClient,
    identity: ViewIdentity,
    session: SessionConfig,
    state: SchedulerState,
    world: WorldState,
    renderer: R,
    frame_interval: Duration,
    retry_delay: Duration,
}

impl<R: Renderer> Scheduler<R> {
    /// Build a scheduler for a completed session handshake.
    pub fn new(
        api: ApiClient,
        identity: ViewIdentity,
        session: SessionConfig,
        renderer: R,
        frame_interval: Duration,
        retry_delay: Duration,
    ) -> Self {
        let mut state = SchedulerState::new(Instant::now());
        state.initialized = true;
        Self {
            api,
            identity,
            session,
            state,
            world: WorldState::new(),
            renderer,
            frame_interval,
            retry_delay,
        }
    }

    /// The session parameters, including the most recently rendered tick.
    pub const fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// The scheduling book-keeping.
    pub const fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// The current world state (empty until the first accepted update).
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    /// Run the loop forever.
    ///
    /// Paced by a best-effort frame timer; the next iteration is armed only
    /// after the current one has fully resolved, so loop bodies never
    /// overlap. Every exit path of an iteration feeds back into the next
    /// frame -- the loop never ends.
    pub async fn run(&mut self) {
        info!(
            view = %self.identity,
            tick = self.session.current_tick,
            frame_ms = self.frame_interval.as_millis(),
            "entering render loop"
        );

        let mut frames = interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            frames.tick().await;
            self.frame().await;
        }
    }

    /// One loop iteration: redraw, and update when the gate allows it.
    async fn frame(&mut self) {
        let now = Instant::now();
        let progress = now.duration_since(self.state.last_render);
        self.state.last_render = now;
        trace!(frame_ms = progress.as_millis(), "frame");

        if !self.state.try_begin_update(now, self.session.tick_duration) {
            // No new tick due yet: redraw the current state and move on.
            self.draw(false);
            return;
        }

        // Rendering pauses while the fetch is in flight; the next frame is
        // armed only once the request has resolved either way.
        match self.api.latest_state(self.identity.agent_id()).await {
            Ok(snapshot) => {
                self.state.finish_update();
                self.world = snapshot.state;
                self.session.current_tick = snapshot.tick;
                self.draw(true);
                self.state.last_render = now;
                debug!(tick = snapshot.tick, "applied state update");
            }
            Err(e) => {
                // Any server-provided error payload rides in the message.
                warn!(
                    error = %e,
                    retry_ms = self.retry_delay.as_millis(),
                    "state fetch failed, pausing before next frame"
                );
                self.state.finish_update();
                self.state.last_render = now;
                sleep(self.retry_delay).await;
            }
        }
    }

    fn draw(&mut self, new_tick: bool) {
        let frame = ViewFrame {
            world: &self.world,
            tick: self.session.current_tick,
            grid_size: self.session.grid_size,
            new_tick,
        };
        self.renderer.draw(&frame);
    }
}
