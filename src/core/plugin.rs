//! CorePlugin wires configuration, screen states and the scaled game clock.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use super::{
    config::GameConfig,
    state::{GameScreen, OfficePhase},
};

const MIN_TIME_SCALE: f32 = 0.001;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Scaled game time. Every gameplay timer (typewriter, minigames, banners)
/// ticks off this clock so a single multiplier speeds the whole run up.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: time_scale.max(MIN_TIME_SCALE),
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Scaled delta of the current frame.
    pub fn delta(&self) -> Duration {
        self.last_scaled_delta
    }

    pub fn delta_secs(&self) -> f32 {
        self.last_scaled_delta.as_secs_f32()
    }

    /// Scaled time since boot.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Registers configuration, the screen/phase state machines and the clock.
#[derive(Debug, Clone)]
pub struct CorePlugin {
    config: GameConfig,
}

impl CorePlugin {
    pub fn from_config(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::from_config(GameConfig::load_or_default())
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::new(self.config.timing.time_scale))
            .insert_resource(self.config.clone())
            .init_state::<GameScreen>()
            .init_state::<OfficePhase>()
            .add_systems(Startup, log_startup_configuration)
            .add_systems(First, update_simulation_clock)
            .add_systems(OnExit(GameScreen::Office), deactivate_office_phase);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_state_dump);
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn deactivate_office_phase(mut next_phase: ResMut<NextState<OfficePhase>>) {
    next_phase.set(OfficePhase::Inactive);
}

fn log_startup_configuration(clock: Res<SimulationClock>, config: Res<GameConfig>) {
    info!(
        "CorePlugin initialised: {} weeks, {} NPC talks per week, time scale {:.3}",
        config.session.weeks_total,
        config.session.weekly_npc_limit,
        clock.time_scale()
    );
}

#[cfg(feature = "core_debug")]
fn log_state_dump(
    mut timer: ResMut<DebugTickTimer>,
    clock: Res<SimulationClock>,
    screen: Res<State<GameScreen>>,
    phase: Res<State<OfficePhase>>,
    session: Option<Res<crate::company::session::GameSession>>,
    stats: Option<Res<crate::company::stats::CompanyStats>>,
) {
    if !timer.timer.tick(clock.delta()).just_finished() {
        return;
    }
    let week = session.map(|session| session.week()).unwrap_or_default();
    info!(
        target: "core_debug",
        "t={:.1}s | real dt {:.4}s | screen {:?} | phase {:?} | week {} | stats {:?}",
        clock.elapsed().as_secs_f32(),
        clock.last_real_delta().as_secs_f32(),
        screen.get(),
        phase.get(),
        week,
        stats.map(|stats| *stats),
    );
}
