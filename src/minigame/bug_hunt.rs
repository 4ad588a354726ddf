//! Bug invasion: bugs crawl toward the server room door and must be clicked.
//!
//! Positions are in office pixels (origin top-left, y down).
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::core::config::MinigameRules;

/// How far left of the door bugs appear.
const SPAWN_DISTANCE: f32 = 200.0;
/// Vertical spread of the spawn point.
const SPAWN_JITTER: f32 = 50.0;
/// Bugs aim slightly short of the door itself.
const TARGET_OFFSET: f32 = 10.0;
const BREACH_RADIUS: f32 = 15.0;
pub const BUG_HIT_RADIUS: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugState {
    Crawling,
    Squashed,
    Breached,
}

#[derive(Debug, Clone)]
pub struct Bug {
    pub id: u32,
    pub position: Vec2,
    velocity: Vec2,
    pub state: BugState,
}

/// What changed during one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BugTick {
    pub spawned: Vec<u32>,
    pub breached: Vec<u32>,
}

#[derive(Resource, Debug)]
pub struct BugInvasion {
    door: Vec2,
    total: u32,
    speed: f32,
    penalty: i64,
    spawn_timer: Timer,
    bugs: Vec<Bug>,
}

impl BugInvasion {
    pub fn new(door: Vec2, rules: &MinigameRules) -> Self {
        Self {
            door,
            total: rules.bug_count,
            speed: rules.bug_speed,
            penalty: rules.bug_breach_penalty,
            spawn_timer: Timer::from_seconds(rules.bug_spawn_seconds, TimerMode::Repeating),
            bugs: Vec::new(),
        }
    }

    pub fn breach_penalty(&self) -> i64 {
        self.penalty
    }

    pub fn bugs(&self) -> impl Iterator<Item = &Bug> {
        self.bugs.iter()
    }

    pub fn bug(&self, id: u32) -> Option<&Bug> {
        self.bugs.iter().find(|bug| bug.id == id)
    }

    pub fn squashed(&self) -> u32 {
        self.count(BugState::Squashed)
    }

    pub fn breached(&self) -> u32 {
        self.count(BugState::Breached)
    }

    fn count(&self, state: BugState) -> u32 {
        self.bugs.iter().filter(|bug| bug.state == state).count() as u32
    }

    /// Every bug has been spawned and resolved.
    pub fn is_over(&self) -> bool {
        self.bugs.len() as u32 >= self.total
            && self.bugs.iter().all(|bug| bug.state != BugState::Crawling)
    }

    fn spawn(&mut self, rng: &mut impl Rng) -> u32 {
        let id = self.bugs.len() as u32;
        let position = Vec2::new(
            self.door.x - SPAWN_DISTANCE,
            self.door.y + rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
        );
        let target = Vec2::new(self.door.x - TARGET_OFFSET, self.door.y);
        let velocity = (target - position).normalize_or_zero() * self.speed;
        self.bugs.push(Bug {
            id,
            position,
            velocity,
            state: BugState::Crawling,
        });
        id
    }

    /// Spawns due bugs, moves crawling ones and resolves breaches.
    pub fn tick(&mut self, delta: Duration, rng: &mut impl Rng) -> BugTick {
        let mut report = BugTick::default();
        let dt = delta.as_secs_f32();

        for bug in self.bugs.iter_mut().filter(|bug| bug.state == BugState::Crawling) {
            let before = bug.position;
            bug.position += bug.velocity * dt;
            if reached_door(before, bug.position, self.door) {
                bug.state = BugState::Breached;
                report.breached.push(bug.id);
            }
        }

        self.spawn_timer.tick(delta);
        let due = self.spawn_timer.times_finished_this_tick();
        for _ in 0..due {
            if self.bugs.len() as u32 >= self.total {
                break;
            }
            report.spawned.push(self.spawn(rng));
        }

        report
    }

    /// Squashes the first crawling bug under `point`.
    pub fn squash_at(&mut self, point: Vec2) -> Option<u32> {
        let bug = self.bugs.iter_mut().find(|bug| {
            bug.state == BugState::Crawling && bug.position.distance(point) <= BUG_HIT_RADIUS
        })?;
        bug.state = BugState::Squashed;
        Some(bug.id)
    }
}

/// True once a bug is inside the breach radius or has walked past the door.
fn reached_door(before: Vec2, after: Vec2, door: Vec2) -> bool {
    after.distance(door) < BREACH_RADIUS || (before.x < door.x && after.x >= door.x)
}

/// Breach point of the server room door for an office of `room` size.
pub fn server_door_point(room: Vec2) -> Vec2 {
    let room_left = room.x - (room.x * 0.25).floor();
    let door_y = (room.y * 0.35).floor() * 0.6;
    Vec2::new(room_left, door_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use rand::{rngs::StdRng, SeedableRng};

    fn invasion() -> BugInvasion {
        BugInvasion::new(Vec2::new(960.0, 150.0), &GameConfig::default().minigames)
    }

    #[test]
    fn door_point_matches_office_layout() {
        let door = server_door_point(Vec2::new(1280.0, 720.0));
        assert_eq!(door.x, 960.0);
        assert!((door.y - 151.2).abs() < 1e-3);
    }

    #[test]
    fn spawns_one_bug_per_second_up_to_the_total() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut invasion = invasion();

        assert!(invasion
            .tick(Duration::from_millis(500), &mut rng)
            .spawned
            .is_empty());
        assert_eq!(
            invasion.tick(Duration::from_millis(500), &mut rng).spawned,
            vec![0]
        );

        for _ in 0..10 {
            invasion.tick(Duration::from_millis(1_000), &mut rng);
        }
        assert_eq!(invasion.bugs().count(), 5);
    }

    #[test]
    fn spawned_bugs_start_left_of_the_door_with_jitter() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut invasion = invasion();
        invasion.tick(Duration::from_secs(1), &mut rng);
        let bug = invasion.bug(0).expect("bug spawned");
        assert_eq!(bug.position.x, 760.0);
        assert!((bug.position.y - 150.0).abs() <= 50.0);
    }

    #[test]
    fn unattended_bugs_breach_the_door() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut invasion = invasion();
        let mut breaches = 0;
        for _ in 0..(12 * 20) {
            breaches += invasion
                .tick(Duration::from_millis(50), &mut rng)
                .breached
                .len();
        }
        assert_eq!(breaches, 5);
        assert_eq!(invasion.breached(), 5);
        assert!(invasion.is_over());
    }

    #[test]
    fn clicking_squashes_and_finishes_the_hunt() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut invasion = invasion();
        for _ in 0..5 {
            invasion.tick(Duration::from_secs(1), &mut rng);
            let positions: Vec<_> = invasion
                .bugs()
                .filter(|bug| bug.state == BugState::Crawling)
                .map(|bug| bug.position)
                .collect();
            for position in positions {
                assert!(invasion.squash_at(position + Vec2::new(3.0, -3.0)).is_some());
            }
        }
        assert_eq!(invasion.squashed(), 5);
        assert_eq!(invasion.breached(), 0);
        assert!(invasion.is_over());
        assert!(invasion.squash_at(Vec2::ZERO).is_none());
    }
}
