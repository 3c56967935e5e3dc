//! Host simulation loop.
//!
//! Each tick runs in two phases. The physics phase moves every character
//! (ground, crouch, locomotion, vertical motion, collider commit, animation
//! parameters) and then pushes the force-driven bodies. The camera phase
//! runs last, so it follows the character's already-resolved position.

use glam::Vec3;
use vantage_camera::{OrbitCamera, OrbitFrame};
use vantage_physics::movement::{
    CharacterController, ForceMover, MoveCommand, Stance, StanceController, TickReport,
    MAX_TICK_DELTA,
};

use crate::animation::AnimationBridge;
use crate::character::{Character, EntityId, Roller};
use crate::config::GameConfig;
use crate::input::{InputSampler, InputSnapshot};
use crate::level::Level;

/// What one simulation tick produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Controller report of the followed character.
    pub character: Option<TickReport>,
    /// Camera resolution, `None` when nothing is followed.
    pub camera: Option<OrbitFrame>,
}

/// The game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    pub config: GameConfig,

    pub level: Level,

    pub characters: Vec<Character>,

    pub rollers: Vec<Roller>,

    pub camera: OrbitCamera,

    controller: CharacterController,

    bridge: AnimationBridge,

    force_mover: ForceMover,

    sampler: InputSampler,

    /// Character receiving input and followed by the camera.
    followed: Option<EntityId>,

    next_entity_id: EntityId,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    pub fn new(config: GameConfig, level: Level) -> Self {
        let controller = CharacterController::new(config.locomotion.clone());
        let bridge = AnimationBridge::new(config.locomotion.run_speed());
        let force_mover = ForceMover::new(config.force.clone());
        let camera = OrbitCamera::new(config.camera.clone());

        Self {
            frame: 0,
            config,
            level,
            characters: Vec::new(),
            rollers: Vec::new(),
            camera,
            controller,
            bridge,
            force_mover,
            sampler: InputSampler::new(),
            followed: None,
            next_entity_id: 1,
        }
    }

    /// Create a simulation with default configuration and test arena.
    pub fn test() -> Self {
        Self::new(GameConfig::default(), Level::test_arena())
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Add a character at the next spawn point.
    ///
    /// The first character added receives input and is followed by the
    /// camera. Returns the character's ID.
    pub fn spawn_character(&mut self, name: &str) -> EntityId {
        let id = self.allocate_id();

        let spawn_index = self.characters.len() % self.level.spawn_point_count().max(1);
        let spawn = self.level.spawn_point(spawn_index).copied();
        let position = spawn.map_or(Vec3::ZERO, |s| s.position);
        let facing = spawn.map_or(0.0, |s| s.facing);

        let mut character =
            Character::new(id, name.to_string(), &self.config.collider, position, facing);
        StanceController::set(
            &self.config.locomotion,
            &mut character.state,
            &mut character.collider.attach(&self.level.collision),
            Stance::Standing,
        );

        log::debug!("spawned character {} '{}' at {:?}", id, name, position);
        self.characters.push(character);

        if self.followed.is_none() {
            self.follow(id);
        }
        id
    }

    /// Add a force-driven body. Returns its ID.
    pub fn add_roller(&mut self, position: Vec3) -> EntityId {
        let id = self.allocate_id();
        self.rollers.push(Roller::new(id, &self.config.body, position));
        id
    }

    /// Give input and the camera to another character.
    ///
    /// The camera rig is reinitialized behind it. Returns false if no such
    /// character exists.
    pub fn follow(&mut self, id: EntityId) -> bool {
        let Some(character) = self.characters.iter().find(|c| c.id == id) else {
            return false;
        };
        self.followed = Some(id);
        self.camera.reset(character.state.yaw, f32::NAN);
        self.camera.snap_to(character.position(), &self.level.collision);
        self.sampler.reset();
        true
    }

    pub fn followed(&self) -> Option<EntityId> {
        self.followed
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn roller(&self, id: EntityId) -> Option<&Roller> {
        self.rollers.iter().find(|r| r.id == id)
    }

    /// Remove a character. Following stops if it was followed.
    pub fn remove_character(&mut self, id: EntityId) {
        self.characters.retain(|c| c.id != id);
        if self.followed == Some(id) {
            self.followed = None;
        }
    }

    /// Advance one tick at the configured rate.
    pub fn tick(&mut self, input: &InputSnapshot) -> FrameReport {
        let dt = self.config.delta_time();
        self.advance(input, dt)
    }

    /// Advance one tick of `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` does nothing; long hitches are
    /// clamped.
    pub fn advance(&mut self, input: &InputSnapshot, dt: f32) -> FrameReport {
        if !dt.is_finite() || dt <= 0.0 {
            return FrameReport {
                frame: self.frame,
                ..FrameReport::default()
            };
        }
        let dt = dt.min(MAX_TICK_DELTA);

        let tick = self.sampler.sample(input);
        let world = &self.level.collision;
        let basis = self.camera.basis();

        // Physics phase: kinematic characters
        let mut followed_report = None;
        for character in &mut self.characters {
            let controlled = Some(character.id) == self.followed;
            let command = if controlled { tick.movement } else { MoveCommand::default() };

            let report = self.controller.update(
                &mut character.state,
                &command,
                Some(&basis),
                &mut character.collider.attach(world),
                world,
                dt,
            );
            self.bridge.update(&character.state, report.velocity, &mut character.animator, dt);

            if controlled {
                followed_report = Some(report);
            }
        }

        // Physics phase: force-driven bodies
        for roller in &mut self.rollers {
            self.force_mover.update(&tick.movement, &mut roller.body);
            roller.body.integrate(world, self.config.body_gravity, dt);
        }

        // Camera phase
        let target = self
            .followed
            .and_then(|id| self.characters.iter().find(|c| c.id == id))
            .map(|c| c.position());
        let camera = self.camera.update(target, &tick.pointer, world, dt);

        self.frame += 1;

        FrameReport {
            frame: self.frame,
            character: followed_report,
            camera,
        }
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimParam;
    use crate::input::{HeldKeys, MovementKeys};

    fn forward() -> InputSnapshot {
        InputSnapshot::from_keys(
            MovementKeys {
                forward: true,
                ..MovementKeys::default()
            },
            HeldKeys::default(),
        )
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert!(sim.characters.is_empty());
        assert_eq!(sim.followed(), None);
    }

    #[test]
    fn test_first_character_is_followed() {
        let mut sim = Simulation::test();

        let first = sim.spawn_character("First");
        let second = sim.spawn_character("Second");

        assert_eq!(sim.followed(), Some(first));
        assert_ne!(first, second);
        assert_eq!(sim.character(second).map(|c| c.position()), Some(Vec3::new(-3.0, 0.0, -3.0)));
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = Simulation::test();
        sim.spawn_character("Test");

        assert_eq!(sim.tick(&InputSnapshot::default()).frame, 1);
        assert_eq!(sim.tick(&InputSnapshot::default()).frame, 2);
        assert_eq!(sim.advance(&InputSnapshot::default(), 0.0).frame, 2);
    }

    #[test]
    fn test_movement_input() {
        let mut sim = Simulation::test();
        let id = sim.spawn_character("Test");

        for _ in 0..60 {
            sim.tick(&forward());
        }

        let character = sim.character(id).expect("spawned");
        assert!(character.position().z > 1.0, "position={:?}", character.position());
        assert!(character.animator.float(AnimParam::MoveY) > 0.2);
        assert!(character.animator.bool(AnimParam::IsGrounded));
    }

    #[test]
    fn test_only_followed_character_takes_input() {
        let mut sim = Simulation::test();
        sim.spawn_character("Player");
        let idle = sim.spawn_character("Idle");

        for _ in 0..30 {
            sim.tick(&forward());
        }

        let start = Vec3::new(-3.0, 0.0, -3.0);
        let moved = sim.character(idle).map(|c| (c.position() - start).length());
        assert!(moved.map_or(false, |d| d < 0.01));
    }

    #[test]
    fn test_camera_follows_character() {
        let mut sim = Simulation::test();
        let id = sim.spawn_character("Test");

        let mut report = FrameReport::default();
        for _ in 0..120 {
            report = sim.tick(&forward());
        }

        let position = sim.character(id).map(|c| c.position()).unwrap_or_default();
        let frame = report.camera.expect("camera has a target");
        assert!(frame.anchor.distance(position + Vec3::new(0.0, 1.6, 0.0)) < 1e-4);
        // Camera trails behind the character along -Z
        assert!(sim.camera.position().z < position.z);
    }

    #[test]
    fn test_roller_is_pushed_by_input() {
        let mut sim = Simulation::test();
        let id = sim.add_roller(Vec3::new(5.0, 0.5, -5.0));

        for _ in 0..60 {
            sim.tick(&forward());
        }

        let roller = sim.roller(id).expect("added");
        assert!(roller.position().z > -5.0 + 0.5, "position={:?}", roller.position());
        assert!((roller.position().y - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<_> = (0..100)
            .map(|i| {
                let mut input = InputSnapshot::from_keys(
                    MovementKeys {
                        forward: i % 2 == 0,
                        right: i % 3 == 0,
                        ..MovementKeys::default()
                    },
                    HeldKeys {
                        jump: i % 10 == 0,
                        ..HeldKeys::default()
                    },
                );
                input.pointer_x = (i % 7) as f32 * 0.1;
                input
            })
            .collect();

        let run = || {
            let mut sim = Simulation::test();
            let id = sim.spawn_character("Test");
            for input in &inputs {
                sim.tick(input);
            }
            (sim.character(id).map(|c| c.position()), sim.camera.position())
        };

        let (a, cam_a) = run();
        let (b, cam_b) = run();
        assert_eq!(a, b);
        assert_eq!(cam_a, cam_b);
    }
}
