//! Simulation engine - main entry point for running the colony

use hecs::World;
use rand::rngs::StdRng;

use crate::components::*;
use crate::config::{validate_config, ConfigError, SimConfig};
use crate::frame::{AgentView, FoodView, FrameInput, FrameSnapshot, FrameStatus};
use crate::systems::*;

/// Main simulation engine. Owns every entity, timer and the random generator.
pub struct SimulationEngine {
    /// ECS world containing all ants
    pub world: World,
    /// All food, in spawn order
    pub foods: FoodRegistry,
    clock: WorldClock,
    rng: StdRng,
    config: SimConfig,
    orbit: Orbit,
    foraging: ForagingParams,

    // Running totals
    ticks: u64,
    total_pickups: usize,
    total_deliveries: usize,

    time_scale: f32,
    running: bool,
}

impl SimulationEngine {
    /// Create a colony with the default configuration
    pub fn new() -> Self {
        Self::build(SimConfig::default())
    }

    /// Create a colony from `config`, rejecting invalid settings
    pub fn with_config(config: SimConfig) -> Result<Self, ConfigError> {
        if let Some(err) = validate_config(&config).into_iter().next() {
            return Err(err);
        }
        Ok(Self::build(config))
    }

    /// Create an engine with no ants and no food; the caller populates it
    pub fn empty(config: SimConfig) -> Result<Self, ConfigError> {
        if let Some(err) = validate_config(&config).into_iter().next() {
            return Err(err);
        }
        Ok(Self::bare(config))
    }

    fn bare(config: SimConfig) -> Self {
        let bounds = config.bounds();
        Self {
            world: World::new(),
            foods: FoodRegistry::new(),
            clock: WorldClock::new(&config),
            rng: config.seeded_rng(),
            orbit: Orbit::around_screen(
                &bounds,
                config.queen_orbit_radius,
                config.queen_angular_speed,
            ),
            foraging: ForagingParams::from_config(&config),
            config,
            ticks: 0,
            total_pickups: 0,
            total_deliveries: 0,
            time_scale: 1.0,
            running: true,
        }
    }

    fn build(config: SimConfig) -> Self {
        let mut engine = Self::bare(config);
        engine.populate();
        engine
    }

    /// Spawn the queen, then the starting workers (subject to the cap)
    fn populate(&mut self) {
        spawn_queen(&mut self.world, &self.config, &mut self.rng);
        for _ in 0..self.config.initial_workers {
            if try_spawn_worker(&mut self.world, &self.config, &mut self.rng).is_none() {
                break;
            }
        }

        log::info!(
            "Colony founded on {}x{} screen: 1 queen, {} workers (cap {})",
            self.config.screen_width,
            self.config.screen_height,
            self.worker_count(),
            self.config.max_population
        );
    }

    /// Handle one frame from the rendering/input layer.
    ///
    /// An exit request stops the simulation before any update; every later
    /// frame is ignored.
    pub fn step(&mut self, input: FrameInput) -> FrameStatus {
        if !self.running {
            return FrameStatus::Exit;
        }
        if input.exit_requested {
            log::info!(
                "Exit requested after {} ticks ({:.1}s simulated)",
                self.ticks,
                self.sim_time()
            );
            self.running = false;
            return FrameStatus::Exit;
        }

        self.update(input.delta_seconds);
        FrameStatus::Continue
    }

    /// Update the simulation by delta_seconds
    pub fn update(&mut self, delta_seconds: f32) {
        let frame = frame_duration(delta_seconds * self.time_scale);
        let events = self.clock.advance(frame);

        // Timer resets even when the cap suppresses the spawn
        if events.spawn_worker {
            try_spawn_worker(&mut self.world, &self.config, &mut self.rng);
        }
        if events.spawn_food {
            spawn_food(&mut self.foods, &self.config, &mut self.rng);
        }
        if events.compact_food {
            let removed = self.foods.compact();
            if removed > 0 {
                log::debug!(
                    "Compacted food registry: removed {} claimed, {} remain",
                    removed,
                    self.foods.len()
                );
            }
        }

        queen_system(&mut self.world, &self.orbit, self.clock.total_seconds());

        let report = foraging_system(
            &mut self.world,
            &mut self.foods,
            &self.foraging,
            &mut self.rng,
        );
        self.total_pickups += report.pickups;
        self.total_deliveries += report.deliveries;
        self.ticks += 1;

        log::trace!(
            "Tick {}: {} ants, {} food ({} available)",
            self.ticks,
            self.agent_count(),
            self.foods.len(),
            self.foods.available_count()
        );
    }

    /// Drawable state for the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let agents: Vec<AgentView> = self
            .world
            .query::<(&Ant, &Position, &Heading, &Forager)>()
            .iter()
            .map(|(_, (ant, pos, heading, forager))| AgentView {
                position: pos.0,
                rotation: if ant.is_queen() { 0.0 } else { heading.0 },
                is_queen: ant.is_queen(),
                carrying_food: forager.carrying_food,
            })
            .collect();

        let foods = self
            .foods
            .iter()
            .map(|food| FoodView {
                position: food.position(),
                picked_up: food.is_picked_up(),
            })
            .collect();

        FrameSnapshot {
            elapsed_seconds: self.sim_time(),
            agent_count: agents.len(),
            agents,
            foods,
        }
    }

    /// Add a worker at an exact position, bypassing the cap
    pub fn spawn_worker_at(&mut self, position: Vec2) -> hecs::Entity {
        spawn_ant(
            &mut self.world,
            Ant::worker(self.config.worker_speed, self.config.worker_size),
            position,
        )
    }

    /// Add a queen at an exact position
    pub fn spawn_queen_at(&mut self, position: Vec2) -> hecs::Entity {
        spawn_ant(
            &mut self.world,
            Ant::queen(self.config.queen_speed, self.config.queen_size),
            position,
        )
    }

    /// Add food at an exact position
    pub fn spawn_food_at(&mut self, position: Vec2) {
        self.foods.push(Food::new(position, self.config.food_size));
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Get current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Simulated seconds since start
    pub fn sim_time(&self) -> f64 {
        self.clock.total_seconds()
    }

    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Count every ant, queen included
    pub fn agent_count(&self) -> usize {
        population(&self.world)
    }

    pub fn worker_count(&self) -> usize {
        self.world
            .query::<&Ant>()
            .iter()
            .filter(|(_, ant)| !ant.is_queen())
            .count()
    }

    /// Food items in the registry, claimed or not
    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    pub fn available_food_count(&self) -> usize {
        self.foods.available_count()
    }

    pub fn total_pickups(&self) -> usize {
        self.total_pickups
    }

    pub fn total_deliveries(&self) -> usize {
        self.total_deliveries
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: SimConfig) -> SimConfig {
        SimConfig {
            rng_seed: Some(42),
            ..config
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = SimulationEngine::with_config(seeded(SimConfig::default())).unwrap();
        assert_eq!(engine.agent_count(), 4);
        assert_eq!(engine.worker_count(), 3);
        assert_eq!(engine.food_count(), 0);
        assert_eq!(engine.sim_time(), 0.0);
        assert!(engine.is_running());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            screen_width: 2,
            ..SimConfig::default()
        };
        assert!(matches!(
            SimulationEngine::with_config(config),
            Err(ConfigError::ScreenTooSmall { .. })
        ));
    }

    #[test]
    fn test_initial_workers_respect_cap() {
        let config = seeded(SimConfig {
            max_population: 2,
            ..SimConfig::default()
        });
        let engine = SimulationEngine::with_config(config).unwrap();
        assert_eq!(engine.agent_count(), 2);

        let config = seeded(SimConfig {
            max_population: 0,
            ..SimConfig::default()
        });
        let engine = SimulationEngine::with_config(config).unwrap();
        // Queen is exempt
        assert_eq!(engine.agent_count(), 1);
    }

    #[test]
    fn test_worker_timer_spawns_and_resets_at_cap() {
        let config = seeded(SimConfig {
            max_population: 5,
            worker_spawn_interval: 1.0,
            ..SimConfig::default()
        });
        let mut engine = SimulationEngine::with_config(config).unwrap();

        engine.update(1.0);
        assert_eq!(engine.agent_count(), 5);

        // At cap: timer keeps cycling, population stays put
        engine.update(1.0);
        engine.update(1.0);
        assert_eq!(engine.agent_count(), 5);
        assert_eq!(
            engine.clock().worker_timer().remaining(),
            std::time::Duration::from_secs(1)
        );
    }

    #[test]
    fn test_time_scale() {
        let mut engine = SimulationEngine::with_config(seeded(SimConfig::default())).unwrap();
        engine.set_time_scale(2.0);
        engine.update(1.0);
        assert!((engine.sim_time() - 2.0).abs() < 1e-6);

        engine.set_time_scale(-3.0);
        assert_eq!(engine.time_scale(), 0.0);
    }

    #[test]
    fn test_exit_request_stops_simulation() {
        let mut engine = SimulationEngine::with_config(seeded(SimConfig::default())).unwrap();
        assert_eq!(engine.step(FrameInput::tick(0.5)), FrameStatus::Continue);
        assert_eq!(engine.step(FrameInput::exit()), FrameStatus::Exit);
        assert!(!engine.is_running());

        // Further frames are ignored
        assert_eq!(engine.step(FrameInput::tick(0.5)), FrameStatus::Exit);
        assert!((engine.sim_time() - 0.5).abs() < 1e-6);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_snapshot_order_and_queen_rotation() {
        let config = seeded(SimConfig {
            initial_workers: 0,
            direction_change_chance: 0.0,
            ..SimConfig::default()
        });
        let mut engine = SimulationEngine::with_config(config).unwrap();
        engine.spawn_worker_at(Vec2::new(10.0, 10.0));
        engine.spawn_worker_at(Vec2::new(600.0, 50.0));
        engine.spawn_food_at(Vec2::new(11.0, 10.0));
        engine.spawn_food_at(Vec2::new(700.0, 400.0));
        engine.update(0.25);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.agent_count, 3);
        assert!(snapshot.agents[0].is_queen);
        assert_eq!(snapshot.agents[0].rotation, 0.0);
        assert!(snapshot.agents[1..].iter().all(|a| !a.is_queen));
        assert!(snapshot.agents[1].carrying_food);
        assert!(!snapshot.agents[2].carrying_food);

        // Claimed food stays listed but is no longer drawn
        assert_eq!(snapshot.foods.len(), 2);
        assert!(snapshot.foods[0].picked_up);
        let visible: Vec<Vec2> = snapshot.visible_food().map(|f| f.position).collect();
        assert_eq!(visible, vec![Vec2::new(700.0, 400.0)]);
    }

    #[test]
    fn test_huge_time_scale_does_not_overflow_clock() {
        let mut engine = SimulationEngine::with_config(seeded(SimConfig::default())).unwrap();
        engine.set_time_scale(1.0e18);
        for _ in 0..4 {
            engine.update(10.0);
        }
        assert_eq!(engine.clock().elapsed(), std::time::Duration::MAX);
        assert_eq!(engine.ticks(), 4);
    }

    #[test]
    fn test_interval_too_long_to_schedule_rejected() {
        let config = seeded(SimConfig {
            food_spawn_interval: 1.0e20,
            ..SimConfig::default()
        });
        assert_eq!(
            SimulationEngine::with_config(config).err(),
            Some(ConfigError::IntervalTooLarge {
                field: "food_spawn_interval",
                value: 1.0e20,
            })
        );
    }

    #[test]
    fn test_compaction_removes_claimed_food() {
        let config = seeded(SimConfig {
            initial_workers: 0,
            food_compaction_interval: 1.0,
            food_spawn_interval: 1000.0,
            direction_change_chance: 0.0,
            ..SimConfig::default()
        });
        let mut engine = SimulationEngine::with_config(config).unwrap();
        engine.spawn_worker_at(Vec2::new(10.0, 10.0));
        engine.spawn_food_at(Vec2::new(11.0, 10.0));
        engine.spawn_food_at(Vec2::new(300.0, 300.0));

        engine.update(0.5);
        assert_eq!(engine.total_pickups(), 1);
        assert_eq!(engine.food_count(), 2);

        engine.update(0.5);
        assert_eq!(engine.food_count(), 1);
        assert_eq!(engine.available_food_count(), 1);
    }
}
