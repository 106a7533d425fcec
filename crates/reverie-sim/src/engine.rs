//! Game engine — the core of the game.
//!
//! `GameEngine` owns the hecs world, the authoritative `GameState`, the
//! scoring system, and the enemy agent. It processes queued commands at
//! tick boundaries, runs the systems in a fixed deterministic order, and
//! produces a `GameSnapshot` every tick. Completely headless.

use std::collections::VecDeque;

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use reverie_core::commands::PlayerCommand;
use reverie_core::constants::DT;
use reverie_core::events::RenderEffect;
use reverie_core::state::{GameSnapshot, GameState};
use reverie_core::types::{Position, SimTime};

use reverie_ai::EnemyAgent;
use reverie_maze::collision;
use reverie_maze::layout::RESPAWN_POINTS;

use crate::scoring::ScoringSystem;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same run.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The game engine. Owns all session state.
pub struct GameEngine {
    world: World,
    state: GameState,
    scoring: ScoringSystem,
    enemy: EnemyAgent,
    time: SimTime,
    rng: ChaCha8Rng,
    player_entity: hecs::Entity,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    effects: Vec<RenderEffect>,
    /// Elapsed-time bucket for the whole-second countdown decrement.
    second_accumulator: f64,
}

impl GameEngine {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let player_entity = world_setup::setup_world(&mut world);
        Self {
            world,
            state: GameState::new(),
            scoring: ScoringSystem::new(0),
            enemy: EnemyAgent::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player_entity,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            effects: Vec::new(),
            second_accumulator: 0.0,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the game by one tick and return the resulting snapshot.
    ///
    /// Update order is fixed: commands, respawn countdown, whole-second
    /// timer decrement (which resolves a timeout loss first), the enemy
    /// (whose capture resolves before any win), then pickups and the
    /// portal check. Terminal transitions stop gameplay mutation because
    /// every later stage checks the running flag.
    pub fn tick(&mut self) -> GameSnapshot {
        self.process_commands();
        self.state.update_player_respawn(DT);

        if self.state.is_running() {
            self.second_accumulator += DT;
            if self.second_accumulator >= 1.0 {
                self.state.update_time(1.0);
                self.second_accumulator = 0.0;
            }

            let player_position = self.player_position();
            let now_ms = self.time.elapsed_ms();

            systems::enemy::run(
                &mut self.enemy,
                &mut self.state,
                &mut self.scoring,
                &player_position,
                DT,
                now_ms,
                &mut self.effects,
            );

            if self.state.is_running() {
                systems::pickups::run(
                    &mut self.world,
                    &mut self.state,
                    &mut self.scoring,
                    &player_position,
                    now_ms,
                    &mut self.despawn_buffer,
                    &mut self.effects,
                );
                systems::portal::run(&self.world, &mut self.state, &player_position);
            }

            self.time.advance();
        }

        let effects = std::mem::take(&mut self.effects);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.state,
            &self.scoring,
            &self.enemy,
            &self.time,
            effects,
            self.player_position(),
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::MovePlayer { dx, dz } => {
                if !self.state.is_running() {
                    return;
                }
                let current = self.player_position();
                let candidate = Position::new(current.x + dx, current.y, current.z + dz);
                if collision::position_walkable(&candidate) {
                    self.set_player_position(candidate);
                }
            }
            PlayerCommand::SetPlayerPosition { position } => {
                self.set_player_position(position);
            }
            PlayerCommand::RespawnPlayer => {
                let idx = self.rng.gen_range(0..RESPAWN_POINTS.len());
                let spawn = RESPAWN_POINTS[idx];
                self.set_player_position(spawn);
                info!(x = spawn.x, z = spawn.z, "player respawned");
            }
            PlayerCommand::SetEnemyPosition { position } => {
                self.enemy.set_position(position);
            }
            PlayerCommand::TeleportEnemy => {
                self.enemy.teleport_to_random_waypoint(&mut self.rng);
            }
            PlayerCommand::Reset => {
                self.reset();
            }
        }
    }

    /// Restore the whole session: state, scoring, enemy, world, clock.
    /// The render layer is told to release the old scene's resources
    /// before the fresh one appears in the next snapshot.
    fn reset(&mut self) {
        self.state.reset();
        self.enemy.reset();
        self.time = SimTime::default();
        self.second_accumulator = 0.0;
        self.scoring.reset(self.time.elapsed_ms());

        self.world = World::new();
        self.player_entity = world_setup::setup_world(&mut self.world);
        self.effects.push(RenderEffect::DisposeScene);
        info!("session reset");
    }

    // --- Queries ---

    pub fn player_position(&self) -> Position {
        world_setup::entity_position(&self.world, self.player_entity)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access, e.g. for subscribing event listeners.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scoring(&self) -> &ScoringSystem {
        &self.scoring
    }

    pub fn enemy(&self) -> &EnemyAgent {
        &self.enemy
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn set_player_position(&mut self, position: Position) {
        if let Ok(mut p) = self.world.get::<&mut Position>(self.player_entity) {
            *p = position;
        }
    }
}
