//! Game state and core simulation types
//!
//! One owned `GameState` holds the player, every entity pool and all
//! counters. Nothing outside a tick mutates it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Body;
use super::player::Player;
use super::pool::{Entity, Pool};
use crate::consts::*;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the host to start a run
    Menu,
    /// Active gameplay; the only phase that ticks
    Playing,
    /// Run ended
    GameOver,
}

/// Notifications for the UI, pushed at the instant of the change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    GameOver { final_score: u64, distance: u32 },
}

/// Labels an enemy can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseLabel {
    Tax,
    Rent,
    Loan,
    Food,
    Utilities,
    Fine,
}

impl ExpenseLabel {
    pub const ALL: [ExpenseLabel; 6] = [
        ExpenseLabel::Tax,
        ExpenseLabel::Rent,
        ExpenseLabel::Loan,
        ExpenseLabel::Food,
        ExpenseLabel::Utilities,
        ExpenseLabel::Fine,
    ];

    /// Text painted on the enemy sprite
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseLabel::Tax => "НАЛОГ",
            ExpenseLabel::Rent => "АРЕНДА",
            ExpenseLabel::Loan => "КРЕДИТ",
            ExpenseLabel::Food => "Е Д А",
            ExpenseLabel::Utilities => "ЖКХ",
            ExpenseLabel::Fine => "ШТРАФ",
        }
    }
}

/// Enemy movement class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Ground,
    Flying,
}

impl EnemyKind {
    /// Top edge at spawn
    pub fn spawn_y(&self) -> f32 {
        match self {
            EnemyKind::Ground => GROUND_Y - ENEMY_SIZE,
            EnemyKind::Flying => GROUND_Y - 140.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub speed: f32,
    pub label: ExpenseLabel,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub body: Body,
    pub value: u64,
    /// Idle bob phase (radians)
    pub phase: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldPickup {
    pub body: Body,
    pub phase: f32,
}

/// A gap in the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pit {
    pub body: Body,
}

impl Pit {
    /// Horizontal coordinate strictly inside the gap
    pub fn spans(&self, x: f32) -> bool {
        x > self.body.left() && x < self.body.right()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub speed: f32,
}

/// Particle colour tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Dust,
    Enemy,
    Coin,
    Player,
    Shield,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub vel: Vec2,
    /// 1.0 at spawn, retired at 0
    pub life: f32,
    pub color: ParticleColor,
}

/// Life lost per tick
pub const PARTICLE_DECAY: f32 = 0.05;

/// Background cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub body: Body,
    /// Fraction of the scroll speed (parallax depth)
    pub speed_factor: f32,
    /// Centre line of the vertical bob
    pub base_y: f32,
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Entity for $ty {
                fn body(&self) -> &Body {
                    &self.body
                }
                fn body_mut(&mut self) -> &mut Body {
                    &mut self.body
                }
            }
        )*
    };
}

impl_entity!(Enemy, Coin, ShieldPickup, Pit, Projectile, Particle, Cloud);

/// Per-class frame counters driving the spawner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCounters {
    pub pit: u32,
    pub enemy: u32,
    pub coin: u32,
    pub shield: u32,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Distance travelled (fractional)
    pub distance: f32,
    /// Current world scroll speed (pixels/tick)
    pub speed: f32,
    /// Ticks since the run started
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Pool<Enemy>,
    pub coins: Pool<Coin>,
    pub shields: Pool<ShieldPickup>,
    pub pits: Pool<Pit>,
    pub projectiles: Pool<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Pool<Particle>,
    pub clouds: Pool<Cloud>,
    pub counters: SpawnCounters,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state in the menu with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Menu,
            score: 0,
            distance: 0.0,
            speed: GAME_SPEED_START,
            time_ticks: 0,
            player: Player::default(),
            enemies: Pool::new(),
            coins: Pool::new(),
            shields: Pool::new(),
            pits: Pool::new(),
            projectiles: Pool::new(),
            particles: Pool::new(),
            clouds: Pool::new(),
            counters: SpawnCounters::default(),
            events: Vec::new(),
            next_id: 1,
        };
        state.seed_clouds();
        state
    }

    /// Wipe the run: pools, player, score, distance, speed and counters.
    /// The phase and the RNG stream are left alone.
    pub fn reset(&mut self) {
        self.score = 0;
        self.distance = 0.0;
        self.speed = GAME_SPEED_START;
        self.time_ticks = 0;
        self.player = Player::default();
        self.enemies.clear();
        self.coins.clear();
        self.shields.clear();
        self.pits.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.counters = SpawnCounters::default();
        self.events.clear();
        self.next_id = 1;
        self.seed_clouds();
    }

    /// Full reset, then enter Playing
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("Run started (seed {})", self.seed);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Floored distance for display
    pub fn display_distance(&self) -> u32 {
        self.distance.max(0.0).floor() as u32
    }

    pub fn add_score(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    pub(crate) fn publish_lives(&mut self) {
        self.events.push(GameEvent::LivesChanged(self.player.lives));
    }

    /// Terminal transition; reports the score as it is right now
    pub(crate) fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        let final_score = self.score;
        let distance = self.display_distance();
        log::info!("Game over: score {} at distance {}", final_score, distance);
        self.events.push(GameEvent::GameOver {
            final_score,
            distance,
        });
    }

    /// Take every event published since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Puff of particles at `at`, capped by the tuning's particle budget
    pub fn emit_particles(&mut self, at: Vec2, color: ParticleColor, count: usize) {
        let room = self.tuning.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let side = self.rng.random_range(2.0..6.0);
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 10.0,
                (self.rng.random::<f32>() - 0.5) * 10.0,
            );
            let id = self.next_entity_id();
            self.particles.push(Particle {
                body: Body::new(id, at, Vec2::splat(side)),
                vel,
                life: 1.0,
                color,
            });
        }
    }

    /// Fire a shot from the player's chest
    pub fn spawn_projectile(&mut self) {
        let origin = self.player.body.pos + Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT / 2.0);
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            body: Body::new(id, origin, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT)),
            speed: PROJECTILE_SPEED,
        });
    }

    /// Pick a fresh cloud baseline in the upper half of the sky
    pub(crate) fn random_cloud_y(rng: &mut Pcg32) -> f32 {
        rng.random_range(0.0..CANVAS_HEIGHT / 2.0)
    }

    fn seed_clouds(&mut self) {
        self.clouds.clear();
        for _ in 0..CLOUD_COUNT {
            let base_y = Self::random_cloud_y(&mut self.rng);
            let x = self.rng.random_range(0.0..CANVAS_WIDTH);
            let size = Vec2::new(
                self.rng.random_range(60.0..160.0),
                self.rng.random_range(30.0..60.0),
            );
            let speed_factor = self.rng.random_range(0.1..0.3);
            let id = self.next_entity_id();
            self.clouds.push(Cloud {
                body: Body::new(id, Vec2::new(x, base_y), size),
                speed_factor,
                base_y,
            });
        }
    }

    /// True when no pool holds a retired member
    pub fn pools_are_clean(&self) -> bool {
        !(self.enemies.has_retired()
            || self.coins.has_retired()
            || self.shields.has_retired()
            || self.pits.has_retired()
            || self.projectiles.has_retired()
            || self.particles.has_retired()
            || self.clouds.has_retired())
    }

    /// Drop retired members from every pool
    pub fn compact_pools(&mut self) {
        self.enemies.compact();
        self.coins.compact();
        self.shields.compact();
        self.pits.compact();
        self.projectiles.compact();
        self.particles.compact();
        self.clouds.compact();
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            distance: self.display_distance(),
            speed: self.speed,
            time_ticks: self.time_ticks,
            player: PlayerView::from(&self.player),
            enemies: self.enemies.as_slice().to_vec(),
            coins: self.coins.as_slice().to_vec(),
            shields: self.shields.as_slice().to_vec(),
            pits: self.pits.as_slice().to_vec(),
            projectiles: self.projectiles.as_slice().to_vec(),
            particles: self.particles.as_slice().to_vec(),
            clouds: self.clouds.as_slice().to_vec(),
        }
    }
}

/// Player state plus derived status flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub player: Player,
    pub is_grounded: bool,
    pub is_invincible: bool,
    pub is_shielded: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            player: player.clone(),
            is_grounded: player.is_grounded(),
            is_invincible: player.is_invincible(),
            is_shielded: player.is_shielded(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub distance: u32,
    pub speed: f32,
    pub time_ticks: u64,
    pub player: PlayerView,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub shields: Vec<ShieldPickup>,
    pub pits: Vec<Pit>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub clouds: Vec<Cloud>,
}
