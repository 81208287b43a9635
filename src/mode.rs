use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::AssetBundle;
use crate::config::GameConfig;
use crate::input::{Buttons, KeyBindings, KeyCode};
use crate::ppu::Ppu;
use crate::projector::project;
use crate::sim::{Status, World};

// ── Mode trait ──────────────────────────────────────────────────────────────

/// The frame contract an external driver calls: key events as they arrive,
/// then one `update` and one `draw` per frame.
pub trait Mode {
    /// Returns true if the key was used.
    fn handle_key(&mut self, _key: KeyCode, _pressed: bool) -> bool {
        false
    }
    fn update(&mut self, elapsed: f32);
    fn draw(&mut self, ppu: &mut Ppu);
}

// ── PlayMode ────────────────────────────────────────────────────────────────

/// The tank game. Owns the world and every input it reads; `R` is the random
/// source the enemy AI draws from.
pub struct PlayMode<R: Rng = StdRng> {
    assets: AssetBundle,
    config: GameConfig,
    world: World,
    buttons: Buttons,
    bindings: KeyBindings,
    rng: R,
}

impl PlayMode<StdRng> {
    /// Seeded from `config.seed`, or from entropy when unset.
    pub fn new(assets: AssetBundle, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(assets, config, rng)
    }

    pub fn seeded(assets: AssetBundle, config: GameConfig, seed: u64) -> Self {
        Self::with_rng(assets, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlayMode<R> {
    pub fn with_rng(assets: AssetBundle, config: GameConfig, rng: R) -> Self {
        let world = World::new(&assets, &config);
        Self {
            assets,
            config,
            world,
            buttons: Buttons::new(),
            bindings: KeyBindings::default(),
            rng,
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Copy tiles and palettes into `ppu`. Needed once before the first draw.
    pub fn install(&self, ppu: &mut Ppu) {
        self.assets.install(ppu);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut Buttons {
        &mut self.buttons
    }

    pub fn assets(&self) -> &AssetBundle {
        &self.assets
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.world.status
    }

    /// Start over from level 0 with full lives.
    pub fn restart(&mut self) {
        self.world = World::new(&self.assets, &self.config);
        self.buttons = Buttons::new();
    }
}

impl<R: Rng> Mode for PlayMode<R> {
    fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.bindings.handle_key(key, pressed, &mut self.buttons)
    }

    fn update(&mut self, elapsed: f32) {
        self.world.update(elapsed, &self.buttons, &self.assets, &self.config, &mut self.rng);
        self.buttons.end_frame();
    }

    fn draw(&mut self, ppu: &mut Ppu) {
        project(&self.world, &self.assets, ppu);
    }
}
