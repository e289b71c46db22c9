//! The run state machine: READY → PLAYING → GAME_OVER → READY.
//!
//! [`Game`] owns the entities, the session and the player profile. The
//! profile store is injected so the same machine runs against a file on disk
//! or an in-memory store in tests.

use super::physics::{self, BirdTick};
use super::types::{Bird, Coin, Phase, PipePair, Session};
use crate::core::config::GameConfig;
use crate::persistence::{load_profile, save_profile, ProfileStore};
use crate::profile::{skins, PersistentProfile, Shop, ShopOutcome, Skin};
use rand::Rng;
use tracing::{debug, info};

/// Logical inputs. The presentation layer maps devices onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Flap,
    Restart,
    Quit,
    ToggleShop,
    ShopUp,
    ShopDown,
    ShopSelect,
}

/// What an input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not accepted in the current state.
    Ignored,
    Handled,
    /// The player asked to leave; the caller should shut down.
    Exit,
}

/// Summary of one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Pipe pairs passed this tick.
    pub points: u32,
    /// Coin value picked up this tick.
    pub coins: u64,
    /// The run ended this tick.
    pub game_over: bool,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub config: &'a GameConfig,
    pub bird: &'a Bird,
    pub pipes: &'a [PipePair],
    pub coins: &'a [Coin],
    pub session: &'a Session,
    pub shop: &'a Shop,
    pub profile: &'a PersistentProfile,
    pub current_skin: &'static Skin,
}

pub struct Game<S: ProfileStore> {
    pub config: GameConfig,
    pub bird: Bird,
    pub pipes: Vec<PipePair>,
    pub coins: Vec<Coin>,
    pub session: Session,
    pub profile: PersistentProfile,
    pub shop: Shop,
    store: S,
    /// Seconds since the last coin spawned.
    coin_timer: f64,
    /// Physics ticks elapsed this run.
    pub tick_count: u64,
}

impl<S: ProfileStore> Game<S> {
    /// Start a game, loading the profile from `store`.
    pub fn new(config: GameConfig, store: S) -> Self {
        let profile = load_profile(&store);
        Self {
            bird: Bird::new(&config),
            pipes: Vec::new(),
            coins: Vec::new(),
            session: Session::default(),
            profile,
            shop: Shop::default(),
            store,
            coin_timer: 0.0,
            tick_count: 0,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one input. Inputs the current state does not accept are ignored.
    pub fn handle_input(&mut self, input: GameInput) -> InputOutcome {
        match self.session.phase {
            Phase::Ready if self.shop.open => self.handle_shop_input(input),
            Phase::Ready => match input {
                GameInput::Flap => {
                    self.session.phase = Phase::Playing;
                    physics::flap(&mut self.bird, &self.config);
                    debug!("run started");
                    InputOutcome::Handled
                }
                GameInput::ToggleShop => {
                    self.shop.toggle();
                    InputOutcome::Handled
                }
                _ => InputOutcome::Ignored,
            },
            Phase::Playing => match input {
                GameInput::Flap => {
                    physics::flap(&mut self.bird, &self.config);
                    InputOutcome::Handled
                }
                _ => InputOutcome::Ignored,
            },
            Phase::GameOver => match input {
                GameInput::Restart => {
                    self.restart();
                    InputOutcome::Handled
                }
                GameInput::Quit => InputOutcome::Exit,
                _ => InputOutcome::Ignored,
            },
        }
    }

    fn handle_shop_input(&mut self, input: GameInput) -> InputOutcome {
        match input {
            GameInput::ToggleShop => self.shop.close(),
            GameInput::ShopUp => self.shop.move_up(),
            GameInput::ShopDown => self.shop.move_down(),
            GameInput::ShopSelect => {
                let changed = match self.shop.select(&mut self.profile) {
                    ShopOutcome::Purchased(id) => {
                        info!(skin = %id, coins_left = self.profile.saved_coins, "skin purchased");
                        true
                    }
                    ShopOutcome::Equipped(id) => {
                        debug!(skin = %id, "skin equipped");
                        true
                    }
                    ShopOutcome::Rejected(e) => {
                        debug!(error = %e, "shop selection rejected");
                        false
                    }
                };
                if changed {
                    save_profile(&mut self.store, &self.profile);
                }
            }
            _ => return InputOutcome::Ignored,
        }
        InputOutcome::Handled
    }

    /// Advance the simulation by `dt` seconds. Does nothing outside PLAYING.
    ///
    /// Order within a tick: bird physics, pipes, coins, collision, scoring,
    /// then the GAME_OVER transition. A tick that ends the run scores nothing.
    pub fn tick<R: Rng>(&mut self, dt: f64, rng: &mut R) -> TickResult {
        let mut result = TickResult::default();
        if self.session.phase != Phase::Playing || !(dt.is_finite() && dt > 0.0) {
            return result;
        }
        self.tick_count += 1;

        let bird_state = physics::tick(&mut self.bird, dt, &self.config);

        physics::advance_pipes(&mut self.pipes, dt, &self.config);
        physics::spawn_pipe(&mut self.pipes, rng, &self.config);

        self.coin_timer += dt;
        if self.coin_timer >= self.config.coin_interval {
            self.coin_timer -= self.config.coin_interval;
            physics::spawn_coin(&mut self.coins, &self.pipes, rng, &self.config);
        }
        physics::advance_coins(&mut self.coins, dt, &self.config);
        result.coins = physics::collect_coins(&self.bird, &mut self.coins, &self.config);
        self.session.coins_earned = self.session.coins_earned.saturating_add(result.coins);

        let crashed = bird_state == BirdTick::Grounded
            || physics::check_collision(&self.bird, &self.pipes, &self.config);

        if crashed {
            self.end_run();
            result.game_over = true;
        } else {
            result.points = physics::check_scoring(&mut self.pipes, &self.config);
            self.session.score = self.session.score.saturating_add(result.points);
        }

        result
    }

    /// PLAYING → GAME_OVER: convert the score to coins, update the high
    /// score and commit the profile once.
    fn end_run(&mut self) {
        self.session.phase = Phase::GameOver;

        let score = self.session.score;
        let converted = u64::from(score).saturating_mul(self.config.coins_per_point);
        self.session.coins_earned = self.session.coins_earned.saturating_add(converted);

        self.session.new_high_score = self.profile.record_score(score);
        self.profile.deposit(self.session.coins_earned);

        let changed = self.session.new_high_score || self.session.coins_earned > 0;
        self.session.saved = !changed || save_profile(&mut self.store, &self.profile);

        info!(
            score,
            coins = self.session.coins_earned,
            high_score = self.profile.high_score,
            new_high_score = self.session.new_high_score,
            saved = self.session.saved,
            "run over"
        );
    }

    /// GAME_OVER → READY with a fresh session and an empty field.
    fn restart(&mut self) {
        self.session = Session::default();
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.coins.clear();
        self.shop.close();
        self.coin_timer = 0.0;
        self.tick_count = 0;
        debug!("restarted");
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            config: &self.config,
            bird: &self.bird,
            pipes: &self.pipes,
            coins: &self.coins,
            session: &self.session,
            shop: &self.shop,
            profile: &self.profile,
            current_skin: skins::find_or_default(&self.profile.current_skin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::profile::SkinId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f64 = 1.0 / 60.0;

    fn new_game() -> Game<MemoryStore> {
        Game::new(GameConfig::default(), MemoryStore::new())
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Run ticks until the run ends, flapping never.
    fn crash(game: &mut Game<MemoryStore>) {
        let mut rng = rng();
        for _ in 0..10_000 {
            if game.tick(DT, &mut rng).game_over {
                return;
            }
        }
        panic!("bird never crashed");
    }

    #[test]
    fn test_new_game_ready() {
        let game = new_game();
        assert_eq!(game.phase(), Phase::Ready);
        assert_eq!(game.session.score, 0);
        assert!(game.pipes.is_empty());
    }

    #[test]
    fn test_no_tick_when_ready() {
        let mut game = new_game();
        let initial_y = game.bird.y;
        let result = game.tick(DT, &mut rng());
        assert_eq!(result, TickResult::default());
        assert!((game.bird.y - initial_y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_flap_starts_and_lifts() {
        let mut game = new_game();
        assert_eq!(game.handle_input(GameInput::Flap), InputOutcome::Handled);
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.bird.velocity < 0.0);
    }

    #[test]
    fn test_inputs_outside_state_ignored() {
        let mut game = new_game();
        assert_eq!(game.handle_input(GameInput::Restart), InputOutcome::Ignored);
        assert_eq!(game.handle_input(GameInput::Quit), InputOutcome::Ignored);

        game.handle_input(GameInput::Flap);
        assert_eq!(game.handle_input(GameInput::ToggleShop), InputOutcome::Ignored);
        assert_eq!(game.handle_input(GameInput::Restart), InputOutcome::Ignored);
        assert_eq!(game.phase(), Phase::Playing);

        crash(&mut game);
        assert_eq!(game.handle_input(GameInput::Flap), InputOutcome::Ignored);
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_quit_only_from_game_over() {
        let mut game = new_game();
        game.handle_input(GameInput::Flap);
        assert_eq!(game.handle_input(GameInput::Quit), InputOutcome::Ignored);
        crash(&mut game);
        assert_eq!(game.handle_input(GameInput::Quit), InputOutcome::Exit);
    }

    #[test]
    fn test_game_over_commits_high_score_and_coins() {
        let mut game = new_game();
        game.handle_input(GameInput::Flap);
        game.session.score = 6;
        game.bird.y = game.config.ground_y() - 0.1;
        game.bird.velocity = 100.0;

        let result = game.tick(DT, &mut rng());
        assert!(result.game_over);
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.session.new_high_score);
        assert!(game.session.saved);
        assert_eq!(game.profile.high_score, 6);
        assert_eq!(game.profile.saved_coins, 6);

        let stored = game.store().stored().cloned().unwrap();
        assert_eq!(stored, game.profile);
    }

    #[test]
    fn test_failed_save_does_not_stop_play() {
        let mut game = Game::new(GameConfig::default(), MemoryStore::failing());
        game.handle_input(GameInput::Flap);
        game.session.score = 3;
        crash(&mut game);

        assert!(!game.session.saved);
        assert_eq!(game.profile.high_score, 3);
        assert_eq!(game.handle_input(GameInput::Restart), InputOutcome::Handled);
        assert_eq!(game.phase(), Phase::Ready);
    }

    #[test]
    fn test_restart_resets_session_and_field() {
        let mut game = new_game();
        game.handle_input(GameInput::Flap);
        game.pipes.push(PipePair {
            x: 10.0,
            gap_center: 200.0,
            gap_height: 150.0,
            passed: true,
        });
        game.session.score = 4;
        crash(&mut game);

        game.handle_input(GameInput::Restart);
        assert_eq!(game.session, Session::default());
        assert!(game.pipes.is_empty());
        assert!(game.coins.is_empty());
        assert_eq!(game.bird, Bird::new(&game.config));
        assert_eq!(game.profile.high_score, 4);
    }

    #[test]
    fn test_pipe_crash_skips_scoring() {
        let mut game = new_game();
        game.handle_input(GameInput::Flap);
        // Pipe already behind the bird's reference but still overlapping it,
        // with the gap far below.
        game.pipes.push(PipePair::new(game.config.bird_x - 5.0, 420.0, 150.0));
        game.bird.y = 100.0;
        game.bird.velocity = 0.0;

        let result = game.tick(DT, &mut rng());
        assert!(result.game_over);
        assert_eq!(result.points, 0);
        assert_eq!(game.session.score, 0);
    }

    #[test]
    fn test_passing_pipe_scores_once() {
        let mut game = new_game();
        game.handle_input(GameInput::Flap);
        let gap_center = game.bird.y;
        game.pipes
            .push(PipePair::new(game.config.bird_x + 0.5, gap_center, 300.0));

        let mut rng = rng();
        let mut total = 0;
        for _ in 0..3 {
            let result = game.tick(DT, &mut rng);
            assert!(!result.game_over);
            total += result.points;
        }
        assert_eq!(total, 1);
        assert_eq!(game.session.score, 1);
    }

    #[test]
    fn test_shop_purchase_persists() {
        let profile = PersistentProfile {
            saved_coins: 100,
            ..PersistentProfile::default()
        };
        let mut game = Game::new(GameConfig::default(), MemoryStore::with_profile(profile));

        game.handle_input(GameInput::ToggleShop);
        assert!(game.shop.open);
        assert_eq!(game.handle_input(GameInput::Flap), InputOutcome::Ignored);
        game.handle_input(GameInput::ShopDown);
        game.handle_input(GameInput::ShopSelect);

        assert_eq!(game.profile.current_skin, SkinId::new("blue_jay"));
        assert_eq!(game.profile.saved_coins, 50);
        assert_eq!(game.store().stored(), Some(&game.profile));
        assert_eq!(game.snapshot().current_skin.id, "blue_jay");

        game.handle_input(GameInput::ToggleShop);
        assert!(!game.shop.open);
        assert_eq!(game.phase(), Phase::Ready);
    }

    #[test]
    fn test_rejected_purchase_does_not_save() {
        let mut game = new_game();
        game.handle_input(GameInput::ToggleShop);
        game.handle_input(GameInput::ShopUp); // robot, 300 coins
        game.handle_input(GameInput::ShopSelect);
        assert!(matches!(
            game.shop.last_outcome,
            Some(ShopOutcome::Rejected(_))
        ));
        assert_eq!(game.store().saves(), 0);
    }

    #[test]
    fn test_invalid_dt_is_noop() {
        let mut game = new_game();
        game.handle_input(GameInput::Flap);
        let before = game.bird;
        game.tick(f64::NAN, &mut rng());
        game.tick(-1.0, &mut rng());
        game.tick(0.0, &mut rng());
        assert_eq!(game.bird, before);
        assert_eq!(game.tick_count, 0);
    }
}
