//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_2048::term`.
//! Settings and the lifetime win counter live in a JSON file next to the
//! working directory unless `--settings` points elsewhere.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use tui_2048::core::{GameConfig, GameSnapshot, GameState, SimpleRng, WinPolicy};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::store::{JsonFileStore, Settings, SettingsStore, SkinCatalog};
use tui_2048::term::{AnimationPlayer, FrameBuffer, GameView, TerminalRenderer, ViewOptions, Viewport};
use tui_2048::types::{GameAction, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, TICK_MS};

/// Play 2048 in the terminal
#[derive(Parser, Debug)]
#[command(name = "tui-2048")]
#[command(about = "Slide tiles, merge pairs, reach 2048", long_about = None)]
struct Args {
    /// Board side length
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE,
          value_parser = clap::value_parser!(u8).range(MIN_BOARD_SIZE as i64..=MAX_BOARD_SIZE as i64))]
    size: u8,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Settings and statistics file
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Optional skin list replacing the built-in skins
    #[arg(long, default_value = "skins.json")]
    skins: PathBuf,

    /// Stop accepting moves once 2048 is reached
    #[arg(long)]
    freeze_on_win: bool,

    /// Write logs to this file (RUST_LOG selects the level, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_file.as_deref())?;

    let store = Rc::new(JsonFileStore::new(&args.settings));
    let settings = store.load()?;
    let skins = SkinCatalog::load(&args.skins);

    let config = GameConfig {
        size: args.size,
        win_policy: if args.freeze_on_win {
            WinPolicy::Freeze
        } else {
            WinPolicy::Continue
        },
    };
    let seed = args.seed.unwrap_or_else(rand::random::<u32>);
    log::info!("starting {}x{} game, seed {}", config.size, config.size, seed);

    let mut game = GameState::with_config(config, SimpleRng::new(seed))?;
    let hook_store = Rc::clone(&store);
    game.set_win_hook(Box::new(move || match hook_store.record_win() {
        Ok(total) => log::info!("first 2048 this game, {total} wins overall"),
        Err(e) => log::error!("failed to record win: {e}"),
    }));

    let mut session = Session::new(game, settings, store, skins);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `--log-file` when given. Without one, stderr is used only when
/// RUST_LOG is set, since the game owns the screen.
fn init_logger(log_file: Option<&Path>) -> Result<()> {
    use env_logger::{Builder, Target};
    use log::LevelFilter;

    let explicit = std::env::var_os("RUST_LOG").is_some();
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let mut builder = Builder::from_default_env();
            if !explicit {
                builder.filter_level(LevelFilter::Info);
            }
            builder.target(Target::Pipe(Box::new(file))).try_init()?;
        }
        None if explicit => Builder::from_default_env().try_init()?,
        None => {}
    }
    Ok(())
}

struct Session {
    game: GameState,
    settings: Settings,
    store: Rc<JsonFileStore>,
    skins: SkinCatalog,
    anim: AnimationPlayer,
    win_banner: bool,
}

impl Session {
    fn new(game: GameState, settings: Settings, store: Rc<JsonFileStore>, skins: SkinCatalog) -> Self {
        let mut anim = AnimationPlayer::new(settings.animation_speed);
        anim.start(game.last_move_events());
        Self {
            game,
            settings,
            store,
            skins,
            anim,
            win_banner: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Keys are dropped while the last move is still animating.
        if self.anim.is_running() {
            return;
        }
        let action = handle_key_event(key);
        if self.win_banner && action != Some(GameAction::Restart) {
            self.win_banner = false;
            return;
        }
        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: GameAction) {
        match action {
            GameAction::Move(direction) => {
                let outcome = self.game.apply_move(direction);
                if outcome.moved {
                    self.anim.start(self.game.last_move_events());
                }
                if outcome.won_now {
                    self.win_banner = true;
                    // The win hook bumped the counter on disk.
                    match self.store.load() {
                        Ok(stored) => self.settings.total_wins = stored.total_wins,
                        Err(e) => log::warn!("failed to reload settings: {e}"),
                    }
                }
                if outcome.moved && self.game.game_over() {
                    log::info!(
                        "game over: score {}, best tile {}",
                        self.game.score(),
                        self.game.board().max_tile()
                    );
                }
            }
            GameAction::Restart => {
                self.game.restart();
                self.win_banner = false;
                self.anim.start(self.game.last_move_events());
            }
            GameAction::NextSkin => {
                let next = self
                    .skins
                    .next_unlocked(&self.settings.current_skin, self.settings.total_wins);
                self.settings.current_skin = next.name.clone();
                self.persist();
            }
            GameAction::SpeedUp => {
                self.settings.speed_up();
                self.anim.set_speed(self.settings.animation_speed);
                self.persist();
            }
            GameAction::SpeedDown => {
                self.settings.speed_down();
                self.anim.set_speed(self.settings.animation_speed);
                self.persist();
            }
            GameAction::ToggleTheme => {
                self.settings.dark_theme = !self.settings.dark_theme;
                self.persist();
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            log::warn!("failed to save settings: {e}");
        }
    }
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.game.snapshot_into(&mut snap);
        let opts = ViewOptions {
            skin: session.skins.get(&session.settings.current_skin),
            settings: &session.settings,
            animation: Some(&session.anim),
            show_win_banner: session.win_banner,
        };
        view.render_into(&snap, &opts, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    session.handle_key(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.anim.tick();
        }
    }
}
