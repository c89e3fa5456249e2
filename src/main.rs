use anyhow::Context;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dinorun::assets::SpriteCatalog;
use dinorun::cli::{CliArgs, Command, USAGE};
use dinorun::config::GameConfig;
use dinorun::game::{AudioPlayer, GameLoop, RngSource};
use dinorun::input::{InputResult, InputTracker};
use dinorun::ui::{render_dino_scene, TerminalRenderer};
use dinorun::utils::version_line;
use dinorun::{audio, logging};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

type Tui = Terminal<CrosstermBackend<Stdout>>;
type DinoLoop<'a> = GameLoop<'a, RngSource<StdRng>, Box<dyn AudioPlayer>>;

fn main() -> anyhow::Result<()> {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'dinorun --help' for usage.");
            std::process::exit(2);
        }
    };

    match args.command {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        Command::WriteConfig => {
            let path = GameConfig::default().save_home()?;
            println!("Wrote default settings to {}", path.display());
            return Ok(());
        }
        Command::Play => {}
    }

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_home(),
    };
    args.apply(&mut config);
    config.validate()?;
    logging::init_logging(&config.log)?;

    let sprites = match &config.assets.sprite_dir {
        Some(dir) => SpriteCatalog::load_dir(dir)
            .with_context(|| format!("loading sprites from {}", dir.display()))?,
        None => SpriteCatalog::builtin(),
    };
    let audio = audio::open(&config.audio)?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("{} starting, seed {}", version_line(), seed);

    let game_loop = GameLoop::new(
        config.tuning.clone(),
        config.window.viewport(),
        &sprites,
        RngSource(StdRng::seed_from_u64(seed)),
        audio,
        config.window.background,
    );
    run(&config, &sprites, game_loop)
}

fn clock_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_millis()) as u64
}

/// Raw mode and the alternate screen, undone on drop so every exit path
/// (including errors mid-setup) leaves the terminal usable.
struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { enhanced: false };
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        if matches!(supports_keyboard_enhancement(), Ok(true)) {
            stdout.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            guard.enhanced = true;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced {
            if let Err(e) = stdout.execute(PopKeyboardEnhancementFlags) {
                log::warn!("failed to pop keyboard flags: {}", e);
            }
        }
        if let Err(e) = disable_raw_mode() {
            log::warn!("failed to leave raw mode: {}", e);
        }
        if let Err(e) = stdout.execute(LeaveAlternateScreen) {
            log::warn!("failed to leave alternate screen: {}", e);
        }
        if let Err(e) = stdout.execute(crossterm::cursor::Show) {
            log::warn!("failed to show cursor: {}", e);
        }
    }
}

/// Set up the terminal, play until the player quits, restore the terminal.
fn run(config: &GameConfig, sprites: &SpriteCatalog, game_loop: DinoLoop<'_>) -> anyhow::Result<()> {
    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    play(&mut terminal, config, sprites, game_loop, guard.enhanced)
}

fn play(
    terminal: &mut Tui,
    config: &GameConfig,
    sprites: &SpriteCatalog,
    mut game_loop: DinoLoop<'_>,
    enhanced: bool,
) -> anyhow::Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / config.window.frame_rate as f64);
    let mut input = InputTracker::new(enhanced);
    let mut field = TerminalRenderer::new(sprites, config.window.width, config.window.height);
    let mut last = Instant::now();

    loop {
        let deadline = last + frame_time;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if input.handle_key(key) == InputResult::Quit {
                    log::info!("quit (best {})", game_loop.game.score.best);
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        game_loop.frame(dt, input.take_frame(), &mut field);
        terminal.draw(|frame| {
            let area = frame.size();
            render_dino_scene(frame, area, &game_loop.game, &field);
        })?;
    }
}
