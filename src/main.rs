//! Fire Up! entry point
//!
//! Headless native run: an autopilot dodges (badly) while the game renders
//! to an ASCII canvas, then the final frame and leaderboard are printed.
//!
//! Usage: `fire-up [seed] [max_ticks] [--secret]`

use glam::IVec2;

use fire_up::sim::{
    Arena, Direction, EnemyKind, Footprint, Mode, RandomSource, SeededRandom, Simulation, Sprite,
};
use fire_up::{Leaderboards, RenderSink, Runner, Settings};

const SETTINGS_PATH: &str = "fire_up.json";

/// Text frame buffer, one char per cell
struct AsciiCanvas {
    arena: Arena,
    rows: Vec<Vec<char>>,
    score: f64,
    mode: Mode,
}

impl AsciiCanvas {
    fn new(arena: Arena) -> Self {
        Self {
            arena,
            rows: vec![vec!['.'; arena.width as usize]; arena.height as usize],
            score: 0.0,
            mode: Mode::Standard,
        }
    }

    fn plot(&mut self, cell: IVec2, glyph: char) {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.arena.width || cell.y >= self.arena.height {
            return;
        }
        self.rows[cell.y as usize][cell.x as usize] = glyph;
    }

    fn print(&self) {
        println!("{:?} | score {:.1}", self.mode, self.score);
        for (y, row) in self.rows.iter().enumerate() {
            if (y as i32) < self.arena.hud_rows {
                println!("{}", "-".repeat(row.len()));
            } else {
                println!("{}", row.iter().collect::<String>());
            }
        }
    }
}

impl RenderSink for AsciiCanvas {
    fn begin_frame(&mut self, score: f64, mode: Mode) {
        self.score = score;
        self.mode = mode;
        for row in &mut self.rows {
            row.fill('.');
        }
    }

    fn draw_player(&mut self, cell: IVec2) {
        self.plot(cell, '@');
    }

    fn draw(&mut self, sprite: &Sprite) {
        let glyph = match (sprite.kind, sprite.footprint) {
            (_, Footprint::Blast { .. }) => '#',
            (EnemyKind::Basic, _) => 'o',
            (EnemyKind::Speedy, _) => '>',
            (EnemyKind::Leaper, _) => 'L',
            (EnemyKind::Helix, _) => 'h',
            (EnemyKind::Sine, _) => 's',
            (EnemyKind::Exploder, _) => '*',
            (EnemyKind::Tracker, _) => 'T',
        };
        for cell in sprite.footprint.cells() {
            self.plot(cell, glyph);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let secret = args.iter().any(|a| a == "--secret");
    let mut numbers = args.iter().filter_map(|a| a.parse::<u64>().ok());
    let seed = numbers.next().unwrap_or(1);
    let max_ticks = numbers.next().unwrap_or(3_000);

    let settings = Settings::load_or_default(SETTINGS_PATH);
    let mut boards = Leaderboards::open(&settings);
    let mut canvas = AsciiCanvas::new(settings.arena);

    let sim = match Simulation::new(settings, SeededRandom::new(seed)) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("Invalid settings: {}", err);
            std::process::exit(2);
        }
    };
    let mut runner = Runner::new(sim);
    if secret {
        runner.unlock_secret_mode();
    }
    log::info!("Fire Up! starting (seed {}, up to {} ticks)", seed, max_ticks);

    let mut autopilot = SeededRandom::new(seed.wrapping_add(1));
    let step = runner.step();
    let mut standings = None;
    for _ in 0..max_ticks {
        // Wander, holding still more often than not
        let moves = [
            Some(Direction::Up),
            Some(Direction::Down),
            Some(Direction::Left),
            Some(Direction::Right),
            None,
            None,
            None,
            None,
            None,
        ];
        if let Some(direction) = autopilot.pick(&moves) {
            runner.queue_move(direction);
        }
        if let Some(board) = runner.update(step, &mut canvas, &mut boards) {
            standings = Some(board);
            break;
        }
    }

    canvas.print();
    let state = runner.simulation().state();
    match standings {
        Some(board) => {
            println!("Game over! Final score {}", state.final_score());
            println!("{:?} leaderboard: {:?}", runner.simulation().mode(), board);
        }
        None => println!(
            "Survived {} ticks, score {:.1}, {} enemies on screen",
            max_ticks,
            state.score(),
            state.enemies.len()
        ),
    }
}
