// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    cell, fmt,
    io::{self, BufRead, Write},
    rc::Rc,
};

use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seabattle::{
    board::TileView,
    game::PlayerStats,
    ships::Ship,
    targeting::{Difficulty, Targeting},
    AttackResult, Coordinate, Game, GameError, GameSetup, Orientation, SeaGrid, SeaGridView,
    ShipName, Side,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "BATTLESHIP_LOG";

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line battleship against a computer opponent.")
        .arg(
            Arg::with_name("difficulty")
                .short("d")
                .long("difficulty")
                .value_name("LEVEL")
                .help("how well the computer plays")
                .takes_value(true)
                .possible_values(&["easy", "medium", "hard"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed for the random number generator, for repeatable games")
                .takes_value(true)
                .validator(|v| v.parse::<u64>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::with_name("first_player")
                .short("f")
                .long("first-player")
                .value_name("FIRST_PLAYER")
                .help("pre-specify which player goes first")
                .takes_value(true)
                .possible_values(&["human", "me", "computer", "bot", "random", "rand"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("autoplay")
                .long("autoplay")
                .help("let a hard computer player take the human side"),
        )
        .get_matches();

    init_logging();

    let seed = matches
        .value_of("seed")
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(rand::random);
    info!(seed, "seeding random number generator");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let difficulty: Difficulty = matches
        .value_of("difficulty")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    let autoplay = matches.is_present("autoplay");

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let mut setup = GameSetup::new(difficulty);
    setup.set_first_player(choose_first_player(&matches, autoplay, &mut rng, &mut input)?);
    if autoplay {
        setup.randomize_deployment(&mut rng).map_err(other)?;
    } else {
        deploy_fleet(&mut rng, &mut setup, &mut input)?;
    }

    let mut game = match setup.start(&mut rng) {
        Ok(game) => game,
        Err(_) => return Err(other("the computer could not deploy its fleet")),
    };
    println!();
    println!("Playing against a {} computer.", difficulty);

    let mut human = if autoplay {
        HumanSide::Autoplay(Difficulty::Hard.targeting())
    } else {
        HumanSide::Interactive(input)
    };
    play(&mut game, &mut rng, &mut human)?;

    show_boards(&game);
    match game.winner() {
        Some(Side::Human) => println!("You win!"),
        Some(Side::Computer) => println!("The computer wins."),
        None => println!("You gave up."),
    }
    show_stats("You", game.stats(Side::Human), game.score(Side::Human));
    show_stats("Computer", game.stats(Side::Computer), game.score(Side::Computer));
    Ok(())
}

/// Install a stderr log subscriber filtered by `BATTLESHIP_LOG`, defaulting to warnings.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Wrap a library error for return from `main`.
fn other<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::Other, err)
}

/// Choose which [`Side`] shoots first based on either args or cli input.
fn choose_first_player<B: BufRead>(
    matches: &ArgMatches,
    autoplay: bool,
    rng: &mut impl Rng,
    input: &mut InputReader<B>,
) -> io::Result<Side> {
    let random = |rng: &mut dyn RngCore| {
        if rng.gen() {
            Side::Human
        } else {
            Side::Computer
        }
    };
    Ok(if let Some(clichoice) = matches.value_of("first_player") {
        match clichoice.to_ascii_lowercase().as_str() {
            "human" | "me" => Side::Human,
            "computer" | "bot" => Side::Computer,
            _ => random(rng),
        }
    } else if autoplay {
        Side::Human
    } else {
        input.read_input_lower("Do you want to go first? (Y/n)", |input| match input {
            "yes" | "y" | "first" | "1" | "1st" | "" => Some(Side::Human),
            "no" | "n" | "second" | "2" | "2nd" => Some(Side::Computer),
            _ => {
                println!("Invalid selection.");
                None
            }
        })?
    })
}

/// Deploy the human's fleet using input from the player.
fn deploy_fleet(
    rng: &mut impl Rng,
    setup: &mut GameSetup,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    enum Command {
        Done,
        Place(ShipName, Coordinate, Orientation),
        Randomize,
        Clear,
        Help,
    }
    /// Matcher for the place command.
    static PLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:place|put|move)\s+
        (?P<ship>\w+)\s+
        (?:(?:at|on|to)\s+)?
        (?P<row>[0-9]+)(?:\s*,\s*|\s+)(?P<col>[0-9]+)\s+
        (?P<dir>\w+)$",
        )
        .unwrap()
    });

    // Set whenever the human grid changes, so the board is only redrawn when needed.
    let changed = Rc::new(cell::Cell::new(true));
    let flag = Rc::clone(&changed);
    setup.human_grid_mut().on_change(move || flag.set(true));

    println!();
    println!("Place ships. Type help or ? for commands.");
    loop {
        if changed.replace(false) {
            println!();
            let pending: Vec<_> = setup.pending_ships().map(|ship| ship.to_string()).collect();
            if pending.is_empty() {
                println!("All ships placed, type done to start the game");
            } else {
                println!("Remaining ships to place: {}", pending.join(", "));
            }
            println!("Your current board setup:");
            show_grid(setup.grid(Side::Human), setup.grid(Side::Human));
            println!();
        }

        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "randomize" | "rand" | "random" => Some(Command::Randomize),
            "done" | "start" => Some(Command::Done),
            "clear" => Some(Command::Clear),
            other => {
                let captures = match PLACE.captures(other) {
                    Some(captures) => captures,
                    None => {
                        println!("Invalid ship-placement command \"{}\". Use '?' for help", other);
                        return None;
                    }
                };
                let ship = match captures["ship"].parse() {
                    Ok(ship) => ship,
                    Err(err) => {
                        println!("{}, choose one of tug, sub, dd, bb, or cv", err);
                        return None;
                    }
                };
                let (row, col) = match (captures["row"].parse(), captures["col"].parse()) {
                    (Ok(row), Ok(col)) => (row, col),
                    _ => {
                        println!("invalid coordinate, row and column must be numbers");
                        return None;
                    }
                };
                let orientation = match &captures["dir"] {
                    "h" | "horizontal" | "across" | "right" | "r" => Orientation::Horizontal,
                    "v" | "vertical" | "down" | "d" => Orientation::Vertical,
                    other => {
                        println!(
                            "invalid direction {}, choose \"horizontal\" or \"vertical\"",
                            other
                        );
                        return None;
                    }
                };
                Some(Command::Place(ship, Coordinate::new(row, col), orientation))
            }
        })?;

        match cmd {
            Command::Done if setup.ready() => break,
            Command::Done => println!("You must place all your ships first!"),
            Command::Place(ship, start, orientation) => {
                if let Err(err) = setup.move_ship(ship, start.row, start.col, orientation) {
                    println!("Invalid placement: {}.", err);
                }
            }
            Command::Randomize => {
                if let Err(err) = setup.randomize_deployment(rng) {
                    println!("Random deployment failed: {}.", err);
                }
            }
            Command::Clear => setup.clear_deployment(),
            Command::Help => {
                println!(
                    "Available Commands:
    done                            if all ships are placed, start the game.
    place <ship> <row>,<col> <dir>  place the ship with its top-left end at the given
        coordinate. Possible directions are \"horizontal\" and \"vertical\". A ship that
        is already placed is moved. See below for ships.
    clear                           clears all ship placements.
    randomize                       place every ship at random.

Available Ships:
    \"tug\" (\"tg\")                    1 tile
    \"submarine\" (\"ss\")              2 tiles
    \"destroyer\" (\"dd\")              3 tiles
    \"battleship\" (\"bb\")             4 tiles
    \"carrier\" (\"cv\")                5 tiles",
                );
            }
        }
    }
    Ok(())
}

/// Whoever is picking the human side's shots.
enum HumanSide<B> {
    /// A person at the terminal.
    Interactive(InputReader<B>),
    /// A computer strategy standing in for the human.
    Autoplay(Box<dyn Targeting>),
}

impl<B: BufRead> HumanSide<B> {
    /// Pick the next shot, or `None` if the player quits.
    fn choose(&mut self, game: &Game, rng: &mut dyn RngCore) -> io::Result<Option<Coordinate>> {
        match self {
            HumanSide::Interactive(input) => {
                show_boards(game);
                read_shot(input)
            }
            HumanSide::Autoplay(targeting) => targeting
                .next_shot(&game.grid(Side::Computer).enemy_view(), rng)
                .map(Some)
                .map_err(other),
        }
    }

    /// Report the outcome of a shot picked by [`HumanSide::choose`].
    fn learn(&mut self, coord: Coordinate, result: &AttackResult) -> io::Result<()> {
        match self {
            HumanSide::Interactive(_) => Ok(()),
            HumanSide::Autoplay(targeting) => targeting.process_shot(coord, result).map_err(other),
        }
    }
}

/// Alternate turns until somebody wins or the human quits.
fn play<B: BufRead>(
    game: &mut Game,
    rng: &mut ChaCha8Rng,
    human: &mut HumanSide<B>,
) -> io::Result<()> {
    while !game.is_over() {
        match game.current() {
            Side::Human => {
                let coord = match human.choose(game, rng)? {
                    Some(coord) => coord,
                    None => return Ok(()),
                };
                match game.shoot(Side::Human, coord) {
                    Ok(result) => {
                        println!("You fire at {}: {}", coord, result);
                        human.learn(coord, &result)?;
                    }
                    Err(GameError::OutOfBounds(err)) => println!("{}", err),
                    Err(err) => return Err(other(err)),
                }
            }
            Side::Computer => {
                for result in game.computer_turn(rng).map_err(other)? {
                    println!("Computer fires at {}: {}", result.coord(), result);
                }
            }
        }
    }
    Ok(())
}

/// Read a target coordinate, or `None` if the player wants to quit.
fn read_shot(input: &mut InputReader<impl BufRead>) -> io::Result<Option<Coordinate>> {
    static SHOT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:(?:fire|shoot|attack)\s+)?(?P<row>[0-9]+)(?:\s*,\s*|\s+)(?P<col>[0-9]+)$")
            .unwrap()
    });
    input.read_input_lower("Target <row>,<col> (or quit):", |input| match input {
        "quit" | "q" | "exit" => Some(None),
        other => match SHOT.captures(other) {
            Some(captures) => match (captures["row"].parse(), captures["col"].parse()) {
                (Ok(row), Ok(col)) => Some(Some(Coordinate::new(row, col))),
                _ => {
                    println!("Invalid coordinate \"{}\".", other);
                    None
                }
            },
            None => {
                println!("Enter a target as <row>,<col>, or quit.");
                None
            }
        },
    })
}

/// Print the human's board revealed and the computer's board as the human sees it.
fn show_boards(game: &Game) {
    let own = game.grid(Side::Human);
    let enemy = game.grid(Side::Computer);
    println!();
    println!("Enemy board ({} ships sunk):", enemy.ships_killed());
    show_grid(enemy, &enemy.enemy_view());
    println!();
    println!("Your board ({} ships lost):", own.ships_killed());
    show_grid(own, own);
    println!();
}

fn show_stats(who: &str, stats: PlayerStats, score: i64) {
    println!(
        "{:<9} shots: {:>3}  hits: {:>3}  missed: {:>3}  score: {:>4}",
        who,
        stats.shots(),
        stats.hits(),
        stats.missed(),
        score
    );
}

/// A single rendered cell.
enum Cell {
    Sea,
    Miss,
    Ship(ShipAbbreviation),
    Hit(ShipAbbreviation),
    Sunk(ShipAbbreviation),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cell::Sea => f.pad("~~"),
            Cell::Miss => f.pad("x"),
            Cell::Ship(ship) => fmt::Display::fmt(ship, f),
            Cell::Hit(ship) => f.pad(&format!("x{}", ship.abbrev())),
            Cell::Sunk(ship) => f.pad(&format!("X{}", ship.abbrev())),
        }
    }
}

/// Print `grid` as seen through `view`. Ships the view hides are drawn as sea.
fn show_grid(grid: &SeaGrid, view: &dyn SeaGridView) {
    let cell = |row: usize, col: usize| {
        let coord = Coordinate::new(row, col);
        let ship = grid.tile(coord).and_then(|tile| tile.ship());
        let sunk = ship
            .and_then(|name| grid.ship(name))
            .map_or(false, Ship::is_destroyed);
        match (view.item(row, col), ship) {
            (Ok(TileView::Ship), Some(name)) => Cell::Ship(ShipAbbreviation(name)),
            (Ok(TileView::Hit), Some(name)) if sunk => Cell::Sunk(ShipAbbreviation(name)),
            (Ok(TileView::Hit), Some(name)) => Cell::Hit(ShipAbbreviation(name)),
            (Ok(TileView::Miss), _) => Cell::Miss,
            _ => Cell::Sea,
        }
    };
    let width = view.width();
    show_board(
        width,
        (0..view.height()).map(|row| (0..width).map(move |col| cell(row, col))),
    )
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(width: usize, rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for i in 0..width {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Display helper that prints the ship's type abbreviation
struct ShipAbbreviation(ShipName);

impl ShipAbbreviation {
    fn abbrev(&self) -> &'static str {
        match self.0 {
            ShipName::Tug => "tg",
            ShipName::Submarine => "ss",
            ShipName::Destroyer => "dd",
            ShipName::Battleship => "bb",
            ShipName::AircraftCarrier => "cv",
        }
    }
}

impl fmt::Display for ShipAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.abbrev())
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
