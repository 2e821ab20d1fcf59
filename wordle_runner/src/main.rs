use std::{
    cmp::Ordering,
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use clap::Parser;
use log::{debug, error};
use owo_colors::{OwoColorize, Stream};
use wordle_core::{
    Event, FileSource, Grade, KeyboardHints, Notice, Observer, Phase, Pick, Preferences, Rules,
    Session, StaticSource, WordSource, WordleError, WORD_LENGTH,
};

const FALLBACK_WORDS: &[&str] = &[
    "about", "audio", "badge", "brave", "cider", "crane", "crimp", "drama", "earth", "fjord",
    "ghost", "gypsy", "hazel", "label", "lemon", "limit", "lurid", "moist", "noble", "ocean",
    "pints", "pride", "quilt", "raven", "right", "sober", "spoon", "stink", "tills", "tithe",
    "vivid", "whale", "young", "zebra",
];

/// Play Wordle in the terminal
#[derive(Parser, Debug)]
#[command(name = "wordle_runner", version)]
struct Args {
    /// Word list to play with: one word per line, or JSON
    words: Option<PathBuf>,

    /// File to load and save preferences from
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Start in hard mode
    #[arg(long)]
    hard: bool,

    /// Seed for a reproducible sequence of secret words
    #[arg(long)]
    seed: Option<u64>,
}

/// Why a typed line cannot be played as a guess.
fn check_line(line: &str) -> Result<(), String> {
    if !line.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("Letters only".to_string());
    }
    match line.len().cmp(&WORD_LENGTH) {
        Ordering::Less => Err(Notice::NotEnoughLetters.to_string()),
        Ordering::Greater => Err("Too many letters".to_string()),
        Ordering::Equal => Ok(()),
    }
}

/// Prints revealed tiles and notices as they happen.
struct Printer;

fn tile(letter: char, grade: Grade) -> String {
    let text = format!(" {} ", letter);
    let painted = text.if_supports_color(Stream::Stdout, |t| match grade {
        Grade::Correct => t.black().on_green().to_string(),
        Grade::Present => t.black().on_yellow().to_string(),
        Grade::Absent => t.white().on_bright_black().to_string(),
    });
    painted.to_string()
}

fn print_keyboard(hints: &KeyboardHints) {
    let line: String = ('A'..='Z')
        .map(|c| match hints.get(c) {
            Some(grade) => tile(c, grade),
            None => format!(" {} ", c),
        })
        .collect();
    println!("{}", line);
}

impl Observer for Printer {
    fn observe(&mut self, at: Duration, event: &Event) {
        debug!("{:>6}ms {:?}", at.as_millis(), event);
        match event {
            Event::LetterRevealed { letter, grade, .. } => {
                print!("{}", tile(*letter, *grade));
                let _ = io::stdout().flush();
            }
            Event::AttemptScored { .. } => println!(),
            Event::Notice(notice) => println!("{:^40}", notice.to_string()),
            _ => {}
        }
    }
}

/// Runs the session clock in real time until nothing is pending.
fn settle(session: &mut Session, clock: Instant, printer: &mut Printer) {
    session.advance(clock.elapsed());
    session.dispatch(printer);

    while session.phase() == Phase::Scoring {
        if let Some(deadline) = session.next_deadline() {
            let elapsed = clock.elapsed();
            if deadline > elapsed {
                thread::sleep(deadline - elapsed);
            }
        }
        session.advance(clock.elapsed());
        session.dispatch(printer);
    }
}

fn main() -> Result<(), WordleError> {
    env_logger::init();

    let args = Args::parse();
    let mut prefs = match &args.prefs {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };
    if args.hard {
        prefs = prefs.hard();
    }

    let pick = args.seed.map_or(Pick::Random, Pick::Seeded);
    let mut source: Box<dyn WordSource> = match &args.words {
        Some(path) => Box::new(FileSource::new(path).pick(pick)),
        None => Box::new(StaticSource::new(FALLBACK_WORDS.iter().copied()).pick(pick)),
    };

    let clock = Instant::now();
    let mut printer = Printer;
    let mut session = Session::start(source.as_mut(), Rules::default());
    session.dispatch(&mut printer);

    println!("Guess the word. Commands: :hard, :new, :retry, :quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            ":quit" => break,
            ":hard" => {
                prefs = if prefs.hard_mode {
                    prefs.easy()
                } else {
                    prefs.hard()
                };
                println!("hard mode {}", if prefs.hard_mode { "on" } else { "off" });
                if let Some(path) = &args.prefs {
                    prefs.save(path)?;
                }
            }
            ":new" => {
                session.advance(clock.elapsed());
                if let Err(e) = session.reset(source.as_mut()) {
                    error!("could not start a new game: {}", e);
                }
                session.dispatch(&mut printer);
            }
            ":retry" => {
                session.advance(clock.elapsed());
                if let Err(e) = session.reload(source.as_mut()) {
                    error!("could not load the word list: {}", e);
                }
                session.dispatch(&mut printer);
            }
            guess => {
                if let Err(reason) = check_line(guess) {
                    println!("{:^40}", reason);
                    continue;
                }
                session.advance(clock.elapsed());
                while session.remove_last_letter() {}
                for c in guess.chars() {
                    session.append_letter(c);
                }
                // rejections are reported through the printer
                let _ = session.submit(prefs);
                settle(&mut session, clock, &mut printer);

                if session.phase() == Phase::AwaitingInput && !session.hints().is_empty() {
                    print_keyboard(session.hints());
                }
            }
        }

        if let Phase::Ended(outcome) = session.phase() {
            debug!("game ended: {:?}", outcome);
            println!("Type :new to play again.");
        }
    }

    Ok(())
}
