use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use parley::engine::{Output, OutputBlock};
use parley::{GameState, load_world_from_file, validate_world};

fn flush_output(out: Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", t);
                printed_anything = true;
            }
            OutputBlock::Text(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!(); // visual separation before first event
                    }
                    started_events = true;
                }
                println!("{}", ev);
                printed_anything = true;
            }
        }
    }
}

fn main() -> io::Result<()> {
    let world_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("worlds/cellar.toml"));

    let world = match load_world_from_file(&world_path) {
        Ok(w) => {
            println!("Using world file: {}", world_path.display());
            w
        }
        Err(e) => {
            eprintln!("Failed to load world file '{}': {e}", world_path.display());
            std::process::exit(1);
        }
    };

    let problems = validate_world(&world);
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("world error: {}", problem);
        }
        std::process::exit(1);
    }

    let mut game = GameState::new(world);
    flush_output(game.initialize());

    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        let (out, quit) = game.step(input.trim());
        flush_output(out);

        if quit {
            break;
        }
    }

    Ok(())
}
