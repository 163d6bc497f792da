mod terminal;

use log::{info, warn};
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use coordinate_cave::destroyable::Destroyable;
use coordinate_cave::events::{attach_handler, Channel};
use coordinate_cave::game::clock::MonotonicClock;
use coordinate_cave::game::storage::{shared, FileStore};
use coordinate_cave::game::{GameEngine, Settings};
use coordinate_cave::model::{GameEngineCommand, GameEngineEvent};
use terminal::{format_summary, parse_command, HostCommand, TerminalRenderer, HELP};

fn init_logging() {
    env_logger::init();
}

fn main() {
    init_logging();

    let data_dir = FileStore::data_dir_from_env();
    info!("Saving progress under {}", data_dir.display());
    let store = shared(FileStore::new(data_dir));

    let (game_engine_command_emitter, game_engine_command_observer) =
        Channel::<GameEngineCommand>::new();
    let (game_engine_event_emitter, game_engine_event_observer) =
        Channel::<GameEngineEvent>::new();

    let game_engine = GameEngine::new(
        game_engine_command_observer,
        game_engine_event_emitter,
        store,
        Rc::new(MonotonicClock::new()),
        Settings::seed_from_env(),
    );

    let grid_size = game_engine.borrow().settings().grid_size;
    let renderer = Rc::new(RefCell::new(TerminalRenderer::new(
        io::stdout(),
        grid_size,
        Settings::is_debug_mode(),
    )));
    let renderer_subscription = attach_handler(&game_engine_event_observer, &renderer);

    println!("{}", HELP);
    game_engine_command_emitter.emit(GameEngineCommand::StartSession);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("Failed to read input: {}", err);
                break;
            }
        };
        game_engine_command_emitter.emit(GameEngineCommand::Tick);
        match parse_command(&line) {
            Ok(HostCommand::Engine(command)) => game_engine_command_emitter.emit(command),
            Ok(HostCommand::Summary) => {
                let game_engine = game_engine.borrow();
                println!(
                    "{}",
                    format_summary(&game_engine.summary(), &game_engine.unlocked_tags())
                );
            }
            Ok(HostCommand::Help) => println!("{}", HELP),
            Ok(HostCommand::Idle) => {}
            Ok(HostCommand::Quit) => break,
            Err(message) => println!("{}", message),
        }
    }

    game_engine.borrow_mut().destroy();
    renderer_subscription.unsubscribe();
}
