pub mod engine;
pub mod world;

use engine::command::TurnState;
use engine::dispatch::HandlerRegistry;
use engine::events::EventQueue;
use engine::scope::WorldState;
use engine::vocab::WordIndex;
use engine::{Context, Output, movement, parser};
use world::World;

pub use world::{load_world_from_file, load_world_from_str, validate_world};

/// One running game: the static tables, the word indices built from
/// them, the handler registry, and all mutable state. Drive it with
/// `initialize` once and then `step` per input line.
pub struct GameState {
    pub world: World,
    pub vocab: WordIndex,
    pub handlers: HandlerRegistry,
    pub state: WorldState,
    pub turn: TurnState,
    pub events: EventQueue,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        quit: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
        initialized: bool,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML world string. Call `init()` to get the initial render.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world),
                initialized: false,
            })
        }

        /// Initialize the game and return the initial render output.
        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            if !self.initialized {
                self.initialized = true;
            }
            let out = self.state.initialize();
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit: false,
            })
            .unwrap_or(JsValue::NULL)
        }

        /// Process a player command and return the resulting output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            if !self.initialized {
                let _ = self.init();
            }
            let (out, quit) = self.state.step(input);
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit,
            })
            .unwrap_or(JsValue::NULL)
        }
    }
}

impl GameState {
    pub fn new(world: World) -> Self {
        let vocab = WordIndex::build(&world);
        let state = WorldState::new(&world);
        GameState {
            world,
            vocab,
            handlers: HandlerRegistry::with_defaults(),
            state,
            turn: TurnState::new(),
            events: EventQueue::new(),
        }
    }

    /// Title banner plus the opening room description.
    pub fn initialize(&mut self) -> Output {
        let mut out = Output::new();
        out.title(self.world.name.clone());
        out.say(self.world.desc.clone());
        let mut ctx = Context {
            world: &self.world,
            vocab: &self.vocab,
            handlers: &self.handlers,
            state: &mut self.state,
            turn: &mut self.turn,
            events: &mut self.events,
            out: &mut out,
        };
        movement::do_look(&mut ctx);
        out
    }

    /// Process a single player input; returns (output, quit?).
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        {
            let mut ctx = Context {
                world: &self.world,
                vocab: &self.vocab,
                handlers: &self.handlers,
                state: &mut self.state,
                turn: &mut self.turn,
                events: &mut self.events,
                out: &mut out,
            };
            parser::parse_line(&mut ctx, input);
        }

        if self.turn.parse_successful {
            // Due events fire after the command, before the counter
            // advances. Draining first lets them reschedule themselves.
            let due = self.events.take_due(self.turn.counter);
            if !due.is_empty() {
                let mut ctx = Context {
                    world: &self.world,
                    vocab: &self.vocab,
                    handlers: &self.handlers,
                    state: &mut self.state,
                    turn: &mut self.turn,
                    events: &mut self.events,
                    out: &mut out,
                };
                for event in due {
                    event(&mut ctx);
                }
            }
            self.turn.finish_turn();
        }

        if self.turn.restart_confirmed {
            let rendered = self.restart();
            out.blocks.extend(rendered.blocks);
        }

        (out, self.turn.quit_confirmed)
    }

    /// Fresh state over the same world and handlers, with the opening
    /// render.
    pub fn restart(&mut self) -> Output {
        self.state = WorldState::new(&self.world);
        self.turn = TurnState::new();
        self.events = EventQueue::new();
        self.initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"
        [world]
        id = "t"
        name = "Test Cave"
        desc = "A tiny test scenario."
        start = "mouth"

        [[action]]
        id = "look"
        words = ["LOOK", "L"]

        [[action]]
        id = "get"
        words = ["GET", "TAKE"]
        requires_object = true
        supports_all = true

        [[action]]
        id = "quit"
        words = ["QUIT"]
        suppress_in_listing = true

        [[action]]
        id = "restart"
        words = ["RESTART"]
        suppress_in_listing = true

        [[action]]
        id = "wait"
        words = ["WAIT", "Z"]

        [[item]]
        id = "pebble"
        name = "pebble"
        words = ["PEBBLE"]
        init_loc = "mouth"
        takeable = true

        [[location]]
        id = "mouth"
        brief = "Cave Mouth"
        long = "Sunlight reaches a few feet in."
    "#;

    fn game() -> GameState {
        GameState::new(load_world_from_str(WORLD).unwrap())
    }

    #[test]
    fn initialize_renders_banner_and_room() {
        let mut gs = game();
        let out = gs.initialize();
        let text = out.text();
        assert!(text.contains("Test Cave"));
        assert!(text.contains("Sunlight reaches a few feet in."));
        assert!(text.contains("There is a pebble here."));
    }

    #[test]
    fn step_runs_commands_and_counts_turns() {
        let mut gs = game();
        gs.initialize();
        let (out, quit) = gs.step("take pebble");
        assert_eq!(out.text(), "Taken.");
        assert!(!quit);
        assert_eq!(gs.turn.counter, 1);
        assert!(gs.state.carrying("PEBBLE"));
    }

    #[test]
    fn quit_round_trip() {
        let mut gs = game();
        gs.initialize();
        let (out, quit) = gs.step("quit");
        assert!(out.text().contains("Are you sure you want to quit (Y/N)?"));
        assert!(!quit);
        let (out, quit) = gs.step("y");
        assert_eq!(out.text(), "Quitting...");
        assert!(quit);
    }

    #[test]
    fn restart_resets_the_world() {
        let mut gs = game();
        gs.initialize();
        gs.step("take pebble");
        gs.step("restart");
        let (out, quit) = gs.step("y");
        assert!(!quit);
        assert!(out.text().contains("Restarting..."));
        assert!(out.text().contains("Cave Mouth"));
        assert!(!gs.state.carrying("PEBBLE"));
        assert_eq!(gs.turn.counter, 0);
    }

    #[test]
    fn scheduled_events_fire_on_turn_boundaries() {
        let mut gs = game();
        gs.initialize();
        gs.events
            .schedule_at(2, Box::new(|ctx| ctx.out.event("A cold wind picks up.")));

        let (out, _) = gs.step("wait");
        assert!(!out.text().contains("cold wind"));
        let (out, _) = gs.step("wait");
        assert!(!out.text().contains("cold wind"));
        // Counter is 2 entering this turn; the event fires after the
        // command runs.
        let (out, _) = gs.step("wait");
        assert!(out.text().contains("A cold wind picks up."));
        assert!(gs.events.is_empty());
    }

    #[test]
    fn prompts_do_not_fire_events() {
        let mut gs = game();
        gs.initialize();
        gs.events
            .schedule_at(0, Box::new(|ctx| ctx.out.event("Dust settles.")));
        let (out, _) = gs.step("take");
        assert_eq!(out.text(), "What do you want to take?");
        let (out, _) = gs.step("pebble");
        assert!(out.text().contains("Dust settles."));
    }
}
