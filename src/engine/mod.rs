pub mod command;
pub mod dispatch;
pub mod events;
pub mod items;
pub mod movement;
pub mod output;
pub mod parser;
pub mod render;
pub mod resolver;
pub mod scope;
pub mod tokenizer;
pub mod vocab;

pub use output::{Output, OutputBlock};

use crate::engine::command::{Pending, TurnState};
use crate::engine::dispatch::HandlerRegistry;
use crate::engine::events::{EventFn, EventQueue};
use crate::engine::scope::WorldState;
use crate::engine::vocab::WordIndex;
use crate::world::World;

/// Everything a handler or event can see and touch for one input line.
/// Static tables are shared references; live state is borrowed mutably.
pub struct Context<'a> {
    pub world: &'a World,
    pub vocab: &'a WordIndex,
    pub handlers: &'a HandlerRegistry,
    pub state: &'a mut WorldState,
    pub turn: &'a mut TurnState,
    pub events: &'a mut EventQueue,
    pub out: &'a mut Output,
}

impl Context<'_> {
    /// Kill the player: optional death text, then the restart prompt.
    pub fn kill(&mut self, death_text: Option<&str>) {
        if let Some(text) = death_text {
            self.out.say(text);
        }
        self.state.hp = 0;
        self.out.say("Do you want to restart (Y/N)?");
        self.turn.pending = Pending::AwaitingRestartConfirm;
    }

    /// Schedule a callback `turns` successful turns from now.
    pub fn schedule_in(&mut self, turns: u64, run: EventFn) {
        self.events.schedule_at(self.turn.counter + turns, run);
    }

    /// Queue a line of event text for `turns` successful turns from now.
    pub fn print_in(&mut self, turns: u64, text: impl Into<String>) {
        let text = text.into();
        self.schedule_in(turns, Box::new(move |ctx| ctx.out.event(text)));
    }

    /// Substitute "the <item name>" for each `@` in a message template,
    /// capitalizing a leading "the".
    pub fn item_in_string(&self, template: &str, item_id: &str) -> String {
        let name = self
            .world
            .items
            .get(item_id)
            .map(|item| item.name.as_str())
            .unwrap_or(item_id);
        let article = if self.world.items.get(item_id).is_some_and(|i| i.no_article) {
            ""
        } else {
            "the "
        };
        let mut text = template.replace('@', &format!("{}{}", article, name));
        if text.starts_with("the ") {
            text.replace_range(..1, "T");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::load_world_from_str;

    fn fixture() -> (World, WordIndex) {
        let world = load_world_from_str(
            r#"
            [world]
            id = "t"
            name = "Test"
            start = "room"

            [[item]]
            id = "lamp"
            name = "brass lamp"
            words = ["LAMP"]
            init_loc = "room"

            [[item]]
            id = "grue"
            name = "Gurthang the grue"
            words = ["GRUE"]
            no_article = true
            init_loc = "room"

            [[location]]
            id = "room"
            brief = "Room"
        "#,
        )
        .unwrap();
        let vocab = WordIndex::build(&world);
        (world, vocab)
    }

    #[test]
    fn item_in_string_substitutes_and_capitalizes() {
        let (world, vocab) = fixture();
        let handlers = HandlerRegistry::new();
        let mut state = WorldState::new(&world);
        let mut turn = TurnState::new();
        let mut events = EventQueue::new();
        let mut out = Output::new();
        let ctx = Context {
            world: &world,
            vocab: &vocab,
            handlers: &handlers,
            state: &mut state,
            turn: &mut turn,
            events: &mut events,
            out: &mut out,
        };

        assert_eq!(
            ctx.item_in_string("@ is glowing.", "LAMP"),
            "The brass lamp is glowing."
        );
        assert_eq!(
            ctx.item_in_string("You drop @.", "LAMP"),
            "You drop the brass lamp."
        );
        assert_eq!(
            ctx.item_in_string("@ snarls.", "GRUE"),
            "Gurthang the grue snarls."
        );
    }

    #[test]
    fn kill_arms_restart_prompt() {
        let (world, vocab) = fixture();
        let handlers = HandlerRegistry::new();
        let mut state = WorldState::new(&world);
        let mut turn = TurnState::new();
        let mut events = EventQueue::new();
        let mut out = Output::new();
        let mut ctx = Context {
            world: &world,
            vocab: &vocab,
            handlers: &handlers,
            state: &mut state,
            turn: &mut turn,
            events: &mut events,
            out: &mut out,
        };

        ctx.kill(Some("The ceiling gives way."));
        assert!(!ctx.state.is_alive());
        assert_eq!(ctx.turn.pending, Pending::AwaitingRestartConfirm);
        assert!(out.text().contains("Do you want to restart (Y/N)?"));
    }

    #[test]
    fn print_in_schedules_relative_to_the_counter() {
        let (world, vocab) = fixture();
        let handlers = HandlerRegistry::new();
        let mut state = WorldState::new(&world);
        let mut turn = TurnState::new();
        turn.counter = 5;
        let mut events = EventQueue::new();
        let mut out = Output::new();
        let mut ctx = Context {
            world: &world,
            vocab: &vocab,
            handlers: &handlers,
            state: &mut state,
            turn: &mut turn,
            events: &mut events,
            out: &mut out,
        };

        ctx.print_in(2, "The lamp flickers.");
        assert!(ctx.events.take_due(6).is_empty());
        assert_eq!(ctx.events.take_due(7).len(), 1);
    }
}
