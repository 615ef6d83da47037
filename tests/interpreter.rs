//! End-to-end tests: feed input lines through a full `GameState` and
//! check the printed replies and the resulting world state.

use parley::{GameState, load_world_from_str, validate_world};

const WORLD: &str = r#"
    [world]
    id = "t"
    name = "Harness"
    start = "kitchen"
    swear_words = ["DANG"]
    swear_response = "Such language!"

    [[action]]
    id = "look"
    words = ["LOOK", "L"]

    [[action]]
    id = "get"
    words = ["GET", "TAKE"]
    requires_object = true
    supports_all = true

    [[action]]
    id = "drop"
    words = ["DROP"]
    requires_object = true
    supports_all = true

    [[action]]
    id = "put"
    words = ["PUT"]
    requires_object = true
    prepositions = ["IN", "INTO"]
    supports_all = true

    [[action]]
    id = "open"
    words = ["OPEN"]
    requires_object = true

    [[action]]
    id = "close"
    words = ["CLOSE"]
    requires_object = true

    [[action]]
    id = "examine"
    words = ["EXAMINE", "X"]
    requires_object = true

    [[action]]
    id = "inventory"
    words = ["INVENTORY", "I"]

    [[action]]
    id = "wait"
    words = ["WAIT", "Z"]

    [[action]]
    id = "again"
    words = ["AGAIN", "G"]
    suppress_in_listing = true

    [[action]]
    id = "quit"
    words = ["QUIT"]
    suppress_in_listing = true

    [[action]]
    id = "restart"
    words = ["RESTART"]
    suppress_in_listing = true

    [[action]]
    id = "sing"
    words = ["SING"]
    default_result = "Your singing scares the mice away."

    [[action]]
    id = "east"
    words = ["EAST", "E"]
    is_move = true
    suppress_in_listing = true

    [[action]]
    id = "west"
    words = ["WEST", "W"]
    is_move = true
    suppress_in_listing = true

    [[action]]
    id = "down"
    words = ["DOWN", "D"]
    is_move = true
    suppress_in_listing = true

    [[action]]
    id = "up"
    words = ["UP", "U"]
    is_move = true
    suppress_in_listing = true

    [[item]]
    id = "lantern"
    name = "brass lantern"
    words = ["LANTERN", "LAMP"]
    examine = "A sturdy brass lantern."
    init_loc = "PLAYER"
    takeable = true
    light_source = true

    [[item]]
    id = "trapdoor"
    name = "trapdoor"
    words = ["TRAPDOOR", "HATCH"]
    init_loc = "kitchen"
    openable = true
    do_not_list = true

    [[item]]
    id = "red_apple"
    name = "red apple"
    words = ["APPLE"]
    adjectives = ["RED"]
    init_loc = "pantry"
    takeable = true

    [[item]]
    id = "green_apple"
    name = "green apple"
    words = ["APPLE"]
    adjectives = ["GREEN"]
    init_loc = "pantry"
    takeable = true

    [[item]]
    id = "stove"
    name = "iron stove"
    words = ["STOVE"]
    init_loc = "kitchen"

    [[item]]
    id = "sack"
    name = "sack"
    words = ["SACK"]
    init_loc = "pantry"
    takeable = true
    container = true

    [[item]]
    id = "barrel"
    name = "rain barrel"
    words = ["BARREL"]
    init_loc = "pantry"

    [[item]]
    id = "chest"
    name = "wooden chest"
    words = ["CHEST", "BOX"]
    init_loc = "cellar"
    openable = true
    container = true

    [[item]]
    id = "coin"
    name = "gold coin"
    words = ["COIN"]
    init_loc = "chest"
    takeable = true

    [[location]]
    id = "kitchen"
    brief = "Kitchen"
    long = "A farmhouse kitchen."
    [location.exits]
    east = "PANTRY"
    down = "CELLAR|TRAPDOOR"
    west = "The chimney blocks the way west."

    [[location]]
    id = "pantry"
    brief = "Pantry"
    long = "Bare shelves all around."
    [location.exits]
    west = "KITCHEN"

    [[location]]
    id = "cellar"
    brief = "Cellar"
    long = "A low stone cellar."
    dark = true
    [location.exits]
    up = "KITCHEN"
"#;

fn game() -> GameState {
    let world = load_world_from_str(WORLD).unwrap();
    assert!(validate_world(&world).is_empty());
    let mut gs = GameState::new(world);
    gs.initialize();
    gs
}

fn say(gs: &mut GameState, input: &str) -> String {
    let (out, _) = gs.step(input);
    out.text()
}

#[test]
fn get_and_drop_move_the_item() {
    let mut gs = game();
    say(&mut gs, "east");
    assert_eq!(say(&mut gs, "take red apple"), "Taken.");
    assert!(gs.state.carrying("RED_APPLE"));
    assert_eq!(
        say(&mut gs, "take red apple"),
        "You're already carrying the red apple."
    );
    assert_eq!(say(&mut gs, "drop red apple"), "Dropped.");
    assert!(gs.state.items_at("PANTRY").contains(&"RED_APPLE".to_string()));
}

#[test]
fn untakeable_items_stay_put() {
    let mut gs = game();
    assert_eq!(say(&mut gs, "take stove"), "You can't pick that up!");
    assert!(gs.state.items_at("KITCHEN").contains(&"STOVE".to_string()));
}

#[test]
fn drop_without_carrying_mutates_nothing() {
    let mut gs = game();
    say(&mut gs, "east");
    assert_eq!(
        say(&mut gs, "drop red apple"),
        "You're not carrying the red apple."
    );
    assert!(gs.state.items_at("PANTRY").contains(&"RED_APPLE".to_string()));
}

#[test]
fn disambiguation_then_adjective_answer() {
    let mut gs = game();
    say(&mut gs, "east");
    assert_eq!(
        say(&mut gs, "take apple"),
        "Which apple do you mean: the red apple or the green apple?"
    );
    assert_eq!(say(&mut gs, "green"), "Taken.");
    assert!(gs.state.carrying("GREEN_APPLE"));
    assert!(!gs.state.carrying("RED_APPLE"));
}

#[test]
fn get_all_reports_per_item() {
    let mut gs = game();
    say(&mut gs, "east");
    let text = say(&mut gs, "take all");
    assert!(text.contains("Red apple: Taken."));
    assert!(text.contains("Green apple: Taken."));
    // The bolted-down barrel is passed over without a line of its own.
    assert!(!text.contains("barrel"));
    assert!(gs.state.items_at("PANTRY").contains(&"BARREL".to_string()));
    assert_eq!(say(&mut gs, "take all"), "There is nothing here to take!");
}

#[test]
fn put_all_skips_the_container_itself() {
    let mut gs = game();
    say(&mut gs, "east");
    say(&mut gs, "take all");
    let text = say(&mut gs, "put all in sack");
    assert!(text.contains("Brass lantern: Done."));
    assert!(text.contains("Red apple: Done."));
    assert!(text.contains("Green apple: Done."));
    assert!(!text.contains("Sack: Done."));
    assert!(gs.state.carrying("SACK"));
    assert_eq!(gs.state.contents_of("SACK").len(), 3);

    // Only the sack is left in hand, and it can't go inside itself.
    assert_eq!(
        say(&mut gs, "put all in sack"),
        "You aren't carrying anything that you can place in the sack!"
    );
}

#[test]
fn drop_all_echoes_each_item() {
    let mut gs = game();
    say(&mut gs, "east");
    say(&mut gs, "take red apple");
    let text = say(&mut gs, "drop all");
    assert!(text.contains("Brass lantern: Dropped."));
    assert!(text.contains("Red apple: Dropped."));
    assert!(gs.state.items_at("PANTRY").contains(&"RED_APPLE".to_string()));
    assert!(gs.state.inventory.is_empty());
    assert_eq!(say(&mut gs, "drop all"), "You aren't carrying anything!");
}

#[test]
fn oops_splices_a_correction() {
    let mut gs = game();
    say(&mut gs, "east");
    assert_eq!(
        say(&mut gs, "take red aple"),
        "I don't understand the word \"APLE\"."
    );
    assert_eq!(say(&mut gs, "oops apple"), "Taken.");
    assert!(gs.state.carrying("RED_APPLE"));
}

#[test]
fn again_replays_and_refuses_cold_start() {
    let mut gs = game();
    assert_eq!(
        say(&mut gs, "again"),
        "You can't type 'AGAIN' before doing something."
    );
    say(&mut gs, "east");
    say(&mut gs, "take green apple");
    say(&mut gs, "drop it");
    assert_eq!(say(&mut gs, "g"), "You're not carrying the green apple.");
}

#[test]
fn container_round_trip() {
    let mut gs = game();
    say(&mut gs, "open trapdoor");
    say(&mut gs, "down");
    assert_eq!(say(&mut gs, "take coin"), "You can't see any coin here!");
    let text = say(&mut gs, "open chest");
    assert!(text.contains("Opened."));
    assert!(text.contains("The wooden chest contains:"));
    assert!(text.contains("a gold coin"));
    assert_eq!(say(&mut gs, "take coin"), "Taken.");
    assert_eq!(say(&mut gs, "put coin in box"), "Done.");
    assert_eq!(say(&mut gs, "close chest"), "Closed.");
    assert_eq!(say(&mut gs, "take coin"), "You can't see any coin here!");
}

#[test]
fn second_object_prompt_round_trip() {
    let mut gs = game();
    say(&mut gs, "open trapdoor");
    say(&mut gs, "down");
    say(&mut gs, "open chest");
    say(&mut gs, "take coin");
    assert_eq!(
        say(&mut gs, "put the coin"),
        "What do you want to put the coin in?"
    );
    assert_eq!(say(&mut gs, "chest"), "Done.");
    assert_eq!(gs.state.contents_of("CHEST"), &["COIN".to_string()]);
}

#[test]
fn closed_door_gates_movement() {
    let mut gs = game();
    assert_eq!(say(&mut gs, "down"), "The trapdoor is closed.");
    assert_eq!(gs.state.location, "KITCHEN");
    say(&mut gs, "open hatch");
    let text = say(&mut gs, "down");
    assert!(text.contains("Cellar"));
    assert_eq!(gs.state.location, "CELLAR");
}

#[test]
fn refusal_exit_and_missing_exit() {
    let mut gs = game();
    assert_eq!(say(&mut gs, "west"), "The chimney blocks the way west.");
    assert_eq!(say(&mut gs, "up"), "You can't go in that direction.");
}

#[test]
fn darkness_hides_the_room_until_lit() {
    let mut gs = game();
    say(&mut gs, "drop lantern");
    say(&mut gs, "open trapdoor");
    let text = say(&mut gs, "down");
    assert!(text.contains("It is pitch dark in here."));
    assert!(!text.contains("A low stone cellar."));
    // Room items are out of reach in the dark.
    assert_eq!(say(&mut gs, "open chest"), "You can't see any chest here!");

    say(&mut gs, "up");
    say(&mut gs, "take lamp");
    let text = say(&mut gs, "down");
    assert!(text.contains("A low stone cellar."));
}

#[test]
fn inventory_listing() {
    let mut gs = game();
    let text = say(&mut gs, "inventory");
    assert!(text.contains("You are carrying:"));
    assert!(text.contains("a brass lantern"));
    say(&mut gs, "drop lantern");
    let text = say(&mut gs, "i");
    assert!(text.contains("Nothing"));
}

#[test]
fn examine_falls_back_when_unwritten() {
    let mut gs = game();
    assert_eq!(say(&mut gs, "x lamp"), "A sturdy brass lantern.");
    assert_eq!(
        say(&mut gs, "x stove"),
        "You see nothing special about the iron stove."
    );
}

#[test]
fn unclaimed_action_prints_its_default() {
    let mut gs = game();
    assert_eq!(say(&mut gs, "sing"), "Your singing scares the mice away.");
}

#[test]
fn quit_and_restart_confirmations() {
    let mut gs = game();
    say(&mut gs, "quit");
    assert_eq!(say(&mut gs, "n"), "Okay, Quit cancelled.");

    say(&mut gs, "east");
    say(&mut gs, "take red apple");
    say(&mut gs, "restart");
    let (out, quit) = gs.step("y");
    assert!(!quit);
    assert!(out.text().contains("Restarting..."));
    assert!(!gs.state.carrying("RED_APPLE"));
    assert_eq!(gs.state.location, "KITCHEN");

    say(&mut gs, "quit");
    let (out, quit) = gs.step("yes");
    assert_eq!(out.text(), "Quitting...");
    assert!(quit);
}

#[test]
fn turns_advance_only_on_successful_parses() {
    let mut gs = game();
    say(&mut gs, "east");
    say(&mut gs, "take aple"); // typo
    say(&mut gs, "take apple"); // disambiguation prompt
    say(&mut gs, "dang"); // swearing
    assert_eq!(gs.turn.counter, 1);
    say(&mut gs, "red"); // answers the prompt
    assert_eq!(gs.turn.counter, 2);
}

#[test]
fn scheduled_event_fires_and_can_reschedule() {
    let mut gs = game();
    fn nag(ctx: &mut parley::engine::Context) {
        ctx.out.event("Something scrabbles behind the walls.");
        ctx.schedule_in(2, Box::new(nag));
    }
    gs.events.schedule_at(1, Box::new(nag));

    assert!(!say(&mut gs, "wait").contains("scrabbles")); // counter 0 -> 1
    assert!(say(&mut gs, "wait").contains("scrabbles")); // fires at 1
    assert!(!say(&mut gs, "wait").contains("scrabbles"));
    assert!(say(&mut gs, "wait").contains("scrabbles")); // rescheduled at 3
}
