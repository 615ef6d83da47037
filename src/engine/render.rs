use crate::engine::Context;
use crate::world::World;

/// Print one line per listable item, wrapping each long description in
/// the `decorate` template (its `@` marks where the description goes).
/// Open containers get their contents appended, indented underneath.
pub fn list_items(
    ctx: &mut Context<'_>,
    ids: &[String],
    decorate: &str,
    article: &str,
    indent: usize,
    announce_if_nothing: bool,
) {
    if ids.is_empty() {
        if announce_if_nothing {
            ctx.out.say(format!("{}Nothing", " ".repeat(indent)));
        }
        return;
    }

    let (prefix, suffix) = decorate.split_once('@').unwrap_or((decorate, ""));
    let prefix = prefix.to_string();
    let suffix = suffix.to_string();

    for id in ids {
        if ctx.world.items[id].do_not_list {
            continue;
        }
        let line = format!(
            "{}{}{}{}",
            " ".repeat(indent),
            prefix,
            long_description(ctx.world, id, article),
            suffix
        );
        append_item_contents(ctx, line, id, indent);
    }
}

/// "There is a brass lamp here." lines for the current location, after a
/// separating blank line. Silent when nothing is listable.
pub fn describe_room_items(ctx: &mut Context<'_>) {
    let ids = ctx.state.items_at(&ctx.state.location).to_vec();
    if !ids.iter().any(|id| !ctx.world.items[id].do_not_list) {
        return;
    }
    list_items(ctx, &ids, "There is @ here.", "a", 0, false);
}

/// Finish an item's listing line. Open (or un-openable) containers tell
/// what is inside; everything else prints as-is.
fn append_item_contents(ctx: &mut Context<'_>, mut line: String, item_id: &str, indent: usize) {
    let item = &ctx.world.items[item_id];
    if !(item.container && ctx.state.is_open(ctx.world, item_id)) {
        ctx.out.say(line);
        return;
    }

    if line.ends_with('.') {
        line.push_str(" It");
    }
    let contents = ctx.state.contents_of(item_id).to_vec();
    if contents.is_empty() {
        ctx.out.say(format!("{} is empty.", line));
    } else {
        ctx.out.say(format!("{} contains:", line));
        list_items(ctx, &contents, "@", "a", indent + 2, false);
    }
}

/// An item's one-line description: `long_desc` if set, otherwise the
/// name, with an indefinite or requested article in front unless the item
/// opts out.
pub fn long_description(world: &World, item_id: &str, article: &str) -> String {
    let Some(item) = world.items.get(item_id) else {
        return item_id.to_lowercase();
    };
    let desc = if item.long_desc.is_empty() {
        item.name.as_str()
    } else {
        item.long_desc.as_str()
    };

    if article.is_empty() || item.no_article {
        return desc.to_string();
    }

    let starts_with_vowel = desc
        .chars()
        .next()
        .is_some_and(|c| "aeiouAEIOU".contains(c));
    if (article == "a" || article == "A") && starts_with_vowel {
        format!("{}n {}", article, desc)
    } else {
        format!("{} {}", article, desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::TurnState;
    use crate::engine::dispatch::HandlerRegistry;
    use crate::engine::events::EventQueue;
    use crate::engine::output::Output;
    use crate::engine::scope::WorldState;
    use crate::engine::vocab::WordIndex;
    use crate::world::load_world_from_str;

    fn world() -> World {
        load_world_from_str(
            r#"
            [world]
            id = "t"
            name = "Test"
            start = "den"

            [[item]]
            id = "apple"
            name = "apple"
            words = ["APPLE"]
            init_loc = "den"
            takeable = true

            [[item]]
            id = "basket"
            name = "basket"
            words = ["BASKET"]
            long_desc = "wicker basket"
            init_loc = "den"
            container = true

            [[item]]
            id = "crumb"
            name = "crumb"
            words = ["CRUMB"]
            init_loc = "den"
            takeable = true
            do_not_list = true

            [[item]]
            id = "dust"
            name = "dust"
            words = ["DUST"]
            init_loc = "den"
            do_not_list = true

            [[location]]
            id = "den"
            brief = "Den"
        "#,
        )
        .unwrap()
    }

    #[test]
    fn article_handling() {
        let world = world();
        assert_eq!(long_description(&world, "APPLE", "a"), "an apple");
        assert_eq!(long_description(&world, "BASKET", "a"), "a wicker basket");
        assert_eq!(long_description(&world, "BASKET", ""), "wicker basket");
    }

    #[test]
    fn room_listing_decorates_and_skips_unlisted() {
        let world = world();
        let vocab = WordIndex::build(&world);
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

        describe_room_items(&mut ctx);
        let text = out.text();
        assert!(text.contains("There is an apple here."));
        // The closed-by-default basket isn't openable, so it counts as
        // open; its only content is unlisted.
        assert!(text.contains("There is a wicker basket here. It is empty."));
        assert!(!text.contains("dust"));
        assert!(!text.contains("crumb"));
    }
}
