use crate::engine::command::{ItemRef, ItemToken, Pending, TurnState};
use crate::engine::scope::{WorldState, is_dark, list_contains_item};
use crate::engine::tokenizer::{is_number, strip_fillers};
use crate::world::World;

/// Outcome of resolving one item word-span.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(ItemToken),
    /// More than one candidate survived narrowing; the caller prints the
    /// question and arms `Pending::AwaitingDisambiguation(candidates)`.
    Ambiguous {
        question: String,
        candidates: Vec<String>,
    },
    /// User-facing failure text; the command is abandoned.
    Unresolved(String),
}

/// Resolve a span of words to a single item, the ALL wildcard, a number,
/// or the IT pronoun. Narrowing ladder: every word must match a noun or
/// adjective on the candidate; then prefer candidates that are actually
/// here; then candidates matched by a noun rather than only an adjective.
pub fn resolve_item(
    world: &World,
    state: &WorldState,
    turn: &TurnState,
    words: &[String],
) -> Resolution {
    let words = strip_fillers(words);
    if words.is_empty() {
        return Resolution::Unresolved("I don't understand that command.".to_string());
    }

    if words.len() == 1 && words[0] == "IT" {
        if let Some(token) = turn.last_command.as_ref().and_then(|cmd| cmd.first()) {
            return Resolution::Found(token.clone());
        }
        return Resolution::Unresolved(
            "I don't understand what \"IT\" is referring to in that command.".to_string(),
        );
    }

    if words.len() == 1 && words[0] == "ALL" {
        return Resolution::Found(ItemToken {
            target: ItemRef::All,
            user_words: words,
        });
    }

    if words.len() == 1 && is_number(&words[0]) {
        if let Ok(value) = words[0].parse::<i64>() {
            return Resolution::Found(ItemToken {
                target: ItemRef::Number(value),
                user_words: words,
            });
        }
    }

    // While disambiguating, the search universe shrinks to the candidates
    // we asked about.
    let universe: Vec<String> = match &turn.pending {
        Pending::AwaitingDisambiguation(candidates) if !candidates.is_empty() => {
            candidates.clone()
        }
        _ => world.item_order.clone(),
    };

    let mut candidates: Vec<String> = Vec::new();
    for key in &universe {
        let Some(item) = world.items.get(key) else { continue };
        let mismatch = words
            .iter()
            .any(|w| !item.words.contains(w) && !item.adjectives.contains(w));
        if !mismatch {
            candidates.push(key.clone());
        }
    }

    if candidates.is_empty() {
        return Resolution::Unresolved("I don't understand that command.".to_string());
    }
    if candidates.len() == 1 {
        return found(candidates.remove(0), words);
    }

    // Narrow to candidates that are here (held, or present in a lit
    // location, looking into open containers).
    let dark = is_dark(world, state);
    let mut here: Vec<String> = candidates
        .iter()
        .filter(|key| {
            list_contains_item(world, state, key, &state.inventory, true)
                || (!dark
                    && list_contains_item(
                        world,
                        state,
                        key,
                        state.items_at(&state.location),
                        true,
                    ))
        })
        .cloned()
        .collect();

    if here.len() == 1 {
        return found(here.remove(0), words);
    }
    if here.is_empty() {
        // Mentioned several items but none are in reach. Hand the first
        // raw candidate downstream; the visibility check there produces
        // the "can't see" message.
        return found(candidates.remove(0), words);
    }

    // Ignore candidates that only matched an adjective.
    let mut noun_matched: Vec<String> = here
        .iter()
        .filter(|key| {
            let item = &world.items[key.as_str()];
            words.iter().any(|w| item.words.contains(w))
        })
        .cloned()
        .collect();

    if noun_matched.len() == 1 {
        return found(noun_matched.remove(0), words);
    }
    if noun_matched.len() > 1 {
        here = noun_matched;
    }

    let question = disambiguation_question(world, &words, &here);
    Resolution::Ambiguous {
        question,
        candidates: here,
    }
}

fn found(key: String, user_words: Vec<String>) -> Resolution {
    Resolution::Found(ItemToken {
        target: ItemRef::Key(key),
        user_words,
    })
}

/// "Which rock do you mean: the red rock, the blue rock, or the gray
/// rock?" The question echoes the words the player typed, not the stored
/// noun words of the candidates.
fn disambiguation_question(world: &World, words: &[String], candidates: &[String]) -> String {
    let mut question = format!("Which {} do you mean:", words.join(" ").to_lowercase());
    let last = candidates.len() - 1;
    for (i, key) in candidates.iter().enumerate() {
        if i == last {
            question.push_str(" or");
        }
        question.push_str(" the ");
        question.push_str(&world.items[key.as_str()].name);
        if i != last && candidates.len() > 2 {
            question.push(',');
        }
    }
    question.push('?');
    question
}
