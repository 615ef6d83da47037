use std::collections::{HashMap, HashSet};

use crate::world::World;

/// Words that are meaningful to the parser itself rather than to the
/// grammar tables: fillers, the movement prefix, pronouns, wildcards,
/// correction and confirmation words.
const STRUCTURAL_WORDS: &[&str] = &[
    "GO", "THE", "A", "IT", "ALL", "OOPS", "Y", "YES", "N", "NO",
];

/// Precomputed surface-word indices, built once from the static tables.
/// A word may legitimately appear in more than one index ("IN" as both a
/// movement verb and a preposition); parse position decides which role
/// applies, not the index.
pub struct WordIndex {
    verb_actions: HashMap<String, Vec<String>>,
    noun_items: HashMap<String, Vec<String>>,
    adjective_items: HashMap<String, Vec<String>>,
    prepositions: HashSet<String>,
}

impl WordIndex {
    pub fn build(world: &World) -> Self {
        let mut verb_actions: HashMap<String, Vec<String>> = HashMap::new();
        let mut noun_items: HashMap<String, Vec<String>> = HashMap::new();
        let mut adjective_items: HashMap<String, Vec<String>> = HashMap::new();
        let mut prepositions: HashSet<String> = HashSet::new();

        // Declaration order matters: "first matching action" fallback and
        // disambiguation listings follow the world file.
        for key in &world.action_order {
            let action = &world.actions[key];
            for word in &action.words {
                let keys = verb_actions.entry(word.clone()).or_default();
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
            for prep in &action.prepositions {
                prepositions.insert(prep.clone());
            }
        }

        for key in &world.item_order {
            let item = &world.items[key];
            for word in &item.words {
                let keys = noun_items.entry(word.clone()).or_default();
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
            for word in &item.adjectives {
                let keys = adjective_items.entry(word.clone()).or_default();
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }

        WordIndex {
            verb_actions,
            noun_items,
            adjective_items,
            prepositions,
        }
    }

    /// Action keys whose surface words include this word, in table order.
    pub fn actions_for(&self, word: &str) -> &[String] {
        self.verb_actions.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_action_word(&self, word: &str) -> bool {
        self.verb_actions.contains_key(word)
    }

    pub fn is_noun(&self, word: &str) -> bool {
        self.noun_items.contains_key(word)
    }

    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjective_items.contains_key(word)
    }

    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(word)
    }

    /// Does this word mean anything at all? `allow_number` is true while a
    /// prompt is pending; a digit-only word in a fresh command is as
    /// unknown as any other typo.
    pub fn is_known(&self, word: &str, allow_number: bool) -> bool {
        if STRUCTURAL_WORDS.contains(&word) {
            return true;
        }
        if allow_number && !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        self.is_action_word(word)
            || self.is_preposition(word)
            || self.is_noun(word)
            || self.is_adjective(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::load_world_from_str;

    fn index() -> WordIndex {
        let toml = r#"
            [world]
            id = "t"
            name = "Test"
            start = "room"

            [[action]]
            id = "get"
            words = ["GET", "TAKE"]
            requires_object = true

            [[action]]
            id = "put"
            words = ["PUT"]
            requires_object = true
            prepositions = ["IN", "ON"]

            [[item]]
            id = "red_rock"
            name = "red rock"
            words = ["ROCK"]
            adjectives = ["RED"]

            [[item]]
            id = "blue_rock"
            name = "blue rock"
            words = ["ROCK"]
            adjectives = ["BLUE"]

            [[location]]
            id = "room"
            brief = "Room"
        "#;
        let world = load_world_from_str(toml).unwrap();
        WordIndex::build(&world)
    }

    #[test]
    fn classifies_roles() {
        let idx = index();
        assert!(idx.is_action_word("TAKE"));
        assert!(idx.is_preposition("ON"));
        assert!(idx.is_noun("ROCK"));
        assert!(idx.is_adjective("RED"));
        assert!(!idx.is_noun("RED"));
        assert_eq!(idx.actions_for("GET"), &["GET".to_string()]);
    }

    #[test]
    fn noun_shared_by_two_items_indexes_both() {
        let idx = index();
        assert_eq!(
            idx.noun_items.get("ROCK").unwrap(),
            &vec!["RED_ROCK".to_string(), "BLUE_ROCK".to_string()]
        );
    }

    #[test]
    fn numbers_known_only_in_prompt_context() {
        let idx = index();
        assert!(idx.is_known("42", true));
        assert!(!idx.is_known("42", false));
        assert!(idx.is_known("OOPS", false));
        assert!(!idx.is_known("XYZZY", false));
    }
}
