// --- File: src/core/charmap.rs
use std::collections::HashMap;

// --- MapNode: one byte of a key sequence ---

#[derive(Debug, Clone)]
struct MapNode {
    children: HashMap<u8, usize>,
    replacement: Option<&'static str>,
}

impl MapNode {
    fn new() -> Self {
        Self { children: HashMap::new(), replacement: None }
    }
}

/// An immutable substitution table keyed by UTF-8 byte sequences.
///
/// Keys live in a byte trie so a single left-to-right scan can pick the
/// longest key at every position. Output of one substitution is never
/// re-scanned, so rules can't cascade into each other.
#[derive(Debug, Clone)]
pub struct CharacterMap {
    nodes: Vec<MapNode>,
    entries: Vec<(&'static str, &'static str)>,
}

impl CharacterMap {
    /// Builds a map from `(key, replacement)` pairs. Empty keys are ignored;
    /// a repeated key keeps its last replacement.
    pub fn from_pairs(pairs: &[(&'static str, &'static str)]) -> Self {
        let mut map = Self { nodes: vec![MapNode::new()], entries: Vec::with_capacity(pairs.len()) };
        for &(key, replacement) in pairs {
            map.insert(key, replacement);
        }
        map
    }

    /// O(k) where k is the key length in bytes.
    fn insert(&mut self, key: &'static str, replacement: &'static str) {
        if key.is_empty() {
            return;
        }
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            node_idx = match self.nodes[node_idx].children.get(&byte) {
                Some(&id) => id,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(MapNode::new());
                    self.nodes[node_idx].children.insert(byte, new_node_id);
                    new_node_id
                }
            };
        }
        self.nodes[node_idx].replacement = Some(replacement);

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = replacement,
            None => self.entries.push((key, replacement)),
        }
    }

    /// The table entries in insertion order.
    pub fn entries(&self) -> &[(&'static str, &'static str)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replacement for an exact key, if the key is in the map.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            node_idx = *self.nodes[node_idx].children.get(&byte)?;
        }
        self.nodes[node_idx].replacement
    }

    /// Longest key that prefixes `input`, as `(key_len_in_bytes, replacement)`.
    fn longest_match(&self, input: &[u8]) -> Option<(usize, &'static str)> {
        let mut node_idx = 0;
        let mut best = None;
        for (i, byte) in input.iter().enumerate() {
            match self.nodes[node_idx].children.get(byte) {
                Some(&next_idx) => node_idx = next_idx,
                None => break,
            }
            if let Some(replacement) = self.nodes[node_idx].replacement {
                best = Some((i + 1, replacement));
            }
        }
        best
    }

    /// Replaces every key occurrence in one pass over `text`.
    /// Characters not covered by any key are copied through unchanged.
    pub fn replace_all(&self, text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while pos < bytes.len() {
            if let Some((len, replacement)) = self.longest_match(&bytes[pos..]) {
                out.push_str(replacement);
                pos += len;
                continue;
            }
            // Keys are whole UTF-8 sequences, so `pos` is always a char boundary.
            match text[pos..].chars().next() {
                Some(c) => {
                    out.push(c);
                    pos += c.len_utf8();
                }
                None => break,
            }
        }

        out
    }
}
