//! Character trie holding a vocabulary.
//!
//! Nodes live in a single arena and refer to their children by index, so a
//! [`Hit`] can remember where a partial match stopped without borrowing the
//! trie. Words are only ever added, never removed, which keeps every node id
//! handed out in a `Hit` valid for the lifetime of the trie.

use rustc_hash::FxHashMap;

/// Index of a node inside the trie arena.
pub type NodeId = u32;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct TrieNode {
    children: FxHashMap<char, NodeId>,
    /// The path from the root to this node spells a complete word
    complete: bool,
}

/// Prefix tree keyed by `char`.
///
/// The root stands for the empty prefix and is never a complete word.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            words: 0,
        }
    }

    /// Build a trie from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Number of complete words stored.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Insert a word, returning `true` if it was not present before.
    ///
    /// Inserting the empty string or an existing word is a no-op.
    pub fn insert(&mut self, word: &str) -> bool {
        self.insert_chars(word.chars())
    }

    /// Insert a word given as a character sequence.
    pub fn insert_chars<I>(&mut self, chars: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = ROOT;
        for ch in chars {
            node = self.child_or_insert(node, ch);
        }
        if node == ROOT {
            return false;
        }

        let target = &mut self.nodes[node as usize];
        if target.complete {
            return false;
        }
        target.complete = true;
        self.words += 1;
        true
    }

    fn child_or_insert(&mut self, node: NodeId, ch: char) -> NodeId {
        if let Some(&child) = self.nodes[node as usize].children.get(&ch) {
            return child;
        }
        let child = self.nodes.len() as NodeId;
        self.nodes.push(TrieNode::default());
        self.nodes[node as usize].children.insert(ch, child);
        child
    }

    /// Look up the single character `text[pos]` from the root.
    ///
    /// The returned hit is a match if that character is a word on its own and
    /// a prefix if longer words start with it.
    pub fn match_one(&self, text: &[char], pos: usize) -> Hit {
        self.step(ROOT, text[pos], pos, pos)
    }

    /// Extend a prefix hit by the character at `text[pos]`.
    ///
    /// # Panics
    ///
    /// Panics if `prior` is not a prefix hit: there is nothing to continue from.
    pub fn match_continue(&self, text: &[char], pos: usize, prior: &Hit) -> Hit {
        let Some(node) = prior.node else {
            panic!(
                "continue-match at position {pos} requires a prefix hit, got {:?}",
                prior
            );
        };
        self.step(node, text[pos], prior.begin, pos)
    }

    /// Match the whole span `text[begin..begin + len]` from the root.
    pub fn match_span(&self, text: &[char], begin: usize, len: usize) -> Hit {
        if len == 0 {
            return Hit::unmatched(begin, begin);
        }
        let mut hit = self.match_one(text, begin);
        for pos in begin + 1..begin + len {
            if !hit.is_prefix() {
                return Hit::unmatched(begin, pos);
            }
            hit = self.match_continue(text, pos, &hit);
        }
        hit
    }

    /// Whether the exact character sequence is a complete word.
    pub fn contains_chars(&self, chars: &[char]) -> bool {
        self.match_span(chars, 0, chars.len()).is_match()
    }

    /// Whether `word` is a complete word.
    pub fn contains(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        self.contains_chars(&chars)
    }

    fn step(&self, node: NodeId, ch: char, begin: usize, pos: usize) -> Hit {
        let Some(&child) = self.nodes[node as usize].children.get(&ch) else {
            return Hit::unmatched(begin, pos);
        };
        let target = &self.nodes[child as usize];
        Hit {
            begin,
            end: pos,
            matched: target.complete,
            node: (!target.children.is_empty()).then_some(child),
        }
    }
}

/// Match state threaded through successive single-character lookups.
///
/// `begin` and `end` are window positions of the first and last character
/// consumed so far. A hit that is neither a match nor a prefix is dead and
/// should be dropped by whoever holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    begin: usize,
    end: usize,
    matched: bool,
    /// Node reached so far, kept only while longer words remain possible
    node: Option<NodeId>,
}

impl Hit {
    fn unmatched(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end,
            matched: false,
            node: None,
        }
    }

    /// The characters consumed so far spell a complete word.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// At least one longer word continues the characters consumed so far.
    #[inline]
    pub fn is_prefix(&self) -> bool {
        self.node.is_some()
    }

    #[inline]
    pub fn is_unmatched(&self) -> bool {
        !self.matched && self.node.is_none()
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of characters consumed.
    pub fn len(&self) -> usize {
        self.end - self.begin + 1
    }
}
