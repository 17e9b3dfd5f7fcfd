//! Sorted list of lexemes waiting to be handed to the caller.
//!
//! A doubly linked list whose nodes live in an arena and link to each other
//! by slot index. Removed slots go on a free list and are reused, so one
//! session allocates its slots once and recycles them across scan passes.

use super::lexeme::Lexeme;
use std::cmp::Ordering;

type SlotId = usize;

#[derive(Debug)]
struct Slot {
    lexeme: Option<Lexeme>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Lexemes ordered by absolute begin, longer first on ties, with no two
/// entries sharing the same span.
#[derive(Debug, Default)]
pub struct PendingList {
    slots: Vec<Slot>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl PendingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert in sorted position. Returns `false` if a lexeme with the same
    /// span is already pending.
    ///
    /// The walk starts from whichever end is closer in absolute position.
    pub fn insert(&mut self, lexeme: Lexeme) -> bool {
        let (Some(head), Some(tail)) = (self.head, self.tail) else {
            let id = self.alloc(lexeme);
            self.head = Some(id);
            self.tail = Some(id);
            return true;
        };

        let from_head = lexeme.abs_begin().saturating_sub(self.get(head).abs_begin())
            < self.get(tail).abs_begin().saturating_sub(lexeme.abs_begin());

        if from_head {
            let mut cursor = Some(head);
            while let Some(id) = cursor {
                match lexeme.position_cmp(self.get(id)) {
                    Ordering::Equal => return false,
                    Ordering::Less => {
                        self.link_before(id, lexeme);
                        return true;
                    }
                    Ordering::Greater => cursor = self.slots[id].next,
                }
            }
            self.link_after(tail, lexeme);
        } else {
            let mut cursor = Some(tail);
            while let Some(id) = cursor {
                match lexeme.position_cmp(self.get(id)) {
                    Ordering::Equal => return false,
                    Ordering::Greater => {
                        self.link_after(id, lexeme);
                        return true;
                    }
                    Ordering::Less => cursor = self.slots[id].prev,
                }
            }
            self.link_before(head, lexeme);
        }
        true
    }

    pub fn peek_first(&self) -> Option<&Lexeme> {
        self.head.map(|id| self.get(id))
    }

    pub fn peek_last(&self) -> Option<&Lexeme> {
        self.tail.map(|id| self.get(id))
    }

    pub fn pop_first(&mut self) -> Option<Lexeme> {
        self.head.map(|id| self.unlink(id))
    }

    pub fn pop_last(&mut self) -> Option<Lexeme> {
        self.tail.map(|id| self.unlink(id))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Drop every lexeme whose span is contained in its neighbour's.
    ///
    /// Walks the list pairwise. When two neighbours overlap the shorter one is
    /// removed and the survivor is compared with the entry after it, so a long
    /// lexeme absorbs a whole run of contained ones. Partially intersecting
    /// lexemes are all kept. Returns the number of lexemes removed.
    pub fn exclude_overlaps(&mut self) -> usize {
        let mut removed = 0;
        let mut cursor = self.head;
        while let Some(current) = cursor {
            let Some(next) = self.slots[current].next else {
                break;
            };
            let (a, b) = (self.get(current), self.get(next));
            if a.overlaps(b) {
                if b.length() <= a.length() {
                    self.unlink(next);
                } else {
                    self.unlink(current);
                    cursor = Some(next);
                }
                removed += 1;
            } else {
                cursor = Some(next);
            }
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lexeme> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let id = cursor?;
            cursor = self.slots[id].next;
            Some(self.get(id))
        })
    }

    fn get(&self, id: SlotId) -> &Lexeme {
        self.slots[id]
            .lexeme
            .as_ref()
            .unwrap_or_else(|| panic!("pending slot {id} is linked but empty"))
    }

    fn alloc(&mut self, lexeme: Lexeme) -> SlotId {
        self.len += 1;
        let slot = Slot {
            lexeme: Some(lexeme),
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = slot;
                id
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }

    fn link_before(&mut self, at: SlotId, lexeme: Lexeme) {
        let id = self.alloc(lexeme);
        let prev = self.slots[at].prev;
        self.slots[id].prev = prev;
        self.slots[id].next = Some(at);
        self.slots[at].prev = Some(id);
        match prev {
            Some(p) => self.slots[p].next = Some(id),
            None => self.head = Some(id),
        }
    }

    fn link_after(&mut self, at: SlotId, lexeme: Lexeme) {
        let id = self.alloc(lexeme);
        let next = self.slots[at].next;
        self.slots[id].prev = Some(at);
        self.slots[id].next = next;
        self.slots[at].next = Some(id);
        match next {
            Some(n) => self.slots[n].prev = Some(id),
            None => self.tail = Some(id),
        }
    }

    fn unlink(&mut self, id: SlotId) -> Lexeme {
        let (prev, next) = (self.slots[id].prev, self.slots[id].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        let slot = &mut self.slots[id];
        slot.prev = None;
        slot.next = None;
        self.free.push(id);
        self.len -= 1;
        slot.lexeme
            .take()
            .unwrap_or_else(|| panic!("pending slot {id} is linked but empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::LexemeType;

    fn word(begin: usize, length: usize) -> Lexeme {
        Lexeme::new(0, begin, length, LexemeType::NormalWord)
    }

    fn spans(list: &PendingList) -> Vec<(usize, usize)> {
        list.iter().map(|l| (l.abs_begin(), l.length())).collect()
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut list = PendingList::new();
        for (begin, length) in [(5, 2), (0, 2), (0, 7), (2, 2), (4, 3), (9, 1), (3, 1)] {
            assert!(list.insert(word(begin, length)));
        }
        assert_eq!(
            spans(&list),
            vec![(0, 7), (0, 2), (2, 2), (3, 1), (4, 3), (5, 2), (9, 1)]
        );
        assert_eq!(list.len(), 7);
    }

    #[test]
    fn test_insert_rejects_same_span() {
        let mut list = PendingList::new();
        assert!(list.insert(Lexeme::new(0, 7, 4, LexemeType::Number)));
        assert!(!list.insert(Lexeme::new(0, 7, 4, LexemeType::LatinToken)));
        assert_eq!(list.len(), 1);
        assert_eq!(list.peek_first().map(|l| l.kind()), Some(LexemeType::Number));
    }

    #[test]
    fn test_pop_both_ends() {
        let mut list = PendingList::new();
        list.insert(word(3, 1));
        list.insert(word(1, 1));
        list.insert(word(2, 1));
        assert_eq!(list.peek_last().map(Lexeme::begin), Some(3));
        assert_eq!(list.pop_first().map(|l| l.begin()), Some(1));
        assert_eq!(list.pop_last().map(|l| l.begin()), Some(3));
        assert_eq!(list.pop_first().map(|l| l.begin()), Some(2));
        assert!(list.pop_first().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = PendingList::new();
        for round in 0..10 {
            list.insert(word(round, 2));
            list.insert(word(round, 1));
            list.pop_first();
            list.pop_first();
        }
        assert!(list.slots.len() <= 2);
    }

    #[test]
    fn test_exclude_overlaps() {
        // 疑是银河落九天 with all its dictionary sub-words
        let mut list = PendingList::new();
        for (begin, length) in [(0, 2), (2, 2), (4, 3), (5, 2), (0, 7)] {
            list.insert(word(begin, length));
        }
        assert_eq!(list.exclude_overlaps(), 4);
        assert_eq!(spans(&list), vec![(0, 7)]);
    }

    #[test]
    fn test_exclude_keeps_partial_overlaps() {
        // 一头小毛驴: 小毛 and 毛驴 only intersect
        let mut list = PendingList::new();
        for (begin, length) in [(0, 2), (2, 2), (3, 2), (3, 1)] {
            list.insert(word(begin, length));
        }
        list.exclude_overlaps();
        assert_eq!(spans(&list), vec![(0, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_exclude_is_idempotent() {
        let mut list = PendingList::new();
        for (begin, length) in [(0, 3), (0, 2), (1, 2), (2, 4), (3, 1), (6, 1)] {
            list.insert(word(begin, length));
        }
        list.exclude_overlaps();
        let once = spans(&list);
        assert_eq!(list.exclude_overlaps(), 0);
        assert_eq!(spans(&list), once);
    }
}
