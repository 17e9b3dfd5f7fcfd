//! Ambiguity tree over the lexemes of one query phrase.
//!
//! The phrase's lexeme stream (ordered by begin, longer first) is folded into
//! a chain of trunk branches. Lexemes that start inside a trunk's span are
//! alternatives of one another and become that trunk's children; a lexeme
//! starting past the span opens the next trunk. Turned into a query, trunks
//! are ANDed and the alternatives under a trunk are ORed, so a document
//! matches if it holds the compound phrase or any consistent decomposition of
//! it.

use super::node::QueryNode;
use crate::segment::Lexeme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    /// The lexeme overlaps this branch's anchor
    Refuse,
    /// The lexeme belongs under this branch
    Adopt,
    /// The lexeme starts past this branch; pass it to the next trunk
    HandOver,
}

/// Node of the ambiguity tree.
///
/// The root is anchor-less. Every other branch is anchored at one lexeme.
#[derive(Debug, Default)]
pub struct QueryBranch {
    anchor: Option<Lexeme>,
    /// Largest absolute end among the anchor and adopted lexemes
    boundary: usize,
    children: Vec<QueryBranch>,
    next: Option<Box<QueryBranch>>,
}

impl QueryBranch {
    /// Empty anchor-less root.
    pub fn root() -> Self {
        Self::default()
    }

    fn anchored(lexeme: &Lexeme) -> Self {
        Self {
            boundary: lexeme.abs_end(),
            anchor: Some(lexeme.clone()),
            children: Vec::new(),
            next: None,
        }
    }

    /// Build a tree from a lexeme stream.
    pub fn from_lexemes<'a, I>(lexemes: I) -> Self
    where
        I: IntoIterator<Item = &'a Lexeme>,
    {
        let mut root = Self::root();
        for lexeme in lexemes {
            root.accept(lexeme);
        }
        root
    }

    pub fn anchor(&self) -> Option<&Lexeme> {
        self.anchor.as_ref()
    }

    pub fn boundary(&self) -> usize {
        self.boundary
    }

    pub fn children(&self) -> &[QueryBranch] {
        &self.children
    }

    /// The next trunk to the right.
    pub fn next(&self) -> Option<&QueryBranch> {
        self.next.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.children.is_empty() && self.next.is_none()
    }

    /// Offer `lexeme` to this branch.
    ///
    /// Returns `false` if the lexeme starts inside this branch's anchor, which
    /// a well-ordered lexeme stream never produces at the root.
    pub fn accept(&mut self, lexeme: &Lexeme) -> bool {
        let mut branch = self;
        loop {
            match branch.decide(lexeme) {
                Decision::Refuse => return false,
                Decision::Adopt => {
                    branch.adopt(lexeme);
                    return true;
                }
                Decision::HandOver => {
                    branch = branch.next.get_or_insert_with(Box::default).as_mut();
                }
            }
        }
    }

    fn decide(&self, lexeme: &Lexeme) -> Decision {
        let begin = lexeme.abs_begin();
        match &self.anchor {
            None if self.boundary > 0 && begin >= self.boundary => Decision::HandOver,
            None => Decision::Adopt,
            Some(anchor) if begin < anchor.abs_end() => Decision::Refuse,
            Some(_) if begin < self.boundary => Decision::Adopt,
            Some(_) => Decision::HandOver,
        }
    }

    /// The first child that accepts the lexeme keeps it; a new alternative is
    /// opened only when all of them refuse it. Each lexeme lands in exactly
    /// one place, so the tree grows linearly with the stream.
    fn adopt(&mut self, lexeme: &Lexeme) {
        let taken = self.children.iter_mut().any(|child| child.accept(lexeme));
        if !taken {
            self.children.push(Self::anchored(lexeme));
        }
        self.boundary = self.boundary.max(lexeme.abs_end());
    }

    /// Clauses of this branch and the trunks after it, all of which must hold.
    pub fn to_queries(&self, field: &str) -> Vec<QueryNode> {
        let mut queries = Vec::new();
        let mut branch = Some(self);
        while let Some(current) = branch {
            if let Some(anchor) = &current.anchor {
                queries.push(QueryNode::term(field, anchor.text()));
            }
            let alternatives: Vec<QueryNode> = current
                .children
                .iter()
                .map(|child| QueryNode::all(child.to_queries(field)))
                .filter(|query| !query.is_empty())
                .collect();
            if !alternatives.is_empty() {
                queries.push(QueryNode::any(alternatives));
            }
            branch = current.next.as_deref();
        }
        queries
    }

    /// The whole tree as one query; [`QueryNode::Empty`] for an empty tree.
    pub fn to_query(&self, field: &str) -> QueryNode {
        QueryNode::all(self.to_queries(field))
    }
}

impl Drop for QueryBranch {
    // Unlink the trunk chain iteratively so long phrases cannot overflow the stack
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut branch) = next {
            next = branch.next.take();
        }
    }
}
