use super::branch::QueryBranch;
use super::node::{Occur, QueryNode};
use crate::config::{AnalyzerConfig, DEFAULT_QUERY_CACHE_LIMIT};
use crate::dict::Dictionary;
use crate::segment::{Segmenter, StrSource};
use crate::utils::strip_spaces;
use ahash::AHashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{trace, warn};

/// Builds boolean queries from free-text phrases.
///
/// Ambiguity trees are cached per phrase and shared between threads. When the
/// cache grows past its limit it is cleared as a whole.
pub struct QueryBuilder {
    dictionary: Arc<Dictionary>,
    longest_match: bool,
    cache: RwLock<AHashMap<String, Arc<QueryBranch>>>,
    cache_limit: usize,
}

impl QueryBuilder {
    pub fn new(dictionary: Arc<Dictionary>, longest_match: bool) -> Self {
        Self {
            dictionary,
            longest_match,
            cache: RwLock::new(AHashMap::new()),
            cache_limit: DEFAULT_QUERY_CACHE_LIMIT,
        }
    }

    pub fn from_config(dictionary: Arc<Dictionary>, config: &AnalyzerConfig) -> Self {
        Self::new(dictionary, config.query_longest_match).with_cache_limit(config.query_cache_limit)
    }

    pub fn with_cache_limit(mut self, limit: usize) -> Self {
        self.cache_limit = limit;
        self
    }

    /// Number of cached phrase trees.
    pub fn cache_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Ambiguity tree of `phrase`, with whitespace removed first.
    pub fn branch_for(&self, phrase: &str) -> Arc<QueryBranch> {
        let key = strip_spaces(phrase);
        if let Some(branch) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(branch);
        }

        let branch = Arc::new(self.segment_phrase(&key));

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if cache.len() > self.cache_limit {
            trace!(entries = cache.len(), "clearing query cache");
            cache.clear();
        }
        Arc::clone(cache.entry(key).or_insert(branch))
    }

    fn segment_phrase(&self, phrase: &str) -> QueryBranch {
        let mut root = QueryBranch::root();
        let mut segmenter = Segmenter::new(
            StrSource::new(phrase),
            Arc::clone(&self.dictionary),
            self.longest_match,
        );
        loop {
            match segmenter.next_lexeme() {
                Ok(Some(lexeme)) => {
                    root.accept(&lexeme);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(phrase, error = %e, "failed to segment query phrase");
                    break;
                }
            }
        }
        root
    }

    /// Query for `phrase` in one field. A blank phrase yields
    /// [`QueryNode::Empty`].
    pub fn build(&self, field: &str, phrase: &str) -> QueryNode {
        if phrase.trim().is_empty() {
            return QueryNode::Empty;
        }
        self.branch_for(phrase).to_query(field)
    }

    /// The same phrase searched in several fields, any of which may match.
    pub fn build_multi_field<F: AsRef<str>>(&self, fields: &[F], phrase: &str) -> QueryNode {
        self.build_clauses(fields, &[phrase], &[])
    }

    /// Combine one clause per field.
    ///
    /// Field `i` is searched for `phrases[i]` with `occurs[i]`. A missing
    /// phrase repeats the previous one and a missing occur repeats the
    /// previous one (SHOULD to begin with). MUST clauses are required and
    /// MUST_NOT clauses excluded; SHOULD clauses form an alternative that is
    /// required only when there is no MUST clause.
    pub fn build_clauses<F, P>(&self, fields: &[F], phrases: &[P], occurs: &[Occur]) -> QueryNode
    where
        F: AsRef<str>,
        P: AsRef<str>,
    {
        let mut must = Vec::new();
        let mut should = Vec::new();
        let mut must_not = Vec::new();

        let mut occur = Occur::Should;
        let mut phrase = "";
        for (i, field) in fields.iter().enumerate() {
            occur = occurs.get(i).copied().unwrap_or(occur);
            phrase = phrases.get(i).map(|p| p.as_ref()).unwrap_or(phrase);

            let field = field.as_ref();
            if field.is_empty() {
                continue;
            }
            let part = self.build(field, phrase);
            if part.is_empty() {
                continue;
            }
            match occur {
                Occur::Must => must.push(part),
                Occur::Should => should.push(part),
                Occur::MustNot => must_not.push(part),
            }
        }

        combine(must, should, must_not)
    }
}

fn combine(must: Vec<QueryNode>, should: Vec<QueryNode>, must_not: Vec<QueryNode>) -> QueryNode {
    let mut clauses = if must.is_empty() {
        if should.is_empty() {
            // Nothing positive left to match
            return QueryNode::Empty;
        }
        vec![QueryNode::any(should)]
    } else {
        must
    };
    clauses.extend(must_not.into_iter().map(|q| QueryNode::Not(Box::new(q))));
    QueryNode::all(clauses)
}
