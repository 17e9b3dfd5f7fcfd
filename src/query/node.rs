use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boolean query AST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNode {
    /// Exact term in one field
    Term { field: String, text: String },
    /// Boolean AND (all must match)
    And(Vec<QueryNode>),
    /// Boolean OR (any can match)
    Or(Vec<QueryNode>),
    /// Boolean NOT (exclude matches)
    Not(Box<QueryNode>),
    /// Matches nothing
    Empty,
}

impl QueryNode {
    pub fn term(field: &str, text: &str) -> Self {
        QueryNode::Term {
            field: field.to_string(),
            text: text.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, QueryNode::Empty)
    }

    /// Combine clauses that must all hold. A single clause is returned as is.
    pub fn all(mut clauses: Vec<QueryNode>) -> Self {
        match clauses.len() {
            0 => QueryNode::Empty,
            1 => clauses.pop().unwrap_or(QueryNode::Empty),
            _ => QueryNode::And(clauses),
        }
    }

    /// Combine alternatives. A single alternative is returned as is.
    pub fn any(mut clauses: Vec<QueryNode>) -> Self {
        match clauses.len() {
            0 => QueryNode::Empty,
            1 => clauses.pop().unwrap_or(QueryNode::Empty),
            _ => QueryNode::Or(clauses),
        }
    }

    /// Every term text in the query, left to right.
    pub fn terms(&self) -> Vec<&str> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, terms: &mut Vec<&'a str>) {
        match self {
            QueryNode::Term { text, .. } => terms.push(text),
            QueryNode::And(nodes) | QueryNode::Or(nodes) => {
                for node in nodes {
                    node.collect_terms(terms);
                }
            }
            QueryNode::Not(node) => node.collect_terms(terms),
            QueryNode::Empty => {}
        }
    }

    /// Evaluate against a document described by `has_term(field, text)`.
    ///
    /// An AND made only of negations matches nothing, like a purely
    /// negative boolean query in a search index.
    pub fn matches<F>(&self, has_term: &F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        match self {
            QueryNode::Term { field, text } => has_term(field, text),
            QueryNode::And(nodes) => {
                nodes.iter().any(|n| !matches!(n, QueryNode::Not(_)))
                    && nodes.iter().all(|n| n.matches(has_term))
            }
            QueryNode::Or(nodes) => nodes.iter().any(|n| n.matches(has_term)),
            QueryNode::Not(node) => !node.matches(has_term),
            QueryNode::Empty => false,
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, nodes: &[QueryNode], op: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, node) in nodes.iter().enumerate() {
                if i > 0 {
                    write!(f, " {op} ")?;
                }
                write!(f, "{node}")?;
            }
            f.write_str(")")
        }

        match self {
            QueryNode::Term { field, text } => write!(f, "{field}:{text}"),
            QueryNode::And(nodes) => join(f, nodes, "AND"),
            QueryNode::Or(nodes) => join(f, nodes, "OR"),
            QueryNode::Not(node) => write!(f, "NOT {node}"),
            QueryNode::Empty => f.write_str("<empty>"),
        }
    }
}

/// How a per-field clause takes part in a multi-field query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// Required
    Must,
    /// Optional; at least one is required when there is no MUST clause
    #[default]
    Should,
    /// Excluded
    MustNot,
}

impl FromStr for Occur {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "must" => Ok(Occur::Must),
            "should" => Ok(Occur::Should),
            "must_not" | "not" => Ok(Occur::MustNot),
            other => Err(format!("unknown occur '{other}' (expected must, should or must-not)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(text: &str) -> QueryNode {
        QueryNode::term("f", text)
    }

    #[test]
    fn test_display() {
        let query = QueryNode::And(vec![
            term("海岸线"),
            QueryNode::Or(vec![term("很"), term("很长")]),
            QueryNode::Not(Box::new(term("短"))),
        ]);
        assert_eq!(query.to_string(), "(f:海岸线 AND (f:很 OR f:很长) AND NOT f:短)");
        assert_eq!(QueryNode::Empty.to_string(), "<empty>");
    }

    #[test]
    fn test_all_and_any_collapse_single_clause() {
        assert_eq!(QueryNode::all(vec![term("a")]), term("a"));
        assert_eq!(QueryNode::any(vec![term("a")]), term("a"));
        assert!(QueryNode::all(Vec::new()).is_empty());
        assert!(matches!(
            QueryNode::any(vec![term("a"), term("b")]),
            QueryNode::Or(_)
        ));
    }

    #[test]
    fn test_terms() {
        let query = QueryNode::Or(vec![
            term("关键字"),
            QueryNode::And(vec![term("关键"), term("字")]),
        ]);
        assert_eq!(query.terms(), vec!["关键字", "关键", "字"]);
    }

    #[test]
    fn test_matches() {
        let query = QueryNode::Or(vec![
            term("飞流直下三千尺"),
            QueryNode::And(vec![term("飞流"), term("三千")]),
        ]);
        let doc = |_: &str, text: &str| text == "飞流" || text == "三千";
        assert!(query.matches(&doc));
        let partial = |_: &str, text: &str| text == "飞流";
        assert!(!query.matches(&partial));

        let negative_only = QueryNode::And(vec![QueryNode::Not(Box::new(term("x")))]);
        assert!(!negative_only.matches(&partial));
        assert!(!QueryNode::Empty.matches(&doc));
    }

    #[test]
    fn test_parse_occur() {
        assert_eq!("must".parse::<Occur>().unwrap(), Occur::Must);
        assert_eq!("MUST-NOT".parse::<Occur>().unwrap(), Occur::MustNot);
        assert_eq!("should".parse::<Occur>().unwrap(), Occur::Should);
        assert!("maybe".parse::<Occur>().is_err());
        assert_eq!(Occur::default(), Occur::Should);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&QueryNode::Or(vec![term("a")])).unwrap();
        assert_eq!(json, r#"{"or":[{"term":{"field":"f","text":"a"}}]}"#);
    }
}
