use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use self::{builder::Builder, matcher::Matcher};
use crate::error::{Error, Result};
use crate::parser::{is_identifier, Parser};

mod builder;
mod matcher;


/// A set of patterns compiled into one shared transition graph.
///
/// Patterns are written in a small regular-expression dialect: literal
/// characters, `|` alternation, `?`/`+`/`*` on the preceding unit, character
/// classes such as `[a-z0-9]`, parenthesized groups and references to
/// learned groups as `{NAME}` or `{label:NAME}`.
///
/// ```
/// use mathconv_rs::Trie;
///
/// let mut trie = Trie::new();
/// trie.learn("FLOAT", "[0-9]+(.[0-9]+)").unwrap();
/// trie.insert("a{FLOAT}?", 1).unwrap();
///
/// let m = trie.longest_match("a4.2 + b").unwrap();
/// assert_eq!((m.text, *m.value), ("a4.2", 1));
/// ```
pub struct Trie<V> {
    graph: Graph<V>,
    known: HashMap<String, Arc<Group>>,
    inline: HashMap<String, Arc<Group>>,
    patterns: HashSet<String>,
}

impl<V> Trie<V> {
    pub fn new() -> Trie<V> {
        Trie {
            graph: Graph::new(),
            known: HashMap::new(),
            inline: HashMap::new(),
            patterns: HashSet::new(),
        }
    }

    /// Compiles `pattern` as a reusable group named `identifier`.
    ///
    /// Nothing becomes matchable by this alone; later patterns refer to the
    /// group as `{identifier}`. Relearning a name only affects patterns
    /// inserted afterwards.
    pub fn learn(&mut self, identifier: &str, pattern: &str) -> Result<()> {
        if !is_identifier(identifier) {
            return Err(Error::UnresolvableGroup(identifier.to_owned()));
        }

        let syntax = Parser::parse(pattern)?;
        let group = builder::compile_group(&syntax, &self.known, &mut self.inline)?;

        if self
            .known
            .insert(identifier.to_owned(), Arc::new(group))
            .is_some()
        {
            // cached inline groups may have been compiled against the old meaning
            self.inline.clear();
        }
        Ok(())
    }

    pub fn define(&mut self, identifier: &str, pattern: &str) -> Result<()> {
        self.learn(identifier, pattern)
    }

    pub fn is_known(&self, identifier: &str) -> bool {
        self.known.contains_key(identifier)
    }

    /// Adds `pattern` with `value` at every node where it can end.
    ///
    /// A node that already carries a value keeps it. The trie is left
    /// untouched when the pattern is rejected.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<()> {
        if self.patterns.contains(pattern) {
            return Err(Error::TautologyInRegularExpression(pattern.to_owned()));
        }

        let syntax = Parser::parse(pattern)?;
        builder::check(&syntax, &self.known).map_err(|e| match e {
            Error::TautologyInRegularExpression(_) => {
                Error::TautologyInRegularExpression(pattern.to_owned())
            }
            e => e,
        })?;

        let mut builder = Builder::new(&mut self.graph, &self.known, &mut self.inline);
        builder.insert(&syntax, value)?;

        self.patterns.insert(pattern.to_owned());
        Ok(())
    }

    /// Returns the longest prefix of `input` that ends on a node carrying a
    /// value, together with that value.
    pub fn longest_match<'t, 'i>(&'t self, input: &'i str) -> Option<Match<'t, 'i, V>> {
        let found = Matcher::new(&self.graph).execute(input)?;

        let captures = found
            .captures
            .into_iter()
            .map(|(label, start, end)| Capture {
                label,
                text: &input[start..end],
                start,
                end,
            })
            .collect();

        Some(Match {
            text: &input[..found.end],
            value: &self.graph.values[found.value],
            captures,
        })
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Trie::new()
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Match<'t, 'i, V> {
    pub text: &'i str,
    pub value: &'t V,
    pub captures: Vec<Capture<'t, 'i>>,
}

/// Input consumed by a labelled group reference such as `{left:NAME}`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Capture<'t, 'i> {
    pub label: &'t str,
    pub text: &'i str,
    pub start: usize,
    pub end: usize,
}

pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

pub(crate) struct Graph<V> {
    pub nodes: Vec<Node>,
    pub values: Vec<V>,
}

/// Graph of a parenthesized or learned sub-pattern.
pub(crate) type Group = Graph<()>;

impl<V> Graph<V> {
    pub fn new() -> Self {
        Graph {
            nodes: vec![Node::default()],
            values: vec![],
        }
    }

    pub fn add_node(&mut self) -> NodeId {
        self.nodes.push(Node::default());
        self.nodes.len() - 1
    }

    pub fn matches_empty(&self) -> bool {
        self.nodes[ROOT].value.is_some()
    }
}

#[derive(Default)]
pub(crate) struct Node {
    pub edges: BTreeMap<char, NodeId>,
    pub groups: Vec<GroupRef>,
    pub value: Option<usize>,
}

pub(crate) struct GroupRef {
    pub group: Arc<Group>,
    pub label: Option<String>,
    pub next: NodeId,
}
