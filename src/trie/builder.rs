use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::{Graph, Group, GroupRef, NodeId, ROOT};
use crate::error::{Error, Result};
use crate::parser::ast::{Atom, Pattern, Piece};

/// Nodes reachable after the units processed so far.
type Frontier = BTreeSet<NodeId>;

enum Unit {
    Char(char),
    Class(Vec<char>),
    Group {
        group: Arc<Group>,
        label: Option<String>,
    },
}

/// Rejects a root pattern that could end without consuming input, or that
/// refers to a group nobody learned.
pub(crate) fn check(pattern: &Pattern, known: &HashMap<String, Arc<Group>>) -> Result<()> {
    resolve(pattern, known)?;

    if matches_empty(pattern, known) {
        return Err(Error::TautologyInRegularExpression(String::new()));
    }
    Ok(())
}

pub(crate) fn compile_group(
    pattern: &Pattern,
    known: &HashMap<String, Arc<Group>>,
    inline: &mut HashMap<String, Arc<Group>>,
) -> Result<Group> {
    let mut graph = Group::new();

    let mut builder = Builder::new(&mut graph, known, inline);
    builder.insert(pattern, ())?;

    Ok(graph)
}

fn resolve(pattern: &Pattern, known: &HashMap<String, Arc<Group>>) -> Result<()> {
    for piece in pattern.branches.iter().flatten() {
        match &piece.atom {
            Atom::Group(_, inner) => resolve(inner, known)?,
            Atom::Named(_, name) if !known.contains_key(name) => {
                return Err(Error::UnknownNamedGroupInRegularExpression(name.clone()));
            }
            _ => {}
        }
    }
    Ok(())
}

fn matches_empty(pattern: &Pattern, known: &HashMap<String, Arc<Group>>) -> bool {
    pattern.branches.iter().any(|branch| {
        branch.iter().all(|piece| {
            piece.quantifier.is_optional()
                || match &piece.atom {
                    Atom::Char(_) | Atom::Class(_) => false,
                    Atom::Group(_, inner) => matches_empty(inner, known),
                    Atom::Named(_, name) => known.get(name).is_some_and(|g| g.matches_empty()),
                }
        })
    })
}

pub(crate) struct Builder<'a, V> {
    graph: &'a mut Graph<V>,
    known: &'a HashMap<String, Arc<Group>>,
    inline: &'a mut HashMap<String, Arc<Group>>,
}

impl<'a, V> Builder<'a, V> {
    pub fn new(
        graph: &'a mut Graph<V>,
        known: &'a HashMap<String, Arc<Group>>,
        inline: &'a mut HashMap<String, Arc<Group>>,
    ) -> Self {
        Builder {
            graph,
            known,
            inline,
        }
    }

    pub fn insert(&mut self, pattern: &Pattern, value: V) -> Result<()> {
        let ends = self.build_pattern(pattern, &Frontier::from([ROOT]))?;
        self.mark(&ends, value);
        Ok(())
    }

    fn build_pattern(&mut self, pattern: &Pattern, start: &Frontier) -> Result<Frontier> {
        let mut ends = Frontier::new();

        // every branch starts from the same nodes, so alternatives become
        // siblings and share whatever prefix the graph already has
        for branch in pattern.branches.iter() {
            let mut frontier = start.clone();
            for piece in branch.iter() {
                frontier = self.build_piece(piece, &frontier)?;
            }
            ends.extend(frontier);
        }

        Ok(ends)
    }

    fn build_piece(&mut self, piece: &Piece, frontier: &Frontier) -> Result<Frontier> {
        let unit = self.build_unit(&piece.atom)?;

        // nodes that lack the transition all share this one
        let mut fresh = None;

        let mut targets = self.step(&unit, frontier, &mut fresh);

        if piece.quantifier.is_repeatable() {
            loop {
                let again = self.step(&unit, &targets, &mut fresh);
                if again.is_subset(&targets) {
                    break;
                }
                targets.extend(again);
            }
        }

        if piece.quantifier.is_optional() {
            targets.extend(frontier.iter().copied());
        }

        Ok(targets)
    }

    fn build_unit(&mut self, atom: &Atom) -> Result<Unit> {
        let unit = match atom {
            Atom::Char(c) => Unit::Char(*c),
            Atom::Class(items) => Unit::Class(items.iter().flat_map(|item| item.chars()).collect()),
            Atom::Group(source, inner) => {
                let group = match self.inline.get(source) {
                    Some(group) => Arc::clone(group),
                    None => {
                        let group = compile_group(inner, self.known, self.inline)?;
                        let group = Arc::new(group);
                        self.inline.insert(source.clone(), Arc::clone(&group));
                        group
                    }
                };
                Unit::Group { group, label: None }
            }
            Atom::Named(label, name) => {
                let group = self
                    .known
                    .get(name)
                    .ok_or_else(|| Error::UnknownNamedGroupInRegularExpression(name.clone()))?;
                Unit::Group {
                    group: Arc::clone(group),
                    label: label.clone(),
                }
            }
        };
        Ok(unit)
    }

    fn step(&mut self, unit: &Unit, frontier: &Frontier, fresh: &mut Option<NodeId>) -> Frontier {
        let mut targets = Frontier::new();

        for &node_id in frontier.iter() {
            match unit {
                Unit::Char(c) => {
                    targets.insert(self.char_edge(node_id, *c, fresh));
                }
                Unit::Class(chars) => {
                    for c in chars.iter() {
                        targets.insert(self.char_edge(node_id, *c, fresh));
                    }
                }
                Unit::Group { group, label } => {
                    targets.insert(self.group_edge(node_id, group, label, fresh));
                }
            }
        }

        targets
    }

    fn char_edge(&mut self, node_id: NodeId, c: char, fresh: &mut Option<NodeId>) -> NodeId {
        if let Some(next_id) = self.graph.nodes[node_id].edges.get(&c) {
            return *next_id;
        }

        let next_id = self.fresh_node(fresh);
        self.graph.nodes[node_id].edges.insert(c, next_id);
        next_id
    }

    fn group_edge(
        &mut self,
        node_id: NodeId,
        group: &Arc<Group>,
        label: &Option<String>,
        fresh: &mut Option<NodeId>,
    ) -> NodeId {
        let existing = self.graph.nodes[node_id]
            .groups
            .iter()
            .find(|r| Arc::ptr_eq(&r.group, group) && r.label == *label);
        if let Some(r) = existing {
            return r.next;
        }

        let next_id = self.fresh_node(fresh);
        self.graph.nodes[node_id].groups.push(GroupRef {
            group: Arc::clone(group),
            label: label.clone(),
            next: next_id,
        });
        next_id
    }

    fn fresh_node(&mut self, fresh: &mut Option<NodeId>) -> NodeId {
        match *fresh {
            Some(node_id) => node_id,
            None => {
                let node_id = self.graph.add_node();
                *fresh = Some(node_id);
                node_id
            }
        }
    }

    // first come, first served
    fn mark(&mut self, ends: &Frontier, value: V) {
        let open: Vec<NodeId> = ends
            .iter()
            .copied()
            .filter(|id| self.graph.nodes[*id].value.is_none())
            .collect();
        if open.is_empty() {
            return;
        }

        let value_id = self.graph.values.len();
        self.graph.values.push(value);
        for node_id in open {
            self.graph.nodes[node_id].value = Some(value_id);
        }
    }
}
