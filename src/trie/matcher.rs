use std::collections::BTreeSet;

use super::{Graph, NodeId, ROOT};

pub(crate) struct Found<'a> {
    pub end: usize,
    pub value: usize,
    // (label, start, end)
    pub captures: Vec<(&'a str, usize, usize)>,
}

pub(crate) struct Matcher<'a, V> {
    graph: &'a Graph<V>,
}

impl<'a, V> Matcher<'a, V> {
    pub fn new(graph: &'a Graph<V>) -> Self {
        Matcher { graph }
    }

    pub fn execute(&self, str: &str) -> Option<Found<'a>> {
        let mut id = ROOT;
        let mut sp = 0;
        let mut captures = Vec::new();

        // (end, value, number of captures at that point)
        let mut last = None;

        // nodes entered at `sp` through groups that consumed nothing
        let mut stalled: BTreeSet<NodeId> = BTreeSet::new();

        loop {
            let node = &self.graph.nodes[id];
            if let Some(value) = node.value {
                last = Some((sp, value, captures.len()));
            }

            let rest = &str[sp..];
            if let Some(c) = rest.chars().next() {
                if let Some(next_id) = node.edges.get(&c) {
                    id = *next_id;
                    sp += c.len_utf8();
                    stalled.clear();
                    continue;
                }
            }

            stalled.insert(id);

            // the first group that matches wins, even if a later one would
            // have led to a longer overall match
            let hop = node.groups.iter().find_map(|r| {
                let found = Matcher::new(r.group.as_ref()).execute(rest)?;
                if found.end == 0 && stalled.contains(&r.next) {
                    return None;
                }
                Some((r, found))
            });

            match hop {
                Some((r, found)) => {
                    if let Some(label) = &r.label {
                        captures.push((label.as_str(), sp, sp + found.end));
                    }
                    captures.extend(
                        found
                            .captures
                            .into_iter()
                            .map(|(label, start, end)| (label, sp + start, sp + end)),
                    );

                    if found.end > 0 {
                        stalled.clear();
                    }
                    sp += found.end;
                    id = r.next;
                }
                None => break,
            }
        }

        last.map(|(end, value, count)| {
            captures.truncate(count);
            Found {
                end,
                value,
                captures,
            }
        })
    }
}
