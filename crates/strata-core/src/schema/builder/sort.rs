use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::schema::app::Entity;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Orders entities so each comes after every entity it depends on.
///
/// Depth-first in declaration order. An edge back into the current path
/// closes a cycle: it is reported and skipped, so the result is always a
/// total order containing every entity exactly once.
pub(crate) fn sort(entities: Vec<Entity>, diagnostics: &mut Diagnostics) -> Vec<Entity> {
    let order = {
        let mut sort = TopoSort {
            entities: &entities,
            positions: entities
                .iter()
                .enumerate()
                .map(|(index, entity)| (entity.name.as_str(), index))
                .collect(),
            marks: vec![Mark::Unvisited; entities.len()],
            order: Vec::with_capacity(entities.len()),
            diagnostics,
        };

        for index in 0..entities.len() {
            sort.visit(index);
        }

        sort.order
    };

    let mut rank = vec![0; order.len()];
    for (position, index) in order.into_iter().enumerate() {
        rank[index] = position;
    }

    let mut entities: Vec<_> = entities.into_iter().enumerate().collect();
    entities.sort_by_key(|(index, _)| rank[*index]);
    entities.into_iter().map(|(_, entity)| entity).collect()
}

struct TopoSort<'a> {
    entities: &'a [Entity],
    positions: HashMap<&'a str, usize>,
    marks: Vec<Mark>,
    order: Vec<usize>,
    diagnostics: &'a mut Diagnostics,
}

impl TopoSort<'_> {
    /// Visits `root` and everything it depends on. Each stack frame holds an
    /// entity and the position of its next dependency to follow.
    fn visit(&mut self, root: usize) {
        if self.marks[root] != Mark::Unvisited {
            return;
        }

        self.marks[root] = Mark::Visiting;
        let mut stack = vec![(root, 0)];

        let entities = self.entities;
        while let Some((index, position)) = stack.pop() {
            let entity = &entities[index];

            let Some(dependency) = entity.depends_on.get(position) else {
                self.marks[index] = Mark::Done;
                self.order.push(index);
                continue;
            };

            stack.push((index, position + 1));

            // Unknown names were filtered out while building `depends_on`
            let Some(&next) = self.positions.get(dependency.as_str()) else {
                continue;
            };

            match self.marks[next] {
                Mark::Unvisited => {
                    self.marks[next] = Mark::Visiting;
                    stack.push((next, 0));
                }
                Mark::Visiting => self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::DependencyCycle,
                        &entity.name,
                        format!(
                            "dependency on `{dependency}` closes a cycle and was ignored for ordering"
                        ),
                    )
                    .target(dependency)
                    .fix("make one side of the relation optional or drop one of the references"),
                ),
                Mark::Done => {}
            }
        }
    }
}
