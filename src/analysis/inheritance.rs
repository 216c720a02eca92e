//! Inheritance analysis: parent resolution, topological order, ancestor
//! stacks, direct-subclass lists.
//!
//! The traversal is an iterative depth-first walk with an explicit work
//! list; ties are broken by registration order, so the resulting order is
//! stable for a given input tree. Cycles are reported deterministically
//! and leave the classes involved with a partial ancestor chain.

use rustc_hash::FxHashSet;

use crate::base::ClassId;
use crate::model::Model;
use crate::report::{ErrorKind, Reporter};

/// The result of the inheritance walk.
pub(crate) struct Inheritance {
    /// Every class, each after all of its ancestors.
    pub order: Vec<ClassId>,
    /// Resolved parent per class, indexed by `ClassId::index`.
    pub parents: Vec<Option<ClassId>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Unvisited,
    InProgress,
    Done,
}

/// Resolves parents and computes the topological order.
pub(crate) fn compute(model: &Model, rep: &mut Reporter) -> Inheritance {
    let n = model.classes.len();

    let mut parents: Vec<Option<ClassId>> = vec![None; n];
    for i in 0..n {
        let Some(parent_fqn) = model.classes[i].fqsupercname.clone() else {
            continue;
        };
        match model.class_by_fqn(&parent_fqn) {
            Some(pid) => parents[i] = Some(pid),
            None => rep.error(
                ErrorKind::Reference,
                format!(
                    "class {} subclasses unknown class {parent_fqn}",
                    model.classes[i].fqname
                ),
            ),
        }
    }

    let mut state = vec![State::Unvisited; n];
    let mut order = Vec::with_capacity(n);

    for root in 0..n {
        if state[root] != State::Unvisited {
            continue;
        }
        // (node, expanded): a node is pushed once to descend into its
        // parent and once more to emit it post-order.
        let mut work = vec![(root, false)];
        while let Some((node, expanded)) = work.pop() {
            if expanded {
                state[node] = State::Done;
                order.push(ClassId::new(node));
                continue;
            }
            if state[node] == State::Done {
                continue;
            }
            state[node] = State::InProgress;
            work.push((node, true));
            if let Some(pid) = parents[node] {
                match state[pid.index()] {
                    State::Unvisited => work.push((pid.index(), false)),
                    State::InProgress => rep.error(
                        ErrorKind::Cycle,
                        format!(
                            "inheritance cycle: {} subclasses {}, which is an ancestor",
                            model.classes[node].fqname,
                            model.classes[pid.index()].fqname
                        ),
                    ),
                    State::Done => {}
                }
            }
        }
    }

    Inheritance { order, parents }
}

impl Inheritance {
    /// Records each class's ancestors, nearest first. On a cycle the walk
    /// stops at the first repeated class, leaving the partial chain.
    pub(crate) fn assign_stacks(&self, model: &mut Model) {
        for &id in &self.order {
            let mut seen = FxHashSet::default();
            seen.insert(id);
            let mut chain = Vec::new();
            let mut cursor = self.parents[id.index()];
            while let Some(pid) = cursor {
                if !seen.insert(pid) {
                    break;
                }
                chain.push(model.classes[pid.index()].fqname.clone());
                cursor = self.parents[pid.index()];
            }
            model.classes[id.index()].inheritance_stack = chain;
        }
    }

    /// Records the direct subclasses of every class, sorted by name.
    pub(crate) fn assign_subclasses(&self, model: &mut Model) {
        let mut pairs = Vec::new();
        for (i, parent) in self.parents.iter().enumerate() {
            if let Some(pid) = parent {
                pairs.push((*pid, model.classes[i].fqname.clone()));
            }
        }
        for (pid, child_fqname) in pairs {
            model.classes[pid.index()].subclasses.push(child_fqname);
        }
        for class in &mut model.classes {
            class.subclasses.sort();
        }
    }
}
