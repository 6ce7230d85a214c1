use crate::repository::TaskRepository;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Precedence graph over the repository: one node per task code, one edge per
/// `blocks` entry whose target is present. Dangling targets are skipped.
pub struct DependencyDag {
    pub graph: DiGraph<String, ()>,
    pub code_to_index: HashMap<String, NodeIndex>,
}

impl DependencyDag {
    pub fn build(repository: &TaskRepository) -> Self {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut code_to_index: HashMap<String, NodeIndex> = HashMap::new();

        for code in repository.codes_in_order() {
            let node_ix = graph.add_node(code.to_string());
            code_to_index.insert(code.to_string(), node_ix);
        }

        // Edges point blocker -> blocked
        for task in repository.tasks() {
            let u = code_to_index[&task.code];
            for blocked in &task.blocks {
                if let Some(&v) = code_to_index.get(blocked) {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Self {
            graph,
            code_to_index,
        }
    }

    /// Topological feasibility check. Returns the code of a task on a
    /// dependency cycle, or `None` when every task can eventually be scheduled.
    pub fn find_cycle(&self) -> Option<String> {
        match toposort(&self.graph, None) {
            Ok(_) => None,
            Err(cycle) => Some(self.graph[cycle.node_id()].clone()),
        }
    }
}
