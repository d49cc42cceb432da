mod build_graph;

pub use build_graph::BuildGraph;
