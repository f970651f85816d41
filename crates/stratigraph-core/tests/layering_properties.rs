//! Integration test: layering properties over the public pipeline
//! (ImportIndex → GraphBuilder → stratify → Report).

use stratigraph_core::{
    stratify, AggregationSet, BuildOptions, DependencyGraph, GraphBuilder, ImportIndex,
    PackageEdge, PackageResolver, Report,
};

fn graph_of(edges: &[(&str, &str)]) -> DependencyGraph {
    let mut g = DependencyGraph::new();
    for (from, to) in edges {
        g.add_edge(PackageEdge::new(*from, *to, 1));
    }
    g
}

// ── Structural properties ──

#[test]
fn graph_without_edges_is_one_complete_layer() {
    let mut g = DependencyGraph::new();
    for n in ["x", "y", "z"] {
        g.add_node(n);
    }
    let r = stratify(&g);
    assert_eq!(r.layers.len(), 1);
    assert_eq!(r.layers[0].len(), 3);
    assert_eq!(r.percentage, 100);
}

#[test]
fn acyclic_graph_respects_edge_direction() {
    let edges = [
        ("web", "service"),
        ("web", "model"),
        ("service", "repo"),
        ("service", "model"),
        ("repo", "model"),
        ("batch", "repo"),
        ("model", "util"),
    ];
    let g = graph_of(&edges);
    let r = stratify(&g);

    assert!(r.unresolved.is_empty());
    assert_eq!(r.settled_count(), g.node_count());
    for (from, to) in edges {
        let lf = r.layer_of(from).expect("from is layered");
        let lt = r.layer_of(to).expect("to is layered");
        assert!(lt < lf, "{to} (layer {lt}) must be below {from} (layer {lf})");
    }
}

#[test]
fn two_node_cycle_makes_no_progress() {
    let r = stratify(&graph_of(&[("A", "B"), ("B", "A")]));
    assert!(r.layers[0].is_empty());
    assert_eq!(r.unresolved.len(), 2);
    assert_eq!(r.percentage, 0);
    assert!(!Report::new(&r).verdict());
}

#[test]
fn chain_example_layers() {
    let r = stratify(&graph_of(&[("A", "B"), ("B", "C")]));
    assert_eq!(r.layer_of("C"), Some(0));
    assert_eq!(r.layer_of("B"), Some(1));
    assert_eq!(r.layer_of("A"), Some(2));
    assert!(r.unresolved.is_empty());
    assert_eq!(r.percentage, 100);
}

#[test]
fn repeated_stratification_is_identical() {
    let g = graph_of(&[("A", "B"), ("B", "C"), ("C", "A"), ("D", "A"), ("E", "F")]);
    let first = stratify(&g);
    let second = stratify(&g);
    assert_eq!(first, second);
}

// ── Resolution properties ──

#[test]
fn aggregation_collapses_subpackages() {
    let resolver = PackageResolver::new(&AggregationSet::new(["com.acme"]));
    assert_eq!(resolver.resolve("com.acme.sub.x.Widget"), "com.acme");
}

#[test]
fn same_package_imports_never_form_self_edge() {
    let mut index = ImportIndex::new();
    index.add_import("com.acme.Alpha", "com.acme.Beta");
    index.add_import("com.acme.Beta", "com.acme.Alpha");

    let resolver = PackageResolver::new(&AggregationSet::default());
    let g = GraphBuilder::new(&index, &resolver, BuildOptions::default()).build();

    assert!(g.contains("com.acme"));
    assert!(g.edges().all(|e| e.from != e.to));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn full_pipeline_reports_cycle_between_packages() {
    let mut index = ImportIndex::new();
    index.add_import("com.acme.service.OrderService", "com.acme.repo.OrderRepo");
    index.add_import("com.acme.repo.OrderRepo", "com.acme.service.Callback");
    index.add_import("com.acme.repo.OrderRepo", "com.acme.model.Order");
    index.declare("com.acme.model.Order");

    let resolver = PackageResolver::new(&AggregationSet::default());
    let g = GraphBuilder::new(&index, &resolver, BuildOptions::default()).build();
    let report = Report::new(&stratify(&g));

    assert!(!report.verdict());
    assert_eq!(report.layers[0], vec!["com.acme.model".to_string()]);
    assert_eq!(
        report.cycles,
        vec![vec![
            "com.acme.repo".to_string(),
            "com.acme.service".to_string()
        ]]
    );
    assert_eq!(report.percentage, 33);
}
