//! Integration test: Java sources on disk → import index → package graph → layers.

use std::fs;
use std::path::Path;

use stratigraph_core::{
    stratify, AggregationSet, BuildOptions, GraphBuilder, IgnoreSet, PackageResolver, Report,
};
use stratigraph_java::{JavaExtractor, SourceCollector};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    fs::write(path, content).expect("write fixture");
}

/// A small Maven project: web -> service -> model, service uses java.util.
/// Every class has at least one import line, so every package is indexed.
fn layered_project() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let base = tmp.path();
    write(
        base,
        "shop/src/main/java/com/shop/web/OrderController.java",
        "package com.shop.web;\n\nimport com.shop.service.OrderService;\nimport com.shop.model.Order;\nimport java.util.List;\n\npublic class OrderController {}\n",
    );
    write(
        base,
        "shop/src/main/java/com/shop/service/OrderService.java",
        "package com.shop.service;\n\nimport com.shop.model.Order;\nimport java.util.Map;\nimport org.slf4j.Logger;\n\npublic class OrderService {}\n",
    );
    write(
        base,
        "shop/src/main/java/com/shop/model/Order.java",
        "package com.shop.model;\n\nimport java.io.Serializable;\n\npublic class Order {}\n",
    );
    tmp
}

fn analyse(base: &Path, ignore: &IgnoreSet, aggregate: &[&str], only_internal: bool) -> Report {
    let outcome = SourceCollector::new(Box::new(JavaExtractor::new()), ignore.clone())
        .collect(base)
        .expect("scan succeeds");
    let resolver = PackageResolver::new(&AggregationSet::new(aggregate.iter().copied()));
    let options = BuildOptions {
        only_internal,
        ignore: ignore.clone(),
    };
    let graph = GraphBuilder::new(&outcome.index, &resolver, options).build();
    Report::new(&stratify(&graph))
}

#[test]
fn maven_project_is_fully_layered() {
    let tmp = layered_project();
    let report = analyse(tmp.path(), &IgnoreSet::defaults(), &[], false);

    assert!(report.verdict());
    assert_eq!(report.layers.len(), 3);
    assert_eq!(report.layers[0], vec!["com.shop.model".to_string()]);
    assert_eq!(report.layers[2], vec!["com.shop.web".to_string()]);
}

#[test]
fn ignored_jdk_imports_never_reach_the_graph() {
    let tmp = layered_project();
    let ignore = IgnoreSet::new(["java."]);

    for only_internal in [false, true] {
        let outcome = SourceCollector::new(Box::new(JavaExtractor::new()), ignore.clone())
            .collect(tmp.path())
            .expect("scan succeeds");
        assert!(outcome
            .index
            .iter()
            .all(|(_, imports)| imports.iter().all(|i| !i.starts_with("java."))));

        let resolver = PackageResolver::new(&AggregationSet::default());
        let options = BuildOptions {
            only_internal,
            ignore: ignore.clone(),
        };
        let graph = GraphBuilder::new(&outcome.index, &resolver, options).build();
        assert!(graph.edges().all(|e| e.to != "java.util"));
        assert!(!graph.contains("java.util"));
    }
}

#[test]
fn only_internal_drops_third_party_packages() {
    let tmp = layered_project();
    let ignore = IgnoreSet::new(["java."]);

    let all = analyse(tmp.path(), &ignore, &[], false);
    let internal = analyse(tmp.path(), &ignore, &[], true);

    // org.slf4j is a node only when external relations count
    assert_eq!(all.total, 4);
    assert_eq!(internal.total, 3);
}

#[test]
fn package_cycle_is_reported() {
    let tmp = layered_project();
    write(
        tmp.path(),
        "shop/src/main/java/com/shop/model/OrderView.java",
        "package com.shop.model;\n\nimport com.shop.web.OrderController;\n",
    );

    let report = analyse(tmp.path(), &IgnoreSet::defaults(), &[], false);

    assert!(!report.verdict());
    assert_eq!(report.cycles.len(), 1);
    assert_eq!(report.cycles[0].len(), 3);
    let blocked: Vec<&str> = report
        .offending
        .iter()
        .map(|o| o.package.as_str())
        .collect();
    assert_eq!(blocked, vec!["com.shop.model", "com.shop.service", "com.shop.web"]);
}

#[test]
fn aggregation_hides_internal_cycle() {
    let tmp = layered_project();
    write(
        tmp.path(),
        "shop/src/main/java/com/shop/model/OrderView.java",
        "package com.shop.model;\n\nimport com.shop.web.OrderController;\n",
    );

    // Everything collapses into one package, so the cycle disappears
    let report = analyse(tmp.path(), &IgnoreSet::defaults(), &["com.shop"], false);
    assert!(report.verdict());
    assert_eq!(report.total, 1);
}

#[test]
fn context_errors_do_not_abort_the_file() {
    let tmp = TempDir::new().expect("tempdir");
    write(
        tmp.path(),
        "src/a/Main.java",
        "import b.Early;\npackage a;\nimport c.Late;\n",
    );

    let outcome = SourceCollector::new(Box::new(JavaExtractor::new()), IgnoreSet::default())
        .collect(tmp.path())
        .expect("scan succeeds");
    assert_eq!(outcome.stats.context_errors, 1);
    let imports = outcome.index.imports_of("a.Main").expect("declared");
    assert!(imports.contains("c.Late"));
    assert!(!imports.contains("b.Early"));
}

#[test]
fn non_utf8_bytes_are_tolerated() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("src/a/Latin.java");
    fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    fs::write(&path, b"package a;\n// caf\xe9\nimport b.Lib;\n").expect("write fixture");

    let outcome = SourceCollector::new(Box::new(JavaExtractor::new()), IgnoreSet::default())
        .collect(tmp.path())
        .expect("scan succeeds");
    assert_eq!(outcome.stats.files_scanned, 1);
    assert!(outcome
        .index
        .imports_of("a.Latin")
        .is_some_and(|i| i.contains("b.Lib")));
}

/// a <-> b cycle, import-free c, d -> e with import-free e.
fn import_free_project() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let base = tmp.path();
    write(base, "src/a/A.java", "package a;\nimport b.B;\n");
    write(base, "src/b/B.java", "package b;\nimport a.A;\n");
    write(base, "src/c/C.java", "package c;\n\npublic class C {}\n");
    write(base, "src/d/D.java", "package d;\nimport e.E;\n");
    write(base, "src/e/E.java", "package e;\n\npublic class E {}\n");
    tmp
}

fn analyse_internal(base: &Path, declared_classes: bool) -> Report {
    let outcome = SourceCollector::new(Box::new(JavaExtractor::new()), IgnoreSet::default())
        .with_declared_classes(declared_classes)
        .collect(base)
        .expect("scan succeeds");
    let resolver = PackageResolver::new(&AggregationSet::default());
    let options = BuildOptions {
        only_internal: true,
        ignore: IgnoreSet::default(),
    };
    let graph = GraphBuilder::new(&outcome.index, &resolver, options).build();
    Report::new(&stratify(&graph))
}

#[test]
fn import_free_packages_are_not_internal() {
    let tmp = import_free_project();
    let report = analyse_internal(tmp.path(), false);

    // c never appears, d -> e is dropped as e is not indexed
    assert_eq!(report.total, 3);
    assert_eq!(report.layers[0], vec!["d".to_string()]);
    assert_eq!(report.percentage, 33);
    assert_eq!(report.summary(), "1 of 3 packages layered (33%)");
}

#[test]
fn declared_classes_option_indexes_import_free_packages() {
    let tmp = import_free_project();
    let report = analyse_internal(tmp.path(), true);

    assert_eq!(report.total, 5);
    assert_eq!(report.layers[0], vec!["c".to_string(), "e".to_string()]);
    assert_eq!(report.percentage, 60);
}
