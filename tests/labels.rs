// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Label lookup and traversal tests

use anyhow::Result;
use scadtree::{cube, cylinder, sphere, union, Error, Node, Value};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn assembly() -> Result<Node> {
    let bolt = cylinder().r(1).h(10).build().label("bolt");
    let head = cylinder().r(2).h(2).build().label("head");
    let fastener = union([bolt, head.tz(10)?]).label("fastener");
    Ok(union([cube(20, 20, 2), fastener.tx(5)?.ty(5)?]))
}

#[test]
fn test_lookup_through_transforms() -> Result<()> {
    init_logging();
    let tree = assembly()?;

    let bolt = tree.find_by_label("bolt")?;
    assert_eq!(bolt.kind().name(), "cylinder");
    assert_eq!(bolt.lookup_arg("h"), Some(&Value::from(10.0)));

    let fastener = tree.find_by_label("fastener")?;
    assert_eq!(fastener.children().len(), 2);
    Ok(())
}

#[test]
fn test_default_labels_are_searchable() -> Result<()> {
    let tree = assembly()?;
    assert_eq!(tree.find_by_label("cube")?, cube(20, 20, 2));
    Ok(())
}

#[test]
fn test_module_name_is_a_label() -> Result<()> {
    let part = sphere(4).module_name("ball");
    let tree = union([cube(1, 1, 1), part.clone()]);
    assert_eq!(tree.find_by_label("ball")?, part);
    Ok(())
}

#[test]
fn test_missing_label_error() -> Result<()> {
    init_logging();
    let tree = assembly()?;
    let err = tree.find_by_label("washer").unwrap_err();
    assert_eq!(
        err,
        Error::LabelNotFound {
            label: "washer".to_owned()
        }
    );
    assert_eq!(err.to_string(), "no node labelled `washer`");
    Ok(())
}

#[test]
fn test_deepest_first_ends_with_root() -> Result<()> {
    let tree = assembly()?;
    let order = tree.traverse_deepest_first();

    assert_eq!(order.len(), 8);
    assert!(Node::ptr_eq(order.last().expect("root"), &tree));
    // every node comes after its children
    for (i, node) in order.iter().enumerate() {
        for child in node.children() {
            let position = order.iter().position(|n| Node::ptr_eq(n, child));
            assert!(position.is_some_and(|p| p < i));
        }
    }
    // the deep fastener branch is walked before the flat plate
    assert_eq!(order[order.len() - 2].kind().name(), "cube");
    Ok(())
}

#[test]
fn test_lookup_arg_stops_at_branches() -> Result<()> {
    let tree = assembly()?;
    assert_eq!(tree.lookup_arg("h"), None);

    let moved_bolt = cylinder().r(1).h(10).build().tx(2)?.rz(15).color("gray");
    assert_eq!(moved_bolt.lookup_arg("r"), Some(&Value::from(1.0)));
    assert_eq!(moved_bolt.lookup_arg("missing"), None);
    Ok(())
}
