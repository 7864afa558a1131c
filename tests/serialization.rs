// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script output tests

use anyhow::Result;
use scadtree::{
    circle, cube, cylinder, import, kwargs, polygon_with_paths, render_script, sphere, text,
    to_script, union, Error, Kwargs, Node, ScriptOptions, Transform, Value, Vector,
};

#[test]
fn test_box_literal() -> Result<()> {
    assert_eq!(to_script(&cube(1, 2, 3))?, "cube([1,2,3]);");
    assert_eq!(to_script(&cube(2, 0, 0))?, "cube([2,2,2]);");
    Ok(())
}

#[test]
fn test_single_child_is_appended() -> Result<()> {
    let moved = cube(1, 1, 1).tx(2.5)?;
    assert_eq!(to_script(&moved)?, "translate([2.5,0,0])cube([1,1,1]);");
    Ok(())
}

#[test]
fn test_multiple_children_are_braced() -> Result<()> {
    let cut = cube(1, 1, 1) - sphere(1);
    assert_eq!(to_script(&cut)?, "difference(){cube([1,1,1]);sphere(r=1);}");
    Ok(())
}

#[test]
fn test_named_arguments_sorted() -> Result<()> {
    let rod = cylinder().d(10).h(20).facets(32).center(true).build();
    assert_eq!(to_script(&rod)?, "cylinder(center=true,d=10,$fn=32,h=20);");

    let label = text("hi");
    assert_eq!(
        to_script(&label)?,
        "text(\"hi\",halign=\"left\",size=10,valign=\"baseline\");"
    );
    Ok(())
}

#[test]
fn test_wrappers() -> Result<()> {
    let ball = sphere(1);
    assert_eq!(to_script(&ball.color("red"))?, "color(\"red\")sphere(r=1);");
    assert_eq!(to_script(&ball.render())?, "render()sphere(r=1);");
    assert_eq!(to_script(&ball.preview())?, "if($preview)sphere(r=1);");
    assert_eq!(
        to_script(&circle(1).offset(0.5).linear_extrude(5))?,
        "linear_extrude(height=5)offset(r=0.5)circle(r=1);"
    );
    assert_eq!(
        to_script(&import("part.stl"))?,
        "import(\"part.stl\",convexity=10);"
    );
    Ok(())
}

#[test]
fn test_modifier_glyphs() -> Result<()> {
    let block = cube(1, 1, 1);
    assert_eq!(to_script(&block.debug())?, "#cube([1,1,1]);");
    assert_eq!(to_script(&block.root())?, "!cube([1,1,1]);");
    assert_eq!(to_script(&block.disable())?, "*cube([1,1,1]);");
    assert_eq!(to_script(&block.background().tx(1)?)?, "translate([1,0,0])%cube([1,1,1]);");
    Ok(())
}

#[test]
fn test_pivot_rotation_text() -> Result<()> {
    let spun = cube(1, 1, 1).rotate_about(Vector::new(0.0, 0.0, 45.0), Vector::new(1.0, 0.0, 0.0));
    assert_eq!(
        to_script(&spun)?,
        "translate([1,0,0])rotate([0,0,45])translate([-1,0,0])cube([1,1,1]);"
    );
    Ok(())
}

#[test]
fn test_clone_mode_text() -> Result<()> {
    let pair = cube(1, 1, 1).apply(&Transform::mirror(Vector::X).cloned())?;
    assert_eq!(
        to_script(&pair)?,
        "union(){cube([1,1,1]);mirror([1,0,0])cube([1,1,1]);}"
    );
    Ok(())
}

#[test]
fn test_nested_lists() -> Result<()> {
    let shape = polygon_with_paths(vec![[0, 0], [4, 0], [0, 3]], vec![vec![0, 1, 2]]);
    assert_eq!(
        to_script(&shape)?,
        "polygon([[0,0],[4,0],[0,3]],paths=[[0,1,2]]);"
    );
    Ok(())
}

#[test]
fn test_identity_follows_text() -> Result<()> {
    let a = cube(1, 2, 3).tx(1)?;
    let b = cube(1, 2, 3).tx(1)?;
    let c = cube(1, 2, 3).tx(2)?;

    assert_eq!(a.identity()?, b.identity()?);
    assert_ne!(a.identity()?, c.identity()?);
    assert_eq!(a.identity()?.len(), 64);

    // labels are not part of the output
    assert_eq!(a.label("part").identity()?, a.identity()?);
    Ok(())
}

#[test]
fn test_identity_independent_of_construction() -> Result<()> {
    let flat = union([cube(1, 1, 1), sphere(1), sphere(2)]);
    let nested = cube(1, 1, 1) + (sphere(1) + sphere(2));
    assert_eq!(flat.identity()?, nested.identity()?);
    Ok(())
}

#[test]
fn test_unrepresentable_argument() {
    let bad = Node::raw("sphere", vec![], vec![], kwargs([("r", f64::INFINITY)]));
    let err = to_script(&bad).unwrap_err();
    assert!(matches!(err, Error::Serialization { type_name: "float", .. }));

    let parent = bad.tx(1).unwrap();
    assert_eq!(parent.identity().unwrap_err(), err);

    let ident = Node::raw("echo", vec![], vec![Value::Ident("1abc".into())], Kwargs::new());
    assert!(to_script(&ident).is_err());
}

#[test]
fn test_preamble() -> Result<()> {
    let script = render_script(&cube(1, 2, 3), &ScriptOptions::default())?;
    assert_eq!(script, "$fa=3;\n$fs=0.5;\ncube([1,2,3]);\n");

    let fixed = ScriptOptions {
        fn_: Some(48),
        ..ScriptOptions::none()
    };
    assert_eq!(render_script(&sphere(1), &fixed)?, "$fn=48;\nsphere(r=1);\n");
    Ok(())
}

#[test]
fn test_script_is_stable() -> Result<()> {
    let part = union([cube(2, 2, 2), sphere(1).tz(2)?]).rz(30);
    let first = to_script(&part)?;
    assert_eq!(to_script(&part)?, first);
    Ok(())
}
