//! CLI tool for generating demo scenes and inspecting container files
//!
//! Usage:
//!   cargo run --bin glb_tool -- <command> [args]
//!
//! Commands:
//!   surface <out.glb>     write a demo attribute surface (points + polygons)
//!   buildings <out.glb>   write demo extruded building footprints
//!   info <file.glb>       decode a container and print buffer diagnostics

use std::env;

use geoglb::scene::{decode_glb, IndexData};
use geoglb::{
    build_buildings, build_surface, heatmap_color, write_glb, Coord, Feature, Geometry,
    Triangulation,
};

fn usage(program: &str) {
    eprintln!("Usage: {} <command> [args]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  surface <out.glb>     Write a demo attribute surface (points + polygons)");
    eprintln!("  buildings <out.glb>   Write demo extruded building footprints");
    eprintln!("  info <file.glb>       Decode a container and print buffer diagnostics");
}

fn square_ring(x: f64, y: f64, size: f64) -> Vec<Coord> {
    vec![
        Coord { x, y },
        Coord { x: x + size, y },
        Coord { x: x + size, y: y + size },
        Coord { x, y: y + size },
        Coord { x, y }, // closing vertex, as geo sources emit it
    ]
}

/// Synthetic noise-surface features: a point grid with a wavy attribute plus
/// a few polygon cells.
fn demo_surface_features() -> Vec<Feature> {
    let mut features = Vec::new();
    for i in 0..20 {
        for j in 0..20 {
            let x = i as f64;
            let y = j as f64;
            features.push(Feature {
                geometry: Geometry::Point(Coord { x, y }),
                value: (x * 0.4).sin() + (y * 0.3).cos(),
            });
        }
    }
    for k in 0..5 {
        let offset = k as f64 * 4.0;
        features.push(Feature {
            geometry: Geometry::Polygon(square_ring(offset, offset, 3.0)),
            value: k as f64,
        });
    }
    features.push(Feature {
        geometry: Geometry::LineString(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 19.0, y: 19.0 },
        ]),
        value: 2.5,
    });
    features
}

/// Synthetic footprints with staggered heights.
fn demo_building_features() -> Vec<Feature> {
    (0..6)
        .map(|k| Feature {
            geometry: Geometry::Polygon(square_ring(k as f64 * 12.0, 0.0, 8.0)),
            value: 10.0 + 5.0 * k as f64,
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
        return Ok(());
    }

    match args[1].as_str() {
        "surface" => {
            let features = demo_surface_features();
            let (mesh, lines) = build_surface(&features, Triangulation::Fan, heatmap_color);
            write_glb(&mesh, lines.as_ref(), &args[2])?;
            println!(
                "{}: {} vertices, {} triangles, line set: {}",
                args[2],
                mesh.positions.len(),
                mesh.triangles.as_ref().map_or(0, |t| t.len()),
                lines.is_some()
            );
        }
        "buildings" => {
            let mesh = build_buildings(&demo_building_features());
            write_glb(&mesh, None, &args[2])?;
            println!(
                "{}: {} vertices, {} triangles",
                args[2],
                mesh.positions.len(),
                mesh.triangles.as_ref().map_or(0, |t| t.len())
            );
        }
        "info" => {
            let scene = decode_glb(&args[2])?;
            match &scene.positions {
                Some(p) => println!("positions: {} vertices", p.len()),
                None => println!("positions: failed to decode"),
            }
            match &scene.colors {
                Some(c) => println!("colors:    {} values", c.len()),
                None => println!("colors:    failed to decode"),
            }
            match &scene.triangles {
                Some(IndexData::Indexed(t)) => println!("indices:   {} triangles", t.len()),
                Some(IndexData::Unindexed) => println!("indices:   none (unindexed primitive)"),
                None => println!("indices:   failed to decode"),
            }
            for issue in &scene.issues {
                eprintln!("issue: {}", issue);
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            usage(&args[0]);
        }
    }

    Ok(())
}
