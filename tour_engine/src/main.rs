use anyhow::Result;

use tour_content::{ContentIndex, HotspotTarget};
use tour_engine::cli::{self, Command, InspectArgs};
use tour_engine::engine::NavigationEngine;
use tour_engine::runtime;

fn main() -> Result<()> {
    env_logger::init();

    match cli::parse()? {
        Command::Replay(args) => runtime::execute(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn inspect(args: InspectArgs) -> Result<()> {
    let index = ContentIndex::load_from_dir(&args.content_root)?;

    println!("Content root: {}", args.content_root.display());

    println!("\nLayers:");
    for layer in index.layers() {
        println!(
            "  {:>2}. {:<9} {:>3} hotspot(s){}{}",
            layer.id,
            layer.kind.label(),
            layer.hotspots.len(),
            layer
                .project
                .as_ref()
                .map(|p| format!("  project {p}"))
                .unwrap_or_default(),
            if layer.kind.is_fullscreen() {
                "  [fullscreen]"
            } else {
                ""
            },
        );
        if args.verbose {
            for hotspot in &layer.hotspots {
                println!(
                    "      - {:<16} {}",
                    hotspot.id,
                    describe_target(&hotspot.target)
                );
            }
        }
    }

    for project in index.projects() {
        println!("\nProject {} ({}):", project.id, project.name);
        let Some(graph) = index.graph(&project.id) else {
            println!("  !! no scene graph loaded");
            continue;
        };
        for entry in graph.entries() {
            let default_marker = if graph.default_entry().map(|e| &e.id) == Some(&entry.id) {
                " *"
            } else {
                ""
            };
            println!(
                "  - {:<12} {:<20} {} hotspot(s){}",
                entry.id.to_string(),
                entry.display_name.as_deref().unwrap_or("-"),
                entry.hotspots.len(),
                default_marker,
            );
            if args.verbose {
                for hotspot in &entry.hotspots {
                    println!(
                        "      - {:<16} {}",
                        hotspot.id,
                        describe_target(&hotspot.target)
                    );
                }
            }
        }
    }

    let engine = NavigationEngine::with_entry_layer(index, args.entry_layer);
    let entry_kind = engine
        .content()
        .layer(args.entry_layer)
        .map(|layer| layer.kind.label())
        .unwrap_or("missing");
    println!(
        "\nEntry layer {} ({}) | immersive: {}",
        args.entry_layer,
        entry_kind,
        engine.is_immersive_mode()
    );

    Ok(())
}

fn describe_target(target: &HotspotTarget) -> String {
    match target {
        HotspotTarget::Layer { layer, link, scene } => {
            let mut label = format!("-> layer {layer}");
            if let Some(link) = link {
                label.push_str(&format!(" link {link}"));
            }
            if let Some(scene) = scene {
                label.push_str(&format!(" scene {scene}"));
            }
            label
        }
        HotspotTarget::Scene { project, scene } => format!(
            "-> scene {}{}",
            scene.as_ref().map(|s| s.to_string()).unwrap_or_else(|| "(default)".to_string()),
            project
                .as_ref()
                .map(|p| format!(" of project {p}"))
                .unwrap_or_default(),
        ),
        HotspotTarget::ExternalLink { url } => format!("opens {url}"),
        HotspotTarget::AssetDisplay { asset_ref, .. } => format!(
            "shows {}",
            asset_ref.as_deref().unwrap_or("(inline info)")
        ),
    }
}
