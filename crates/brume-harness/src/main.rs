use std::path::PathBuf;
use std::process;

use brume_harness::runner::GpuContext;
use brume_harness::{checks, report, scenes};
use brume_render::pipeline::ShadingVariant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut mode = String::from("all");
    let mut output_path: Option<PathBuf> = None;
    let mut dump_dir: Option<PathBuf> = None;
    let mut width = 256u32;
    let mut height = 256u32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                mode = args[i].clone();
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(&args[i]));
            }
            "--dump-dir" => {
                i += 1;
                dump_dir = Some(PathBuf::from(&args[i]));
            }
            "--size" => {
                i += 1;
                let (w, h) = args[i]
                    .split_once('x')
                    .expect("expected --size <width>x<height>");
                width = w.parse().expect("invalid --size width");
                height = h.parse().expect("invalid --size height");
            }
            "--help" | "-h" => {
                eprintln!("Usage: shade-runner [OPTIONS]");
                eprintln!("  --mode <name|all>   Scene to run (default: all)");
                eprintln!("  --output <path>     Save check results as JSON");
                eprintln!("  --dump-dir <dir>    Dump rendered frames as PPM");
                eprintln!("  --size <WxH>        Frame size (default: 256x256)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let selected: Vec<scenes::Scene> = if mode == "all" {
        scenes::standard_scenes()
    } else {
        match scenes::scene_by_name(&mode) {
            Some(scene) => vec![scene],
            None => {
                eprintln!("Unknown scene: {mode}");
                process::exit(1);
            }
        }
    };

    log::info!("Initializing GPU...");
    let context = match GpuContext::new() {
        Ok(context) => context,
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    };

    let mut scene_reports = Vec::new();

    for scene in &selected {
        // Every scene runs the primary variant; fog-march additionally
        // runs the debug variant to prove the two pipelines diverge only
        // in the fog term.
        let mut variants = vec![(ShadingVariant::Textured, "textured")];
        if scene.name == "fog-march" {
            variants.push((ShadingVariant::FaceDebug, "face-debug"));
        }

        for (variant, variant_name) in variants {
            let frame = match context.render_scene(scene, variant, width, height) {
                Ok(frame) => frame,
                Err(e) => {
                    eprintln!("ERROR rendering '{}': {e}", scene.name);
                    process::exit(1);
                }
            };

            if let Some(ref dir) = dump_dir {
                let path = dir.join(format!("{}-{}.ppm", scene.name, variant_name));
                if let Err(e) = report::write_ppm(&path, &frame) {
                    log::warn!("Failed to dump {}: {e}", path.display());
                }
            }

            let outcomes = checks::evaluate(scene, &frame, variant);
            for outcome in &outcomes {
                if outcome.passed {
                    log::info!("PASS {}: {}", outcome.name, outcome.detail);
                } else {
                    log::warn!("FAIL {}: {}", outcome.name, outcome.detail);
                }
            }

            scene_reports.push(report::SceneReport {
                scene: scene.name.to_string(),
                variant: variant_name.to_string(),
                checks: outcomes,
            });
        }
    }

    let full_report = report::Report {
        adapter: context.adapter_name().to_string(),
        width,
        height,
        scenes: scene_reports,
    };

    println!("\n## Shading Check Results\n");
    println!("{}", report::format_summary(&full_report));

    if let Some(ref path) = output_path {
        if let Err(e) = report::save_report(path, &full_report) {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
        log::info!("Saved report to {}", path.display());
    }

    if !full_report.passed() {
        let failed: usize = full_report
            .scenes
            .iter()
            .flat_map(|s| &s.checks)
            .filter(|c| !c.passed)
            .count();
        eprintln!("ERROR: {failed} checks failed, exiting with code 1");
        process::exit(1);
    }

    log::info!("All checks passed.");
}
