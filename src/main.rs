// Copyright 2020 TwoCookingMice

use translucence::core::scene::Scene;
use translucence::core::scene_loader::load_scene_with_settings;
use translucence::core::settings::RenderSettings;
use translucence::io::dataset::DatasetWriter;
use translucence::renderers::orbit::render_orbit;
use translucence::renderers::parallel::ParallelRenderer;
use translucence::renderers::renderer::Renderer;
use translucence::renderers::sequential::SequentialRenderer;

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

const USAGE: &str = "[scene.xml] [--output DIR] [--res N] [--frames N] [--fov DEG] \
[--radius R] [--step S] [--integrator uniform|hierarchical] [--format png|exr] [--sequential]";

fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut scene_path: Option<String> = None;
    let mut output = PathBuf::from(".");
    let mut overrides: Vec<(&'static str, String)> = Vec::new();
    let mut sequential = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let setting = match flag {
            "--res" => Some("resolution"),
            "--frames" => Some("frames"),
            "--fov" => Some("fov"),
            "--radius" => Some("orbit_radius"),
            "--step" => Some("step_size"),
            "--integrator" => Some("integrator"),
            "--format" => Some("format"),
            _ => None,
        };
        match (flag, setting) {
            (_, Some(name)) => {
                i += 1;
                match args.get(i) {
                    Some(v) => overrides.push((name, v.clone())),
                    None => usage_error(&args[0], &format!("{} expects a value", flag)),
                }
            }
            ("--output", None) => {
                i += 1;
                match args.get(i) {
                    Some(v) => output = PathBuf::from(v),
                    None => usage_error(&args[0], "--output expects a directory"),
                }
            }
            ("--sequential", None) => sequential = true,
            ("-h", None) | ("--help", None) => {
                println!("Usage: {} {}", args[0], USAGE);
                return;
            }
            (other, None) if other.starts_with("--") => {
                usage_error(&args[0], &format!("unknown option {}", other))
            }
            (other, None) => {
                if scene_path.is_some() {
                    usage_error(&args[0], "only one scene file may be given");
                }
                scene_path = Some(other.to_string());
            }
        }
        i += 1;
    }

    let (scene, mut settings) = match &scene_path {
        Some(path) => match load_scene_with_settings(path) {
            Ok(result) => (result.scene, result.settings),
            Err(e) => {
                log::error!("Failed to load scene {}: {}.", path, e);
                process::exit(1);
            }
        },
        None => {
            log::info!("No scene file given, using the default hollow cube.");
            (Scene::default(), RenderSettings::default())
        }
    };

    for (name, value) in overrides.iter() {
        if let Err(e) = settings.apply(name, value) {
            log::error!("Invalid command line value for {}: {}.", name, e);
            process::exit(1);
        }
    }
    if let Err(e) = settings.validate() {
        log::error!("{}", e);
        process::exit(1);
    }

    log::info!("Scene: {}.", scene.describe());
    log::info!("Settings: {}x{} pixels, {} frames, fov {} deg, radius {}, step {}, {} integrator.",
               settings.resolution, settings.resolution, settings.frame_count, settings.fov_deg,
               settings.orbit_radius, settings.step_size, settings.integrator.name());

    let integrator = settings.integrator.build(settings.flat_field);
    let renderer: Box<dyn Renderer> = if sequential {
        Box::new(SequentialRenderer::new(integrator, settings.interval()))
    } else {
        let parallel = ParallelRenderer::new(integrator, settings.interval());
        log::info!("Rendering with {} threads.", parallel.thread_count());
        Box::new(parallel)
    };

    let mut writer = match DatasetWriter::create(&output, &settings) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Cannot create output directory {}: {}.", output.display(), e);
            process::exit(1);
        }
    };

    let start = Instant::now();
    let summary = render_orbit(&scene, &settings, renderer.as_ref(), &mut writer, true);
    if let Err(e) = writer.finish(&scene, &settings) {
        log::error!("Failed to write dataset metadata: {}.", e);
        process::exit(1);
    }

    log::info!("Wrote {} of {} frames to {} in {:.2?}.",
               summary.frames_written, settings.frame_count, writer.root().display(), start.elapsed());
    if summary.frames_failed > 0 {
        log::error!("{} frames failed.", summary.frames_failed);
        process::exit(2);
    }
}

fn usage_error(program: &str, msg: &str) -> ! {
    eprintln!("{}", msg);
    eprintln!("Usage: {} {}", program, USAGE);
    process::exit(1);
}
