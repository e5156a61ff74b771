use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use polydraw::feature::{Feature, FeatureId, Position};
use polydraw::input::{Key, MapEvent};
use polydraw::map::HeadlessMap;
use polydraw::modes::{ModeName, ModeOptions};
use polydraw::{Config, Editor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "polydraw")]
#[command(version, about = "Interactive polygon drawing for map editors")]
struct Cli {
    /// Read settings from this file instead of ~/.config/polydraw/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Snap the pointer to vertices of the configured sources
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    snap: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a scripted input session to a headless editor and print what it emits
    Replay {
        /// JSON script: an array of steps, or an object with `sources` and `steps`
        script: PathBuf,
    },
}

/// One scripted input.
#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
enum Step {
    Mode {
        mode: ModeName,
        #[serde(default)]
        select: Vec<u64>,
    },
    Move {
        at: Position,
        #[serde(default)]
        over: Option<Feature>,
    },
    Click {
        at: Position,
        #[serde(default)]
        over: Option<Feature>,
    },
    Tap {
        at: Position,
        #[serde(default)]
        over: Option<Feature>,
    },
    Key {
        key: Key,
    },
    Trash,
    Delete {
        ids: Vec<u64>,
    },
    Render,
}

#[derive(Debug, Deserialize)]
struct Script {
    /// Features published on the map per source id (snap targets)
    #[serde(default)]
    sources: BTreeMap<String, Vec<Feature>>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Steps(Vec<Step>),
    Full(Script),
}

impl From<ScriptFile> for Script {
    fn from(file: ScriptFile) -> Self {
        match file {
            ScriptFile::Steps(steps) => Script {
                sources: BTreeMap::new(),
                steps,
            },
            ScriptFile::Full(script) => script,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.snap {
        config.draw.snap_to = true;
    }

    match cli.command {
        Command::Replay { script } => replay(&config, &script),
    }
}

fn load_script(path: &Path) -> Result<Script> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let file: ScriptFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse script {}", path.display()))?;
    Ok(file.into())
}

fn replay(config: &Config, path: &Path) -> Result<()> {
    let script = load_script(path)?;
    log::info!(
        "Replaying {} step(s) from {}",
        script.steps.len(),
        path.display()
    );

    let mut map = HeadlessMap::new(config.map.pixels_per_degree, config.map.double_click_zoom);
    for (source, features) in script.sources {
        for feature in features {
            map.add_source_feature(source.clone(), feature);
        }
    }

    let mut editor = Editor::new(config, Box::new(map)).record_events();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for step in script.steps {
        log::debug!("Step: {:?}", step);
        match step {
            Step::Mode { mode, select } => editor.change_mode(
                mode,
                ModeOptions {
                    feature_ids: select.into_iter().map(FeatureId).collect(),
                },
            ),
            Step::Move { at, over } => editor.handle_event(with_target(MapEvent::mouse_move(at), over)),
            Step::Click { at, over } => editor.handle_event(with_target(MapEvent::click(at), over)),
            Step::Tap { at, over } => editor.handle_event(with_target(MapEvent::tap(at), over)),
            Step::Key { key } => editor.handle_event(MapEvent::key_up(key)),
            Step::Trash => editor.trash(),
            Step::Delete { ids } => {
                let ids: Vec<FeatureId> = ids.into_iter().map(FeatureId).collect();
                editor.delete(&ids);
            }
            Step::Render => {
                let frame = serde_json::json!({
                    "type": "render",
                    "features": editor.render_frame(),
                });
                writeln!(out, "{}", serde_json::to_string(&frame)?)?;
            }
        }

        for event in editor.take_events() {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }

    out.flush().context("Failed to write output")?;
    Ok(())
}

fn with_target(event: MapEvent, over: Option<Feature>) -> MapEvent {
    match over {
        Some(target) => event.over(target),
        None => event,
    }
}
