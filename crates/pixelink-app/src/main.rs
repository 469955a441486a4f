//! Headless Pixelink shell: replays a scripted input session and prints the
//! result.

mod report;
mod script;

use clap::Parser;
use pixelink_core::{CanvasResult, CanvasSession, SessionConfig};
use pixelink_render::FrameBuffer;
use script::Script;
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay pointer and key events against a pixel canvas.
#[derive(Parser, Debug)]
#[command(name = "pixelink", version, about = "Headless pixel-art canvas")]
struct Cli {
    /// JSON script with an optional `config` and a list of `events`.
    #[arg(value_name = "SCRIPT.json")]
    script: PathBuf,

    /// Session config file. Takes precedence over the script's own config.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Repaint the whole surface before printing instead of relying on the
    /// incremental renders.
    #[arg(long)]
    full: bool,
}

fn run(cli: &Cli) -> CanvasResult<String> {
    let script = Script::load(&cli.script)?;
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => script.config.clone().unwrap_or_default(),
    };

    let mut session = CanvasSession::new(&config);
    let mut target = FrameBuffer::for_metrics(session.metrics());
    session.render(&mut target);
    script.replay(&mut session, &mut target)?;

    if cli.full {
        target = FrameBuffer::for_metrics(session.metrics());
        session.render_full(&mut target);
    }
    Ok(report::report(&session, &target))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Starting Pixelink with {}", cli.script.display());

    match run(&cli) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_json(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    const BUCKET_SCRIPT: &str = r##"{
        "config": { "grid_width": 2, "grid_height": 2, "active_brush": "bucket" },
        "events": [
            { "type": "set_color", "color": "#00ff00" },
            { "type": "pointer_down", "x": 10, "y": 10 },
            { "type": "pointer_up" },
            { "type": "pointer_move", "x": 300, "y": 300 }
        ]
    }"##;

    #[test]
    fn test_run_prints_layer_and_surface() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_json(&dir, "script.json", BUCKET_SCRIPT);
        let cli = Cli {
            script,
            config: None,
            full: false,
        };

        let text = run(&cli).unwrap();
        let green = "#00ff00ff #00ff00ff";
        assert_eq!(
            text,
            format!("layer 'layer 1':\n{green}\n{green}\nsurface:\n{green}\n{green}\n")
        );
    }

    #[test]
    fn test_full_render_matches_incremental() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_json(&dir, "script.json", BUCKET_SCRIPT);
        let incremental = run(&Cli {
            script: script.clone(),
            config: None,
            full: false,
        })
        .unwrap();
        let full = run(&Cli {
            script,
            config: None,
            full: true,
        })
        .unwrap();
        assert_eq!(incremental, full);
    }

    #[test]
    fn test_config_file_overrides_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_json(&dir, "script.json", BUCKET_SCRIPT);
        let config = write_json(
            &dir,
            "config.json",
            r#"{ "grid_width": 3, "grid_height": 1, "active_brush": null }"#,
        );

        let text = run(&Cli {
            script,
            config: Some(config),
            full: false,
        })
        .unwrap();
        assert_eq!(text, "layer 'layer 1':\n. . .\nsurface:\n. . .\n");
    }

    #[test]
    fn test_missing_script_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            script: dir.path().join("nope.json"),
            config: None,
            full: false,
        };
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["pixelink", "draw.json", "--config", "cfg.json", "--full"]);
        assert_eq!(cli.script, PathBuf::from("draw.json"));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        assert!(cli.full);
    }
}
