use std::io::{self, Write};
use std::path::PathBuf;

use ascii_typewriter::ascii::PixelGrid;
use ascii_typewriter::cli::{handle_config_action, Args, Command};
use ascii_typewriter::config::Config;
use ascii_typewriter::player::{PlayError, PlayOutcome, Player};
use ascii_typewriter::source::{images_in_folder, load_single, FileSource};
use ascii_typewriter::typewriter::CancelToken;
use clap::Parser;

/// Set up the Ctrl+C handler.
///
/// Installed once, right before playback. Typing and pauses check
/// the token, so the current unit finishes before the program stops.
fn setup_ctrlc_handler(cancel: CancelToken) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
}

/// What to play once the inputs are resolved.
enum Playback {
    Folder(Vec<PathBuf>),
    Single(PixelGrid),
}

fn run(args: &Args) -> Result<PlayOutcome, String> {
    let file = Config::load(args.config.as_deref()).map_err(|e| e.to_string())?;
    let render = args.render_config(&file);
    log::debug!("render config: {:?}", render);

    // Ctrl+C keeps its default behaviour until playback starts.
    let playback = match &args.folder {
        Some(folder) => Playback::Folder(images_in_folder(folder).map_err(|e| e.to_string())?),
        None => match load_single(&FileSource, &args.image) {
            Some(image) => Playback::Single(image),
            None => {
                return Ok(PlayOutcome {
                    skipped: 1,
                    ..PlayOutcome::default()
                })
            }
        },
    };

    let cancel = CancelToken::new();
    if let Err(e) = setup_ctrlc_handler(cancel.clone()) {
        log::warn!("could not install Ctrl+C handler: {}", e);
    }

    let stdout = io::stdout().lock();
    let mut player = Player::new(render, stdout, cancel);

    let result = match playback {
        Playback::Folder(paths) => player.play_sequence(&paths, &FileSource),
        Playback::Single(image) => player.play_single(&image),
    };

    let outcome = result.map_err(|e: PlayError| e.to_string())?;
    if outcome.cancelled {
        // Leave the terminal on a fresh line with default colours.
        let mut out = player.into_sink();
        let _ = out.write_all(b"\x1b[0m\n");
        let _ = out.flush();
    }
    Ok(outcome)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let args = Args::parse();

    if let Some(Command::Config { action }) = args.command.clone() {
        handle_config_action(action, &args);
        return;
    }

    match run(&args) {
        Ok(outcome) => log::debug!(
            "done: {} frames, {} skipped, cancelled: {}",
            outcome.frames,
            outcome.skipped,
            outcome.cancelled
        ),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
