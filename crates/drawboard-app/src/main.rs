//! Main application entry point (native).

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    use drawboard_app::{App, Command, render_ui};
    use drawboard_core::config::AppConfig;
    use drawboard_core::storage::create_default_storage;
    use std::io::{self, BufRead, Write};

    env_logger::init();
    log::info!("Starting Drawboard");

    let config = AppConfig::default();
    let storage = match create_default_storage(config.resolved_storage_dir()) {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("Failed to open storage: {e}");
            std::process::exit(1);
        }
    };
    let mut app = match App::new(config, storage) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    println!("{}", render_ui(&app).join("\n"));
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => match app.execute(command) {
                Ok(output) if output.is_empty() => {}
                Ok(output) => println!("{output}"),
                Err(e) => println!("Error: {e}"),
            },
            Err(e) => println!("{e}"),
        }
        let _ = io::stdout().flush();
    }
    log::info!("Bye");
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
