use anyhow::Result;
use clap::Parser;

use promptstack::infra::config::Config;
use promptstack::ui::app::ShellApp;

/// Compose prompt text from files and live clipboard captures.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Preset to render and copy straight to the clipboard, skipping the
    /// interactive menus.
    preset: Option<String>,
}

fn main() -> Result<()> {
    promptstack::init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut app = ShellApp::new(config)?;

    match cli.preset {
        Some(name) => app.run_preset(&name),
        None => app.run(),
    }
}
