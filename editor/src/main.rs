use clap::Parser;
use settings::EditorSettings;
use std::path::PathBuf;

mod app;
mod card;
mod download;
mod overlay;
mod settings;

#[derive(Parser)]
#[command(author, version, about = "Desktop editor for detector configs")]
struct Args {
    /// Load editor settings from YAML
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Backend base URL serving the /api routes
    #[arg(long)]
    backend: Option<String>,
    /// Directory receiving the json / yaml downloads
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match args.settings {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    }
    .with_overrides(args.backend, args.download_dir);
    log::info!(
        "editing configs at {} (downloads -> {})",
        settings.backend_url,
        settings.download_dir.display()
    );

    iced::application(
        move || app::Editor::boot(settings.clone()),
        app::Editor::update,
        app::Editor::view,
    )
    .title(application_title)
    .theme(application_theme)
    .run()
    .map_err(|err| anyhow::anyhow!("editor window failed: {err}"))
}

fn application_title(_: &app::Editor) -> String {
    "Detector Configs".into()
}

fn application_theme(_: &app::Editor) -> iced::Theme {
    iced::Theme::Dark
}
