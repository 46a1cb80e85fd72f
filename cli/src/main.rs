use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use design_surface::config::EditorConfig;
use design_surface::engine::Editor;
use design_surface::store::{SnapshotStore, StoreError};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("snapshot not found: {0}")]
    MissingSnapshot(PathBuf),
    #[error("storage failed: {0}")]
    Store(#[from] StoreError),
    #[error("export encoding failed: {0}")]
    Codec(#[from] design_surface::codec::CodecError),
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "design-cli", about = "Inspect and export saved design surface snapshots")]
struct Cli {
    #[arg(long, env = "DESIGN_CANVAS_WIDTH", default_value_t = 800.0)]
    canvas_width: f64,

    #[arg(long, env = "DESIGN_CANVAS_HEIGHT", default_value_t = 600.0)]
    canvas_height: f64,

    #[arg(long, env = "DESIGN_STORAGE_KEY", default_value = "canvasElements")]
    storage_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Restore a snapshot and write `design.json` or `design.html` content.
    Export {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Data)]
        format: ExportFormat,
        /// Write to this path instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the elements of a snapshot, top-most first.
    Layers {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Data,
    Markup,
}

/// Snapshot store over a single file; the key only appears in logs.
#[derive(Debug)]
struct FileStore {
    path: PathBuf,
}

impl FileStore {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            debug!(key, path = %self.path.display(), "no snapshot file");
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        debug!(key, path = %self.path.display(), bytes = payload.len(), "writing snapshot file");
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EditorConfig {
        canvas_width: cli.canvas_width,
        canvas_height: cli.canvas_height,
        storage_key: cli.storage_key,
        ..EditorConfig::default()
    };

    match cli.command {
        Command::Export { input, format, output } => {
            let rendered = run_export(&config, &input, format)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    info!(path = %path.display(), "export written");
                }
                None => println!("{rendered}"),
            }
            Ok(())
        }
        Command::Layers { input } => {
            let rendered = run_layers(&config, &input)?;
            println!("{rendered}");
            Ok(())
        }
    }
}

fn open(config: &EditorConfig, input: &Path) -> Result<Editor<FileStore>, CliError> {
    if !input.exists() {
        return Err(CliError::MissingSnapshot(input.to_path_buf()));
    }
    Ok(Editor::open(config.clone(), FileStore::new(input)))
}

fn run_export(config: &EditorConfig, input: &Path, format: ExportFormat) -> Result<String, CliError> {
    let editor = open(config, input)?;
    let rendered = match format {
        ExportFormat::Data => editor.core().export_data()?,
        ExportFormat::Markup => editor.core().export_markup(),
    };
    Ok(rendered)
}

fn run_layers(config: &EditorConfig, input: &Path) -> Result<String, CliError> {
    let editor = open(config, input)?;
    let layers = editor.core().layers();
    Ok(serde_json::to_string_pretty(&layers)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_snapshot(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("design-cli-{}-{name}.json", std::process::id()));
        fs::write(&path, body).expect("write fixture");
        path
    }

    fn fixture() -> String {
        serde_json::json!([
            { "id": "elem-1", "type": "rectangle", "x": 10, "y": 20, "width": 150, "height": 100,
              "rotation": 0, "styles": { "backgroundColor": "#ff0000" } },
            { "id": "elem-2", "type": "textbox", "x": 40, "y": 60, "width": 200, "height": 40,
              "rotation": 15, "styles": { "backgroundColor": "" }, "content": "Hello <world>" }
        ])
        .to_string()
    }

    #[test]
    fn file_store_missing_file_loads_none() {
        let store = FileStore::new(std::env::temp_dir().join("design-cli-does-not-exist.json"));
        assert!(store.load("canvasElements").expect("load").is_none());
    }

    #[test]
    fn file_store_roundtrips_payload() {
        let path = temp_snapshot("store", "[]");
        let mut store = FileStore::new(&path);
        store.save("canvasElements", "[{\"id\":\"elem-1\"}]").expect("save");
        assert_eq!(store.load("canvasElements").expect("load").as_deref(), Some("[{\"id\":\"elem-1\"}]"));
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn export_data_uses_effective_colors() {
        let path = temp_snapshot("data", &fixture());
        let rendered = run_export(&EditorConfig::default(), &path, ExportFormat::Data).expect("export");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(value[0]["styles"]["backgroundColor"], "#ff0000");
        assert_eq!(value[1]["styles"]["backgroundColor"], "transparent");
        assert_eq!(value[1]["content"], "Hello <world>");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn export_markup_escapes_text() {
        let path = temp_snapshot("markup", &fixture());
        let rendered = run_export(&EditorConfig::default(), &path, ExportFormat::Markup).expect("export");
        assert!(rendered.contains("id=\"elem-1\""));
        assert!(rendered.contains("Hello &lt;world&gt;"));
        assert!(rendered.contains("rotate(15deg)"));
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn layers_list_topmost_first() {
        let path = temp_snapshot("layers", &fixture());
        let rendered = run_layers(&EditorConfig::default(), &path).expect("layers");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(value[0]["id"], "elem-2");
        assert_eq!(value[1]["id"], "elem-1");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn missing_input_is_an_error() {
        let missing = std::env::temp_dir().join("design-cli-missing-input.json");
        let err = run_layers(&EditorConfig::default(), &missing).expect_err("missing");
        assert!(matches!(err, CliError::MissingSnapshot(_)));
    }
}
