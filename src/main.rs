#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod data;
mod model;
mod settings;
mod timeline;
mod ui;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

fn main() -> eframe::Result<()> {
    let _logger = init_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Taskline"),
        ..Default::default()
    };

    eframe::run_native(
        "Taskline",
        options,
        Box::new(|cc| Ok(Box::new(app::TimelineApp::new(cc)))),
    )
}

/// Rolling file logs in the platform data directory; stderr for warnings.
/// The handle must stay alive for the duration of the process.
fn init_logging() -> Option<LoggerHandle> {
    let logger = match Logger::try_with_env_or_str("info") {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("logging init failed: {e}");
            return None;
        }
    };

    let logger = match directories::ProjectDirs::from("", "", "Taskline") {
        Some(dirs) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(dirs.data_dir().join("logs"))
                    .basename("taskline"),
            )
            .rotate(
                Criterion::Size(5 * 1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .duplicate_to_stderr(Duplicate::Warn),
        None => logger,
    };

    match logger.start() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logging init failed: {e}");
            None
        }
    }
}
