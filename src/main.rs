use framing_summary::application::client::DashboardClient;
use framing_summary::application::session::DashboardSession;
use framing_summary::config::Config;
use framing_summary::infrastructure::ServiceFactory;
use framing_summary::interfaces::ui::{DashboardApp, configure_style};

use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Create Log Channel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Setup Logging (Stdout + UI)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Starting Framing Summary Dashboard...");

    let config = Config::from_env().context("Failed to load config")?;

    // 3. Create Tokio Runtime in a background thread
    let (handle_tx, handle_rx) = crossbeam_channel::bounded(1);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to build Tokio runtime: {}", e);
                return;
            }
        };

        let _ = handle_tx.send(rt.handle().clone());
        info!("Background Runtime Started.");

        // Fetch tasks are detached; the runtime must outlive the UI.
        rt.block_on(std::future::pending::<()>());
    });

    // 4. Wait for the runtime handle
    let handle = handle_rx
        .recv()
        .context("Background runtime exited before it was ready")?;

    // 5. Wire services and the session
    let (stats, headshots) = ServiceFactory::create_services(&config);
    let client = DashboardClient::new(handle, stats, headshots).with_log_channel(log_rx);

    let mut session = DashboardSession::new(config.initial_date, client);
    session.start();

    let app = DashboardApp::new(session, config.log_panel_capacity);

    // 6. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Daily Framing Summary"),
        ..Default::default()
    };

    eframe::run_native(
        "Daily Framing Summary",
        native_options,
        Box::new(|cc| {
            configure_style(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
