use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::{sleep, timeout};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordlens::sim::SimHost;
use wordlens::{
    ChannelParentPort, EventBus, FixedRect, FramePipeline, FrameRect, FrameRelay, InMemoryBus,
    InMemoryConfigCenter, KeyKind, Msg, PageEvent, PageMeta, PipelineHandle,
};

#[derive(Parser, Debug)]
#[command(
    name = "wordlens-sim",
    about = "Drive the lookup pipeline through a simulated frame tree"
)]
struct Cli {
    /// Number of nested frames below the top window
    #[arg(long, default_value_t = 2)]
    depth: usize,

    /// Text to select in the innermost frame
    #[arg(long, default_value = "hello")]
    text: String,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    info!("Starting wordlens-sim v{}", env!("CARGO_PKG_VERSION"));

    let config = InMemoryConfigCenter::with_defaults();

    let top_host = SimHost::new(page_meta("top"));
    let top_bus = InMemoryBus::<Msg>::new(32);
    let mut bus_rx = top_bus.subscribe();
    let top = FramePipeline::spawn(
        top_host.clone(),
        config.clone(),
        top_bus.clone(),
        FrameRelay::top(top_bus.clone()),
    );

    // `depth` nested frames below the top window; the first child sits at
    // (50, 20) in the top window, deeper ones at (5, 5) in their parent.
    let mut windows: Vec<(PipelineHandle, Arc<SimHost>)> = Vec::new();
    for level in 0..cli.depth {
        let offset = if level == 0 {
            FrameRect {
                left: 50.0,
                top: 20.0,
            }
        } else {
            FrameRect {
                left: 5.0,
                top: 5.0,
            }
        };

        let port = {
            let parent = windows.last().map(|(handle, _)| handle).unwrap_or(&top);
            let child_id = parent.relay.registry().register(Arc::new(FixedRect(offset)));
            ChannelParentPort::new(child_id, parent.child_inbox.clone())
        };

        let host = SimHost::new(page_meta(&format!("frame-{level}")));
        let bus = InMemoryBus::<Msg>::new(32);
        let handle = FramePipeline::spawn(
            host.clone(),
            config.clone(),
            bus.clone(),
            FrameRelay::nested(bus, port),
        );
        windows.push((handle, host));
    }

    let (inner_events, inner_host, inner_bus) = match windows.last() {
        Some((handle, host)) => (handle.events.clone(), host.clone(), handle.bus.clone()),
        None => (top.events.clone(), top_host.clone(), top_bus.clone()),
    };

    // Select text in the innermost frame, then release the mouse there.
    let document = format!(
        "An opening line. Try {} right away. A closing line.",
        cli.text
    );
    inner_host.select_in_document(&document, &cli.text);

    inner_events
        .send(PageEvent::MouseRelease {
            x: 10.0,
            y: 10.0,
            target_class: None,
            db_click: false,
        })
        .await
        .context("innermost pipeline gone")?;

    match timeout(Duration::from_secs(2), bus_rx.recv()).await {
        Ok(Ok(Msg::Selection {
            selection_info,
            mouse_x,
            mouse_y,
            ..
        })) => info!(
            text = %selection_info.text,
            context = %selection_info.context,
            mouse_x,
            mouse_y,
            "top bus received the relayed selection"
        ),
        other => info!(?other, "no selection arrived"),
    }

    // Triple-modifier gesture on the top window.
    for _ in 0..3 {
        top.events
            .send(PageEvent::KeyDown {
                key: KeyKind::Control,
            })
            .await
            .context("top pipeline gone")?;
        top.events.send(PageEvent::KeyUp).await.ok();
        sleep(Duration::from_millis(50)).await;
    }

    match timeout(Duration::from_secs(2), bus_rx.recv()).await {
        Ok(Ok(Msg::TripleModifier)) => info!("top bus received the triple-modifier event"),
        other => info!(?other, "no gesture arrived"),
    }

    // Pull-style snapshot from the innermost frame.
    let reply = inner_bus.request(&Msg::PreloadSelection);
    info!(?reply, "snapshot responder reply");

    for (handle, _) in &windows {
        handle.shutdown();
    }
    top.shutdown();

    Ok(())
}

fn page_meta(name: &str) -> PageMeta {
    PageMeta {
        title: format!("Sim page {name}"),
        url: format!("https://sim.wordlens.dev/{name}"),
        favicon: "https://sim.wordlens.dev/favicon.ico".into(),
    }
}

fn init_logging(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
