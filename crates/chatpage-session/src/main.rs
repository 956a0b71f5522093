use std::io::Write;
use std::sync::Arc;

use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use chatpage_core::models::model::ModelSelection;
use chatpage_session::api::HttpChatApi;
use chatpage_session::config::ClientConfig;
use chatpage_session::runtime::{self, SessionOptions};
use chatpage_session::update::Msg;
use chatpage_session::view::TerminalView;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let api = HttpChatApi::new(&config.base_url, config.timeout)?;

    let session = runtime::spawn(
        Arc::new(api),
        SessionOptions {
            model: config.model,
            ..SessionOptions::default()
        },
    );

    let mut updates = session.subscribe();
    let printer = tokio::spawn(async move {
        let mut view = TerminalView::new();
        while updates.changed().await.is_ok() {
            let chunk = view.render(&updates.borrow_and_update());
            if !chunk.is_empty() {
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(chunk.as_bytes());
                let _ = stdout.flush();
            }
        }
    });

    println!(
        "connected to {} (model {}). /model <id> switches models, /quit exits.",
        config.base_url, config.model
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end_matches(['\r', '\n']);

        if line == "/quit" {
            break;
        }
        if let Some(id) = line.strip_prefix("/model ") {
            match id.trim().parse::<ModelSelection>() {
                Ok(model) => session.send(Msg::ModelSelected(model))?,
                Err(e) => eprintln!("{e}; choose one of gpt-4, gpt-4o-mini, o1"),
            }
            continue;
        }
        if session.snapshot().is_busy() {
            eprintln!("(still replying; message not sent)");
            continue;
        }
        session.submit_text(line)?;
    }

    session.shutdown().await;
    let _ = printer.await;
    println!();

    Ok(())
}
