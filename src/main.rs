use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use entity::{Photo, PropertyStatus, MIN_PHOTOS_TO_PUBLISH};
use imovel_fotos::photo::{reconcile, signature, OrderResolver};
use imovel_fotos::telemetry::{get_subscriber, get_subscriber_terminal, init_subscriber};
use log::trace;
use serde_json::Value;

const APP_NAME: &str = "imovel-fotos";

/// Normalize a raw `Foto` payload and print the order the site would render.
#[derive(Debug, Parser)]
#[command(name = APP_NAME)]
struct Args {
    /// JSON file holding the photo payload (array or legacy keyed map)
    payload: PathBuf,

    /// Property status, e.g. "Venda" or "Vendido"
    #[arg(long, default_value = "Venda")]
    status: String,

    /// Property code used as the ordering cache key
    #[arg(long, default_value = "imovel")]
    property_code: String,

    /// JSON file holding an unsaved session reorder (array of photos)
    #[arg(long)]
    session: Option<PathBuf>,

    /// Emit Bunyan-formatted JSON logs instead of the pretty terminal layer
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the resolved photo array.
    if args.json_logs {
        init_subscriber(get_subscriber(APP_NAME.into(), "info".into(), std::io::stderr));
    } else {
        init_subscriber(get_subscriber_terminal(
            APP_NAME.into(),
            "info".into(),
            std::io::stderr,
        ));
    }
    trace!("{args:?}");

    let raw: Value = serde_json::from_str(
        &fs::read_to_string(&args.payload)
            .with_context(|| format!("Unable to read {}", args.payload.display()))?,
    )
    .context("Payload is not valid JSON")?;
    let status = args
        .status
        .parse::<PropertyStatus>()
        .unwrap_or_default();

    let photos = reconcile(&raw, &status)?;

    let session: Option<Vec<Photo>> = match &args.session {
        Some(path) => Some(
            serde_json::from_str(
                &fs::read_to_string(path)
                    .with_context(|| format!("Unable to read {}", path.display()))?,
            )
            .context("Session override is not a photo array")?,
        ),
        None => None,
    };

    let resolver = OrderResolver::new();
    let (ordered, mode) = resolver.resolve(&photos, &args.property_code, session.as_deref());

    tracing::info!(?mode, total = ordered.len(), "Resolved photo order");
    if ordered.len() < MIN_PHOTOS_TO_PUBLISH {
        tracing::warn!(
            total = ordered.len(),
            minimum = MIN_PHOTOS_TO_PUBLISH,
            "Not enough photos for the listing to publish"
        );
    }
    for photo in &ordered {
        tracing::info!(
            order = photo.order,
            code = %photo.code,
            featured = %photo.featured,
            batch = %signature(&photo.url),
            "photo"
        );
    }

    println!("{}", serde_json::to_string_pretty(&ordered)?);
    Ok(())
}
