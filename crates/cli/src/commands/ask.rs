//! Single-question mode.

use std::path::Path;

use algomentor_config::AppConfig;
use algomentor_core::message::SessionId;

use super::{build_engine, load_image};

pub async fn run(question: &str, image: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config);
    let session = SessionId::new();

    let image = image.and_then(load_image);
    let outcome = engine.handle_turn(&session, question, image).await?;

    println!("{}", outcome.reply);
    Ok(())
}
