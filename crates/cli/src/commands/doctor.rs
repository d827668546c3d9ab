//! System health diagnosis.

use algomentor_config::AppConfig;
use algomentor_core::provider::Provider;
use algomentor_index::IndexFile;
use algomentor_providers::OllamaProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    println!("algomentor doctor\n");

    // Provider reachability
    let provider = OllamaProvider::new(&config.provider.base_url, 5);
    match provider.health_check().await {
        Ok(true) => {
            println!("  ok  provider reachable at {}", config.provider.base_url);
            match provider.list_models().await {
                Ok(models) if models.iter().any(|m| m == &config.provider.model) => {
                    println!("  ok  model '{}' available", config.provider.model);
                }
                Ok(_) => {
                    println!(
                        " warn model '{}' not in the provider's model list",
                        config.provider.model
                    );
                }
                Err(e) => println!(" fail could not list models: {e}"),
            }
        }
        Ok(false) | Err(_) => {
            println!(" fail provider unreachable at {}", config.provider.base_url);
        }
    }

    // Passage index
    match IndexFile::load(&config.index.path) {
        Ok(index) => println!(
            "  ok  index {} ({} passages, {} dims, model '{}')",
            config.index.path.display(),
            index.passages.len(),
            index.dimension,
            index.embedding_model
        ),
        Err(e) => println!(" fail index unavailable: {e}"),
    }

    // OCR
    if config.ocr.enabled {
        println!("  ok  ocr enabled, endpoint {}", config.ocr.endpoint);
    } else {
        println!("  --  ocr disabled (image input will use a placeholder)");
    }

    Ok(())
}
