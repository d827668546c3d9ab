//! First-run setup: write a default config file.

use algomentor_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = AppConfig::config_dir();
    let path = dir.join("config.toml");

    if path.exists() {
        println!("Config already exists at {}", path.display());
        println!("Edit it directly, or delete it and run `algomentor onboard` again.");
        return Ok(());
    }

    std::fs::create_dir_all(&dir)?;
    std::fs::write(&path, AppConfig::default_toml())?;

    println!("Wrote default config to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Start Ollama and pull the models:");
    println!("       ollama pull llama3.2:latest");
    println!("       ollama pull nomic-embed-text");
    println!("  2. Place a passage index at vectorstore/index.json");
    println!("     (or set index.path / ALGOMENTOR_INDEX_PATH)");
    println!("  3. Run `algomentor doctor` to verify, then `algomentor chat`.");

    Ok(())
}
