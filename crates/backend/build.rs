use std::env;
use std::fs;
use std::path::Path;

/// Копирует config.toml из корня workspace рядом с бинарником
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=../../config.toml");

    // OUT_DIR: target/<profile>/build/backend-xxx/out
    let out_dir = env::var("OUT_DIR")?;
    let profile = env::var("PROFILE")?;
    let Some(target_dir) = Path::new(&out_dir).ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return Ok(());
    };

    let source_config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if source_config.exists() {
        fs::copy(&source_config, target_dir.join("config.toml"))?;
    } else {
        println!("cargo:warning=config.toml not found, using embedded default config");
    }
    Ok(())
}
