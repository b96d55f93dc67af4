//! Build script for the Jamendo track search CLI.
//!
//! Copies `.env.example` from the crate root into the local data directory
//! (`<data_local_dir>/jamsearch/.env.example`) so a configuration template
//! sits next to the `.env` file `config::load_env` reads. Failing to copy is
//! never fatal; it only emits a cargo warning.

use std::{env, fs, path::PathBuf};

fn copy_template(manifest_dir: PathBuf) -> std::io::Result<()> {
    let template = manifest_dir.join(".env.example");
    if !template.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("jamsearch");
    fs::create_dir_all(&out_dir)?;
    fs::copy(&template, out_dir.join(".env.example"))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    if let Err(e) = copy_template(manifest_dir) {
        println!("cargo:warning=cannot install .env.example: {}", e);
    }

    Ok(())
}
