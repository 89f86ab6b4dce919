use std::{env, error::Error, fs, path::PathBuf};

use ironfb::codegen::{GeneratorOptions, generate_inline};
use ironfb::schema::Schema;

fn main() -> Result<(), Box<dyn Error>> {
    // Generator logs go to the build output, e.g. RUST_LOG=debug cargo build -vv
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let schema_path = manifest_dir.join("schema").join("monster.json");
    println!("cargo:rerun-if-changed={}", schema_path.display());
    println!("cargo:rerun-if-env-changed=RUST_LOG");

    let schema = Schema::from_json(&fs::read_to_string(&schema_path)?)?;
    tracing::info!(
        "Compiling {} with {} enums and {} structs",
        schema_path.display(),
        schema.enums.len(),
        schema.structs.len()
    );

    let options = GeneratorOptions::new().runtime_path("ironfb::core");
    let code = generate_inline(&schema, options)?;

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("generated.rs"), code)?;
    Ok(())
}
