//! Build script for photorig-rig
//!
//! Validates rig.toml at compile time so a broken default configuration is
//! never embedded into the binary.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=rig.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("rig.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: rig.toml not found!                                      ║\n\
            ║                                                                  ║\n\
            ║  The rig binary embeds rig.toml as its default configuration.    ║\n\
            ║  Please create one in the photorig-rig directory.                ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("\n  ERROR: cannot read rig.toml: {}\n", e),
    };

    let config: toml::Table = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => panic!("\n  ERROR: rig.toml is not valid TOML\n\n{}\n", e),
    };

    for section in ["pins", "timing", "camera"] {
        if !config.contains_key(section) {
            panic!("\n  ERROR: rig.toml is missing the [{}] section\n", section);
        }
    }

    let coils = config
        .get("pins")
        .and_then(|pins| pins.get("slider"))
        .and_then(|slider| slider.as_array())
        .map(|slider| slider.len());
    if coils != Some(4) {
        panic!("\n  ERROR: rig.toml pins.slider must list exactly four GPIO numbers\n");
    }
}
