//! Build script for panel-covid.
//!
//! Gzips the snapshot CSVs and the regional boundary file into OUT_DIR so
//! they can be embedded via `include_bytes!` and inflated on mount. The
//! fixtures are refreshed by the CLI (`cvp-cli query` / `regional-query`);
//! a missing fixture becomes an empty archive so the app still builds and
//! reports the absence at runtime.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    let files = [
        ("../fixtures/confirmed_global.csv", "confirmed_global.csv.gz"),
        ("../fixtures/deaths_global.csv", "deaths_global.csv.gz"),
        ("../fixtures/recovered_global.csv", "recovered_global.csv.gz"),
        ("../fixtures/regional.csv", "regional.csv.gz"),
        ("../fixtures/chile_regions.geojson", "chile_regions.geojson.gz"),
    ];

    for (src_path, dest_name) in &files {
        let src = Path::new(src_path);
        let dest = Path::new(&out_dir).join(dest_name);

        let contents = if src.exists() {
            fs::read(src).unwrap_or_else(|e| {
                panic!("Failed to read {}: {}", src_path, e);
            })
        } else {
            println!(
                "cargo:warning=Fixture file {} not found, using empty placeholder",
                src_path
            );
            Vec::new()
        };

        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&contents).unwrap();
        let compressed = encoder.finish().unwrap();
        fs::write(&dest, compressed).unwrap_or_else(|e| {
            panic!("Failed to write {}: {}", dest.display(), e);
        });

        println!("cargo:rerun-if-changed={}", src_path);
    }

    println!("cargo:rerun-if-changed=build.rs");
}
