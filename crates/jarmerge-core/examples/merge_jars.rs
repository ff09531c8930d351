//! Example: Merging containers with jarmerge-core
//!
//! Run with: `cargo run --example merge_jars`

use jarmerge_core::ArchiveMerger;
use jarmerge_core::MergeConfig;
use jarmerge_core::merge_archives;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let client = dir.path().join("client.jar");
    let modded = dir.path().join("mod.jar");
    write_jar(&client, &[("a.txt", "A"), ("b.txt", "B")])?;
    write_jar(&modded, &[("b.txt", "X"), ("c.txt", "C")])?;

    // Example 1: Simple merge with default config
    println!("Example 1: Simple merge");
    let output = dir.path().join("merged.jar");
    let report = merge_archives(&client, &modded, &output, &MergeConfig::default())?;
    println!("  Wrote {} entries", report.entries_written());
    println!("  Skipped duplicates: {:?}", report.skipped_entries);

    // Example 2: Configured merger, uncompressed output
    println!("\nExample 2: Stored output");
    let merger = ArchiveMerger::new(MergeConfig::default().with_store_only(true));
    let output = dir.path().join("stored.jar");
    let report = merger.merge(&client, &modded, &output)?;
    println!(
        "  {} bytes of payload in a {} byte container",
        report.bytes_written, report.bytes_compressed
    );

    println!("\nExamples completed successfully!");
    Ok(())
}

fn write_jar(path: &Path, entries: &[(&str, &str)]) -> Result<(), Box<dyn std::error::Error>> {
    let mut zip = ZipWriter::new(File::create(path)?);
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default())?;
        zip.write_all(data.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}
