//! Container fixtures shared by the integration test binaries.

#![allow(dead_code, clippy::unwrap_used)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builds a stored container; names ending in `/` become directories.
pub fn create_test_zip<N: AsRef<str>, D: AsRef<[u8]>>(entries: &[(N, D)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (name, data) in entries {
        let name = name.as_ref();
        if name.ends_with('/') {
            zip.add_directory(name, options).unwrap();
        } else {
            zip.start_file(name, options).unwrap();
            zip.write_all(data.as_ref()).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

pub fn write_test_zip<N: AsRef<str>, D: AsRef<[u8]>>(path: &Path, entries: &[(N, D)]) {
    std::fs::write(path, create_test_zip(entries)).unwrap();
}

/// Reads `(name, payload)` pairs in container order.
pub fn read_zip_entries(data: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut payload = Vec::new();
            file.read_to_end(&mut payload).unwrap();
            (file.name().to_string(), payload)
        })
        .collect()
}

pub fn read_zip_file(path: &Path) -> Vec<(String, Vec<u8>)> {
    read_zip_entries(&std::fs::read(path).unwrap())
}
