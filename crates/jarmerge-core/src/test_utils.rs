//! Test utilities for building and inspecting containers.
//!
//! Helpers create in-memory ZIP containers and read merged output back as
//! `(name, payload)` pairs, so tests can compare entry order and content.
//!
//! # Panics
//!
//! All functions in this module panic on I/O errors.

#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation
)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Creates an in-memory ZIP container from `(name, payload)` pairs.
///
/// Names ending in `/` become directory entries. Files are stored
/// uncompressed.
#[must_use]
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

/// Creates a valid ZIP container with no entries.
#[must_use]
pub fn create_empty_zip() -> Vec<u8> {
    ZipWriter::new(Cursor::new(Vec::new()))
        .finish()
        .unwrap()
        .into_inner()
}

/// Writes a ZIP container built by [`create_test_zip`] to `path`.
pub fn write_test_zip<N: AsRef<str>, D: AsRef<[u8]>>(path: &Path, entries: &[(N, D)]) {
    std::fs::write(path, create_test_zip(entries)).unwrap();
}

/// Creates a stored container holding one entry per payload, every entry
/// named `name`.
///
/// Entries are written under distinct placeholder names of the same length,
/// which are then overwritten with `name` in both the local and central
/// headers. Payloads must not contain the placeholder runs of bytes `0x01`,
/// `0x02` and so on.
#[must_use]
pub fn create_zip_with_repeated_name(name: &str, payloads: &[&[u8]]) -> Vec<u8> {
    assert!(payloads.len() < 32, "too many payloads for placeholder names");
    let placeholders: Vec<String> = (1..=payloads.len())
        .map(|i| char::from(i as u8).to_string().repeat(name.len()))
        .collect();

    let entries: Vec<(&str, &[u8])> = placeholders
        .iter()
        .map(String::as_str)
        .zip(payloads.iter().copied())
        .collect();
    let mut data = create_test_zip(entries.as_slice());

    for placeholder in &placeholders {
        let needle = placeholder.as_bytes();
        let mut pos = 0;
        while let Some(found) = data[pos..].windows(needle.len()).position(|w| w == needle) {
            let at = pos + found;
            data[at..at + needle.len()].copy_from_slice(name.as_bytes());
            pos = at + needle.len();
        }
    }
    data
}

/// Creates an in-memory container from raw `(name, payload)` pairs, writing
/// every entry as a file even when its name ends in `/`.
#[must_use]
pub fn create_raw_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Reads every entry of an in-memory container, in container order.
#[must_use]
pub fn read_zip_entries(data: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut payload = Vec::new();
        file.read_to_end(&mut payload).unwrap();
        entries.push((file.name().to_string(), payload));
    }
    entries
}

/// Reads every entry of a container file on disk, in container order.
#[must_use]
pub fn read_zip_file(path: &Path) -> Vec<(String, Vec<u8>)> {
    read_zip_entries(&std::fs::read(path).unwrap())
}
