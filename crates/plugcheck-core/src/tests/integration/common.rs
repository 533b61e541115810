#![cfg(test)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::storage::{Archive, MemoryArchive};

/// Wrap `body` in a root element that declares the XInclude prefix
pub fn plugin_xml(body: &str) -> String {
    format!(
        r#"<idea-plugin xmlns:xi="http://www.w3.org/2001/XInclude">{}</idea-plugin>"#,
        body
    )
}

/// An in-memory jar with the given entries
pub fn memory_jar(name: &str, entries: &[(&str, &str)]) -> MemoryArchive {
    entries
        .iter()
        .fold(MemoryArchive::new(name), |jar, (path, contents)| {
            jar.with_entry(path, contents.as_bytes())
        })
}

/// Same as [`memory_jar`], boxed for an archive list
pub fn boxed_jar(name: &str, entries: &[(&str, &str)]) -> Box<dyn Archive> {
    Box::new(memory_jar(name, entries))
}

/// Plugin jar holding only `META-INF/plugin.xml`
pub fn plugin_jar(body: &str) -> Box<dyn Archive> {
    boxed_jar("plugin.jar", &[("META-INF/plugin.xml", &plugin_xml(body))])
}

/// Write a real zip file at `dir/name`; entries ending in `/` become directories
pub fn write_zip(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("Failed to create zip file");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (entry, contents) in entries {
        if entry.ends_with('/') {
            zip.add_directory(*entry, options).expect("Failed to add directory");
        } else {
            zip.start_file(*entry, options).expect("Failed to start zip entry");
            zip.write_all(contents.as_bytes()).expect("Failed to write zip entry");
        }
    }
    zip.finish().expect("Failed to finish zip");
    path
}
