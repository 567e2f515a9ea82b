use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ScanError;

use super::{Declaration, ManifestReader};

/// Reader for NuGet `packages.config` manifests.
///
/// Extracts `<package id="..." version="..." />` elements in document order.
/// Entries without an `id` attribute are skipped; repeated entries are kept
/// as they appear.
pub struct PackagesConfigReader;

impl PackagesConfigReader {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestReader for PackagesConfigReader {
    fn read(&self, path: &Path) -> Result<Vec<Declaration>, ScanError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::ManifestRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        parse_packages_config(&content).map_err(|reason| ScanError::ManifestRead {
            path: path.to_path_buf(),
            reason,
        })
    }
}

fn parse_packages_config(content: &str) -> Result<Vec<Declaration>, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut declarations = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                if tag == "package" {
                    let mut id = String::new();
                    let mut version = String::new();
                    for attr in e.attributes().flatten() {
                        let key =
                            String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                        let val = attr.unescape_value().unwrap_or_default().into_owned();
                        match key.as_str() {
                            "id" => id = val,
                            "version" => version = val,
                            _ => {}
                        }
                    }
                    if !id.is_empty() {
                        declarations.push(Declaration {
                            package_id: id,
                            version,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }

    Ok(declarations)
}
