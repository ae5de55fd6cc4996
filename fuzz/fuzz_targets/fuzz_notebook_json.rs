#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let fake_path = Path::new("fuzz.ipynb");

        // Parsing and exporting arbitrary notebooks should never panic
        if let Ok(notebook) = nbpost::Notebook::from_json(content, fake_path) {
            let exporter = nbpost::MarkdownExporter::new(nbpost::ExportConfig::blog());
            let _ = exporter.export(&notebook, "fuzz");
        }
    }
});
