/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

pub mod ast;
pub mod emit;
pub mod errors;
pub mod file_reader;
pub mod parser;
pub mod passes;

use anyhow::{Context, Result};
use file_reader::FileReader;
use std::path::Path;

extern crate pest;
extern crate pest_derive;

/// Run the whole pipeline over one translation unit of assembly text and
/// return the normalised form. The pass order is fixed; each pass depends
/// on state established by the ones before it.
pub fn normalize(source: &str) -> Result<String> {
    let mut asmfile = parser::parse_source(source).context("Failed during parsing stage")?;

    passes::link_instructions(&mut asmfile);
    passes::collect_labels(&mut asmfile);
    passes::classify_labels(&mut asmfile);
    passes::patch_instructions(&mut asmfile);
    passes::merge_data_labels(&mut asmfile);
    passes::rename_labels(&mut asmfile);

    Ok(emit::dump(&asmfile))
}

pub fn process_asm<F: FileReader>(source_path: &Path, reader: &F) -> Result<String> {
    let source = reader
        .read_to_string(source_path)
        .with_context(|| format!("Failed to read input file: {}", source_path.display()))?;

    normalize(&source)
}
