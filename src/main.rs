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

use anyhow::Result;
use asmnorm::file_reader::AsmFileReader;
use asmnorm::process_asm;
use clap::Parser as clap_parser;
use std::fs;
use std::path::PathBuf;

#[derive(clap_parser)]
#[clap(version = "0.1.0")]
struct Opts {
    /// Assembly file produced by the compiler
    #[clap(short, long)]
    input: PathBuf,
    /// Where to write the normalised assembly
    #[clap(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    let reader = AsmFileReader;
    let normalised = process_asm(&opts.input, &reader)?;

    fs::write(&opts.output, normalised)?;
    println!(
        "Successfully normalised {} to {}",
        opts.input.display(),
        opts.output.display()
    );

    Ok(())
}
