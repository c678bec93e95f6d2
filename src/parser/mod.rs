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

mod ast_builder;

use crate::ast::{AsmFile, Function};
use crate::errors::AssemblyError;
use anyhow::Result;
use ast_builder::AstBuilder;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

// Derive the parser from our grammar file.
#[derive(Parser)]
#[grammar = "./grammar.pest"]
pub struct AsmParser;

// Main parsing function that takes the entire source code string.
pub fn parse_source(source: &str) -> Result<AsmFile> {
    let mut pairs = AsmParser::parse(Rule::program, source)
        .map_err(|e| AssemblyError::BadInputFile(Box::new(e)))?;

    let mut functions = Vec::new();
    for pair in pairs.next().unwrap().into_inner() {
        match pair.as_rule() {
            Rule::function => functions.push(build_function(pair)?),
            Rule::EOI => {}
            rule => unreachable!("unexpected rule at file level: {:?}", rule),
        }
    }

    Ok(AsmFile::new(functions))
}

fn build_function(pair: Pair<Rule>) -> Result<Function> {
    let mut inner = pair.into_inner();
    let name = header_name(inner.next().unwrap());

    let mut instructions = Vec::new();
    for line in inner {
        let stmt = line.into_inner().next().unwrap();
        instructions.push(AstBuilder::new(stmt).build_instruction()?);
    }

    Ok(Function::new(name, instructions))
}

// Both header shapes carry the function name as their first symbol.
fn header_name(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .unwrap()
        .into_inner()
        .find(|p| p.as_rule() == Rule::symbol)
        .unwrap()
        .as_str()
        .to_string()
}

// ------------- unit tests -------------
