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

use crate::ast::{AsmFile, Instruction, LabelType};

/// Rewrite every label to its canonical `_<role><function>_<n>` name. The
/// per-role counters restart in each function; the function counter makes
/// names unique across the whole file. References reach labels through
/// their resolved indices, so no further fixup is needed.
pub fn rename_labels(asmfile: &mut AsmFile) {
    for (nfunction, function) in asmfile.functions.iter_mut().enumerate() {
        let mut ncode = 0;
        let mut ndata = 0;
        let mut ncase = 0;
        let mut nother = 0;

        for insn in &mut function.instructions {
            let Instruction::Label(label) = insn else {
                continue;
            };
            let counter = match label.kind {
                LabelType::Code => &mut ncode,
                LabelType::Data => &mut ndata,
                LabelType::Case => &mut ncase,
                LabelType::Other => &mut nother,
            };
            label.name = format!("_{}{}_{}", label.kind.as_str(), nfunction, counter);
            *counter += 1;
        }
    }
}
