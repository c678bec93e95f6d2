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

// The passes run in a fixed order; each one establishes state the next
// depends on: link resolves symbolic references to instruction indices,
// collect/classify build the label table and assign roles, patch rewrites
// instructions (and drops directives), merge coalesces adjacent literal
// pools, rename assigns the canonical label names.

mod classify;
mod link;
mod merge;
mod patch;
mod rename;

pub use classify::{classify_labels, collect_labels};
pub use link::link_instructions;
pub use merge::merge_data_labels;
pub use patch::patch_instructions;
pub use rename::rename_labels;
