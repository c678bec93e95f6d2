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

pub const INVALID_DEST_OP_MSG: &str = "Invalid destination operand";
pub const INVALID_SRC_OP_MSG: &str = "Invalid source operand";
pub const INVALID_BASE_OP_MSG: &str = "Invalid base register operand";
pub const INVALID_TARGET_OP_MSG: &str = "Invalid branch target";
pub const INVALID_OP_MSG: &str = "Invalid operand";
