// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

pub mod config;
pub mod driver;
pub mod http;
pub mod pipeline;
pub mod results;
pub mod staging;
pub mod toolchain;

pub use driver::{CapturedOutput, Comparison, ScriptedInput, TestDriver};
pub use http::{build_router, AppState};
pub use pipeline::{SnippetService, DEFAULT_VERSION};
pub use staging::{SourceKind, StagedFile};
pub use toolchain::{
    DefaultInput, DefaultOutput, EnvProvider, InputProvider, OutputSink, SystemEnv, Toolchain,
};
