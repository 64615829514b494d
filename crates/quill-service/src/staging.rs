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

use quill_contracts::{ServiceError, ServiceResult};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Hint for staged-file naming. Affects the suffix only, never content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Source,
    Config,
}

impl SourceKind {
    fn suffix(self) -> &'static str {
        match self {
            SourceKind::Source => ".quill",
            SourceKind::Config => ".json",
        }
    }
}

/// A request-scoped staged copy of a payload. The backing temp file is
/// removed on drop.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    pub fn stage(bytes: &[u8], kind: SourceKind) -> ServiceResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("staged-")
            .suffix(kind.suffix())
            .tempfile()
            .map_err(|e| ServiceError::Staging(e.to_string()))?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads back the staged content, including any in-place mutation the
    /// toolchain performed (used after formatting, before re-upload).
    pub fn contents(&self) -> ServiceResult<Vec<u8>> {
        Ok(std::fs::read(self.file.path())?)
    }
}
