use std::fmt;

use crate::errors::ServiceError;

/// One of the two files the service is willing to serve and overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsvFile {
    QuestCompletions,
    UserPoints,
}

impl CsvFile {
    pub const ALL: [CsvFile; 2] = [CsvFile::QuestCompletions, CsvFile::UserPoints];

    /// File name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            CsvFile::QuestCompletions => "quest_completions.csv",
            CsvFile::UserPoints => "user_points.csv",
        }
    }

    /// Header-only content served before the first write.
    pub fn default_contents(self) -> &'static str {
        match self {
            CsvFile::QuestCompletions => {
                "userAddress,projectId,questId,completed,timestamp,customProgress\n"
            }
            CsvFile::UserPoints => "userAddress,projectId,points\n",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.file_name() == name)
    }

    /// Resolve a requested name for reading: unknown names are "not found".
    pub fn for_read(name: &str) -> Result<Self, ServiceError> {
        if name.is_empty() {
            return Err(ServiceError::MissingFilename);
        }
        Self::from_name(name).ok_or_else(|| ServiceError::UnknownFile(name.to_string()))
    }

    /// Resolve a requested name for writing: unknown names are rejected.
    pub fn for_write(name: &str) -> Result<Self, ServiceError> {
        if name.is_empty() {
            return Err(ServiceError::MissingFilename);
        }
        Self::from_name(name).ok_or_else(|| ServiceError::InvalidFilename(name.to_string()))
    }
}

impl fmt::Display for CsvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
