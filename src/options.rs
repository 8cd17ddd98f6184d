use crate::types::{CompressionMethod, FileCompatibilitySystem, FileDateTime};

/// Metadata for an entry to be archived.
#[derive(Clone)]
pub struct FileOptions<'a> {
    /// The entry's selected compression method (ZIP only).
    pub compression_method: CompressionMethod,

    /// The entry's modification time.
    pub last_modified_time: FileDateTime,

    /// Unix permissions.
    pub unix_permissions: Option<u32>,

    /// The system of origin.
    pub system: FileCompatibilitySystem,

    /// Entry comment (ZIP only).
    pub comment: Option<&'a str>,
}

impl<'a> FileOptions<'a> {
    /// Set the compression method for the new entry.
    ///
    /// Only `CompressionMethod::Store` exists; the method is part of the
    /// options so the headers never carry a bare method code.
    pub fn compression_method(mut self, method: CompressionMethod) -> FileOptions<'a> {
        self.compression_method = method;
        self
    }

    /// Set the last modified time.
    ///
    /// The default is the current timestamp.
    pub fn last_modified_time(mut self, mod_time: FileDateTime) -> FileOptions<'a> {
        self.last_modified_time = mod_time;
        self
    }

    /// Set the permissions for the new entry.
    ///
    /// The format is represented with unix-style permissions.
    /// The default is `0o644`, which represents `rw-r--r--` for files,
    /// and `0o755`, which represents `rwxr-xr-x` for directories.
    ///
    /// This method only preserves the file permission bits (via a
    /// `& 0o777`) and discards higher file mode bits, so it cannot be
    /// used to denote an entry as a directory, symlink, or other special
    /// file type.
    pub fn unix_permissions(mut self, mode: u32) -> FileOptions<'a> {
        self.unix_permissions = Some(mode & 0o777);
        self
    }

    /// Set the entry comment.
    pub fn set_file_comment(mut self, comment: &'a str) -> FileOptions<'a> {
        self.comment = Some(comment);
        self
    }

    /// Set the system of origin recorded in the central directory.
    pub fn system(mut self, system: FileCompatibilitySystem) -> FileOptions<'a> {
        self.system = system;
        self
    }

    pub(crate) fn mode_or(&self, default: u32) -> u32 {
        self.unix_permissions.unwrap_or(default)
    }
}

impl<'a> Default for FileOptions<'a> {
    /// Construct a new FileOptions object
    fn default() -> Self {
        Self {
            compression_method: CompressionMethod::Store,
            last_modified_time: FileDateTime::Now,
            unix_permissions: None,
            system: FileCompatibilitySystem::Unix,
            comment: None,
        }
    }
}
