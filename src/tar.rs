//! A tape archive compatible with UStar (Unix Standard TAR), also
//! readable according to more recent POSIX.1-2001 / pax.

use crate::constants::{
    GNU_LONG_NAME_PATH, TAR_BLOCK_SIZE, TAR_CHECKSUM_OFFSET, TAR_MAGIC_OFFSET, TAR_NAME_SIZE,
    TAR_PREFIX_OFFSET, TAR_PREFIX_SIZE, USTAR_MAGIC,
};
use crate::options::FileOptions;
use crate::types::TarEntryType;
use crate::writer::{ByteWriter, Endianness};

/// Convert a number to octal, left-pad with zeroes to `width - 1` digits
/// and append an ASCII NUL.
fn octal_field(value: u64, width: usize) -> String {
    format!("{:0>digits$o}\0", value, digits = width - 1)
}

/// A tar archive, assembled in memory.
///
/// Append entries one by one using the [`append`](Self::append) family of
/// functions; each entry is serialized immediately and irrevocably. When
/// finished, use the [`finalize`](Self::finalize) function to take the
/// archive bytes.
pub struct TarArchive {
    content: ByteWriter,
}

impl TarArchive {
    pub fn new() -> TarArchive {
        TarArchive {
            content: ByteWriter::new(Endianness::Little),
        }
    }

    /// Get archive current total bytes written.
    pub fn get_archive_size(&self) -> usize {
        self.content.len()
    }

    /// Append a regular file entry.
    ///
    /// # Arguments
    /// * `path` - Relative path of the archive entry, UTF-8 encoded
    /// * `data` - The entry's payload
    /// * `options` - Entry permissions and modification time
    pub fn append(&mut self, path: &str, data: &[u8], options: &FileOptions) {
        self.append_entry(path, data, TarEntryType::Regular, options);
    }

    /// Append a directory entry. The stored name ends with a single `/`
    /// and the entry carries no data.
    pub fn append_directory(&mut self, path: &str, options: &FileOptions) {
        let path = match path.chars().last() {
            Some('/') | Some('\\') => path.to_owned(),
            _ => {
                let mut s = path.to_owned();
                s.push('/');
                s
            }
        };

        self.append_entry(&path, &[], TarEntryType::Directory, options);
    }

    /// Append an entry of an arbitrary type. Only regular files carry a
    /// data section in practice; the caller is responsible for passing a
    /// type and payload that make sense together. Link targets are not
    /// stored (the link-name field stays zeroed).
    pub fn append_entry(
        &mut self,
        path: &str,
        data: &[u8],
        entry_type: TarEntryType,
        options: &FileOptions,
    ) {
        let default_mode = match entry_type {
            TarEntryType::Directory => 0o755,
            _ => 0o644,
        };

        let mut encoded_path = path.as_bytes().to_vec();
        encoded_path.push(0);

        self.write_entry(
            &encoded_path,
            data,
            entry_type,
            options.mode_or(default_mode),
            options.last_modified_time.timestamp().max(0) as u64,
        );
    }

    /// Serialize one 512-byte header block plus padded contents.
    ///
    /// `path` is NUL-terminated. Paths longer than the 100-byte name
    /// field are split at a `/` into name and prefix; when no acceptable
    /// split exists the full path travels in a preceding GNU long-name
    /// entry and the name field keeps a truncated best effort.
    fn write_entry(
        &mut self,
        path: &[u8],
        data: &[u8],
        entry_type: TarEntryType,
        mode: u32,
        mod_time: u64,
    ) {
        let path_len = path.len();
        let mut name_start = 0;
        let mut prefix_start = 0;

        if path_len > TAR_NAME_SIZE {
            let mut pos = path_len - TAR_NAME_SIZE;
            name_start = pos;

            // Find the first slash at or after the cut.
            while pos < path_len && path[pos] != b'/' {
                pos += 1;
            }
            if pos < path_len - 1 {
                name_start = pos + 1;
            }

            if path[name_start - 1] != b'/' || name_start > TAR_PREFIX_SIZE + 1 {
                // Path is unrepresentable in UStar format. Use a
                // GNU-specific kludge: store it in another entry with a
                // special name and type flag.
                let mut long_link = GNU_LONG_NAME_PATH.as_bytes().to_vec();
                long_link.push(0);
                self.write_entry(&long_link, path, TarEntryType::GnuLongName, mode, mod_time);
            }

            prefix_start = name_start.saturating_sub(TAR_PREFIX_SIZE + 1);
        }

        let uid = 0;
        let gid = 0;
        let header_start = self.content.position();

        // Last 100 bytes of the path, NUL included.
        self.content.write_bytes(&path[name_start..]);
        self.content.pad_to(header_start + TAR_NAME_SIZE);

        self.content.write_ascii(&octal_field(u64::from(mode), 8));
        self.content.write_ascii(&octal_field(uid, 8));
        self.content.write_ascii(&octal_field(gid, 8));
        self.content.write_ascii(&octal_field(data.len() as u64, 12));
        self.content.write_ascii(&octal_field(mod_time, 12));

        // The checksum is computed over the header with this field held
        // as eight spaces, then patched in below.
        self.content.write_ascii("        ");
        self.content.write_u8(entry_type.flag_byte());

        // Link name stays zeroed.
        self.content.pad_to(header_start + TAR_MAGIC_OFFSET);
        self.content.write_bytes(USTAR_MAGIC);

        // User and group names and device numbers stay zeroed.
        self.content.pad_to(header_start + TAR_PREFIX_OFFSET);

        // Leading bytes of the path, trailing separator dropped.
        if name_start > 0 {
            self.content.write_bytes(&path[prefix_start..name_start - 1]);
        }
        self.content.pad_to(header_start + TAR_BLOCK_SIZE);

        let header_end = self.content.position();
        let sum: u64 = self.content.as_slice()[header_start..header_end]
            .iter()
            .map(|&byte| u64::from(byte))
            .sum();

        // Six octal digits and a NUL; the eighth byte keeps its space.
        self.content.set_position(header_start + TAR_CHECKSUM_OFFSET);
        self.content.write_ascii(&octal_field(sum, 7));
        self.content.set_position(header_end);

        self.content.write_bytes(data);

        let end = self.content.position();
        self.content.pad_to(end.div_ceil(TAR_BLOCK_SIZE) * TAR_BLOCK_SIZE);
    }

    /// Take the archive bytes. Consuming the archive here is what makes
    /// appending after the end impossible.
    pub fn finalize(self) -> Vec<u8> {
        self.content.into_bytes()
    }
}

impl Default for TarArchive {
    fn default() -> Self {
        TarArchive::new()
    }
}
