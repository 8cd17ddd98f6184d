//! A ZIP archive assembled in memory, store method only.
//!
//! The implementation is based on
//! [PKWARE's APPNOTE.TXT v6.3.10](https://pkware.cachefly.net/webdocs/casestudies/APPNOTE.TXT)

use crate::codec;
use crate::constants::{
    CENTRAL_DIRECTORY_END_SIGNATURE, CENTRAL_DIRECTORY_ENTRY_SIGNATURE,
    LOCAL_FILE_HEADER_SIGNATURE, MSDOS_DIRECTORY_ATTRIBUTE, UTF8_NAMES_FLAG,
    VERSION_NEEDED_TO_EXTRACT,
};
use crate::options::FileOptions;
use crate::types::{InternalFileAttributes, PosixFileType};
use crate::writer::{ByteWriter, Endianness};

/// A zip archive, assembled in memory.
///
/// Append entries one by one using the [`append`](Self::append) family of
/// functions, in the order they are to appear: the central directory
/// records offsets into bytes already written. When finished, use the
/// [`finalize`](Self::finalize) function to take the archive bytes.
pub struct ZipArchive {
    content: ByteWriter,
    directory: ByteWriter,
    entry_count: u32,
    archive_comment: Option<Vec<u8>>,
}

impl ZipArchive {
    pub fn new() -> ZipArchive {
        ZipArchive {
            content: ByteWriter::new(Endianness::Little),
            directory: ByteWriter::new(Endianness::Little),
            entry_count: 0,
            archive_comment: None,
        }
    }

    /// Get archive current total bytes written, central directory
    /// excluded until [`finalize`](Self::finalize).
    pub fn get_archive_size(&self) -> usize {
        self.content.len()
    }

    /// Append a new entry using the provided name, payload and options.
    /// Contents are stored verbatim, without compression.
    ///
    /// # Arguments
    /// * `file_name` - Name of the archive entry, UTF-8 encoded
    /// * `data` - The entry's payload
    /// * `options` - Entry permissions, modification time and comment
    pub fn append(&mut self, file_name: &str, data: &[u8], options: &FileOptions) {
        self.write_entry(
            file_name,
            data,
            PosixFileType::Regular,
            0,
            options.mode_or(0o644),
            options,
        );
    }

    /// Append a directory entry. The stored name ends with a single `/`.
    pub fn append_directory(&mut self, file_name: &str, options: &FileOptions) {
        let file_name = match file_name.chars().last() {
            Some('/') | Some('\\') => file_name.to_owned(),
            _ => {
                let mut s = file_name.to_owned();
                s.push('/');
                s
            }
        };

        self.write_entry(
            &file_name,
            &[],
            PosixFileType::Directory,
            MSDOS_DIRECTORY_ATTRIBUTE,
            options.mode_or(0o755),
            options,
        );
    }

    /// Set the ZIP archive comment, written by
    /// [`finalize`](Self::finalize).
    ///
    /// This sets the raw bytes of the comment, typically expected to be
    /// encoded in UTF-8. The comment is truncated to 0xFFFF bytes.
    pub fn set_archive_comment(&mut self, comment: &str) {
        let bytes = comment.as_bytes();
        let len = bytes.len().min(u16::MAX as usize);
        self.archive_comment = Some(bytes[0..len].to_owned());
    }

    fn write_entry(
        &mut self,
        file_name: &str,
        data: &[u8],
        file_type: PosixFileType,
        dos_attributes: u32,
        mode: u32,
        options: &FileOptions,
    ) {
        let path = file_name.as_bytes();
        let comment = options.comment.unwrap_or("").as_bytes();
        let extra_field: &[u8] = &[];

        let (date, time) = options.last_modified_time.ms_dos();
        let crc32 = codec::crc32(data);
        let size = data.len() as u32;
        let header_offset = self.content.position() as u32;

        self.content.write_u32(LOCAL_FILE_HEADER_SIGNATURE);

        // The metadata run below is reused verbatim in the central
        // directory record.
        let meta_start = self.content.position();

        self.content.write_u16(VERSION_NEEDED_TO_EXTRACT);
        self.content.write_u16(UTF8_NAMES_FLAG);
        self.content.write_u16(options.compression_method.zip_code());
        self.content.write_u16(time);
        self.content.write_u16(date);
        self.content.write_u32(crc32);
        self.content.write_u32(size); // compressed, equal under store
        self.content.write_u32(size); // uncompressed
        self.content.write_u16(path.len() as u16);
        self.content.write_u16(extra_field.len() as u16);

        let meta_end = self.content.position();

        self.content.write_bytes(path);
        self.content.write_bytes(extra_field);
        self.content.write_bytes(data);

        // POSIX type and permissions ride in the upper half, DOS
        // attributes in the lower byte.
        let external_attributes = ((file_type.mode_bits() | mode) << 16) | dos_attributes;

        self.directory.write_u32(CENTRAL_DIRECTORY_ENTRY_SIGNATURE);
        self.directory.write_u8(VERSION_NEEDED_TO_EXTRACT as u8);
        self.directory.write_u8(options.system.value());
        self.directory
            .write_bytes(&self.content.as_slice()[meta_start..meta_end]);
        self.directory.write_u16(comment.len() as u16);
        self.directory.write_u16(0); // disk number start
        self.directory
            .write_u16(InternalFileAttributes::Binary.value());
        self.directory.write_u32(external_attributes);
        self.directory.write_u32(header_offset);
        self.directory.write_bytes(path);
        self.directory.write_bytes(extra_field);
        self.directory.write_bytes(comment);

        self.entry_count += 1;
    }

    /// Finalize the archive: append the central directory and the end of
    /// central directory record, and return the archive bytes.
    ///
    /// Consuming the archive here is what makes finalizing twice, or
    /// appending to invalidated offsets, impossible.
    pub fn finalize(mut self) -> Vec<u8> {
        let directory_offset = self.content.position() as u32;
        let directory_size = self.directory.position() as u32;

        self.content.write_bytes(self.directory.as_slice());

        let entries = self.entry_count.min(u32::from(u16::MAX)) as u16;

        self.content.write_u32(CENTRAL_DIRECTORY_END_SIGNATURE);
        self.content.write_u16(0); // number of this disk
        self.content.write_u16(0); // disk with the central directory
        self.content.write_u16(entries); // entries on this disk
        self.content.write_u16(entries); // entries in total
        self.content.write_u32(directory_size);
        self.content.write_u32(directory_offset);

        match &self.archive_comment {
            Some(comment) => {
                self.content.write_u16(comment.len() as u16);
                self.content.write_bytes(comment);
            }
            None => self.content.write_u16(0),
        }

        self.content.into_bytes()
    }
}

impl Default for ZipArchive {
    fn default() -> Self {
        ZipArchive::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{
        CENTRAL_DIRECTORY_ENTRY_BASE_SIZE, END_OF_CENTRAL_DIRECTORY_SIZE, FILE_HEADER_BASE_SIZE,
    };
    use crate::types::FileDateTime;

    #[test]
    fn local_header_precedes_path_and_payload() {
        let mut archive = ZipArchive::new();
        let options = FileOptions::default().last_modified_time(FileDateTime::Zero);

        archive.append("file1.txt", b"hello", &options);

        let expected = FILE_HEADER_BASE_SIZE + "file1.txt".len() + b"hello".len();
        assert_eq!(archive.get_archive_size(), expected);
    }

    #[test]
    fn directory_record_grows_per_entry() {
        let mut archive = ZipArchive::new();
        let options = FileOptions::default().last_modified_time(FileDateTime::Zero);

        archive.append("a", b"", &options);
        assert_eq!(
            archive.directory.len(),
            CENTRAL_DIRECTORY_ENTRY_BASE_SIZE + 1
        );

        let commented = options.clone().set_file_comment("note");
        archive.append("bb", b"", &commented);
        assert_eq!(
            archive.directory.len(),
            2 * CENTRAL_DIRECTORY_ENTRY_BASE_SIZE + 1 + 2 + 4
        );
    }

    #[test]
    fn empty_archive_is_a_bare_end_record() {
        let archive = ZipArchive::new();
        let bytes = archive.finalize();

        assert_eq!(bytes.len(), END_OF_CENTRAL_DIRECTORY_SIZE);
        assert_eq!(&bytes[0..4], &0x06054b50u32.to_le_bytes());
    }
}
