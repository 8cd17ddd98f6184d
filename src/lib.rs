//! A library for creating TAR and ZIP archives in memory, without
//! touching the filesystem and without linking a compression library.
//!
//! Both builders consume a sequence of (path, contents, options) entries
//! and return the finished archive as one byte vector. The TAR output is
//! UStar compatible, 512-byte block aligned, with the GNU long-name
//! extension for paths the standard header cannot hold. The ZIP output
//! uses the store method only (contents kept verbatim), single disk, with
//! the UTF-8 name flag set.
//!
//! The [`codec`] module carries the byte-level building blocks — a
//! lossless UTF-16 to UTF-8 transcoder, Base64, the source-map Base64 VLQ
//! decoder and a table-driven CRC-32 — and is usable on its own.
//!
//! ## Examples
//!
//! Build one archive of each kind from the same entries:
//!
//!```rust
//! use archbuf::{options::FileOptions, tar::TarArchive, types::FileDateTime, zip::ZipArchive};
//!
//! let options = FileOptions::default()
//!     .last_modified_time(FileDateTime::Unix(1_700_000_000))
//!     .unix_permissions(0o644);
//!
//! let mut tar = TarArchive::new();
//! tar.append("file1.txt", b"hello\n", &options);
//! tar.append("file2.txt", b"world\n", &options);
//! let tar_bytes = tar.finalize();
//! assert_eq!(tar_bytes.len() % 512, 0);
//!
//! let mut zip = ZipArchive::new();
//! zip.append("file1.txt", b"hello\n", &options);
//! zip.append("file2.txt", b"world\n", &options);
//! let zip_bytes = zip.finalize();
//! assert_eq!(&zip_bytes[0..4], &[b'P', b'K', 3, 4]);
//!```
//!
//! Checksum and transport encodings from [`codec`]:
//!
//!```rust
//! use archbuf::codec;
//!
//! assert_eq!(codec::crc32(b"123456789"), 0xCBF43926);
//! assert_eq!(codec::encode_base64(b"foobar"), "Zm9vYmFy");
//! assert_eq!(codec::decode_base64_vlq("ACDehB").unwrap(), [0, 1, -1, 15, -16]);
//!```

mod constants;

pub mod codec;
pub mod error;
pub mod options;
pub mod tar;
pub mod types;
pub mod writer;
pub mod zip;
