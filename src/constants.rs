use std::mem::size_of;

pub const FILE_HEADER_BASE_SIZE: usize = 7 * size_of::<u16>() + 4 * size_of::<u32>();
pub const CENTRAL_DIRECTORY_ENTRY_BASE_SIZE: usize = 11 * size_of::<u16>() + 6 * size_of::<u32>();
pub const END_OF_CENTRAL_DIRECTORY_SIZE: usize = 5 * size_of::<u16>() + 3 * size_of::<u32>();

pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x04034b50;
pub const CENTRAL_DIRECTORY_ENTRY_SIGNATURE: u32 = 0x02014b50;
pub const CENTRAL_DIRECTORY_END_SIGNATURE: u32 = 0x06054b50;

/// Minimum software version needed to extract a store-only entry (1.0).
pub const VERSION_NEEDED_TO_EXTRACT: u16 = 10;

/// Language encoding flag (EFS): file name and comment are UTF-8.
pub const UTF8_NAMES_FLAG: u16 = 1 << 11;

/// DOS directory attribute bit, kept in the low byte of the external
/// attributes for directory entries.
pub const MSDOS_DIRECTORY_ATTRIBUTE: u32 = 0x10;

pub const TAR_BLOCK_SIZE: usize = 512;
pub const TAR_NAME_SIZE: usize = 100;
pub const TAR_PREFIX_SIZE: usize = 155;

pub const TAR_CHECKSUM_OFFSET: usize = 148;
pub const TAR_MAGIC_OFFSET: usize = 257;
pub const TAR_PREFIX_OFFSET: usize = 345;

/// UStar magic `ustar\0` immediately followed by the version field `00`.
pub const USTAR_MAGIC: &[u8; 8] = b"ustar\x0000";

/// Entry name carrying an oversized path in its contents (GNU extension).
pub const GNU_LONG_NAME_PATH: &str = "././@LongLink";
