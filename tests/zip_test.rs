use archbuf::options::FileOptions;
use archbuf::types::FileDateTime;
use archbuf::zip::ZipArchive;

mod common;
use common::LittleReader;

const LOCAL_HEADER_SIZE: usize = 30;
const CENTRAL_ENTRY_SIZE: usize = 46;
const END_RECORD_SIZE: usize = 22;

fn zero_time_options<'a>() -> FileOptions<'a> {
    FileOptions::default().last_modified_time(FileDateTime::Zero)
}

#[test]
fn single_store_entry_structure() {
    let mut archive = ZipArchive::new();
    archive.append("a.txt", b"hi", &zero_time_options());
    let bytes = archive.finalize();

    let local_size = LOCAL_HEADER_SIZE + "a.txt".len() + b"hi".len();
    let central_size = CENTRAL_ENTRY_SIZE + "a.txt".len();
    assert_eq!(bytes.len(), local_size + central_size + END_RECORD_SIZE);

    // End of central directory record.
    let mut end = LittleReader::at(bytes.len() - END_RECORD_SIZE);
    assert_eq!(end.read_u32(&bytes), 0x06054b50);
    assert_eq!(end.read_u16(&bytes), 0); // this disk
    assert_eq!(end.read_u16(&bytes), 0); // directory disk
    assert_eq!(end.read_u16(&bytes), 1); // entries on this disk
    assert_eq!(end.read_u16(&bytes), 1); // entries in total
    assert_eq!(end.read_u32(&bytes), central_size as u32);
    assert_eq!(end.read_u32(&bytes), local_size as u32);
    assert_eq!(end.read_u16(&bytes), 0); // comment length

    // Local file header.
    let mut local = LittleReader::new();
    assert_eq!(local.read_u32(&bytes), 0x04034b50);
    assert_eq!(local.read_u16(&bytes), 10); // version needed
    assert_eq!(local.read_u16(&bytes), 1 << 11); // UTF-8 names
    assert_eq!(local.read_u16(&bytes), 0); // store method
    assert_eq!(local.read_u16(&bytes), 0); // midnight
    assert_eq!(local.read_u16(&bytes), 1 | (1 << 5)); // 1980-01-01
    assert_eq!(local.read_u32(&bytes), crc32fast::hash(b"hi"));
    assert_eq!(local.read_u32(&bytes), 2); // compressed size
    assert_eq!(local.read_u32(&bytes), 2); // uncompressed size
    assert_eq!(local.read_u16(&bytes), 5); // name length
    assert_eq!(local.read_u16(&bytes), 0); // extra field length
    assert_eq!(local.read_bytes(&bytes, 5), b"a.txt");
    assert_eq!(local.read_bytes(&bytes, 2), b"hi");
    assert_eq!(local.index(), local_size);

    // Central directory entry.
    let mut central = LittleReader::at(local_size);
    assert_eq!(central.read_u32(&bytes), 0x02014b50);
    assert_eq!(central.read_u8(&bytes), 10); // version made by
    assert_eq!(central.read_u8(&bytes), 3); // on Unix
    // The metadata run repeats the local header verbatim.
    assert_eq!(
        bytes[local_size + 6..local_size + 6 + 26],
        bytes[4..4 + 26]
    );
    central.skip(26);
    assert_eq!(central.read_u16(&bytes), 0); // comment length
    assert_eq!(central.read_u16(&bytes), 0); // disk number start
    assert_eq!(central.read_u16(&bytes), 0); // internal: binary
    let external = central.read_u32(&bytes);
    assert_eq!(external, ((8 << 12) | 0o644) << 16);
    assert_eq!(central.read_u32(&bytes), 0); // local header offset
    assert_eq!(central.read_bytes(&bytes, 5), b"a.txt");
}

#[test]
fn second_entry_references_the_first_ones_end() {
    let mut archive = ZipArchive::new();
    let options = zero_time_options();
    archive.append("first", b"aaaa", &options);
    archive.append("second.txt", b"bb", &options);
    let bytes = archive.finalize();

    let first_size = LOCAL_HEADER_SIZE + 5 + 4;
    let second_size = LOCAL_HEADER_SIZE + 10 + 2;
    let directory_offset = first_size + second_size;

    let mut end = LittleReader::at(bytes.len() - END_RECORD_SIZE + 8);
    assert_eq!(end.read_u16(&bytes), 2);
    assert_eq!(end.read_u16(&bytes), 2);
    assert_eq!(end.read_u32(&bytes), (2 * CENTRAL_ENTRY_SIZE + 5 + 10) as u32);
    assert_eq!(end.read_u32(&bytes), directory_offset as u32);

    // Second central entry points at the second local header.
    let second_entry = directory_offset + CENTRAL_ENTRY_SIZE + 5;
    let mut central = LittleReader::at(second_entry);
    assert_eq!(central.read_u32(&bytes), 0x02014b50);
    central.skip(38);
    assert_eq!(central.read_u32(&bytes), first_size as u32);
    assert_eq!(central.read_bytes(&bytes, 10), b"second.txt");

    // And the offset it records really is a local header.
    let mut local = LittleReader::at(first_size);
    assert_eq!(local.read_u32(&bytes), 0x04034b50);
}

#[test]
fn dos_date_and_time_come_from_the_entry_timestamp() {
    let mut archive = ZipArchive::new();
    // 2023-06-15T12:34:56Z.
    let options = FileOptions::default().last_modified_time(FileDateTime::Unix(1686832496));
    archive.append("t", b"", &options);
    let bytes = archive.finalize();

    let mut local = LittleReader::at(10);
    assert_eq!(local.read_u16(&bytes), 28 | (34 << 5) | (12 << 11));
    assert_eq!(local.read_u16(&bytes), 15 | (6 << 5) | (43 << 9));
}

#[test]
fn entry_and_archive_comments_are_recorded() {
    let mut archive = ZipArchive::new();
    let options = zero_time_options().set_file_comment("per entry");
    archive.append("c.txt", b"x", &options);
    archive.set_archive_comment("whole archive");
    let bytes = archive.finalize();

    let comment = b"whole archive";
    assert_eq!(&bytes[bytes.len() - comment.len()..], comment);

    let mut end = LittleReader::at(bytes.len() - comment.len() - 2);
    assert_eq!(end.read_u16(&bytes), comment.len() as u16);

    let directory_offset = LOCAL_HEADER_SIZE + 5 + 1;
    let mut central = LittleReader::at(directory_offset + 32);
    assert_eq!(central.read_u16(&bytes), 9); // entry comment length
    central.skip(12 + 5); // rest of the fixed fields, then the name
    assert_eq!(central.read_bytes(&bytes, 9), b"per entry");
}

#[test]
fn directory_entries_get_a_slash_and_directory_attributes() {
    let mut archive = ZipArchive::new();
    archive.append_directory("assets", &zero_time_options());
    let bytes = archive.finalize();

    let mut local = LittleReader::new();
    assert_eq!(local.read_u32(&bytes), 0x04034b50);
    local.skip(10);
    assert_eq!(local.read_u32(&bytes), 0); // CRC of nothing
    assert_eq!(local.read_u32(&bytes), 0);
    assert_eq!(local.read_u32(&bytes), 0);
    assert_eq!(local.read_u16(&bytes), 7);
    local.skip(2);
    assert_eq!(local.read_bytes(&bytes, 7), b"assets/");

    let directory_offset = LOCAL_HEADER_SIZE + 7;
    let mut central = LittleReader::at(directory_offset + 38);
    let external = central.read_u32(&bytes);
    assert_eq!(external, (((4 << 12) | 0o755) << 16) | 0x10);
}

#[test]
fn permissions_land_in_the_external_attributes() {
    let mut archive = ZipArchive::new();
    let options = zero_time_options().unix_permissions(0o600);
    archive.append("secret", b"", &options);
    let bytes = archive.finalize();

    let directory_offset = LOCAL_HEADER_SIZE + 6;
    let mut central = LittleReader::at(directory_offset + 38);
    assert_eq!(central.read_u32(&bytes), ((8 << 12) | 0o600) << 16);
}

#[test]
fn empty_archive_parses_as_zero_entries() {
    let bytes = ZipArchive::new().finalize();

    assert_eq!(bytes.len(), END_RECORD_SIZE);
    let mut end = LittleReader::new();
    assert_eq!(end.read_u32(&bytes), 0x06054b50);
    end.skip(4);
    assert_eq!(end.read_u16(&bytes), 0);
    assert_eq!(end.read_u16(&bytes), 0);
    assert_eq!(end.read_u32(&bytes), 0);
    assert_eq!(end.read_u32(&bytes), 0);
}
