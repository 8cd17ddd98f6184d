use core::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Utc};

/// ZIP compression methods (partial list; only store is emitted).
pub const STORE: u16 = 0;

/// The compression method recorded for an entry. Contents are always
/// stored verbatim; the enum keeps the wire code out of the headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMethod {
    #[default]
    Store,
}

impl CompressionMethod {
    pub fn zip_code(&self) -> u16 {
        match self {
            CompressionMethod::Store => STORE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompressionMethod::Store => "store",
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Operating system recorded in the central directory's version-made-by
/// field (partial list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileCompatibilitySystem {
    Dos,
    #[default]
    Unix,
    Ntfs,
    Vfat,
    Osx,
}

impl FileCompatibilitySystem {
    pub fn value(&self) -> u8 {
        match self {
            FileCompatibilitySystem::Dos => 0,
            FileCompatibilitySystem::Unix => 3,
            FileCompatibilitySystem::Ntfs => 11,
            FileCompatibilitySystem::Vfat => 14,
            FileCompatibilitySystem::Osx => 19,
        }
    }
}

/// File attributes for compression software internal use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InternalFileAttributes {
    #[default]
    Binary,
    Text,
}

impl InternalFileAttributes {
    pub fn value(&self) -> u16 {
        match self {
            InternalFileAttributes::Binary => 0,
            InternalFileAttributes::Text => 1,
        }
    }
}

/// POSIX file type stored in the upper bits of a ZIP entry's external
/// attributes (partial list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PosixFileType {
    Fifo = 1,
    Directory = 4,
    Regular = 8,
    SymLink = 10,
    Socket = 12,
}

impl PosixFileType {
    /// The file type shifted into `st_mode` position, ready to be or-ed
    /// with the permission bits.
    pub fn mode_bits(self) -> u32 {
        (self as u32) << 12
    }
}

/// TAR entry type flag, mapped from POSIX (partial list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TarEntryType {
    #[default]
    Regular,
    HardLink,
    SymLink,
    Directory,
    Fifo,
    /// GNU extension: the entry's contents hold an oversized path for the
    /// entry that follows.
    GnuLongName,
}

impl TarEntryType {
    pub fn flag_byte(&self) -> u8 {
        match self {
            TarEntryType::Regular => b'0',
            TarEntryType::HardLink => b'1',
            TarEntryType::SymLink => b'2',
            TarEntryType::Directory => b'5',
            TarEntryType::Fifo => b'6',
            TarEntryType::GnuLongName => b'L',
        }
    }
}

/// Calendar date and time, second resolution, no timezone.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DateTimeCS {
    year: u16,
    month: u16,
    day: u16,
    hour: u16,
    minute: u16,
    second: u16,
}

impl Default for DateTimeCS {
    /// The MS-DOS epoch: 1980, January 1st, 12AM.
    fn default() -> Self {
        Self {
            year: 1980,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl DateTimeCS {
    pub fn new(year: u16, month: u16, day: u16, hour: u16, minute: u16, second: u16) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn from_chrono_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
        Self {
            year: datetime.year() as u16,
            month: datetime.month() as u16,
            day: datetime.day() as u16,
            hour: datetime.hour() as u16,
            minute: datetime.minute() as u16,
            second: datetime.second() as u16,
        }
    }

    pub fn now() -> Self {
        Self::from_chrono_datetime(Local::now())
    }

    /// Seconds since the epoch, interpreted as UTC. Out-of-range values
    /// fall back to the MS-DOS epoch.
    pub fn from_unix_timestamp(seconds: i64) -> Self {
        match DateTime::<Utc>::from_timestamp(seconds, 0) {
            Some(datetime) => Self::from_chrono_datetime(datetime),
            None => Self::default(),
        }
    }

    pub fn to_time(&self) -> chrono::NaiveDateTime {
        let date = NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)
            .unwrap_or_else(|| {
                let zero = DateTimeCS::default();
                NaiveDate::from_ymd_opt(zero.year as i32, zero.month as u32, zero.day as u32)
                    .unwrap()
            });

        date.and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
            .unwrap_or_default()
    }

    /// Pack into the DOS on-disk `(date, time)` pair: 7 bits of year since
    /// 1980, 4 of month, 5 of day; 5 bits of hour, 6 of minute, 5 of
    /// two-second units.
    pub fn ms_dos(&self) -> (u16, u16) {
        let date = self.day | (self.month << 5) | self.year.saturating_sub(1980) << 9;
        let time = (self.second / 2) | (self.minute << 5) | self.hour << 11;
        (date, time)
    }

    /// Seconds since the epoch, with the stored components read as UTC.
    pub fn timestamp(&self) -> i64 {
        self.to_time().and_utc().timestamp()
    }
}

impl fmt::Display for DateTimeCS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_time())
    }
}

/// The (timezone-less) date and time written in the archive alongside an
/// entry.
///
/// Use `FileDateTime::Zero` if the date and time are insignificant; the
/// stored value is then 1980, January 1st, 12AM. Use
/// `FileDateTime::Unix` or `FileDateTime::Custom` for a caller-supplied
/// time, and `FileDateTime::Now` for the current wall clock. The
/// encoders never read the system clock on their own.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum FileDateTime {
    /// 1980, January 1st, 12AM.
    #[default]
    Zero,
    /// Seconds since 1970-01-01T00:00:00 UTC.
    Unix(i64),
    /// Explicit calendar components.
    Custom(DateTimeCS),
    Now,
}

impl FileDateTime {
    fn tuple(&self) -> DateTimeCS {
        match self {
            FileDateTime::Zero => DateTimeCS::default(),
            FileDateTime::Unix(seconds) => DateTimeCS::from_unix_timestamp(*seconds),
            FileDateTime::Custom(date_time) => *date_time,
            FileDateTime::Now => DateTimeCS::now(),
        }
    }

    pub fn ms_dos(&self) -> (u16, u16) {
        self.tuple().ms_dos()
    }

    /// Seconds since the epoch for the TAR modification time field.
    pub fn timestamp(&self) -> i64 {
        match self {
            FileDateTime::Unix(seconds) => *seconds,
            FileDateTime::Now => Utc::now().timestamp(),
            other => other.tuple().timestamp(),
        }
    }
}
