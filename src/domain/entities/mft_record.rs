//! MFT record and its decoded attributes
//!
//! These types hold the result of decoding one fixed-size Master File
//! Table entry: its allocation state, parent linkage, name, and data
//! location. They carry no I/O of their own; a record is constructed by
//! the infrastructure layer's record decoder and consumed by the scanner
//! or the export engine, then dropped.

/// One extent of a non-resident attribute's on-disk data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRun {
    /// Absolute starting logical cluster number. Meaningless when
    /// `is_sparse` is set.
    pub lcn: i64,
    /// Run length in clusters.
    pub length: u64,
    /// Set when the mapping-pairs offset field had zero length: this run
    /// is a hole, not a reference to LCN 0.
    pub is_sparse: bool,
}

impl DataRun {
    /// Whether this run should be treated as a hole by an exporter: either
    /// explicitly sparse, or carrying no usable extent.
    pub fn is_hole(&self) -> bool {
        self.is_sparse || self.lcn <= 0 || self.length == 0
    }
}

/// NTFS `$FILE_NAME` (0x30) namespace tag, used to prefer the most
/// descriptive name when a record carries more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNameNamespace {
    Posix,
    Win32,
    Dos,
    Win32AndDos,
}

impl FileNameNamespace {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Posix),
            1 => Some(Self::Win32),
            2 => Some(Self::Dos),
            3 => Some(Self::Win32AndDos),
            _ => None,
        }
    }

    /// Lower is preferred when a record has multiple `$FILE_NAME` attributes.
    fn preference_rank(self) -> u8 {
        match self {
            FileNameNamespace::Win32 => 0,
            FileNameNamespace::Win32AndDos => 1,
            FileNameNamespace::Posix => 2,
            FileNameNamespace::Dos => 3,
        }
    }
}

/// A decoded `$FILE_NAME` attribute value.
#[derive(Debug, Clone)]
pub struct FileNameAttr {
    /// Low 48 bits of the parent directory's file reference.
    pub parent_ref: u64,
    /// Decoded UTF-16LE name, lossily repaired if it carried invalid
    /// surrogates.
    pub name: String,
    /// NTFS file attribute flags, carried verbatim.
    pub flags: u32,
    /// Raw namespace byte (0=POSIX, 1=Win32, 2=DOS, 3=Win32+DOS), or `None`
    /// if the byte didn't match a known namespace.
    pub namespace: Option<FileNameNamespace>,
}

impl FileNameAttr {
    /// True if `other` should replace `self` as the record's canonical name,
    /// per the Win32 > Win32+DOS > POSIX > DOS preference order.
    pub fn should_prefer(&self, other: &FileNameAttr) -> bool {
        match (self.namespace, other.namespace) {
            (Some(cur), Some(new)) => new.preference_rank() < cur.preference_rank(),
            (None, Some(_)) => true,
            _ => false,
        }
    }
}

/// A decoded `$DATA` (0x80) attribute value.
#[derive(Debug, Clone)]
pub struct DataAttr {
    pub non_resident: bool,
    /// Present when `non_resident` is false: the value bytes verbatim.
    pub resident_data: Option<Vec<u8>>,
    /// Present when `non_resident` is true: the decoded extents, in
    /// on-disk (mapping-pairs) order.
    pub runs: Vec<DataRun>,
    /// The attribute's "real size" field. Only meaningful when
    /// `non_resident` is true; resident size is `resident_data.len()`.
    pub data_size: Option<u64>,
}

impl DataAttr {
    /// The logical size of the stream: resident length, or the real-size
    /// field for non-resident data, or 0 if neither is known.
    pub fn size(&self) -> u64 {
        if let Some(data) = &self.resident_data {
            return data.len() as u64;
        }
        self.data_size.unwrap_or(0)
    }
}

/// One decoded Master File Table entry.
#[derive(Debug, Clone)]
pub struct MftRecord {
    /// Index of this record within `$MFT`, assigned by the iterator.
    pub record_num: u64,
    /// Bit 0 of the record flags: false means the record is deleted.
    pub in_use: bool,
    /// Bit 1 of the record flags: this record describes a directory.
    pub is_dir: bool,
    /// Low 48 bits of `base_file_reference`, when this record is an
    /// extension of another (non-zero) record.
    pub base_ref: Option<u64>,
    /// The first successfully parsed (and namespace-preferred) `$FILE_NAME`.
    pub file_name: Option<FileNameAttr>,
    /// The first successfully parsed `$DATA` attribute.
    pub data: Option<DataAttr>,
}

impl MftRecord {
    /// True when this record is not a base record: its attributes logically
    /// belong to the base record named by `base_ref` (see ATTRIBUTE_LIST,
    /// out of scope) rather than being merged here. Still listed as-is.
    pub fn is_extension_record(&self) -> bool {
        self.base_ref.map(|r| r != 0).unwrap_or(false)
    }
}
