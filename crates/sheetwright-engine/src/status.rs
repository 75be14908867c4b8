//! Engine status codes

use std::fmt;

/// Native status code returned by every fallible engine primitive
///
/// `0` means success. The remaining codes follow the numbering of the
/// underlying xlsx writer so that codes coming from a native engine can be
/// passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Status(pub u32);

impl Status {
    // Success
    pub const OK: Status = Status(0);

    // Resource errors
    pub const MEMORY_MALLOC_FAILED: Status = Status(1);
    pub const CREATING_XLSX_FILE: Status = Status(2);
    pub const CREATING_TMPFILE: Status = Status(3);
    pub const READING_TMPFILE: Status = Status(4);

    // Packaging errors
    pub const ZIP_FILE_OPERATION: Status = Status(5);
    pub const ZIP_PARAMETER_ERROR: Status = Status(6);
    pub const ZIP_BAD_ZIP_FILE: Status = Status(7);
    pub const ZIP_INTERNAL_ERROR: Status = Status(8);
    pub const ZIP_FILE_ADD: Status = Status(9);
    pub const ZIP_CLOSE: Status = Status(10);

    // Parameter errors
    pub const FEATURE_NOT_SUPPORTED: Status = Status(11);
    pub const NULL_PARAMETER_IGNORED: Status = Status(12);
    pub const PARAMETER_VALIDATION: Status = Status(13);
    pub const PARAMETER_IS_EMPTY: Status = Status(14);

    // Sheet name errors
    pub const SHEETNAME_LENGTH_EXCEEDED: Status = Status(15);
    pub const SHEETNAME_INVALID_CHARACTER: Status = Status(16);
    pub const SHEETNAME_START_END_APOSTROPHE: Status = Status(17);
    pub const SHEETNAME_ALREADY_USED: Status = Status(18);

    // String errors
    pub const STRING_32_LENGTH_EXCEEDED: Status = Status(19);
    pub const STRING_128_LENGTH_EXCEEDED: Status = Status(20);
    pub const STRING_255_LENGTH_EXCEEDED: Status = Status(21);
    pub const MAX_STRING_LENGTH_EXCEEDED: Status = Status(22);
    pub const SHARED_STRING_INDEX_NOT_FOUND: Status = Status(23);

    // Worksheet errors
    pub const WORKSHEET_INDEX_OUT_OF_RANGE: Status = Status(24);
    pub const WORKSHEET_MAX_URL_LENGTH_EXCEEDED: Status = Status(25);
    pub const WORKSHEET_MAX_NUMBER_URLS_EXCEEDED: Status = Status(26);
    pub const IMAGE_DIMENSIONS: Status = Status(27);

    /// The raw numeric code
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Whether this is the "no error" code
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::OK
    }
}

impl From<u32> for Status {
    fn from(code: u32) -> Self {
        Status(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message text for a status code, as reported by the xlsx writer
pub fn status_message(status: Status) -> &'static str {
    match status {
        Status::OK => "No error.",
        Status::MEMORY_MALLOC_FAILED => "Memory error, failed to allocate required memory.",
        Status::CREATING_XLSX_FILE => {
            "Error creating output xlsx file. Usually a permissions error."
        }
        Status::CREATING_TMPFILE => {
            "Error encountered when creating a tmpfile during file assembly."
        }
        Status::READING_TMPFILE => "Error reading a tmpfile.",
        Status::ZIP_FILE_OPERATION => "Zip generic error ZIP_ERRNO while creating the xlsx file.",
        Status::ZIP_PARAMETER_ERROR => "Zip error ZIP_PARAMERROR while creating the xlsx file.",
        Status::ZIP_BAD_ZIP_FILE => "Zip error ZIP_BADZIPFILE (use_zip64 option may be required).",
        Status::ZIP_INTERNAL_ERROR => {
            "Zip error ZIP_INTERNALERROR while creating the xlsx file."
        }
        Status::ZIP_FILE_ADD => "File error or unknown zip error when adding sub file to xlsx file.",
        Status::ZIP_CLOSE => "Unknown zip error when closing xlsx file.",
        Status::FEATURE_NOT_SUPPORTED => {
            "Feature is not currently supported in this configuration."
        }
        Status::NULL_PARAMETER_IGNORED => "NULL function parameter ignored.",
        Status::PARAMETER_VALIDATION => "Function parameter validation error.",
        Status::PARAMETER_IS_EMPTY => "Function string parameter is empty.",
        Status::SHEETNAME_LENGTH_EXCEEDED => {
            "Worksheet name exceeds Excel's limit of 31 characters."
        }
        Status::SHEETNAME_INVALID_CHARACTER => {
            "Worksheet name cannot contain invalid characters: '[ ] : * ? / \\'"
        }
        Status::SHEETNAME_START_END_APOSTROPHE => {
            "Worksheet name cannot start or end with an apostrophe."
        }
        Status::SHEETNAME_ALREADY_USED => "Worksheet name is already in use.",
        Status::STRING_32_LENGTH_EXCEEDED => "Parameter exceeds Excel's limit of 32 characters.",
        Status::STRING_128_LENGTH_EXCEEDED => {
            "Parameter exceeds Excel's limit of 128 characters."
        }
        Status::STRING_255_LENGTH_EXCEEDED => {
            "Parameter exceeds Excel's limit of 255 characters."
        }
        Status::MAX_STRING_LENGTH_EXCEEDED => "String exceeds Excel's limit of 32,767 characters.",
        Status::SHARED_STRING_INDEX_NOT_FOUND => "Error finding internal string index.",
        Status::WORKSHEET_INDEX_OUT_OF_RANGE => "Worksheet row or column index out of range.",
        Status::WORKSHEET_MAX_URL_LENGTH_EXCEEDED => "Maximum hyperlink length (2079) exceeded.",
        Status::WORKSHEET_MAX_NUMBER_URLS_EXCEEDED => {
            "Maximum number of worksheet URLs (65530) exceeded."
        }
        Status::IMAGE_DIMENSIONS => "Couldn't read image dimensions or DPI.",
        _ => "Unknown error number.",
    }
}
