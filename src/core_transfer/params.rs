//! TYPE, MODE and STRU parameters.
//!
//! Each parameter is a fixed table of single-letter codes, some of which
//! are known but not implemented. Codes are matched case-insensitively.

use crate::core_error::FtpError;
use regex::Regex;
use std::sync::OnceLock;

/// A transfer parameter selected by a one-letter code.
pub trait TransferCode: Sized + Copy {
    /// Lower-case name used in "Invalid <param> code".
    const PARAM: &'static str;
    /// Capitalised name used in "<Param> not implemented".
    const LABEL: &'static str;

    fn from_code(code: &str) -> Option<Self>;
    fn code(self) -> char;
    fn name(self) -> &'static str;
    fn is_implemented(self) -> bool;

    /// Looks up a code: unknown codes and unimplemented codes are both 504
    /// but with different text.
    fn select(code: &str) -> Result<Self, FtpError> {
        let value = Self::from_code(&code.to_ascii_uppercase())
            .ok_or_else(|| FtpError::reply(504, format!("Invalid {} code", Self::PARAM)))?;
        if !value.is_implemented() {
            return Err(FtpError::reply(
                504,
                format!("{} not implemented", Self::LABEL),
            ));
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Ascii,
    Ebcdic,
    Binary,
    Local,
}

impl TransferCode for DataType {
    const PARAM: &'static str = "type";
    const LABEL: &'static str = "Type";

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(DataType::Ascii),
            "E" => Some(DataType::Ebcdic),
            "I" => Some(DataType::Binary),
            "L" => Some(DataType::Local),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            DataType::Ascii => 'A',
            DataType::Ebcdic => 'E',
            DataType::Binary => 'I',
            DataType::Local => 'L',
        }
    }

    fn name(self) -> &'static str {
        match self {
            DataType::Ascii => "ASCII",
            DataType::Ebcdic => "EBCDIC",
            DataType::Binary => "BINARY",
            DataType::Local => "LOCAL",
        }
    }

    fn is_implemented(self) -> bool {
        matches!(self, DataType::Ascii | DataType::Binary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    NonPrint,
    Telnet,
    CarriageControl,
    Local,
}

impl TransferCode for FormatType {
    const PARAM: &'static str = "format";
    const LABEL: &'static str = "Format";

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(FormatType::NonPrint),
            "T" => Some(FormatType::Telnet),
            "C" => Some(FormatType::CarriageControl),
            "L" => Some(FormatType::Local),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            FormatType::NonPrint => 'N',
            FormatType::Telnet => 'T',
            FormatType::CarriageControl => 'C',
            FormatType::Local => 'L',
        }
    }

    fn name(self) -> &'static str {
        match self {
            FormatType::NonPrint => "Non-print",
            FormatType::Telnet => "Telnet format effectors",
            FormatType::CarriageControl => "Carriage Control (ASA)",
            FormatType::Local => "Local byte size",
        }
    }

    fn is_implemented(self) -> bool {
        self == FormatType::NonPrint
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionMode {
    Block,
    Compressed,
    Stream,
}

impl TransferCode for TransmissionMode {
    const PARAM: &'static str = "mode";
    const LABEL: &'static str = "Mode";

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(TransmissionMode::Block),
            "C" => Some(TransmissionMode::Compressed),
            "S" => Some(TransmissionMode::Stream),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            TransmissionMode::Block => 'B',
            TransmissionMode::Compressed => 'C',
            TransmissionMode::Stream => 'S',
        }
    }

    fn name(self) -> &'static str {
        match self {
            TransmissionMode::Block => "Block",
            TransmissionMode::Compressed => "Compressed",
            TransmissionMode::Stream => "Stream",
        }
    }

    fn is_implemented(self) -> bool {
        self == TransmissionMode::Stream
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStructure {
    Record,
    File,
    Page,
}

impl TransferCode for FileStructure {
    const PARAM: &'static str = "structure";
    const LABEL: &'static str = "Structure";

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(FileStructure::Record),
            "F" => Some(FileStructure::File),
            "P" => Some(FileStructure::Page),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            FileStructure::Record => 'R',
            FileStructure::File => 'F',
            FileStructure::Page => 'P',
        }
    }

    fn name(self) -> &'static str {
        match self {
            FileStructure::Record => "Record",
            FileStructure::File => "File",
            FileStructure::Page => "Page",
        }
    }

    fn is_implemented(self) -> bool {
        self == FileStructure::File
    }
}

fn type_argument() -> &'static Regex {
    static TYPE_ARG: OnceLock<Regex> = OnceLock::new();
    TYPE_ARG.get_or_init(|| Regex::new(r"^(\S)(?: (\S+))?$").expect("static regex"))
}

/// The four transfer parameters of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferParameters {
    pub data_type: DataType,
    pub format: FormatType,
    pub mode: TransmissionMode,
    pub structure: FileStructure,
}

impl Default for TransferParameters {
    fn default() -> Self {
        Self {
            data_type: DataType::Ascii,
            format: FormatType::NonPrint,
            mode: TransmissionMode::Stream,
            structure: FileStructure::File,
        }
    }
}

impl TransferParameters {
    /// `TYPE <type> [<format>]`. Both codes are validated before either is
    /// stored; the format defaults to non-print.
    pub fn set_type(&mut self, arg: Option<&str>) -> Result<DataType, FtpError> {
        let caps = type_argument()
            .captures(arg.unwrap_or_default())
            .ok_or_else(FtpError::syntax)?;
        let data_type = DataType::select(&caps[1])?;
        let format = match caps.get(2) {
            Some(code) => FormatType::select(code.as_str())?,
            None => FormatType::NonPrint,
        };
        self.data_type = data_type;
        self.format = format;
        Ok(data_type)
    }

    pub fn set_mode(&mut self, arg: Option<&str>) -> Result<TransmissionMode, FtpError> {
        let mode = TransmissionMode::select(arg.unwrap_or_default())?;
        self.mode = mode;
        Ok(mode)
    }

    pub fn set_structure(&mut self, arg: Option<&str>) -> Result<FileStructure, FtpError> {
        let structure = FileStructure::select(arg.unwrap_or_default())?;
        self.structure = structure;
        Ok(structure)
    }
}
