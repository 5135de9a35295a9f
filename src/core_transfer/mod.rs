pub mod ascii;
pub mod params;

pub use params::{
    DataType, FileStructure, FormatType, TransferCode, TransferParameters, TransmissionMode,
};
