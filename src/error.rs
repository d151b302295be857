use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// Represents an unsupported carrier media, for example an MP4 file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media, for example a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a carrier that does not start with the RIFF magic
    #[error("Carrier is not a RIFF file")]
    InvalidRiff,

    /// Represents a RIFF carrier whose form type is not WAVE
    #[error("RIFF carrier is not a WAVE file")]
    InvalidWave,

    /// Represents a WAV carrier without a data chunk
    #[error("No data chunk found in the WAV carrier")]
    DataChunkNotFound,

    /// Represents a RIFF carrier whose form type is not AVI
    #[error("RIFF carrier is not an AVI file")]
    InvalidAvi,

    /// Represents an AVI carrier without a LIST/movi chunk
    #[error("No movi chunk found in the AVI carrier")]
    MoviChunkNotFound,

    /// Represents a payload that does not fit into the carrier's embedding slots
    #[error("Payload exceeds the capacity of the carrier")]
    CapacityExceeded,

    /// Represents an out-of-range bit depth for the LSB image codec
    #[error("Bits per channel must be 1, 2 or 3, got {0}")]
    InvalidBitsPerChannel(u8),

    /// Represents a carrier that ended before the declared payload length
    #[error("Carrier ended before the declared payload length was read")]
    DecodeTruncated,

    /// Represents a file wrapper whose size field disagrees with the content
    #[error("File size field does not match the content: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Represents a declared payload length larger than the carrier can hold
    #[error("Declared payload length exceeds the carrier capacity")]
    InvalidLength,

    /// Represents a permutation index outside the carrier bounds
    #[error("Permutation produced an out-of-range index")]
    IndexOutOfBounds,

    /// Represents an image decode attempt without a seed to key the positions
    #[error("A seed is required to decode an image carrier")]
    SeedRequired,

    /// Represents codec options that do not apply to the carrier media
    #[error("Codec options do not match the carrier media")]
    OptionsMismatch,

    /// Represents a malformed file metadata header
    #[error("Invalid file metadata header")]
    InvalidMetadata(#[from] serde_json::Error),

    /// Represents invalid UTF-8 data in a payload unveiled as text
    #[error("Invalid text data found inside the payload")]
    InvalidTextData(#[from] FromUtf8Error),

    /// Represents an error caused by an invalid or empty file name
    #[error("A file with an invalid file name was provided")]
    InvalidFileName,

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    /// Represents a hide request without a message or file to hide
    #[error("Nothing to hide, set a message or a file")]
    MissingPayload,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write the target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when serializing the stego image.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
