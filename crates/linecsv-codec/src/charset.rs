use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use std::fmt;

use crate::errors::{CodecError, CodecResult};

pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A named character encoding used to turn raw line bytes into text and back.
///
/// Labels follow the WHATWG Encoding Standard, so `"UTF-8"`, `"utf8"`,
/// `"latin1"` and `"windows-1252"` are all accepted.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    pub fn utf8() -> Self {
        Self { encoding: UTF_8 }
    }

    /// Look up an encoding by label.
    ///
    /// Encodings that are not written back as themselves (UTF-16, `replacement`)
    /// are rejected.
    pub fn for_label(label: &str) -> CodecResult<Self> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| CodecError::UnknownEncoding(label.to_string()))?;
        if encoding.output_encoding() != encoding {
            return Err(CodecError::UnsupportedEncoding(encoding.name()));
        }
        Ok(Self { encoding })
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode without replacement characters: invalid input is an error.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> CodecResult<Cow<'a, str>> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or(CodecError::MalformedBytes {
                encoding: self.encoding.name(),
            })
    }

    /// Encode text, never failing.
    ///
    /// Characters the encoding cannot represent are written as HTML numeric
    /// character references.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let (bytes, _, _) = self.encoding.encode(text);
        bytes
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Charset::for_label(DEFAULT_ENCODING).unwrap().name(), "UTF-8");
        assert_eq!(Charset::for_label("utf8").unwrap().name(), "UTF-8");
        assert_eq!(Charset::for_label("latin1").unwrap().name(), "windows-1252");
        assert_eq!(
            Charset::for_label("klingon").unwrap_err(),
            CodecError::UnknownEncoding("klingon".to_string())
        );
    }

    #[test]
    fn test_encodings_without_own_output_are_rejected() {
        assert_eq!(
            Charset::for_label("UTF-16LE").unwrap_err(),
            CodecError::UnsupportedEncoding("UTF-16LE")
        );
        assert_eq!(
            Charset::for_label("utf-16be").unwrap_err(),
            CodecError::UnsupportedEncoding("UTF-16BE")
        );
        assert!(Charset::for_label("iso-2022-kr").is_err());
        assert!(Charset::for_label("shift_jis").is_ok());
    }

    #[test]
    fn test_decode_rejects_malformed_utf8() {
        let charset = Charset::utf8();
        assert_eq!(charset.decode(b"caf\xc3\xa9").unwrap(), "café");
        assert_eq!(
            charset.decode(b"caf\xc3").unwrap_err(),
            CodecError::MalformedBytes { encoding: "UTF-8" }
        );
    }

    #[test]
    fn test_single_byte_encoding() {
        let charset = Charset::for_label("windows-1252").unwrap();
        assert_eq!(charset.decode(b"caf\xe9").unwrap(), "café");
        assert_eq!(charset.encode("café").as_ref(), b"caf\xe9");
    }

    #[test]
    fn test_encode_unmappable_does_not_fail() {
        let charset = Charset::for_label("windows-1252").unwrap();
        assert_eq!(charset.encode("日").as_ref(), b"&#26085;");
    }
}
