//! Minimal protobuf wire-format writer.
//!
//! Supports the two wire types the ONNX model shape needs: varint scalars
//! and length-delimited payloads (strings, bytes, nested messages).

/// Varint wire type.
const WIRE_VARINT: u64 = 0;
/// Length-delimited wire type.
const WIRE_LEN: u64 = 2;

/// Append-only encoder for one protobuf message.
#[derive(Debug, Default)]
pub(crate) struct MessageWriter {
    buf: Vec<u8>,
}

impl MessageWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a base-128 varint.
    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                break;
            }
            self.buf.push(byte | 0x80);
        }
    }

    fn tag(&mut self, field: u32, wire_type: u64) {
        self.varint((u64::from(field) << 3) | wire_type);
    }

    /// Writes a non-negative integer field (int32/int64/uint64/enum).
    pub(crate) fn uint(&mut self, field: u32, value: u64) {
        self.tag(field, WIRE_VARINT);
        self.varint(value);
    }

    /// Writes a bytes field.
    pub(crate) fn bytes(&mut self, field: u32, data: &[u8]) {
        self.tag(field, WIRE_LEN);
        self.varint(data.len() as u64);
        self.buf.extend_from_slice(data);
    }

    /// Writes a string field.
    pub(crate) fn string(&mut self, field: u32, value: &str) {
        self.bytes(field, value.as_bytes());
    }

    /// Writes a nested message field built by `build`.
    pub(crate) fn message<F>(&mut self, field: u32, build: F)
    where
        F: FnOnce(&mut MessageWriter),
    {
        let mut inner = MessageWriter::new();
        build(&mut inner);
        self.bytes(field, &inner.buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint_bytes(value: u64) -> Vec<u8> {
        let mut w = MessageWriter::new();
        w.varint(value);
        w.into_bytes()
    }

    #[test]
    fn test_varint_known_values() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7f]);
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(300), vec![0xac, 0x02]);
        assert_eq!(
            varint_bytes(u64::MAX),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01],
        );
    }

    #[test]
    fn test_uint_field() {
        // Field 1, varint 7 -> tag 0x08.
        let mut w = MessageWriter::new();
        w.uint(1, 7);
        assert_eq!(w.into_bytes(), vec![0x08, 0x07]);
    }

    #[test]
    fn test_string_field() {
        // Field 2, length-delimited -> tag 0x12.
        let mut w = MessageWriter::new();
        w.string(2, "testing");
        assert_eq!(
            w.into_bytes(),
            vec![0x12, 0x07, b't', b'e', b's', b't', b'i', b'n', b'g'],
        );
    }

    #[test]
    fn test_nested_message() {
        // Field 3 message containing field 1 varint 150.
        let mut w = MessageWriter::new();
        w.message(3, |m| m.uint(1, 150));
        assert_eq!(w.into_bytes(), vec![0x1a, 0x03, 0x08, 0x96, 0x01]);
    }
}
