/// Bare codestream marker.
pub const CODESTREAM_MAGIC: [u8; 2] = [0xFF, 0x0A];

/// ISOBMFF `JXL ` signature box.
pub const CONTAINER_MAGIC: [u8; 12] = [
    0x00, 0x00, 0x00, 0x0C, //
    b'J', b'X', b'L', b' ', //
    0x0D, 0x0A, 0x87, 0x0A,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signature {
    Codestream,
    Container,
}

pub fn detect(data: &[u8]) -> Option<Signature> {
    if data.starts_with(&CODESTREAM_MAGIC) {
        Some(Signature::Codestream)
    } else if data.starts_with(&CONTAINER_MAGIC) {
        Some(Signature::Container)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_both_layouts() {
        assert_eq!(detect(&[0xFF, 0x0A, 0xFA, 0x12]), Some(Signature::Codestream));
        let mut boxed = CONTAINER_MAGIC.to_vec();
        boxed.extend_from_slice(b"\0\0\0\x14ftypjxl ");
        assert_eq!(detect(&boxed), Some(Signature::Container));
    }

    #[test]
    fn rejects_other_images_and_short_input() {
        assert_eq!(detect(&[0xFF, 0xD8, 0xFF, 0xE0]), None); // jpeg
        assert_eq!(detect(b"\x89PNG\r\n\x1a\n"), None);
        assert_eq!(detect(&[0xFF]), None);
        assert_eq!(detect(&CONTAINER_MAGIC[..8]), None);
        assert_eq!(detect(&[]), None);
    }
}
