/// SysEx start byte, first byte of every vendor header.
pub const SYSEX_BEGIN: u8 = 0xf0;

/// SysEx end byte.
pub const SYSEX_END: u8 = 0xf7;

/// Fixed bytes wrapped around every message sent to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    /// Start byte, manufacturer ID and device ID
    pub header: &'static [u8],
    pub footer: &'static [u8],
}

impl Envelope {
    /// Body of a framed message: the opcode and its parameters.
    /// Returns `None` if the message does not carry this envelope or has no opcode.
    pub fn split<'a>(&self, message: &'a [u8]) -> Option<(u8, &'a [u8])> {
        if message.len() < self.header.len() + self.footer.len() + 1 {
            return None;
        }
        if !message.starts_with(self.header) || !message.ends_with(self.footer) {
            return None;
        }
        let body = &message[self.header.len()..message.len() - self.footer.len()];
        Some((body[0], &body[1..]))
    }
}

/// Frame a command: `header ++ [opcode] ++ params ++ footer`.
/// Parameters are copied verbatim, values above 0x7f included.
pub fn frame(envelope: &Envelope, opcode: u8, params: &[u8]) -> Vec<u8> {
    let mut v =
        Vec::with_capacity(envelope.header.len() + 1 + params.len() + envelope.footer.len());
    v.extend_from_slice(envelope.header);
    v.push(opcode);
    v.extend_from_slice(params);
    v.extend_from_slice(envelope.footer);
    v
}

#[inline]
pub fn bool_byte(b: bool) -> u8 {
    if b {
        1
    } else {
        0
    }
}

pub trait QueryBuilder {
    fn envelope(&self) -> &Envelope;

    fn build_query(&self, opcode: u8, params: &[u8]) -> Vec<u8> {
        frame(self.envelope(), opcode, params)
    }
}

impl QueryBuilder for Envelope {
    fn envelope(&self) -> &Envelope {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TEST: Envelope = Envelope {
        header: &[SYSEX_BEGIN, 0x00, 0x20, 0x6b],
        footer: &[SYSEX_END],
    };

    #[test]
    fn frame_wraps_body() {
        assert_eq!(
            frame(&TEST, 0x05, &[0x01, 0x02]),
            vec![0xf0, 0x00, 0x20, 0x6b, 0x05, 0x01, 0x02, 0xf7]
        );
    }

    #[test]
    fn frame_empty_params() {
        assert_eq!(TEST.build_query(0x09, &[]), vec![0xf0, 0x00, 0x20, 0x6b, 0x09, 0xf7]);
    }

    #[test]
    fn frame_keeps_high_bytes() {
        // no 7-bit masking, bytes go through as given
        assert_eq!(
            frame(&TEST, 0xff, &[0x80, 0xc3, 0xa9]),
            vec![0xf0, 0x00, 0x20, 0x6b, 0xff, 0x80, 0xc3, 0xa9, 0xf7]
        );
    }

    #[test]
    fn split_framed() {
        let msg = frame(&TEST, 0x12, &[1, 0, 1]);
        assert_eq!(TEST.split(&msg), Some((0x12, &[1u8, 0, 1][..])));
        assert_eq!(TEST.split(&TEST.build_query(3, &[])), Some((3, &[][..])));
    }

    #[test]
    fn split_rejects_foreign() {
        assert_eq!(TEST.split(&[0xf0, 0x7e, 0x7f, 0x06, 0x01, 0xf7]), None);
        assert_eq!(TEST.split(&[0xf0, 0x00, 0x20, 0x6b, 0xf7]), None);
        assert_eq!(TEST.split(&[0xf0, 0x00, 0x20, 0x6b, 0x01, 0x02]), None);
        assert_eq!(TEST.split(&[]), None);
    }

    #[test]
    fn bools() {
        assert_eq!(bool_byte(true), 1);
        assert_eq!(bool_byte(false), 0);
    }
}
