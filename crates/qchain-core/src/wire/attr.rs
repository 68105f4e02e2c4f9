//! At-mention attribute buffer (panic-free).
//!
//! Layout, big-endian:
//! `[u16 1][u16 startPos=0][u16 textLen][u8 flag][u32 uin][u16 0]`
//! where `textLen` counts UTF-16 units of the displayed text and `flag` is 1
//! for "@all" (uin 0) and 0 for a member.

use bytes::{Buf, BufMut};

/// Total buffer length.
pub const AT_ATTR_LEN: usize = 13;

/// Offset of the flag byte; the target uin follows it.
const FLAG_OFFSET: usize = 6;

pub const FLAG_MEMBER: u8 = 0;
pub const FLAG_ALL: u8 = 1;

/// Build the attribute buffer for a mention displayed as `display`.
pub fn encode_at_attr(display: &str, flag: u8, uin: u32) -> Vec<u8> {
    let text_len = display.encode_utf16().count().min(u16::MAX as usize) as u16;
    let mut buf = Vec::with_capacity(AT_ATTR_LEN);
    buf.put_u16(1);
    buf.put_u16(0);
    buf.put_u16(text_len);
    buf.put_u8(flag);
    buf.put_u32(uin);
    buf.put_u16(0);
    buf
}

/// Read the mention flag and target. `None` when the buffer is too short to
/// carry a target.
pub fn read_at(attr: &[u8]) -> Option<(u8, u32)> {
    let mut buf = attr;
    if buf.remaining() < FLAG_OFFSET + 5 {
        return None;
    }
    buf.advance(FLAG_OFFSET);
    let flag = buf.get_u8();
    Some((flag, buf.get_u32()))
}

/// Read the mention target only.
pub fn read_at_target(attr: &[u8]) -> Option<u32> {
    read_at(attr).map(|(_, uin)| uin)
}

/// Remove emoji code points from a display name.
pub fn strip_emoji(name: &str) -> String {
    name.chars().filter(|c| !is_emoji(*c)).collect()
}

fn is_emoji(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1FAFF
        | 0x2600..=0x27BF
        | 0x2B00..=0x2BFF
        | 0xFE00..=0xFE0F
        | 0x200D
        | 0x20E3
        | 0xE0020..=0xE007F
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn layout_is_byte_exact() {
        let buf = encode_at_attr("@bob", FLAG_MEMBER, 0x01020304);
        assert_eq!(buf, vec![0, 1, 0, 0, 0, 4, 0, 1, 2, 3, 4, 0, 0]);
        assert_eq!(read_at_target(&buf), Some(0x01020304));
    }

    #[test]
    fn flag_byte_is_read() {
        let buf = encode_at_attr("@all", FLAG_ALL, 0);
        assert_eq!(read_at(&buf), Some((FLAG_ALL, 0)));
        // 11 bytes are enough: the trailing pad is optional on input
        assert_eq!(read_at(&buf[..11]), Some((FLAG_ALL, 0)));
        assert_eq!(read_at(&buf[..10]), None);
    }

    #[test]
    fn short_buffer_has_no_target() {
        assert_eq!(read_at_target(&[0, 1, 0, 0]), None);
        assert_eq!(read_at_target(&[]), None);
    }

    #[test]
    fn emoji_removed_from_names() {
        assert_eq!(strip_emoji("al😀ice✨"), "alice");
        assert_eq!(strip_emoji("普通"), "普通");
    }
}
