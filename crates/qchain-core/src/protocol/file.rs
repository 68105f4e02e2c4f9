use bytes::Buf;
use prost::Message as _;
use tracing::warn;

use crate::message::{FileMessage, MessageElement};
use crate::pipeline::DecoderContext;
use crate::protocol::{priority, MessageDecoder, MessageProtocol, ProcessorCollector};
use crate::wire::{proto, WireElement};

const TRANS_ELEM_GROUP_FILE: i32 = 24;

/// Group file feeds. Decode only: files are announced through a separate
/// upload channel, never encoded into a chain.
pub(super) struct FileMessageProtocol;

impl MessageProtocol for FileMessageProtocol {
    fn name(&self) -> &'static str {
        "file"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(FileFeedDecoder);
    }
}

struct FileFeedDecoder;

impl MessageDecoder for FileFeedDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::TransElemInfo(trans) = data else { return };
        if trans.elem_type != TRANS_ELEM_GROUP_FILE {
            return;
        }
        for file in read_feed(&trans.elem_value) {
            cx.collect(MessageElement::File(file));
        }
    }
}

/// `[u8 1]` then repeated `[u16 len][ObjMsg]`.
fn read_feed(value: &[u8]) -> Vec<FileMessage> {
    let mut buf = value;
    let mut files = Vec::new();
    if buf.remaining() < 1 || buf.get_u8() != 1 {
        return files;
    }
    while buf.remaining() > 2 {
        let len = buf.get_u16() as usize;
        if buf.remaining() < len {
            warn!(len, remaining = buf.remaining(), "truncated file feed");
            break;
        }
        let (entry, rest) = buf.split_at(len);
        buf = rest;
        let obj = proto::ObjMsg::decode(entry);
        let file = match obj {
            Ok(obj) => obj.msg_content_info.into_iter().next().and_then(|c| c.msg_file),
            Err(e) => {
                warn!(error = %e, "file feed entry unreadable");
                None
            }
        };
        if let Some(f) = file {
            files.push(FileMessage {
                id: f.file_path,
                bus_id: f.bus_id,
                name: f.file_name,
                size: f.file_size,
            });
        }
    }
    files
}
