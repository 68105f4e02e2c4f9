//! Protocol processor registry.
//!
//! Each protocol unit owns the decoders and encoders for one family of
//! message kinds. The registry is built once, sorted by priority band, and
//! shared read-only by every pipeline call:
//!
//! - `METADATA`: quote-reply and source metadata, always first.
//! - `CONTENT`: ordinary content kinds.
//! - `IGNORE`: wire elements that carry no message content.
//! - `UNSUPPORTED`: catch-all, always last.
//!
//! Several decoders inspect the same wire variant (`commonElem` is keyed by
//! service type), so the scan order is part of the contract.

mod audio;
mod custom;
mod face;
mod file;
mod ignored;
mod image;
mod market_face;
mod poke;
mod quote;
mod rich;
mod text;
mod unsupported;

use std::sync::OnceLock;

use crate::error::Result;
use crate::message::MessageElement;
use crate::pipeline::{DecoderContext, EncoderContext};
use crate::wire::WireElement;

/// Priority bands, ascending.
pub mod priority {
    pub const METADATA: u16 = 100;
    pub const CONTENT: u16 = 1000;
    pub const IGNORE: u16 = 9000;
    pub const UNSUPPORTED: u16 = u16::MAX;
}

/// Turns one wire element into zero or more message elements.
///
/// A decoder that does not recognize `data` returns without touching the
/// context; the next decoder in priority order is tried.
pub trait MessageDecoder: Send + Sync {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement);
}

/// Turns one message element into zero or more wire elements.
pub trait MessageEncoder: Send + Sync {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()>;
}

/// A family of message kinds.
pub trait MessageProtocol {
    fn name(&self) -> &'static str;
    fn priority(&self) -> u16;
    fn collect_processors(&self, collector: &mut ProcessorCollector);
}

/// Receives the processors of one protocol unit.
#[derive(Default)]
pub struct ProcessorCollector {
    decoders: Vec<Box<dyn MessageDecoder>>,
    encoders: Vec<Box<dyn MessageEncoder>>,
}

impl ProcessorCollector {
    pub fn add_decoder(&mut self, decoder: impl MessageDecoder + 'static) {
        self.decoders.push(Box::new(decoder));
    }

    pub fn add_encoder(&mut self, encoder: impl MessageEncoder + 'static) {
        self.encoders.push(Box::new(encoder));
    }
}

/// A registered processor.
pub struct Registered<P: ?Sized> {
    pub protocol: &'static str,
    pub priority: u16,
    pub processor: Box<P>,
}

/// Immutable, priority-ordered processor table.
pub struct ProcessorRegistry {
    decoders: Vec<Registered<dyn MessageDecoder>>,
    encoders: Vec<Registered<dyn MessageEncoder>>,
}

impl ProcessorRegistry {
    /// Build from protocol units. Within one band, registration order wins.
    pub fn build(protocols: &[&dyn MessageProtocol]) -> Self {
        let mut decoders = Vec::new();
        let mut encoders = Vec::new();

        for p in protocols {
            let mut c = ProcessorCollector::default();
            p.collect_processors(&mut c);
            decoders.extend(c.decoders.into_iter().map(|processor| Registered {
                protocol: p.name(),
                priority: p.priority(),
                processor,
            }));
            encoders.extend(c.encoders.into_iter().map(|processor| Registered {
                protocol: p.name(),
                priority: p.priority(),
                processor,
            }));
        }

        // stable: ties keep registration order
        decoders.sort_by_key(|r| r.priority);
        encoders.sort_by_key(|r| r.priority);

        Self { decoders, encoders }
    }

    /// All built-in protocol units.
    pub fn builtin() -> Self {
        Self::build(&[
            &unsupported::UnsupportedProtocol,
            &ignored::IgnoredProtocol,
            &text::TextProtocol,
            &face::FaceProtocol,
            &poke::PokeProtocol,
            &image::ImageProtocol,
            &market_face::MarketFaceProtocol,
            &rich::RichMessageProtocol,
            &audio::AudioProtocol,
            &file::FileMessageProtocol,
            &custom::CustomMessageProtocol,
            &quote::QuoteReplyProtocol,
        ])
    }

    pub fn decoders(&self) -> &[Registered<dyn MessageDecoder>] {
        &self.decoders
    }

    pub fn encoders(&self) -> &[Registered<dyn MessageEncoder>] {
        &self.encoders
    }
}

/// Process-wide registry.
pub fn registry() -> &'static ProcessorRegistry {
    static REGISTRY: OnceLock<ProcessorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ProcessorRegistry::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_ordered() {
        let r = ProcessorRegistry::builtin();
        let dec: Vec<u16> = r.decoders().iter().map(|d| d.priority).collect();
        assert!(dec.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(r.decoders().first().map(|d| d.protocol), Some("quote-reply"));
        assert_eq!(r.decoders().last().map(|d| d.protocol), Some("unsupported"));
        assert_eq!(r.encoders().first().map(|d| d.protocol), Some("quote-reply"));
        assert_eq!(r.encoders().last().map(|d| d.protocol), Some("unsupported"));
    }
}
