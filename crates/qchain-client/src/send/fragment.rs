//! Splitting an oversized chain into packets that each fit the budget.

use tracing::debug;

use qchain_core::error::{QchainError, Result};
use qchain_core::message::{MessageChain, MessageElement, Target};

/// Bounds for one fragment.
#[derive(Debug, Clone, Copy)]
pub struct FragmentLimits {
    pub max_bytes: usize,
    pub max_elements: usize,
    /// Longer plain texts are cut into pieces of this many characters.
    pub text_chars: usize,
}

/// Pack `chain` greedily into ordered sub-chains at element boundaries.
///
/// `measure` reports the encoded size of a candidate fragment. Long plain
/// texts are cut on character boundaries and each piece travels alone.
/// Fails with `MessageTooLarge` when one piece exceeds the budget by itself.
pub fn split<M>(
    target: Target,
    chain: &MessageChain,
    limits: FragmentLimits,
    measure: M,
) -> Result<Vec<MessageChain>>
where
    M: Fn(&MessageChain) -> Result<usize>,
{
    let text_chars = limits.text_chars.max(1);
    let max_elements = limits.max_elements.max(1);

    let mut fragments: Vec<MessageChain> = Vec::new();
    let mut current: Vec<MessageElement> = Vec::new();

    let fits_alone = |element: &MessageElement| -> Result<()> {
        let size = measure(&MessageChain::from(vec![element.clone()]))?;
        if size > limits.max_bytes {
            debug!(kind = element.kind(), size, budget = limits.max_bytes, "element exceeds packet budget");
            return Err(QchainError::MessageTooLarge {
                target,
                content: Box::new(chain.clone()),
            });
        }
        Ok(())
    };

    for element in chain.iter() {
        if matches!(element, MessageElement::Source(_)) {
            continue;
        }

        if let MessageElement::PlainText(text) = element {
            if text.chars().count() > text_chars {
                flush(&mut fragments, &mut current);
                for piece in chunk_chars(text, text_chars) {
                    let piece = MessageElement::PlainText(piece);
                    fits_alone(&piece)?;
                    fragments.push(MessageChain::from(vec![piece]));
                }
                continue;
            }
        }

        if !current.is_empty() {
            let mut candidate = current.clone();
            candidate.push(element.clone());
            if current.len() >= max_elements || measure(&MessageChain::from(candidate))? > limits.max_bytes {
                flush(&mut fragments, &mut current);
            }
        }
        if current.is_empty() {
            fits_alone(element)?;
        }
        current.push(element.clone());
    }
    flush(&mut fragments, &mut current);

    debug!(fragments = fragments.len(), "chain fragmented");
    Ok(fragments)
}

fn flush(fragments: &mut Vec<MessageChain>, current: &mut Vec<MessageElement>) {
    if !current.is_empty() {
        fragments.push(MessageChain::from(std::mem::take(current)));
    }
}

fn chunk_chars(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(size).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use qchain_core::message::{Face, MessageElement};

    fn by_chars(chain: &MessageChain) -> Result<usize> {
        Ok(chain.iter().map(|e| e.content_to_string().len() + 4).sum())
    }

    fn limits(max_bytes: usize) -> FragmentLimits {
        FragmentLimits {
            max_bytes,
            max_elements: 4,
            text_chars: 80,
        }
    }

    #[test]
    fn concatenation_restores_order() {
        let elements: Vec<MessageElement> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    MessageElement::text(format!("t{i}"))
                } else {
                    MessageElement::Face(Face { id: i })
                }
            })
            .collect();
        let chain = MessageChain::from(elements.clone());
        let parts = split(Target::Group(1), &chain, limits(20), by_chars).unwrap();

        assert!(parts.len() > 1);
        assert!(parts.iter().all(|p| by_chars(p).unwrap() <= 20 && p.len() <= 4));
        let joined: Vec<MessageElement> = parts.into_iter().flat_map(|p| p.into_elements()).collect();
        assert_eq!(joined, elements);
    }

    #[test]
    fn long_text_cut_on_char_boundaries() {
        let text: String = "测".repeat(170);
        let chain = MessageChain::from(vec![MessageElement::text(text.clone())]);
        let parts = split(Target::Friend(1), &chain, limits(4096), by_chars).unwrap();

        assert_eq!(parts.len(), 3);
        let joined: String = parts.iter().map(|p| p.content_to_string()).collect();
        assert_eq!(joined, text);
        assert_eq!(parts[0].content_to_string().chars().count(), 80);
    }

    #[test]
    fn oversized_single_element_is_fatal() {
        let chain = MessageChain::from(vec![MessageElement::text("x".repeat(60))]);
        let err = split(Target::Group(1), &chain, limits(10), by_chars).unwrap_err();
        assert_eq!(err.client_code().as_str(), "MESSAGE_TOO_LARGE");
    }
}
