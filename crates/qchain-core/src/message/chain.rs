use crate::message::{MessageElement, MessageSource, QuoteReply};

/// Ordered, typed representation of one message.
///
/// At most one `MessageSource` (kept first) and at most one long-message
/// marker; pushing a second one replaces the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageChain {
    elements: Vec<MessageElement>,
}

impl MessageChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: MessageElement) {
        match &element {
            MessageElement::Source(_) => {
                self.elements.retain(|e| !matches!(e, MessageElement::Source(_)));
                self.elements.insert(0, element);
            }
            MessageElement::LongMessage(_) => {
                if let Some(slot) = self
                    .elements
                    .iter_mut()
                    .find(|e| matches!(e, MessageElement::LongMessage(_)))
                {
                    *slot = element;
                } else {
                    self.elements.push(element);
                }
            }
            _ => self.elements.push(element),
        }
    }

    pub fn with(mut self, element: MessageElement) -> Self {
        self.push(element);
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageElement> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[MessageElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<MessageElement> {
        self.elements
    }

    pub fn source(&self) -> Option<&MessageSource> {
        self.elements.iter().find_map(|e| match e {
            MessageElement::Source(s) => Some(s),
            _ => None,
        })
    }

    pub fn quote(&self) -> Option<&QuoteReply> {
        self.elements.iter().find_map(|e| match e {
            MessageElement::QuoteReply(q) => Some(q),
            _ => None,
        })
    }

    pub fn contains(&self, pred: impl Fn(&MessageElement) -> bool) -> bool {
        self.elements.iter().any(pred)
    }

    /// Same chain without its `MessageSource`.
    pub fn without_source(&self) -> MessageChain {
        self.elements
            .iter()
            .filter(|e| !matches!(e, MessageElement::Source(_)))
            .cloned()
            .collect()
    }

    /// Concatenated visible content.
    pub fn content_to_string(&self) -> String {
        self.elements.iter().map(|e| e.content_to_string()).collect()
    }
}

impl From<Vec<MessageElement>> for MessageChain {
    fn from(elements: Vec<MessageElement>) -> Self {
        elements.into_iter().collect()
    }
}

impl From<&str> for MessageChain {
    fn from(s: &str) -> Self {
        MessageChain::new().with(MessageElement::text(s))
    }
}

impl FromIterator<MessageElement> for MessageChain {
    fn from_iter<I: IntoIterator<Item = MessageElement>>(iter: I) -> Self {
        let mut chain = MessageChain::new();
        for e in iter {
            chain.push(e);
        }
        chain
    }
}

impl IntoIterator for MessageChain {
    type Item = MessageElement;
    type IntoIter = std::vec::IntoIter<MessageElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a MessageChain {
    type Item = &'a MessageElement;
    type IntoIter = std::slice::Iter<'a, MessageElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
