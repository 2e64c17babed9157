//! Value tree decoded from BER input.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::header::{self, Header};
use crate::window::Window;

/// A decoded ASN.1 element.
///
/// Identifier and content octets borrow from the input buffer. Only the
/// length octets are ever re-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    Primitive(Primitive<'a>),
    Constructed(Constructed<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive<'a> {
    identifier: &'a [u8],
    content: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructed<'a> {
    identifier: &'a [u8],
    children: Vec<Value<'a>>,
    // DER length of the concatenated children, fixed at construction.
    encoded_length: usize,
}

impl<'a> Primitive<'a> {
    pub fn new(identifier: &'a [u8], content: &'a [u8]) -> Self {
        Self {
            identifier,
            content,
        }
    }

    pub fn identifier(&self) -> &'a [u8] {
        self.identifier
    }

    pub fn content(&self) -> &'a [u8] {
        self.content
    }
}

impl<'a> Constructed<'a> {
    pub fn new(identifier: &'a [u8], children: Vec<Value<'a>>) -> Self {
        let encoded_length = children.iter().map(Value::encoded_len).sum();
        Self {
            identifier,
            children,
            encoded_length,
        }
    }

    pub fn identifier(&self) -> &'a [u8] {
        self.identifier
    }

    pub fn children(&self) -> &[Value<'a>] {
        &self.children
    }

    /// DER length of the content, i.e. of all children encoded in order.
    pub fn encoded_length(&self) -> usize {
        self.encoded_length
    }
}

impl<'a> Value<'a> {
    pub fn primitive(identifier: &'a [u8], content: &'a [u8]) -> Self {
        Value::Primitive(Primitive::new(identifier, content))
    }

    pub fn constructed(identifier: &'a [u8], children: Vec<Value<'a>>) -> Self {
        Value::Constructed(Constructed::new(identifier, children))
    }

    pub fn identifier(&self) -> &'a [u8] {
        match self {
            Value::Primitive(p) => p.identifier,
            Value::Constructed(c) => c.identifier,
        }
    }

    pub fn is_constructed(&self) -> bool {
        matches!(self, Value::Constructed(_))
    }

    /// Content octets of a primitive value.
    pub fn content(&self) -> Option<&'a [u8]> {
        match self {
            Value::Primitive(p) => Some(p.content),
            Value::Constructed(_) => None,
        }
    }

    /// Children of a constructed value.
    pub fn children(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Primitive(_) => None,
            Value::Constructed(c) => Some(&c.children),
        }
    }

    /// Decodes exactly one BER element spanning all of `input`.
    ///
    /// Nesting of constructed values is limited to `max_depth`, the
    /// top-level value counting as depth one. Limits above
    /// [`MAX_DEPTH_LIMIT`] are lowered to it.
    pub fn decode(input: &'a [u8], max_depth: usize) -> Result<Self> {
        let max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        let mut window = Window::new(input);
        let value = decode_tree(&mut window, max_depth)?;
        if !window.is_exhausted() {
            debug!(
                "rejecting BER input: {} trailing octets after top-level value",
                window.remaining().len()
            );
            return Err(Error::TrailingData);
        }
        Ok(value)
    }
}

/// Hard cap on the nesting depth a caller may configure.
///
/// Encoding and dropping a tree recurse once per nesting level, so the cap
/// keeps both within the native stack.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// A constructed value whose children are still being decoded.
struct Frame<'a> {
    identifier: &'a [u8],
    content: Window<'a>,
    children: Vec<Value<'a>>,
}

impl<'a> Frame<'a> {
    fn open(header: Header<'a>, window: &mut Window<'a>) -> Result<Self> {
        let begin = window.offset();
        let end = begin + header.content_length;
        let content = window.slice(begin, end)?;
        window.seek(end)?;
        Ok(Self {
            identifier: header.identifier,
            content,
            children: Vec::new(),
        })
    }

    fn finish(self) -> Value<'a> {
        Value::constructed(self.identifier, self.children)
    }
}

/// Depth-first decode of the element at the window's cursor.
///
/// Constructed values are tracked on an explicit stack so that the native
/// call stack does not grow with the nesting depth of the input.
fn decode_tree<'a>(window: &mut Window<'a>, max_depth: usize) -> Result<Value<'a>> {
    let header = header::decode(window)?;
    if !header.constructed {
        let content = window.read_bytes(header.content_length)?;
        return Ok(Value::primitive(header.identifier, content));
    }
    if max_depth == 0 {
        return Err(too_deep(max_depth));
    }

    let mut stack = vec![Frame::open(header, window)?];
    loop {
        let depth = stack.len();
        let Some(top) = stack.last_mut() else {
            // The root is popped only once it is finished, which returns.
            return Err(Error::InvalidStructuralData);
        };

        if top.content.is_exhausted() {
            let Some(frame) = stack.pop() else {
                return Err(Error::InvalidStructuralData);
            };
            let value = frame.finish();
            trace!("closed constructed value at depth {depth}");
            match stack.last_mut() {
                Some(parent) => parent.children.push(value),
                None => return Ok(value),
            }
            continue;
        }

        // The root's content is known to lie inside the input, so running
        // off the end of a frame means a child claimed more octets than its
        // parent declared.
        let header = header::decode(&mut top.content).map_err(structural)?;
        if header.constructed {
            if depth >= max_depth {
                return Err(too_deep(max_depth));
            }
            let frame = Frame::open(header, &mut top.content).map_err(structural)?;
            stack.push(frame);
            trace!("opened constructed value at depth {}", depth + 1);
        } else {
            let content = top
                .content
                .read_bytes(header.content_length)
                .map_err(structural)?;
            top.children
                .push(Value::primitive(header.identifier, content));
        }
    }
}

fn structural(err: Error) -> Error {
    match err {
        Error::EarlyEof => {
            debug!("rejecting BER input: child element overruns its parent");
            Error::InvalidStructuralData
        }
        err => err,
    }
}

fn too_deep(limit: usize) -> Error {
    debug!("rejecting BER input: nesting exceeds {limit} levels");
    Error::NestingTooDeep { limit }
}
