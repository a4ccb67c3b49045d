//! Fields a typed descriptor view does not declare.
//!
//! Options messages are open-ended: every protobuf release adds options and
//! any schema can extend them. Fields the typed view has no slot for are kept
//! here in arrival order and written back unchanged, so re-encoding a
//! declaration loses nothing protoc sent.

use prost::DecodeError;
use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext, WireType};

#[derive(Debug, Clone, PartialEq, Eq)]
enum UnknownValue {
    Varint(u64),
    SixtyFourBit(u64),
    ThirtyTwoBit(u32),
    LengthDelimited(Vec<u8>),
}

/// Tagged values of fields outside a message's typed view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFields {
    fields: Vec<(u32, UnknownValue)>,
}

impl UnknownFields {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a field with `tag` was kept.
    pub fn contains(&self, tag: u32) -> bool {
        self.fields.iter().any(|(t, _)| *t == tag)
    }

    /// Read one field whose key has already been consumed from `buf`.
    ///
    /// Groups are skipped; no options message declares one.
    pub(crate) fn merge<B: Buf>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let value = match wire_type {
            WireType::Varint => {
                let mut v = 0;
                encoding::uint64::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::Varint(v)
            }
            WireType::SixtyFourBit => {
                let mut v = 0;
                encoding::fixed64::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::SixtyFourBit(v)
            }
            WireType::ThirtyTwoBit => {
                let mut v = 0;
                encoding::fixed32::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::ThirtyTwoBit(v)
            }
            WireType::LengthDelimited => {
                let mut v = Vec::new();
                encoding::bytes::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::LengthDelimited(v)
            }
            WireType::StartGroup | WireType::EndGroup => {
                return encoding::skip_field(wire_type, tag, buf, ctx);
            }
        };
        self.fields.push((tag, value));
        Ok(())
    }

    /// Write the kept fields whose tag satisfies `select`, in arrival order.
    pub(crate) fn encode_where<B: BufMut>(&self, buf: &mut B, select: impl Fn(u32) -> bool) {
        for (tag, value) in self.fields.iter().filter(|(tag, _)| select(*tag)) {
            let tag = *tag;
            match value {
                UnknownValue::Varint(v) => encoding::uint64::encode(tag, v, buf),
                UnknownValue::SixtyFourBit(v) => encoding::fixed64::encode(tag, v, buf),
                UnknownValue::ThirtyTwoBit(v) => encoding::fixed32::encode(tag, v, buf),
                UnknownValue::LengthDelimited(v) => encoding::bytes::encode(tag, v, buf),
            }
        }
    }

    pub(crate) fn encoded_len(&self) -> usize {
        self.fields
            .iter()
            .map(|(tag, value)| match value {
                UnknownValue::Varint(v) => encoding::uint64::encoded_len(*tag, v),
                UnknownValue::SixtyFourBit(v) => encoding::fixed64::encoded_len(*tag, v),
                UnknownValue::ThirtyTwoBit(v) => encoding::fixed32::encoded_len(*tag, v),
                UnknownValue::LengthDelimited(v) => encoding::bytes::encoded_len(*tag, v),
            })
            .sum()
    }
}
