//! Schema fingerprints for table-entry messages.
//!
//! A fingerprint is a CRC-64 over the binary encoding of a message declaration
//! followed, depth-first in field order, by the encoding of every message
//! declaration it references. Shared references are traversed once per
//! reference, so the value depends on reference multiplicity as well as on
//! structure.
//!
//! The generated table embeds the value and the runtime compares it when a
//! memory image is loaded, so it must stay stable across runs and platforms
//! for an unchanged schema.
//!
//! Reference cycles have no finite closure. With the cycle guard enabled
//! (the default) they fail with [`GenerateError::ReferenceCycle`]; with it
//! disabled the traversal does not terminate.

use crate::descriptor::DescriptorProto;
use crate::error::{GenerateError, GenerateResult};
use crate::schema::SchemaIndex;
use crc::{Algorithm, Crc};
use prost::Message;

/// CRC-64 parameters: reflected polynomial `123456789`, all-ones init and xorout.
pub const FINGERPRINT_ALGORITHM: Algorithm<u64> = Algorithm {
    width: 64,
    poly: 0xa8b3_dae0_0000_0000,
    init: u64::MAX,
    refin: true,
    refout: true,
    xorout: u64::MAX,
    check: 0xffff_ffff_ffe1_effa,
    residue: 0x0000_0000_055a_338d,
};

const FINGERPRINT_CRC: Crc<u64> = Crc::<u64>::new(&FINGERPRINT_ALGORITHM);

/// Checksum raw bytes with the fingerprint CRC.
pub fn checksum(bytes: &[u8]) -> u64 {
    FINGERPRINT_CRC.checksum(bytes)
}

/// Computes fingerprints against a populated [`SchemaIndex`].
#[derive(Debug, Clone, Copy)]
pub struct FingerprintEngine<'i, 'a> {
    index: &'i SchemaIndex<'a>,
    cycle_guard: bool,
}

impl<'i, 'a> FingerprintEngine<'i, 'a> {
    /// Create an engine with the cycle guard enabled
    pub fn new(index: &'i SchemaIndex<'a>) -> Self {
        Self {
            index,
            cycle_guard: true,
        }
    }

    /// Enable or disable the cycle guard
    pub fn with_cycle_guard(mut self, enabled: bool) -> Self {
        self.cycle_guard = enabled;
        self
    }

    /// Fingerprint of `message` and everything it transitively references.
    pub fn fingerprint(&self, message: &DescriptorProto) -> GenerateResult<u64> {
        let bytes = self.closure_bytes(message)?;
        Ok(checksum(&bytes))
    }

    /// The byte stream the fingerprint is computed over.
    pub fn closure_bytes(&self, message: &DescriptorProto) -> GenerateResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.encode_closure(message, message.name(), &mut path, &mut out)?;
        Ok(out)
    }

    fn encode_closure<'m>(
        &self,
        message: &'m DescriptorProto,
        label: &'m str,
        path: &mut Vec<(&'m DescriptorProto, &'m str)>,
        out: &mut Vec<u8>,
    ) -> GenerateResult<()>
    where
        'a: 'm,
    {
        if self.cycle_guard && path.iter().any(|(m, _)| std::ptr::eq(*m, message)) {
            let mut names: Vec<&str> = path.iter().map(|(_, name)| *name).collect();
            names.push(label);
            return Err(GenerateError::ReferenceCycle {
                path: names.join(" -> "),
            });
        }

        tracing::trace!(type_name = label, depth = path.len(), "fingerprint closure step");
        out.extend_from_slice(&message.encode_to_vec());

        path.push((message, label));
        for field in &message.field {
            if let Some(referenced) = self.index.resolve(field.type_name()) {
                self.encode_closure(referenced, field.type_name(), path, out)?;
            }
        }
        path.pop();
        Ok(())
    }
}
