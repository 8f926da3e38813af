//! Flexible input for signer resolution.
//!
//! A signer can be asked for by block identifier or by handing over the raw
//! bytes of a block or header. On the wire both arrive as one JSON value; the
//! identifier reading is always tried first.

use crate::error::QueryError;
use crate::types::BlockId;
use sealwatch_core::{Block, CodecError, Header};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// What to resolve a signer from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerQuery {
    /// A block identifier; `None` means the current head.
    ById(Option<BlockId>),
    /// The encoded bytes of a block or of a bare header.
    ByBytes(Vec<u8>),
}

impl Default for SignerQuery {
    fn default() -> Self {
        SignerQuery::ById(None)
    }
}

impl SignerQuery {
    /// Decode from a JSON value: `null`, a block identifier (number, string
    /// or `{"blockNumber"}` / `{"blockHash"}` object), or a `0x` hex blob.
    pub fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::Null => Ok(SignerQuery::ById(None)),
            Value::Number(number) => number
                .as_u64()
                .map(|n| SignerQuery::ById(Some(BlockId::Number(n))))
                .ok_or_else(|| QueryError::MalformedInput(format!("invalid block number {number}"))),
            Value::Object(fields) => block_id_from_object(&fields).map(|id| SignerQuery::ById(Some(id))),
            Value::String(text) => {
                if let Ok(id) = text.parse::<BlockId>() {
                    return Ok(SignerQuery::ById(Some(id)));
                }
                let digits = text.strip_prefix("0x").ok_or_else(|| {
                    QueryError::MalformedInput(format!("expected 0x-prefixed hex, got {text:?}"))
                })?;
                hex::decode(digits)
                    .map(SignerQuery::ByBytes)
                    .map_err(|err| QueryError::MalformedInput(format!("invalid hex blob: {err}")))
            }
            other => Err(QueryError::MalformedInput(format!(
                "expected block identifier or hex blob, got {other}"
            ))),
        }
    }
}

fn block_id_from_object(fields: &serde_json::Map<String, Value>) -> Result<BlockId, QueryError> {
    match (fields.get("blockNumber"), fields.get("blockHash")) {
        (Some(_), Some(_)) => Err(QueryError::MalformedInput(
            "blockNumber and blockHash are mutually exclusive".into(),
        )),
        (Some(Value::Number(number)), None) => number
            .as_u64()
            .map(BlockId::Number)
            .ok_or_else(|| QueryError::MalformedInput(format!("invalid block number {number}"))),
        (Some(Value::String(text)), None) => match text.parse()? {
            BlockId::Hash(_) => Err(QueryError::MalformedInput(format!(
                "blockNumber holds a hash: {text}"
            ))),
            id => Ok(id),
        },
        (None, Some(Value::String(text))) => match text.parse()? {
            id @ BlockId::Hash(_) => Ok(id),
            _ => Err(QueryError::MalformedInput(format!(
                "blockHash is not a hash: {text}"
            ))),
        },
        _ => Err(QueryError::MalformedInput(
            "expected blockNumber or blockHash".into(),
        )),
    }
}

impl<'de> Deserialize<'de> for SignerQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Decode the header out of raw bytes holding either a full block or a bare
/// header. The block reading is attempted first; when both fail the header
/// decoding error is returned.
pub fn decode_header_blob(blob: &[u8]) -> Result<Header, CodecError> {
    match Block::decode(blob) {
        Ok(block) => Ok(block.header),
        Err(_) => Header::decode(blob),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealwatch_core::{BlockNonce, Hash, Keypair};
    use serde_json::json;

    fn query(value: Value) -> SignerQuery {
        SignerQuery::from_value(value).unwrap()
    }

    #[test]
    fn test_identifier_forms() {
        assert_eq!(query(Value::Null), SignerQuery::ById(None));
        assert_eq!(query(json!(42)), SignerQuery::ById(Some(BlockId::Number(42))));
        assert_eq!(query(json!("0x2a")), SignerQuery::ById(Some(BlockId::Number(42))));
        assert_eq!(query(json!("latest")), SignerQuery::ById(Some(BlockId::Latest)));
        assert_eq!(
            query(json!({"blockNumber": "0x2a"})),
            SignerQuery::ById(Some(BlockId::Number(42)))
        );

        let hash = Hash([0x11; 32]);
        assert_eq!(
            query(json!(hash.to_string())),
            SignerQuery::ById(Some(BlockId::Hash(hash)))
        );
        assert_eq!(
            query(json!({"blockHash": hash.to_string()})),
            SignerQuery::ById(Some(BlockId::Hash(hash)))
        );
    }

    #[test]
    fn test_blob_form() {
        let header = Header::new(9, Hash::ZERO, 2, BlockNonce::DROP_VOTE);
        let encoded = header.encode();
        let value = json!(format!("0x{}", hex::encode(&encoded)));
        assert_eq!(query(value), SignerQuery::ByBytes(encoded));
    }

    #[test]
    fn test_zero_padded_quantity_is_a_blob() {
        assert_eq!(query(json!("0x01")), SignerQuery::ByBytes(vec![0x01]));
        assert_eq!(query(json!("0x1")), SignerQuery::ById(Some(BlockId::Number(1))));
        assert!(SignerQuery::from_value(json!({"blockNumber": "0x01"})).is_err());
    }

    #[test]
    fn test_malformed_inputs() {
        for value in [
            json!(-1),
            json!(1.5),
            json!(true),
            json!([1, 2]),
            json!("not hex"),
            json!("0xabcg"),
            json!({}),
            json!({"blockHash": "0x01"}),
            json!({"blockNumber": 1, "blockHash": Hash::ZERO.to_string()}),
        ] {
            assert!(
                matches!(SignerQuery::from_value(value.clone()), Err(QueryError::MalformedInput(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_through_serde() {
        let parsed: SignerQuery = serde_json::from_str("\"0x10\"").unwrap();
        assert_eq!(parsed, SignerQuery::ById(Some(BlockId::Number(16))));
        assert!(serde_json::from_str::<SignerQuery>("\"0xzz\"").is_err());
    }

    #[test]
    fn test_blob_decodes_block_then_header() {
        let header = Header::new(3, Hash::ZERO, 1, BlockNonce::DROP_VOTE).sealed(&Keypair::generate());
        let block = Block::new(header.clone(), vec![b"payload".to_vec()]);

        assert_eq!(decode_header_blob(&block.encode()).unwrap(), header);
        assert_eq!(decode_header_blob(&header.encode()).unwrap(), header);
        assert!(decode_header_blob(&[0xde, 0xad]).is_err());
    }
}
