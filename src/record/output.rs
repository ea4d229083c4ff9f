use serde::{Deserialize, Serialize};

use super::normalize::{
    format_utc_millis, int_or_zero, integer_or_null, normalize_hex_prefix, number_or_null,
    resolve_hash_type,
};
use super::row::{Column, Row};
use crate::address::{AddressEncoder, AddressError, ScriptDescriptor};

/// One output-script record as written to `live/` or `history/`.
///
/// Field order here is the key order of the emitted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// `None` when the id column is not a number; the file is still keyed by the raw text.
    pub id: Option<i64>,
    pub tx_hash: String,
    pub index: i64,
    pub data_size: i64,
    pub data_hash: String,
    pub type_hash: String,
    pub lock_hash: String,
    pub owner_address: String,
    pub deploy_block_number: i64,
    pub deploy_time: Option<String>,
    pub is_spent: bool,
    pub consumed_tx_hash: String,
    pub consumed_block_number: Option<i64>,
    pub consumed_time: Option<String>,
}

impl OutputRecord {
    /// Build a record from a bound row. Rows with an empty `id` give `Ok(None)`.
    pub fn from_row(
        row: &Row,
        encoder: &dyn AddressEncoder,
        prefix: &str,
    ) -> Result<Option<Self>, AddressError> {
        let id = row.get(Column::Id);
        if id.is_empty() {
            return Ok(None);
        }

        let lock = ScriptDescriptor {
            code_hash: normalize_hex_prefix(row.get(Column::LockCodeHash)),
            hash_type: resolve_hash_type(row.get(Column::LockHashType)),
            args: normalize_hex_prefix(row.get(Column::LockArgs)),
        };
        let owner_address = encoder.encode(&lock, prefix)?;

        Ok(Some(Self {
            id: integer_or_null(id),
            tx_hash: normalize_hex_prefix(row.get(Column::TxHash)),
            index: int_or_zero(row.get(Column::OutputIndex)),
            data_size: int_or_zero(row.get(Column::DataSize)),
            data_hash: normalize_hex_prefix(row.get(Column::DataHash)),
            type_hash: normalize_hex_prefix(row.get(Column::TypeScriptHash)),
            lock_hash: normalize_hex_prefix(row.get(Column::LockScriptHash)),
            owner_address,
            deploy_block_number: int_or_zero(row.get(Column::BlockNumber)),
            deploy_time: format_utc_millis(row.get(Column::BlockTimestamp)),
            is_spent: row.get(Column::IsSpent) == "1",
            consumed_tx_hash: normalize_hex_prefix(row.get(Column::ConsumedTxHash)),
            consumed_block_number: number_or_null(row.get(Column::ConsumedBlockNumber)),
            consumed_time: format_utc_millis(row.get(Column::ConsumedTimestamp)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::HashType;
    use crate::record::row::Header;
    use std::cell::RefCell;

    const HEADER: &str = "id,tx_hash,output_index,data_size,data_hash,type_script_hash,lock_script_hash,lock_code_hash,lock_hash_type,lock_args,block_number,block_timestamp,is_spent,consumed_tx_hash,consumed_block_number,consumed_timestamp";

    /// Records every script it is asked to encode.
    #[derive(Default)]
    struct RecordingEncoder {
        seen: RefCell<Vec<ScriptDescriptor>>,
    }

    impl AddressEncoder for RecordingEncoder {
        fn encode(&self, script: &ScriptDescriptor, prefix: &str) -> Result<String, AddressError> {
            self.seen.borrow_mut().push(script.clone());
            Ok(format!("{}1{}{}", prefix, script.hash_type, script.args))
        }
    }

    fn record(line: &str, encoder: &RecordingEncoder) -> Option<OutputRecord> {
        let row = Header::parse(HEADER).bind(line);
        OutputRecord::from_row(&row, encoder, "ckb").unwrap()
    }

    #[test]
    fn builds_live_record() {
        let encoder = RecordingEncoder::default();
        let rec = record(
            r"1,\xabc123,0,10,\xdead,\xbeef,\xcafe,\x00,type,\x1234,1000,0,0,,,",
            &encoder,
        )
        .unwrap();

        assert_eq!(rec.id, Some(1));
        assert_eq!(rec.tx_hash, "0xabc123");
        assert_eq!(rec.index, 0);
        assert_eq!(rec.data_size, 10);
        assert_eq!(rec.data_hash, "0xdead");
        assert_eq!(rec.type_hash, "0xbeef");
        assert_eq!(rec.lock_hash, "0xcafe");
        assert_eq!(rec.owner_address, "ckb1type0x1234");
        assert_eq!(rec.deploy_block_number, 1000);
        assert_eq!(rec.deploy_time.as_deref(), Some("1970-01-01 00:00:00"));
        assert!(!rec.is_spent);
        assert_eq!(rec.consumed_tx_hash, "");
        assert_eq!(rec.consumed_block_number, None);
        assert_eq!(rec.consumed_time, None);

        let seen = encoder.seen.borrow();
        assert_eq!(
            seen[0],
            ScriptDescriptor {
                code_hash: "0x00".into(),
                hash_type: HashType::Type,
                args: "0x1234".into(),
            }
        );
    }

    #[test]
    fn builds_spent_record() {
        let encoder = RecordingEncoder::default();
        let rec = record(
            r"9,\x01,3,0,,,,\x00,0,\x,5,1700000000000,1,\xfeed,77,1700000060000",
            &encoder,
        )
        .unwrap();

        assert!(rec.is_spent);
        assert_eq!(rec.index, 3);
        assert_eq!(rec.consumed_tx_hash, "0xfeed");
        assert_eq!(rec.consumed_block_number, Some(77));
        assert_eq!(rec.consumed_time.as_deref(), Some("2023-11-14 22:14:20"));
        assert_eq!(encoder.seen.borrow()[0].hash_type, HashType::Data);
    }

    #[test]
    fn empty_id_is_skipped_without_encoding() {
        let encoder = RecordingEncoder::default();
        assert!(record(r",\xab,0", &encoder).is_none());
        assert!(encoder.seen.borrow().is_empty());
    }

    #[test]
    fn sentinel_consumed_block_is_null() {
        let encoder = RecordingEncoder::default();
        let rec = record("5,,,,,,,,,,,,0,,-1,-1", &encoder).unwrap();
        assert_eq!(rec.consumed_block_number, None);
        assert_eq!(rec.consumed_time, None);
        assert_eq!(rec.deploy_time, None);
        assert_eq!(rec.deploy_block_number, 0);
    }

    #[test]
    fn non_numeric_id_serializes_as_null() {
        let encoder = RecordingEncoder::default();
        let rec = record("abc,,,,,,,,,,,,0,,,", &encoder).unwrap();
        assert_eq!(rec.id, None);
        let json = serde_json::to_string_pretty(&rec).unwrap();
        assert!(json.starts_with("{\n  \"id\": null,"));
    }

    #[test]
    fn json_keys_follow_field_order() {
        let encoder = RecordingEncoder::default();
        let rec = record("2,,,,,,,,,,,,0,,,", &encoder).unwrap();
        let json = serde_json::to_string_pretty(&rec).unwrap();
        let first_keys: Vec<&str> = json
            .lines()
            .skip(1)
            .take(3)
            .map(|l| l.trim().split('"').nth(1).unwrap())
            .collect();
        assert_eq!(first_keys, vec!["id", "tx_hash", "index"]);
        assert!(json.contains("\n  \"consumed_block_number\": null,\n"));
    }
}
