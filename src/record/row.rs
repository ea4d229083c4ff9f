use super::csv_line::split_csv_line;

/// Columns of the output-script dump that the transformer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    TxHash,
    OutputIndex,
    DataSize,
    DataHash,
    TypeScriptHash,
    LockScriptHash,
    LockCodeHash,
    LockHashType,
    LockArgs,
    BlockNumber,
    BlockTimestamp,
    IsSpent,
    ConsumedTxHash,
    ConsumedBlockNumber,
    ConsumedTimestamp,
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::Id,
        Column::TxHash,
        Column::OutputIndex,
        Column::DataSize,
        Column::DataHash,
        Column::TypeScriptHash,
        Column::LockScriptHash,
        Column::LockCodeHash,
        Column::LockHashType,
        Column::LockArgs,
        Column::BlockNumber,
        Column::BlockTimestamp,
        Column::IsSpent,
        Column::ConsumedTxHash,
        Column::ConsumedBlockNumber,
        Column::ConsumedTimestamp,
    ];

    /// Header name as it appears in the CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::TxHash => "tx_hash",
            Column::OutputIndex => "output_index",
            Column::DataSize => "data_size",
            Column::DataHash => "data_hash",
            Column::TypeScriptHash => "type_script_hash",
            Column::LockScriptHash => "lock_script_hash",
            Column::LockCodeHash => "lock_code_hash",
            Column::LockHashType => "lock_hash_type",
            Column::LockArgs => "lock_args",
            Column::BlockNumber => "block_number",
            Column::BlockTimestamp => "block_timestamp",
            Column::IsSpent => "is_spent",
            Column::ConsumedTxHash => "consumed_tx_hash",
            Column::ConsumedBlockNumber => "consumed_block_number",
            Column::ConsumedTimestamp => "consumed_timestamp",
        }
    }
}

/// Column names taken from the first non-blank line of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn parse(line: &str) -> Self {
        let names = split_csv_line(line)
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Known columns that this header does not carry.
    pub fn missing_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|col| !self.names.iter().any(|n| n == col.as_str()))
            .collect()
    }

    /// Bind a data line positionally. Missing trailing values become empty
    /// strings; values past the last header are dropped.
    pub fn bind(&self, line: &str) -> Row {
        let mut values = split_csv_line(line).into_iter();
        let fields = self
            .names
            .iter()
            .map(|name| (name.clone(), values.next().unwrap_or_default()))
            .collect();
        Row { fields }
    }
}

/// One data line as ordered `(header, value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Value bound to `name`. A repeated header resolves to its last occurrence.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a known column, empty when the header lacks it.
    pub fn get(&self, column: Column) -> &str {
        self.value(column.as_str()).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
