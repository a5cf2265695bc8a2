//! Table and relation records handed over by schema extraction.
//!
//! The JSON shape mirrors what database introspection produces: columns use
//! camelCase keys, relations use the `referencing_*`/`referenced_*` row names
//! (camelCase aliases are accepted too).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    pub name: String,
    /// Information-schema type. Enum columns carry their labels as `a|b|c`.
    pub data_type: Option<String>,
    pub udt_name: String,
    pub is_nullable: bool,
    pub default_value: Option<String>,
    pub is_unique: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub ordinal_position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_maximum_length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(alias = "referencingTable")]
    pub referencing_table: String,
    #[serde(alias = "referencingColumn")]
    pub referencing_column: String,
    #[serde(alias = "referencedTable")]
    pub referenced_table: String,
    #[serde(alias = "referencedColumn")]
    pub referenced_column: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Schema {
    pub fn new(tables: Vec<Table>, relations: Vec<Relation>) -> Self {
        let mut schema = Self { tables, relations };
        schema.sort_columns();
        schema
    }

    /// Parse `{ "tables": [...], "relations": [...] }`.
    pub fn from_json(source: &str) -> Result<Self> {
        let mut schema: Schema = serde_json::from_str(source).map_err(Error::Schema)?;
        schema.sort_columns();
        Ok(schema)
    }

    /// Order every table's columns by ordinal position (stable).
    pub fn sort_columns(&mut self) {
        for table in &mut self.tables {
            table.columns.sort_by_key(|c| c.ordinal_position);
        }
    }
}

impl Table {
    pub fn foreign_key_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_foreign_key).count()
    }
}

impl Column {
    /// Short type label shown next to the column name.
    pub fn display_type(&self) -> String {
        let label = match self.data_type.as_deref() {
            Some(data_type) => short_type_name(data_type).to_string(),
            None if !self.udt_name.is_empty() => return self.udt_name.clone(),
            None => return "unknown".to_string(),
        };

        match (label.as_str(), self.character_maximum_length) {
            ("varchar", Some(len)) => format!("varchar({})", len),
            _ => label,
        }
    }

    /// Enum labels encoded in the data type, if any.
    pub fn enum_labels(&self) -> Vec<&str> {
        match self.data_type.as_deref() {
            Some(data_type) if data_type.contains('|') => data_type.split('|').collect(),
            _ => Vec::new(),
        }
    }

    /// Summed length of the `|`-separated labels; 0 when the type is unknown.
    pub fn enum_length(&self) -> usize {
        self.data_type
            .as_deref()
            .map(|t| t.split('|').map(str::len).sum())
            .unwrap_or(0)
    }
}

fn short_type_name(data_type: &str) -> &str {
    match data_type {
        "integer" => "int4",
        "character varying" => "varchar",
        "timestamp without time zone" => "timestamp",
        "timestamp with time zone" => "timestamptz",
        "boolean" => "bool",
        "USER-DEFINED" => "custom",
        other => other,
    }
}
