use std::sync::Arc;

use scylla::response::query_result::QueryResult;
use scylla::value::{CqlValue, Row as DriverRow};

use crate::error::CassandraError;

/// The rows returned by a statement, with their ordered column names.
///
/// Statements that return no rows (INSERT, UPDATE, DDL) produce an empty
/// result set. Consuming iteration via [`IntoIterator`] is non-restartable.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

/// One returned row: an ordered mapping from column name to optional value
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Option<CqlValue>>,
}

impl Row {
    /// Column names in select order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look up a value by column name; `None` for unknown columns and for
    /// NULL cells alike
    pub fn get(&self, name: &str) -> Option<&CqlValue> {
        let index = self.columns.iter().position(|c| c == name)?;
        self.values.get(index)?.as_ref()
    }

    /// Look up a value by column position
    pub fn value(&self, index: usize) -> Option<&CqlValue> {
        self.values.get(index)?.as_ref()
    }

    /// All values in column order, NULLs included
    pub fn values(&self) -> &[Option<CqlValue>] {
        &self.values
    }
}

impl ResultSet {
    /// Result of a statement that returns no rows
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(columns: Vec<String>, values: Vec<Vec<Option<CqlValue>>>) -> Self {
        let columns: Arc<[String]> = columns.into();
        let rows = values
            .into_iter()
            .map(|values| Row {
                columns: Arc::clone(&columns),
                values,
            })
            .collect();
        Self { columns, rows }
    }

    pub(crate) fn from_query_result(result: QueryResult) -> Result<Self, CassandraError> {
        // INSERT, UPDATE, and DDL responses carry no row metadata.
        if result.result_not_rows().is_ok() {
            return Ok(Self::empty());
        }

        let rows_result = result
            .into_rows_result()
            .map_err(|e| CassandraError::Protocol(e.to_string()))?;

        let columns: Vec<String> = rows_result
            .column_specs()
            .iter()
            .map(|spec| spec.name().to_string())
            .collect();

        let mut values = Vec::with_capacity(rows_result.rows_num());
        let rows = rows_result
            .rows::<DriverRow>()
            .map_err(|e| CassandraError::Protocol(e.to_string()))?;
        for row in rows {
            let row = row.map_err(|e| CassandraError::Protocol(e.to_string()))?;
            values.push(row.columns);
        }

        Ok(Self::from_parts(columns, values))
    }

    /// Column names in select order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::from_parts(
            vec!["title".to_string(), "artist".to_string()],
            vec![
                vec![
                    Some(CqlValue::Text("La Petite Tonkinoise".to_string())),
                    Some(CqlValue::Text("Joséphine Baker".to_string())),
                ],
                vec![Some(CqlValue::Text("Die Mösch".to_string())), None],
            ],
        )
    }

    #[test]
    fn test_get_by_name() {
        let result = sample();
        let row = &result.rows()[0];
        assert_eq!(
            row.get("title"),
            Some(&CqlValue::Text("La Petite Tonkinoise".to_string()))
        );
        assert_eq!(
            row.get("artist"),
            Some(&CqlValue::Text("Joséphine Baker".to_string()))
        );
    }

    #[test]
    fn test_get_unknown_column_and_null() {
        let result = sample();
        let row = &result.rows()[1];
        assert_eq!(row.get("album"), None);
        assert_eq!(row.get("artist"), None);
    }

    #[test]
    fn test_value_by_position() {
        let result = sample();
        let row = &result.rows()[0];
        assert_eq!(
            row.value(0),
            Some(&CqlValue::Text("La Petite Tonkinoise".to_string()))
        );
        assert_eq!(row.value(2), None);
    }

    #[test]
    fn test_empty_result_set() {
        let result = ResultSet::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert!(result.columns().is_empty());
    }

    #[test]
    fn test_consuming_iteration() {
        let result = sample();
        let titles: Vec<String> = result
            .into_iter()
            .filter_map(|row| match row.get("title") {
                Some(CqlValue::Text(title)) => Some(title.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["La Petite Tonkinoise", "Die Mösch"]);
    }
}
