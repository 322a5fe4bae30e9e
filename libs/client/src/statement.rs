use scylla::statement::prepared::PreparedStatement as DriverPrepared;
use scylla::value::CqlValue;

use crate::error::CassandraError;

/// An executable statement: literal CQL text, or a prepared template bound
/// with values.
///
/// The two forms behave identically from the caller's point of view; only the
/// construction strategy differs. [`Session::execute`](crate::Session::execute)
/// and [`Session::execute_async`](crate::Session::execute_async) accept either
/// through `Into<Statement>`.
#[derive(Debug, Clone)]
pub enum Statement {
    /// CQL passed verbatim to the server
    Literal(String),
    /// A prepared template plus its bind values
    Bound(BoundStatement),
}

impl From<&str> for Statement {
    fn from(cql: &str) -> Self {
        Statement::Literal(cql.to_string())
    }
}

impl From<String> for Statement {
    fn from(cql: String) -> Self {
        Statement::Literal(cql)
    }
}

impl From<BoundStatement> for Statement {
    fn from(bound: BoundStatement) -> Self {
        Statement::Bound(bound)
    }
}

/// A statement template compiled once by the server, reusable across many
/// [`bind`](PreparedStatement::bind) calls.
///
/// Created by [`Session::prepare`](crate::Session::prepare).
#[derive(Debug, Clone)]
pub struct PreparedStatement {
    pub(crate) inner: DriverPrepared,
}

impl PreparedStatement {
    pub(crate) fn new(inner: DriverPrepared) -> Self {
        Self { inner }
    }

    /// Number of positional placeholders in the template
    pub fn parameter_count(&self) -> usize {
        self.inner.get_variable_col_specs().len()
    }

    /// Produce an executable statement from this template and typed values.
    ///
    /// Fails with [`CassandraError::Argument`] when the number of values does
    /// not match the number of placeholders. Value type mismatches are left to
    /// the driver's serialization layer at execution time.
    ///
    /// # Example
    /// ```ignore
    /// let insert = session
    ///     .prepare("INSERT INTO songs (id, title) VALUES (?, ?)")
    ///     .await?;
    /// let bound = insert.bind(vec![
    ///     CqlValue::Uuid(id),
    ///     CqlValue::Text("La Petite Tonkinoise".to_string()),
    /// ])?;
    /// session.execute(bound).await?;
    /// ```
    pub fn bind(
        &self,
        values: impl IntoIterator<Item = CqlValue>,
    ) -> Result<BoundStatement, CassandraError> {
        let values: Vec<CqlValue> = values.into_iter().collect();
        check_arity(self.parameter_count(), values.len())?;
        Ok(BoundStatement {
            prepared: self.inner.clone(),
            values,
        })
    }
}

/// A prepared template paired with bind values, ready for execution
#[derive(Debug, Clone)]
pub struct BoundStatement {
    pub(crate) prepared: DriverPrepared,
    pub(crate) values: Vec<CqlValue>,
}

impl BoundStatement {
    /// The bind values in placeholder order
    pub fn values(&self) -> &[CqlValue] {
        &self.values
    }
}

pub(crate) fn check_arity(expected: usize, actual: usize) -> Result<(), CassandraError> {
    if expected == actual {
        Ok(())
    } else {
        Err(CassandraError::Argument { expected, actual })
    }
}
