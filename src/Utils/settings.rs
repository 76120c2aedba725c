//! Settings of the algebra engine, read from a TOML document:
//! ```toml
//! [algebra]
//! strict_coercion = false
//! loglevel = "debug"
//! ```
use crate::Utils::logger::{init_logger, level_filter};
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::exact_field::{QQ, coerce_f64};
use crate::symbolic::sparse_polynomial::SparsePolynomial;
use crate::symbolic::sparse_vector::SparseVector;
use crate::symbolic::variables::VariableList;
use toml::{Table, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgebraSettings {
    /// coercion failures are errors (true) or fall back to one with a warning (false)
    pub strict_coercion: bool,
    pub loglevel: Option<String>,
}

impl Default for AlgebraSettings {
    fn default() -> Self {
        AlgebraSettings {
            strict_coercion: true,
            loglevel: Some("info".to_string()),
        }
    }
}

impl AlgebraSettings {
    /// Reads the optional `[algebra]` table; missing keys keep their defaults.
    pub fn from_toml_str(document: &str) -> AlgebraResult<Self> {
        let table: Table = toml::from_str(document)
            .map_err(|e| AlgebraError::parse(document, e.message().to_string()))?;
        let mut settings = AlgebraSettings::default();
        let Some(section) = table.get("algebra") else {
            return Ok(settings);
        };
        let section = section.as_table().ok_or_else(|| {
            AlgebraError::invalid_argument("[algebra] must be a table")
        })?;
        for (key, value) in section {
            match (key.as_str(), value) {
                ("strict_coercion", Value::Boolean(flag)) => settings.strict_coercion = *flag,
                ("loglevel", Value::String(level)) => {
                    level_filter(Some(level.as_str()))?;
                    settings.loglevel = Some(level.clone());
                }
                (key, value) => {
                    return Err(AlgebraError::invalid_argument(format!(
                        "unexpected setting {} = {}",
                        key, value
                    )));
                }
            }
        }
        Ok(settings)
    }

    pub fn init_logging(&self) -> AlgebraResult<()> {
        init_logger(self.loglevel.as_deref())
    }

    /// Exact value of a float under the configured coercion policy.
    pub fn coerce(&self, value: f64) -> AlgebraResult<QQ> {
        coerce_f64(value, self.strict_coercion)
    }

    pub fn vector_from_f64(&self, values: &[f64]) -> AlgebraResult<SparseVector> {
        SparseVector::from_f64(values, self.strict_coercion)
    }

    /// Linear form `sum values[i] * x_i` with float coefficients coerced under this policy.
    pub fn linear_form_from_f64(
        &self,
        values: &[f64],
        varnames: impl Into<VariableList>,
    ) -> AlgebraResult<SparsePolynomial> {
        SparsePolynomial::from_f64_vector(values, varnames, self.strict_coercion)
    }
}
