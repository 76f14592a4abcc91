//! Default dtype configuration
//!
//! `DTypeConfig` holds the default real and complex dtypes. `DTypeContext`
//! is a shared handle to one configuration: wrappers keep a clone of the
//! handle and read the defaults at call time, so a later
//! `set_default_dtype` is seen by every wrapper built from that context.
//!
//! # Example
//! ```
//! use geomdtype::{DType, DTypeContext};
//!
//! let ctx = DTypeContext::default();
//! assert_eq!(ctx.get_default_dtype(), DType::Float64);
//!
//! ctx.set_default_dtype(DType::Float32).unwrap();
//! assert_eq!(ctx.get_default_cdtype(), DType::Complex64);
//! ```

use crate::backend::ndarray::as_dtype;
use crate::dtype::DType;
use crate::error::{DTypeError, Result};
use log::info;
use std::env;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variable read by [`DTypeConfig::from_env`]
pub const DEFAULT_DTYPE_ENV: &str = "GEOMDTYPE_DEFAULT_DTYPE";

// ============================================================================
// DTypeConfig
// ============================================================================

/// Default real and complex dtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DTypeConfig {
    default_dtype: DType,
    default_cdtype: DType,
}

impl Default for DTypeConfig {
    fn default() -> Self {
        Self {
            default_dtype: DType::Float64,
            default_cdtype: DType::Complex128,
        }
    }
}

impl DTypeConfig {
    /// Configuration with `dtype` as default; the complex default follows it.
    pub fn new(dtype: DType) -> Result<Self> {
        match (dtype, dtype.complex_counterpart()) {
            (DType::Float32 | DType::Float64, Some(cdtype)) => Ok(Self {
                default_dtype: dtype,
                default_cdtype: cdtype,
            }),
            _ => Err(DTypeError::InvalidDefaultDType(dtype)),
        }
    }

    /// Read the default dtype from `GEOMDTYPE_DEFAULT_DTYPE`.
    ///
    /// Unset or blank falls back to float64.
    pub fn from_env() -> Result<Self> {
        match env::var(DEFAULT_DTYPE_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                let invalid = |err: DTypeError| DTypeError::InvalidEnv {
                    var: DEFAULT_DTYPE_ENV,
                    message: err.to_string(),
                };
                let dtype = as_dtype(value.trim()).map_err(invalid)?;
                Self::new(dtype).map_err(invalid)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn default_dtype(&self) -> DType {
        self.default_dtype
    }

    pub fn default_cdtype(&self) -> DType {
        self.default_cdtype
    }

    /// Default dtype for the given target
    pub fn default_for(&self, target: DefaultTarget) -> DType {
        match target {
            DefaultTarget::Real => self.default_dtype,
            DefaultTarget::Complex => self.default_cdtype,
        }
    }
}

/// Which default a missing dtype resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultTarget {
    #[default]
    Real,
    Complex,
}

// ============================================================================
// DTypeContext
// ============================================================================

/// Shared, thread-safe handle to a `DTypeConfig`
#[derive(Debug, Clone, Default)]
pub struct DTypeContext {
    config: Arc<RwLock<DTypeConfig>>,
}

impl DTypeContext {
    pub fn new(config: DTypeConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Context initialised from `GEOMDTYPE_DEFAULT_DTYPE`
    pub fn from_env() -> Result<Self> {
        DTypeConfig::from_env().map(Self::new)
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> DTypeConfig {
        // the config is two Copy fields, a poisoned lock still holds a valid value
        *self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_default_dtype(&self) -> DType {
        self.config().default_dtype()
    }

    pub fn get_default_cdtype(&self) -> DType {
        self.config().default_cdtype()
    }

    /// Resolve an optional dtype against the current default
    pub fn resolve(&self, dtype: Option<DType>, target: DefaultTarget) -> DType {
        dtype.unwrap_or_else(|| self.config().default_for(target))
    }

    /// Set the default dtype and the matching complex default.
    ///
    /// Returns the new default. The context is left unchanged on error.
    pub fn set_default_dtype(&self, dtype: DType) -> Result<DType> {
        let config = DTypeConfig::new(dtype)?;
        self.store(config);
        info!(
            "default dtype set to {} (complex: {})",
            config.default_dtype(),
            config.default_cdtype()
        );
        Ok(config.default_dtype())
    }

    /// Run `f` with a temporary default dtype.
    ///
    /// The previous configuration is restored when `f` returns or unwinds.
    /// The restore overwrites any `set_default_dtype` made on a clone of this
    /// context while `f` was running.
    pub fn scoped<F, R>(&self, dtype: DType, f: F) -> Result<R>
    where
        F: FnOnce() -> R,
    {
        let config = DTypeConfig::new(dtype)?;
        let _restore = RestoreOnDrop {
            ctx: self,
            previous: self.config(),
        };
        self.store(config);
        Ok(f())
    }

    fn store(&self, config: DTypeConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }
}

/// Puts a saved configuration back when dropped
struct RestoreOnDrop<'a> {
    ctx: &'a DTypeContext,
    previous: DTypeConfig,
}

impl Drop for RestoreOnDrop<'_> {
    fn drop(&mut self) {
        self.ctx.store(self.previous);
    }
}
