//! Multi-source pass driver

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{OrchestratorError, Result};
use crate::groupings::{run_iana, run_sdo, run_vendor};
use crate::pass::{PassContext, PassReport};

/// Roots handed to one pass
#[derive(Debug, Clone, Default)]
pub struct PassInputs {
    pub sdo_dirs: Vec<PathBuf>,
    pub iana_dirs: Vec<PathBuf>,
    pub vendor_dirs: Vec<PathBuf>,
}

impl PassInputs {
    pub fn is_empty(&self) -> bool {
        self.sdo_dirs.is_empty() && self.iana_dirs.is_empty() && self.vendor_dirs.is_empty()
    }

    fn roots(&self) -> impl Iterator<Item = &PathBuf> {
        self.sdo_dirs
            .iter()
            .chain(self.iana_dirs.iter())
            .chain(self.vendor_dirs.iter())
    }
}

pub struct CatalogOrchestrator {
    ctx: PassContext,
}

impl CatalogOrchestrator {
    pub fn new(ctx: PassContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &PassContext {
        &self.ctx
    }

    /// Run every grouping, then persist. A missing root is checked up front and
    /// ends the pass before anything is processed.
    pub fn run(&self, inputs: &PassInputs) -> Result<PassReport> {
        if let Some(missing) = inputs.roots().find(|root| !root.exists()) {
            return Err(OrchestratorError::RootMissing(missing.clone()));
        }
        info!(
            sdo = inputs.sdo_dirs.len(),
            iana = inputs.iana_dirs.len(),
            vendor = inputs.vendor_dirs.len(),
            "Starting catalog pass"
        );

        for dir in &inputs.sdo_dirs {
            self.guard(run_sdo(&self.ctx, dir).map(|_| ()))?;
        }
        for dir in &inputs.iana_dirs {
            self.guard(run_iana(&self.ctx, dir).map(|_| ()))?;
        }
        for dir in &inputs.vendor_dirs {
            self.guard(run_vendor(&self.ctx, dir).map(|_| ()))?;
        }

        self.ctx.finish()
    }

    /// Fatal errors propagate; anything else is logged and the run continues
    fn guard(&self, result: Result<()>) -> Result<()> {
        match result {
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!(error = %err, "Grouping failed");
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }
}
