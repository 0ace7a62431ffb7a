//! Allocation Failure Handling
//!
//! Sample buffers and case names are provisioned with `try_reserve_exact` so
//! exhaustion surfaces as an [`AllocationError`] instead of the global
//! allocator's abort. The engine treats every such error as fatal.

use std::collections::TryReserveError;
use thiserror::Error;

/// Resource exhaustion while provisioning engine storage
#[derive(Debug, Clone, Error)]
pub enum AllocationError {
    /// The sample buffer for a phase could not be reserved
    #[error("failed to reserve {requested} sample slots: {source}")]
    Samples {
        /// Requested number of samples
        requested: u64,
        /// Underlying reservation error
        #[source]
        source: TryReserveError,
    },

    /// The requested sample count does not fit in memory on this platform
    #[error("sample count {requested} exceeds the addressable range")]
    SampleCountOverflow {
        /// Requested number of samples
        requested: u64,
    },

    /// A case name buffer could not be allocated
    #[error("failed to allocate a {len}-byte case name: {source}")]
    Name {
        /// Name length in bytes
        len: usize,
        /// Underlying reservation error
        #[source]
        source: TryReserveError,
    },

    /// The registry could not grow to hold another case
    #[error("failed to grow the case registry: {source}")]
    Registry {
        /// Underlying reservation error
        #[source]
        source: TryReserveError,
    },
}

/// Terminate the process after an allocation failure.
///
/// No report is flushed; sinks only ever see complete phases.
pub fn terminate(err: &AllocationError) -> ! {
    tracing::error!(error = %err, "allocation failure, terminating");
    std::process::abort()
}

/// Copy `name` into a freshly reserved buffer
pub(crate) fn try_clone_name(name: &str) -> Result<String, AllocationError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(name.len())
        .map_err(|source| AllocationError::Name {
            len: name.len(),
            source,
        })?;
    owned.push_str(name);
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_clone_name() {
        let name = try_clone_name("factorial_100").unwrap();
        assert_eq!(name, "factorial_100");
    }

    #[test]
    fn test_error_messages() {
        let err = AllocationError::SampleCountOverflow { requested: 7 };
        assert_eq!(
            err.to_string(),
            "sample count 7 exceeds the addressable range"
        );
    }
}
