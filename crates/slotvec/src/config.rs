//! Growth policy configuration.

use slotvec_core::PolicyError;

/// Rule for expanding an exhausted buffer.
///
/// When a container needs more slots than it has reserved, the new
/// capacity is `max(required, min_capacity, factor * capacity)`. The
/// default (`min_capacity = 1`, `factor = 2`) doubles the buffer, which
/// keeps the amortised cost of `push_back` constant. Validated at
/// construction; a container's policy never changes after creation.
///
/// The fields are private, so every policy goes through
/// [`GrowthPolicy::new`] or [`Default`]:
///
/// ```compile_fail
/// use slotvec::GrowthPolicy;
///
/// let policy = GrowthPolicy { min_capacity: 0, factor: 1 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacity reserved by the first allocation. At least 1.
    min_capacity: usize,
    /// Multiplier applied to the current capacity on growth. At least 2,
    /// otherwise repeated growth would degrade `push_back` to linear cost
    /// per call.
    factor: usize,
}

impl GrowthPolicy {
    /// Default minimum capacity.
    pub const DEFAULT_MIN_CAPACITY: usize = 1;

    /// Default growth factor.
    pub const DEFAULT_FACTOR: usize = 2;

    /// Create a validated growth policy.
    pub fn new(min_capacity: usize, factor: usize) -> Result<Self, PolicyError> {
        if min_capacity == 0 {
            return Err(PolicyError::InvalidMinCapacity { min_capacity });
        }
        if factor < 2 {
            return Err(PolicyError::InvalidFactor { factor });
        }
        Ok(Self {
            min_capacity,
            factor,
        })
    }

    /// Capacity reserved by the first allocation.
    ///
    /// Default: 1.
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Multiplier applied to the current capacity on growth.
    ///
    /// Default: 2.
    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Capacity to grow to from `current` so that at least `required`
    /// slots fit.
    ///
    /// Falls back to exactly `required` when `current * factor` would
    /// overflow `usize`.
    pub fn next_capacity(&self, current: usize, required: usize) -> usize {
        let scaled = current.checked_mul(self.factor).unwrap_or(required);
        scaled.max(self.min_capacity).max(required)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            factor: Self::DEFAULT_FACTOR,
        }
    }
}
