//! Extraction configuration types.

/// How per-cell output is combined into the destination buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferPolicy {
    /// Append every non-trivial cell, offsetting indices by the running
    /// vertex count. The resulting mesh covers the whole field.
    #[default]
    Accumulate,
    /// Replace the buffers wholesale with each non-trivial cell, so only the
    /// last non-trivial cell in iteration order survives.
    OverwritePerCell,
}

/// What to do with a seed corner that has fewer than two candidate neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DegeneratePolicy {
    /// Fill each missing neighbour slot with corner 0 and emit the triangle.
    #[default]
    FallbackToCornerZero,
    /// Emit nothing for the seed; it is still marked processed.
    Skip,
}

/// Extraction parameters (immutable once handed to an extractor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionConfig {
    /// How cells are combined into the output mesh.
    pub buffer_policy: BufferPolicy,
    /// Handling of seeds with fewer than two neighbours.
    pub degenerate_policy: DegeneratePolicy,
}

impl ExtractionConfig {
    /// Create a new extraction configuration.
    #[inline]
    pub const fn new(buffer_policy: BufferPolicy, degenerate_policy: DegeneratePolicy) -> Self {
        Self {
            buffer_policy,
            degenerate_policy,
        }
    }

    /// The configuration that reproduces the legacy behaviour exactly:
    /// per-cell overwrite and corner-0 fallback.
    #[inline]
    pub const fn legacy() -> Self {
        Self::new(
            BufferPolicy::OverwritePerCell,
            DegeneratePolicy::FallbackToCornerZero,
        )
    }

    /// Set the buffer policy.
    #[inline]
    pub const fn with_buffer_policy(mut self, policy: BufferPolicy) -> Self {
        self.buffer_policy = policy;
        self
    }

    /// Set the degenerate-cluster policy.
    #[inline]
    pub const fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }
}
