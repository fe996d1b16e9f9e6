//! Build-time configuration: a plain struct with `Default` plus chained
//! setters that consume and return `self`.

/// Tunable knobs for [`SuccinctAlignment::build`](crate::alignment::SuccinctAlignment::build)
/// and [`ColumnBuilder`](crate::builder::ColumnBuilder).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildConfig {
    /// Number of columns built per streaming pass over the row source.
    pub batch_width: usize,
    /// When set, any symbol outside `ACGTUN-` (after upper-casing) is
    /// rejected with [`Error::SymbolNonCanonical`](crate::error::Error::SymbolNonCanonical)
    /// instead of being stored verbatim.
    pub strict_alphabet: bool,
}

impl BuildConfig {
    pub const DEFAULT_BATCH_WIDTH: usize = 1000;

    pub fn batch_width(mut self, width: usize) -> Self {
        self.batch_width = width;
        self
    }

    pub fn strict_alphabet(mut self, strict: bool) -> Self {
        self.strict_alphabet = strict;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            batch_width: Self::DEFAULT_BATCH_WIDTH,
            strict_alphabet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_batch_width() {
        let config = BuildConfig::default();
        assert_eq!(config.batch_width, 1000);
        assert!(!config.strict_alphabet);
    }

    #[test]
    fn chained_setters_compose() {
        let config = BuildConfig::default().batch_width(7).strict_alphabet(true);
        assert_eq!(config.batch_width, 7);
        assert!(config.strict_alphabet);
    }
}
