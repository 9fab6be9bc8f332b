//! Run-wide matcher configuration, constructible directly from parsed CLI
//! flags via [`MatcherConfig::from_args`].

/// Permutation explosion guard: 2^20 haploid permutations per gene.
pub const DEFAULT_MAX_PERMUTATIONS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Keep only the maximum-score tier (default).
    TopMatch,
    /// Keep every diplotype enumerated, in ranked order.
    AllMatches,
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::TopMatch
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    pub output_mode: OutputMode,
    pub enable_combinations: bool,
    pub max_permutations: usize,
    pub require_phased: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            output_mode: OutputMode::TopMatch,
            enable_combinations: true,
            max_permutations: DEFAULT_MAX_PERMUTATIONS,
            require_phased: false,
        }
    }
}

impl MatcherConfig {
    pub fn from_args(args: &clap::ArgMatches) -> MatcherConfig {
        let output_mode = if args.get_flag("all-matches") {
            OutputMode::AllMatches
        } else {
            OutputMode::TopMatch
        };
        let enable_combinations = !args.get_flag("no-combinations");
        let max_permutations = args
            .get_one::<String>("max-permutations")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_PERMUTATIONS);
        let require_phased = args.get_flag("require-phased");

        MatcherConfig {
            output_mode,
            enable_combinations,
            max_permutations,
            require_phased,
        }
    }
}
