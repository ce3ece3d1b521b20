//! # Configuration
//!
//! Field limits, tip policy and engine tuning. Every value has a default;
//! `from_env` overrides individual values from `SLICK_*` variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Fixed tip, 0.002 SOL in lamports.
pub const DEFAULT_TIP_LAMPORTS: u64 = 2_000_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialConfig {
    pub max_display_name_len: usize,
    pub max_avatar_uri_len: usize,
    pub max_community_name_len: usize,
    pub max_description_uri_len: usize,
    pub max_content_uri_len: usize,
    pub max_pseudonym_len: usize,
    pub max_question_uri_len: usize,

    pub min_poll_options: usize,
    pub max_poll_options: usize,

    /// When set, every tip must be exactly this amount.
    pub fixed_tip_lamports: Option<u64>,

    /// Re-executions allowed when a commit finds its reads went stale.
    pub max_commit_attempts: u32,

    /// Scans decoding more records than this decode on the rayon pool.
    pub parallel_scan_threshold: usize,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            max_display_name_len: 50,
            max_avatar_uri_len: 200,
            max_community_name_len: 50,
            max_description_uri_len: 200,
            max_content_uri_len: 200,
            max_pseudonym_len: 50,
            max_question_uri_len: 200,
            min_poll_options: 2,
            max_poll_options: 6,
            fixed_tip_lamports: Some(DEFAULT_TIP_LAMPORTS),
            max_commit_attempts: 8,
            parallel_scan_threshold: 1024,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl SocialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by environment variables.
    ///
    /// - `SLICK_MAX_POLL_OPTIONS`
    /// - `SLICK_FIXED_TIP_LAMPORTS` (`0` accepts any positive amount)
    /// - `SLICK_MAX_COMMIT_ATTEMPTS`
    /// - `SLICK_PARALLEL_SCAN_THRESHOLD`
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_poll_options: env_parse("SLICK_MAX_POLL_OPTIONS")
                .unwrap_or(defaults.max_poll_options),
            fixed_tip_lamports: match env_parse::<u64>("SLICK_FIXED_TIP_LAMPORTS") {
                Some(0) => None,
                Some(amount) => Some(amount),
                None => defaults.fixed_tip_lamports,
            },
            max_commit_attempts: env_parse("SLICK_MAX_COMMIT_ATTEMPTS")
                .unwrap_or(defaults.max_commit_attempts)
                .max(1),
            parallel_scan_threshold: env_parse("SLICK_PARALLEL_SCAN_THRESHOLD")
                .unwrap_or(defaults.parallel_scan_threshold),
            ..defaults
        }
    }

    pub fn with_max_poll_options(mut self, max: usize) -> Self {
        self.max_poll_options = max;
        self
    }

    /// `None` accepts any positive amount.
    pub fn with_fixed_tip(mut self, lamports: Option<u64>) -> Self {
        self.fixed_tip_lamports = lamports;
        self
    }

    pub fn with_max_commit_attempts(mut self, attempts: u32) -> Self {
        self.max_commit_attempts = attempts.max(1);
        self
    }

    pub fn with_parallel_scan_threshold(mut self, threshold: usize) -> Self {
        self.parallel_scan_threshold = threshold;
        self
    }
}
