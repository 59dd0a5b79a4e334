use regex::Regex;

/// Derives the period token from a source file name.
///
/// The bulletin archives follow two naming conventions: monthly files carry
/// an underscore before a four-digit year-month run (`mb_2306.xlsx`), the
/// early series a bare four-digit run. Both encode the year with two
/// digits, so the century prefix is prepended to the match. The convention
/// in force for a batch is injected configuration, not a hardcoded regex.
#[derive(Clone, Debug)]
pub struct PeriodPattern {
    pattern: Regex,
    prefix: String,
}

impl PeriodPattern {
    /// Builds a custom convention. The first capture group is used when the
    /// pattern has one, otherwise the whole match; `prefix` is prepended to
    /// the derived token.
    pub fn new(pattern: &str, prefix: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            prefix: prefix.to_owned(),
        })
    }

    /// Monthly bulletin convention: first `_NNNN` run, century prefixed.
    pub fn underscored() -> Self {
        Self::new(r"_(\d{4})", "20").expect("hardcoded pattern")
    }

    /// Early series convention: first bare `NNNN` run, century prefixed.
    pub fn digit_run() -> Self {
        Self::new(r"\d{4}", "20").expect("hardcoded pattern")
    }

    /// Derives the period from a file name. Returns `None` when the name
    /// does not match the convention; callers decide the policy then.
    pub fn extract(&self, filename: &str) -> Option<String> {
        let captures = self.pattern.captures(filename)?;
        let token = captures.get(1).or_else(|| captures.get(0))?.as_str();
        Some(format!("{}{}", self.prefix, token))
    }
}
