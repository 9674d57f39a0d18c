//! Parser vocabulary and selection.
//!
//! Identifiers are fixed, case-sensitive tokens. Unknown identifiers are
//! rejected here, at selection time, so the processing collaborator only
//! ever sees a validated set.

use std::fmt;

use granskare_config::RunOptions;

use crate::error::AuditError;

/// One supported analysis parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserKind {
    ArgusFlow,
    P0f,
    Prads,
    SnortAppId,
    SuricataHttp,
    Httpry,
    Tcpdstat,
    SuricataEve,
    SnortIds,
    Bro,
    Tcpflow,
}

impl ParserKind {
    /// The identifier accepted on the command line and in config files.
    pub const fn token(&self) -> &'static str {
        match self {
            ParserKind::ArgusFlow => "argusFlow",
            ParserKind::P0f => "p0f",
            ParserKind::Prads => "prads",
            ParserKind::SnortAppId => "snortAppId",
            ParserKind::SuricataHttp => "suricataHttp",
            ParserKind::Httpry => "httpry",
            ParserKind::Tcpdstat => "tcpdstat",
            ParserKind::SuricataEve => "suricataEve",
            ParserKind::SnortIds => "snortIds",
            ParserKind::Bro => "bro",
            ParserKind::Tcpflow => "tcpflow",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "argusFlow" => Some(ParserKind::ArgusFlow),
            "p0f" => Some(ParserKind::P0f),
            "prads" => Some(ParserKind::Prads),
            "snortAppId" => Some(ParserKind::SnortAppId),
            "suricataHttp" => Some(ParserKind::SuricataHttp),
            "httpry" => Some(ParserKind::Httpry),
            "tcpdstat" => Some(ParserKind::Tcpdstat),
            "suricataEve" => Some(ParserKind::SuricataEve),
            "snortIds" => Some(ParserKind::SnortIds),
            "bro" => Some(ParserKind::Bro),
            "tcpflow" => Some(ParserKind::Tcpflow),
            _ => None,
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The documented default set, in execution order.
pub const DEFAULT_PARSERS: [ParserKind; 10] = [
    ParserKind::ArgusFlow,
    ParserKind::P0f,
    ParserKind::Prads,
    ParserKind::SnortAppId,
    ParserKind::SuricataHttp,
    ParserKind::Httpry,
    ParserKind::Tcpdstat,
    ParserKind::SuricataEve,
    ParserKind::SnortIds,
    ParserKind::Bro,
];

/// Ordered, non-empty set of parsers for one run.
///
/// Insertion order is preserved for deterministic execution; duplicates
/// collapse to the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserSet {
    parsers: Vec<ParserKind>,
}

impl ParserSet {
    /// Resolves the operative parser set from the run options.
    pub fn select(options: &RunOptions) -> Result<Self, AuditError> {
        match options.parsers.as_deref() {
            Some(list) => Self::from_list(list),
            None => Ok(Self::default_set()),
        }
    }

    pub fn default_set() -> Self {
        Self {
            parsers: DEFAULT_PARSERS.to_vec(),
        }
    }

    /// Parses a comma-separated identifier list. Tokens are trimmed; empty
    /// tokens are skipped; unknown tokens are rejected.
    pub fn from_list(list: &str) -> Result<Self, AuditError> {
        let mut parsers = Vec::new();
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let kind = ParserKind::from_token(token)
                .ok_or_else(|| AuditError::UnknownParser(token.to_string()))?;
            if !parsers.contains(&kind) {
                parsers.push(kind);
            }
        }
        if parsers.is_empty() {
            return Err(AuditError::EmptyParserSet);
        }
        Ok(Self { parsers })
    }

    pub fn iter(&self) -> impl Iterator<Item = ParserKind> + '_ {
        self.parsers.iter().copied()
    }

    pub fn as_slice(&self) -> &[ParserKind] {
        &self.parsers
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Display for ParserSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.parsers.iter().map(|p| p.token()).collect();
        f.write_str(&tokens.join(","))
    }
}
