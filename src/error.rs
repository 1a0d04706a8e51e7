use crate::parse::LiteralError;

/// Error type for SQL value construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Text that does not form a valid literal of the named type.
    #[error("Cannot parse \"{kind}\" constant \"{text}\"")]
    InvalidDateTimeLiteral {
        /// SQL type keyword, e.g. `"DATE"`
        kind: &'static str,
        /// The offending input, as given
        text: String,
        /// The lower-level reason, if any
        #[source]
        source: Option<LiteralError>,
    },
}

impl ValueError {
    pub(crate) fn invalid_literal(
        kind: &'static str,
        text: &str,
        source: Option<LiteralError>,
    ) -> Self {
        Self::InvalidDateTimeLiteral {
            kind,
            text: text.to_owned(),
            source,
        }
    }

    /// Type keyword of the literal that failed
    pub const fn kind(&self) -> &'static str {
        match *self {
            Self::InvalidDateTimeLiteral { kind, .. } => kind,
        }
    }

    /// Source text of the literal that failed
    pub fn text(&self) -> &str {
        match self {
            Self::InvalidDateTimeLiteral { text, .. } => text,
        }
    }
}
